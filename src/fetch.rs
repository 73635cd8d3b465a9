use std::fmt::{self, Display};
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use bytes::Bytes;
use image::{ImageFormat, ImageReader};
use reqwest::blocking::Client;

use crate::alphabet::Letter;
use crate::batch::UnitOfWork;
use crate::error::SignsError;

pub const DEFAULT_TEMPLATE: &str = "https://www.lifeprint.com/asl101/images-signs/{letter}.jpg";
const PLACEHOLDER: &str = "{letter}";

/// A url with a `{letter}` placeholder, filled in with the lowercase letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn url_for(&self, letter: Letter) -> String {
        self.0.replace(PLACEHOLDER, &letter.stem().to_string())
    }
}

impl Default for UrlTemplate {
    fn default() -> Self {
        Self(DEFAULT_TEMPLATE.to_string())
    }
}

impl FromStr for UrlTemplate {
    type Err = SignsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(PLACEHOLDER) {
            Ok(Self(s.to_string()))
        } else {
            Err(SignsError::InvalidTemplate(s.to_string()))
        }
    }
}

impl Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait Fetch {
    fn fetch(&self, url: &str) -> anyhow::Result<Bytes>;
}

impl Fetch for Client {
    fn fetch(&self, url: &str) -> anyhow::Result<Bytes> {
        let resp = self.get(url).send()?;
        if !resp.status().is_success() {
            return Err(SignsError::HttpStatus {
                url: url.to_string(),
                status: resp.status(),
            }
            .into());
        }
        Ok(resp.bytes()?)
    }
}

pub fn build_client(timeout: Duration) -> anyhow::Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub struct Downloader<F> {
    fetcher: F,
    template: UrlTemplate,
}

impl<F: Fetch> Downloader<F> {
    pub fn new(fetcher: F, template: UrlTemplate) -> Self {
        Self { fetcher, template }
    }
}

impl<F: Fetch> UnitOfWork for Downloader<F> {
    fn banner(&self) -> &str {
        "Downloading ASL alphabet images..."
    }

    fn verb(&self) -> &str {
        "Downloading"
    }

    /// Whatever format the server sends, the file on disk is a PNG.
    fn produce(&mut self, letter: Letter, dest: &Path) -> anyhow::Result<()> {
        let url = self.template.url_for(letter);
        tracing::debug!(%url, "fetching");
        let body = self.fetcher.fetch(&url)?;
        let image = ImageReader::new(Cursor::new(body))
            .with_guessed_format()?
            .decode()
            .map_err(|e| anyhow::anyhow!("{url} is not a readable image: {e}"))?;
        image.save_with_format(dest, ImageFormat::Png)?;
        Ok(())
    }
}
