use std::path::PathBuf;

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum SignsError {
    #[error("no usable font found (searched {} locations)", searched.len())]
    MissingFont { searched: Vec<PathBuf> },

    #[error("could not load font {path:?}: {reason}")]
    InvalidFont { path: PathBuf, reason: String },

    #[error("could not create output directory {path:?}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("url template `{0}` has no {{letter}} placeholder")]
    InvalidTemplate(String),

    #[error("{url} returned {status}")]
    HttpStatus { url: String, status: StatusCode },
}

impl SignsError {
    /// Errors that stop the batch before any letter is attempted.
    pub fn is_environment_fatal(&self) -> bool {
        !matches!(self, SignsError::HttpStatus { .. })
    }

    pub fn remediation(&self) -> Option<String> {
        match self {
            SignsError::MissingFont { searched } => {
                let mut hint = String::from(
                    "Install a TrueType font (e.g. `apt install fonts-dejavu-core`) \
                     or point to one with --font <path> / SIGNS_FONT.\nSearched:",
                );
                for p in searched {
                    hint.push_str(&format!("\n  {}", p.display()));
                }
                Some(hint)
            }
            SignsError::InvalidFont { .. } => {
                Some("Pass a .ttf or .otf file with --font <path>.".to_string())
            }
            SignsError::OutputDir { .. } => {
                Some("Choose a writable directory with --out-dir <dir>.".to_string())
            }
            SignsError::InvalidTemplate(_) => Some(
                "Use a template such as https://example.com/signs/{letter}.jpg".to_string(),
            ),
            SignsError::HttpStatus { .. } => None,
        }
    }
}
