mod alphabet;
mod batch;
mod error;
mod fetch;
mod font;
mod placeholder;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use image::Rgb;
use tracing_subscriber::EnvFilter;

use crate::alphabet::Letter;
use crate::batch::{run_batch, BatchReport, UnitOfWork};
use crate::error::SignsError;
use crate::fetch::{build_client, Downloader, UrlTemplate, DEFAULT_TEMPLATE};
use crate::placeholder::{parse_rgb, PlaceholderGenerator, PlaceholderStyle, MAX_SIDE};
use crate::report::RunRecord;

/// Fills a folder with one PNG per letter of the ASL alphabet.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    operation: Operation,
}

#[derive(Subcommand, Debug)]
enum Operation {
    /// Draw a placeholder tile for every letter
    Generate(GenerateArgs),
    /// Download a photo for every letter
    Download(DownloadArgs),
}

#[derive(Args, Debug)]
struct Output {
    #[arg(long, env = "SIGNS_DIR", default_value = "signs")]
    out_dir: PathBuf,

    /// Also write a json record of the run here
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    output: Output,

    /// TrueType/OpenType font for the letters; common system fonts are tried otherwise
    #[arg(long, env = "SIGNS_FONT")]
    font: Option<PathBuf>,

    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(1..=MAX_SIDE as i64))]
    width: u32,

    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..=MAX_SIDE as i64))]
    height: u32,

    #[arg(long, default_value = "#4a90e2", value_parser = parse_rgb)]
    background: Rgb<u8>,

    #[arg(long, default_value = "#ffffff", value_parser = parse_rgb)]
    foreground: Rgb<u8>,
}

#[derive(Args, Debug)]
struct DownloadArgs {
    #[command(flatten)]
    output: Output,

    /// `{letter}` is replaced with the lowercase letter
    #[arg(long, env = "SIGNS_URL_TEMPLATE", default_value = DEFAULT_TEMPLATE)]
    url_template: String,

    /// per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.operation) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<SignsError>() {
                Some(se) if se.is_environment_fatal() => {
                    eprintln!("Cannot start: {e:#}");
                    if let Some(hint) = se.remediation() {
                        eprintln!("\n{hint}");
                    }
                }
                _ => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Item failures are reported by the batch itself; an `Err` here means the
/// run could not start.
fn run(op: Operation) -> anyhow::Result<BatchReport> {
    match op {
        Operation::Generate(args) => generate(args),
        Operation::Download(args) => download(args),
    }
}

fn generate(args: GenerateArgs) -> anyhow::Result<BatchReport> {
    let font = font::load_font(args.font.as_deref())?;
    let style = PlaceholderStyle {
        background: args.background,
        foreground: args.foreground,
        ..PlaceholderStyle::new(args.width, args.height)
    };
    let mut generator = PlaceholderGenerator::new(font, style);
    let report = process("generate", &args.output, &mut generator)?;

    if report.succeeded() > 0 {
        println!("\nTo use real ASL photos:");
        println!("1. Run `asl_signs download`, or download ASL images from https://www.startasl.com/american-sign-language-alphabet/");
        println!(
            "2. Save them as a.png, b.png, c.png, etc. in the '{}' folder",
            args.output.out_dir.display()
        );
        println!("3. Refresh your browser");
    }
    Ok(report)
}

fn download(args: DownloadArgs) -> anyhow::Result<BatchReport> {
    let template: UrlTemplate = args.url_template.parse()?;
    tracing::info!(%template, "downloading signs");
    let client = build_client(Duration::from_secs(args.timeout))?;
    let mut downloader = Downloader::new(client, template);
    process("download", &args.output, &mut downloader)
}

fn process(
    operation: &str,
    output: &Output,
    work: &mut dyn UnitOfWork,
) -> anyhow::Result<BatchReport> {
    let stdout = std::io::stdout();
    let report = run_batch(Letter::all(), &output.out_dir, work, &mut stdout.lock())?;
    if let Some(path) = &output.report {
        write_record(operation, &report, path)?;
    }
    Ok(report)
}

fn write_record(operation: &str, report: &BatchReport, path: &Path) -> anyhow::Result<()> {
    RunRecord::new(operation, report).write(path)?;
    println!("Run record written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_beyond_the_operation_are_needed() {
        let cli = Cli::try_parse_from(["asl_signs", "download"]).unwrap();
        match cli.operation {
            Operation::Download(args) => {
                assert_eq!(args.timeout, 30);
                assert!(args.output.report.is_none());
                // SIGNS_DIR / SIGNS_URL_TEMPLATE may be set in the environment
                if std::env::var_os("SIGNS_URL_TEMPLATE").is_none() {
                    assert_eq!(args.url_template, DEFAULT_TEMPLATE);
                }
                if std::env::var_os("SIGNS_DIR").is_none() {
                    assert_eq!(args.output.out_dir, PathBuf::from("signs"));
                }
            }
            other => panic!("parsed {other:?}"),
        }
    }

    #[test]
    fn generate_parses_colours_and_size() {
        let cli = Cli::try_parse_from([
            "asl_signs",
            "generate",
            "--width",
            "150",
            "--height",
            "200",
            "--background",
            "000000",
            "--out-dir",
            "public/signs",
        ])
        .unwrap();
        match cli.operation {
            Operation::Generate(args) => {
                assert_eq!((args.width, args.height), (150, 200));
                assert_eq!(args.background, Rgb([0, 0, 0]));
                assert_eq!(args.foreground, Rgb([255, 255, 255]));
                assert_eq!(args.output.out_dir, PathBuf::from("public/signs"));
            }
            other => panic!("parsed {other:?}"),
        }
    }

    #[test]
    fn tile_sides_are_bounded() {
        let parse =
            |flag: &str, value: &str| Cli::try_parse_from(["asl_signs", "generate", flag, value]);

        assert!(parse("--width", "0").is_err());
        assert!(parse("--height", "0").is_err());
        assert!(parse("--height", "2000000000").is_err());
        assert!(parse("--width", "4097").is_err());
        assert!(parse("--width", "4096").is_ok());
        assert!(parse("--height", "1").is_ok());
    }

    #[test]
    fn bad_colour_is_a_usage_error() {
        assert!(Cli::try_parse_from(["asl_signs", "generate", "--background", "blue"]).is_err());
    }

    #[test]
    fn bad_template_stops_before_any_work() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("signs");
        let err = download(DownloadArgs {
            output: Output {
                out_dir: out.clone(),
                report: None,
            },
            url_template: "https://example.com/a.jpg".to_string(),
            timeout: 1,
        })
        .unwrap_err();

        let signs_err = err.downcast_ref::<SignsError>().unwrap();
        assert!(signs_err.is_environment_fatal());
        assert!(signs_err.remediation().is_some());
        assert!(!out.exists());
    }
}
