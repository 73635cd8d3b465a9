use std::fs::create_dir_all;
use std::io::Write;
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::alphabet::Letter;
use crate::error::SignsError;

/// One letter's worth of work, e.g. drawing a placeholder or downloading a photo.
pub trait UnitOfWork {
    /// printed once before the first letter
    fn banner(&self) -> &str;
    /// printed in front of each letter, e.g. "Downloading"
    fn verb(&self) -> &str;
    fn produce(&mut self, letter: Letter, dest: &Path) -> anyhow::Result<()>;
}

#[derive(Debug)]
pub struct ItemOutcome {
    pub letter: Letter,
    pub path: PathBuf,
    pub result: anyhow::Result<()>,
}

impl ItemOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub struct BatchReport {
    pub out_dir: PathBuf,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn failed_letters(&self) -> Vec<Letter> {
        self.failures().map(|o| o.letter).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Runs `work` once per letter, in order. A failing letter is reported and
/// skipped; only failing to create `out_dir` (or to write to `console`) stops
/// the run.
pub fn run_batch<I, U, W>(
    letters: I,
    out_dir: &Path,
    work: &mut U,
    console: &mut W,
) -> anyhow::Result<BatchReport>
where
    I: IntoIterator<Item = Letter>,
    U: UnitOfWork + ?Sized,
    W: Write,
{
    create_dir_all(out_dir).map_err(|source| SignsError::OutputDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    writeln!(console, "{}", work.banner())?;

    let mut outcomes = Vec::new();
    for letter in letters {
        let path = out_dir.join(letter.file_name());
        write!(console, "{} {letter}... ", work.verb())?;
        console.flush()?;

        let result = work.produce(letter, &path);
        // finish the status line before logging anything
        match &result {
            Ok(()) => {
                writeln!(console, "✓")?;
                tracing::debug!(%letter, path = %path.display(), "wrote sign");
            }
            Err(e) => {
                writeln!(console, "✗ ({e:#})")?;
                tracing::debug!(%letter, error = %format!("{e:#}"), "sign failed");
            }
        }
        outcomes.push(ItemOutcome {
            letter,
            path,
            result,
        });
    }

    let report = BatchReport {
        out_dir: out_dir.to_path_buf(),
        outcomes,
    };
    writeln!(
        console,
        "\nDone! {} of {} images saved to '{}'",
        report.succeeded(),
        report.total(),
        out_dir.display()
    )?;
    if !report.is_complete() {
        writeln!(
            console,
            "Failed: {}",
            report.failed_letters().iter().join(", ")
        )?;
    }
    Ok(report)
}
