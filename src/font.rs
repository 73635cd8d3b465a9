use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontVec;

use crate::error::SignsError;

// bold faces first, the letter reads better on a small tile
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial_Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn system_candidates() -> Vec<PathBuf> {
    SYSTEM_FONTS.iter().map(PathBuf::from).collect()
}

/// Loads the font used to draw letters: `explicit` if given, otherwise the
/// first readable system candidate.
pub fn load_font(explicit: Option<&Path>) -> Result<FontVec, SignsError> {
    match explicit {
        Some(path) => read_font(path),
        None => load_first(&system_candidates()),
    }
}

pub fn load_first(candidates: &[PathBuf]) -> Result<FontVec, SignsError> {
    for path in candidates.iter().filter(|p| p.is_file()) {
        match read_font(path) {
            Ok(font) => return Ok(font),
            Err(e) => tracing::debug!("skipping font candidate: {e}"),
        }
    }
    Err(SignsError::MissingFont {
        searched: candidates.to_vec(),
    })
}

fn read_font(path: &Path) -> Result<FontVec, SignsError> {
    let invalid = |reason: String| SignsError::InvalidFont {
        path: path.to_path_buf(),
        reason,
    };
    let data = fs::read(path).map_err(|e| invalid(e.to_string()))?;
    let font = FontVec::try_from_vec(data).map_err(|e| invalid(e.to_string()))?;
    tracing::info!(path = %path.display(), "loaded font");
    Ok(font)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn nothing_found_lists_searched_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let candidates = vec![tmp.path().join("a.ttf"), tmp.path().join("b.ttf")];

        let err = load_first(&candidates).err().unwrap();

        assert_matches!(&err, SignsError::MissingFont { searched } if searched == &candidates);
        assert!(err.is_environment_fatal());
    }

    #[test]
    fn garbage_candidates_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let junk = tmp.path().join("junk.ttf");
        fs::write(&junk, b"definitely not a font").unwrap();

        assert_matches!(load_first(&[junk]).err(), Some(SignsError::MissingFont { .. }));
    }

    #[test]
    fn explicit_path_errors_are_not_masked() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.ttf");

        assert_matches!(
            load_font(Some(&missing)).err(),
            Some(SignsError::InvalidFont { path, .. }) if path == missing
        );
    }
}
