//! Generated-file marker detection.
//!
//! Every generated artifact carries a "Code generated by ...; DO NOT EDIT."
//! line as its first or second line. A destination file without it is
//! presumed hand-edited and is never overwritten unless forced.

use log::debug;
use regex::bytes::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

/// Matches the marker in any of the supported comment syntaxes:
/// line comments (`#`, `//`, `--`, `;`), block comments (`/*`, `<!--`,
/// `{{/*`) and the JSON pseudo-comment (`"_comment": "..."`).
///
/// Lines are matched as bytes, a file in a legacy encoding simply has no
/// marker.
static GENERATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(#|//|--|;|/\*|<!--|\{\{-?\s*/\*|\{?\s*"_comment"\s*:\s*")\s*Code generated by [^;]+; DO NOT EDIT\."#,
    )
    .expect("generated marker regex is valid")
});

/// Whether a single line is a generated marker.
pub fn is_marker<L: AsRef<[u8]>>(line: L) -> bool {
    GENERATED.is_match(line.as_ref())
}

/// Returns the marker line to write for a file, using `comment` as the
/// line comment prefix.
pub fn marker_line(comment: &str, generator: &str) -> String {
    format!("{comment} Code generated by {generator}; DO NOT EDIT.")
}

/// Whether the destination file may be (re)generated.
///
/// That is the case when the file does not exist, is empty or cannot be
/// read, or when its first or second line is a generated marker. A
/// directory standing where the file should be is never eligible.
pub fn is_generated<P: AsRef<Path>>(dest: P) -> bool {
    let dest = dest.as_ref();
    if dest.is_dir() {
        debug!("'{}' is a directory, leaving it alone", dest.display());
        return false;
    }
    let file = match File::open(dest) {
        Ok(file) => file,
        Err(_) => return true,
    };

    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    for index in 0..2 {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => return index == 0,
            Ok(_) if is_marker(&line) => return true,
            Ok(_) => {}
            Err(e) => {
                debug!("Cannot read '{}': {e}", dest.display());
                return true;
            }
        }
    }

    debug!("'{}' has no generated marker, presuming it hand-edited", dest.display());
    false
}
