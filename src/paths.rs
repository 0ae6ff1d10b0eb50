// ============================================================================
// Path Normalization
//
// Turns the raw `-dir` and `-out` arguments into the strings the connecter
// works with. Everything here is string based: the directory keeps a trailing
// separator so that display paths read "<dir><name>", and the default output
// name is numbered by plain suffix surgery.
// ============================================================================

use log::debug;
use std::path::{is_separator, Path};

/// Built-in default output name; only names ending in this get auto-numbered
pub const DEFAULT_OUTPUT_NAME: &str = "unitedFiles_0000.txt";

/// Separator appended to a directory that lacks one
const SEPARATOR: char = '/';

/// Length of the `NNNN.txt` tail that is replaced on every numbering step
const COUNTER_TAIL_LEN: usize = 8;

/// Directory and output file after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub directory: Option<String>,
    pub output_file: String,
}

/// Normalize both arguments and pick a free default name if one was requested
pub fn resolve_paths(
    directory: Option<&str>,
    output_file: &str,
    exists: impl FnMut(&str) -> bool,
) -> ResolvedPaths {
    let directory = normalize_directory(directory);
    let mut output_file = resolve_output_file(directory.as_deref(), output_file);

    if is_default_name(&output_file) {
        output_file = next_available_name(output_file, exists);
    }

    debug!(
        "Resolved paths: directory={:?}, output_file={:?}",
        directory, output_file
    );

    ResolvedPaths {
        directory,
        output_file,
    }
}

/// Append a separator to the directory; an empty or missing directory is `None`
pub fn normalize_directory(directory: Option<&str>) -> Option<String> {
    let directory = directory.filter(|d| !d.is_empty())?;
    if directory.ends_with(is_separator) {
        Some(directory.to_string())
    } else {
        Some(format!("{}{}", directory, SEPARATOR))
    }
}

/// Place a bare output file name inside the (normalized) directory
pub fn resolve_output_file(directory: Option<&str>, output_file: &str) -> String {
    match directory {
        Some(dir) if !output_file.contains(is_separator) => format!("{}{}", dir, output_file),
        _ => output_file.to_string(),
    }
}

/// True when the output file asks for the auto-numbered default name
pub fn is_default_name(output_file: &str) -> bool {
    output_file.ends_with(DEFAULT_OUTPUT_NAME)
}

/// Zero-pad to four digits; counters of five or more digits are left alone
pub fn pad_counter(count: u64) -> String {
    format!("{:04}", count)
}

/// Bump the counter in `candidate` until `exists` reports a free name
///
/// Each step drops the last eight characters of the current candidate and
/// appends the next padded counter plus `.txt`. Once the counter reaches five
/// digits the dropped tail no longer covers every digit, so the name keeps a
/// leading digit of the previous candidate (`unitedFiles_10000.txt` is
/// followed by `unitedFiles_110001.txt`).
pub fn next_available_name(mut candidate: String, mut exists: impl FnMut(&str) -> bool) -> String {
    let mut count: u64 = 0;
    while exists(&candidate) {
        count += 1;
        let stem = &candidate[..candidate.len().saturating_sub(COUNTER_TAIL_LEN)];
        candidate = format!("{}{}.txt", stem, pad_counter(count));
    }
    candidate
}

/// Filesystem probe used by the binary
pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}
