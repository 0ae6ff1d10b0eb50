// ============================================================================
// CLI Module - Command-Line Interface Definitions
//
// The tool keeps its historical single-dash long flags (`-dir`, `-out`,
// `-utf8`). clap only knows single-character short flags, so those spellings
// are rewritten to their `--` form before parsing.
// ============================================================================

use crate::connecter::ConnectOptions;
use crate::encoding::TextEncoding;
use crate::paths::DEFAULT_OUTPUT_NAME;
use clap::Parser;
use log::LevelFilter;
use std::ffi::OsString;

/// Long flags that are also accepted with a single dash
const LEGACY_FLAGS: &[&str] = &["dir", "out", "utf8"];

/// file-connecter - Connect the text files of a directory
///
/// Copies the first text file of a directory to the output file and appends
/// the content of every other text file to it, separated by a space.
///
/// Examples:
///   file-connecter -dir texts
///   file-connecter -dir texts -out all.txt -utf8 yes
#[derive(Parser, Debug)]
#[command(
    name = "file-connecter",
    about = "Create a single file out of all text files in a directory",
    version
)]
pub struct Cli {
    // Directory containing the files to connect
    #[arg(
        long = "dir",
        value_name = "DIR",
        help = "directory containing the text files you want to connect"
    )]
    pub dir: Option<String>,

    // Output file, placed inside the directory when given as a bare name
    #[arg(
        long = "out",
        value_name = "FILE",
        default_value = DEFAULT_OUTPUT_NAME,
        help = "output file"
    )]
    pub out: String,

    // Any non-empty value forces UTF-8
    #[arg(
        long = "utf8",
        value_name = "ANY",
        help = "if the text files you want to connect are UTF-8 encoded"
    )]
    pub utf8: Option<String>,

    /// Increase diagnostic output on stderr (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Parse the process arguments, accepting the single-dash long flags
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Run configuration described by the arguments
    pub fn options(&self) -> ConnectOptions {
        ConnectOptions {
            directory: self.dir.clone(),
            output_file: self.out.clone(),
            encoding: TextEncoding::from_flag(self.utf8.as_deref()),
        }
    }

    // Convert verbose flag count to appropriate log level
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Rewrite `-dir`, `-out`, `-utf8` (and their `=value` forms) to `--` flags
///
/// Values are never touched: an argument directly following a legacy flag is
/// passed through as is, and so is everything after `--`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expect_value = false;
    let mut passthrough = false;

    for arg in args.into_iter().map(Into::into) {
        if passthrough || expect_value {
            expect_value = false;
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        match legacy_flag(text) {
            Some((flag, has_inline_value)) => {
                expect_value = !has_inline_value;
                log::trace!("Rewriting -{} to --{}", flag, flag);
                normalized.push(OsString::from(format!("-{}", text)));
            }
            None => normalized.push(arg),
        }
    }

    normalized
}

// Match "-dir" or "-dir=..." against the legacy flags
fn legacy_flag(arg: &str) -> Option<(&'static str, bool)> {
    let body = arg.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }
    let (name, has_inline_value) = match body.split_once('=') {
        Some((name, _)) => (name, true),
        None => (body, false),
    };
    LEGACY_FLAGS
        .iter()
        .find(|flag| **flag == name)
        .map(|flag| (*flag, has_inline_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_args(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["file-connecter"]);
        assert_eq!(cli.options(), ConnectOptions::default());
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_single_dash_flags() {
        let cli = parse(&["file-connecter", "-dir", "texts", "-out", "all.txt", "-utf8", "yes"]);
        let options = cli.options();
        assert_eq!(options.directory.as_deref(), Some("texts"));
        assert_eq!(options.output_file, "all.txt");
        assert_eq!(options.encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_inline_values_and_double_dash() {
        let cli = parse(&["file-connecter", "-dir=texts", "--out", "all.txt", "-vv"]);
        assert_eq!(cli.dir.as_deref(), Some("texts"));
        assert_eq!(cli.out, "all.txt");
        assert_eq!(cli.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_values_are_not_rewritten() {
        let args = normalize_args(["file-connecter", "-out", "-dir"]);
        assert_eq!(args, vec!["file-connecter", "--out", "-dir"]);
    }

    #[test]
    fn test_empty_utf8_value_keeps_platform_encoding() {
        let cli = parse(&["file-connecter", "-utf8", ""]);
        assert_eq!(cli.options().encoding, TextEncoding::Platform);
    }
}
