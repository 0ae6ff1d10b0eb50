// ============================================================================
// file-connecter - Text File Connecter
// Main Entry Point
//
// Creates a single file out of all text files in a directory by copying the
// first one and appending the contents of the others to it.
//
// Every outcome of a run, including failures, is reported as a status line on
// stdout and the process exits with status 0.
// ============================================================================

use anyhow::{Context, Result};
use file_connecter::cli::Cli;
use file_connecter::display::StatusDisplay;
use file_connecter::FileConnecter;
use log::{debug, info};

fn main() -> Result<()> {
    // Parse command-line arguments, accepting the single-dash long flags
    let cli = Cli::parse_args();

    // Level comes from -v only, RUST_LOG is not read
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .init();

    let options = cli.options();
    debug!("Run options: {:?}", options);

    let connecter = FileConnecter::new(options);
    info!(
        "Connecting files from {:?} into {:?} using {}",
        connecter.directory().unwrap_or("."),
        connecter.output_file(),
        connecter.encoding().name()
    );

    let mut display = StatusDisplay::new();
    if let Err(e) = connecter.connect(&mut display) {
        display
            .error(&e.to_string())
            .context("Failed to write status line")?;
        debug!("Run ended early: {:?}", e);
    }
    debug!("Printed {} status line(s)", display.lines_written());

    Ok(())
}
