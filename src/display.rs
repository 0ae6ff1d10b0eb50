use std::io::{self, Stdout, Write}; // Importing necessary modules from the standard library
use std::time::Instant; // Importing Instant for tracking elapsed time

/// Prefix for lines reporting a failure
const ERROR_PREFIX: &str = "ERROR: ";

// Struct to manage the human-readable status lines of a run
pub struct StatusDisplay<W: Write = Stdout> {
    out: W,               // Destination of the status lines
    lines_written: usize, // Number of lines printed so far
    start_time: Instant,  // Start time to track elapsed time
}

impl StatusDisplay<Stdout> {
    // Function to create a StatusDisplay printing to standard output
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for StatusDisplay<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StatusDisplay<W> {
    // Function to create a StatusDisplay over any writer (used by tests)
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            lines_written: 0,
            start_time: Instant::now(),
        }
    }

    // Function to print one status line
    pub fn status(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()?; // Flush so lines show up while large files are copied
        self.lines_written += 1;
        Ok(())
    }

    // Function to print one failure line
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.status(&format!("{}{}", ERROR_PREFIX, message))
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    // Function to log the elapsed time since the start
    pub fn log_elapsed_time(&self) {
        log::info!("Elapsed time: {:.2?}", self.start_time.elapsed());
    }

    // Give back the writer, e.g. to inspect captured output
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_written_in_order() {
        let mut display = StatusDisplay::with_writer(Vec::new());
        display.status("Connecting files...").unwrap();
        display.error("Permission denied (\"a.txt\")! File skipped.").unwrap();
        assert_eq!(display.lines_written(), 2);

        let text = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(
            text,
            "Connecting files...\nERROR: Permission denied (\"a.txt\")! File skipped.\n"
        );
    }
}
