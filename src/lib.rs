// Declare the cli module, which defines the command-line surface and run options
pub mod cli;

// Declare the connecter module, which copies and appends the files of a directory
pub mod connecter;

// Declare the display module, which prints the status lines of a run
pub mod display;

// Declare the encoding module, which decodes and encodes appended text
pub mod encoding;

// Declare the errors module, which contains custom error types
pub mod errors;

// Declare the paths module, which normalizes the directory and output file arguments
pub mod paths;

pub use connecter::{ConnectOptions, ConnectSummary, FileConnecter};
pub use errors::{ConnectError, ConnectResult};
