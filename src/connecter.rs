// ============================================================================
// File Connecter
//
// Builds the output file from the files of one directory:
// - the first eligible file is copied byte for byte to create the output
// - every later eligible file is read as text and appended after a space
//
// The listing is not recursive and is processed in the order the OS returns
// it. Per-file permission or decoding problems skip that file only; anything
// else ends the run without rolling back what was already written.
// ============================================================================

use crate::display::StatusDisplay;
use crate::encoding::TextEncoding;
use crate::errors::{ConnectError, ConnectResult};
use crate::paths::{self, DEFAULT_OUTPUT_NAME};
use log::{debug, info, trace};
use std::ffi::OsStr;
use std::fs::{self, DirEntry, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Settings of one run, as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    pub directory: Option<String>, // Source directory, `None` for the current one
    pub output_file: String,       // Output file, bare names land in `directory`
    pub encoding: TextEncoding,    // Encoding for appended text
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            directory: None,
            output_file: DEFAULT_OUTPUT_NAME.to_string(),
            encoding: TextEncoding::Platform,
        }
    }
}

/// What a finished run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectSummary {
    pub connected: Vec<PathBuf>, // Sources that made it into the output, in order
    pub skipped: Vec<PathBuf>,   // Eligible sources that could not be read
}

impl ConnectSummary {
    /// True when no file was connected, i.e. no output file was created
    pub fn is_empty(&self) -> bool {
        self.connected.is_empty()
    }
}

// Result of handling a single eligible file
#[derive(Debug, PartialEq, Eq)]
enum FileOutcome {
    Connected,
    Skipped,
}

/// Name-based eligibility: has a dot and is not a `.py` file
pub fn is_eligible_name(name: &str) -> bool {
    name.contains('.') && !name.contains(".py")
}

pub struct FileConnecter {
    directory: Option<String>,
    output_file: String,
    encoding: TextEncoding,
}

impl FileConnecter {
    /// Normalize the options against the real filesystem
    pub fn new(options: ConnectOptions) -> Self {
        Self::with_probe(options, paths::path_exists)
    }

    /// Normalize the options, asking `exists` whether a candidate name is taken
    pub fn with_probe(options: ConnectOptions, exists: impl FnMut(&str) -> bool) -> Self {
        let resolved = paths::resolve_paths(
            options.directory.as_deref(),
            &options.output_file,
            exists,
        );

        Self {
            directory: resolved.directory,
            output_file: resolved.output_file,
            encoding: options.encoding,
        }
    }

    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Connect all eligible files of the directory into the output file
    pub fn connect<W: Write>(
        &self,
        display: &mut StatusDisplay<W>,
    ) -> ConnectResult<ConnectSummary> {
        let output = Path::new(&self.output_file);
        if output.exists() {
            return Err(ConnectError::OutputExists(self.output_file.clone()));
        }

        display.status("Connecting files...")?;

        let entries = self.list_entries()?;
        let output_identity = canonical_output(output);
        debug!(
            "Listed {} entries, output resolves to {:?}",
            entries.len(),
            output_identity
        );

        let mut summary = ConnectSummary::default();
        let mut created = false;

        for entry in entries {
            let file_name = entry.file_name();
            if !is_eligible_name(&file_name.to_string_lossy()) {
                trace!("Ignoring {:?}", file_name);
                continue;
            }

            // Follows symlinks, so a link to a directory is skipped too
            if entry.path().is_dir() {
                debug!("Ignoring directory {:?}", file_name);
                continue;
            }

            if is_output(&entry, output_identity.as_deref()) {
                debug!("Ignoring the output file itself");
                continue;
            }

            let source = self.source_path(&file_name);
            let outcome = if created {
                self.append_file(&source, display)?
            } else {
                self.copy_file(&source, display)?
            };

            match outcome {
                FileOutcome::Connected => {
                    created = true;
                    summary.connected.push(source);
                }
                FileOutcome::Skipped => summary.skipped.push(source),
            }
        }

        if summary.is_empty() {
            display.error(&format!(
                "There are no connectable text files in the directory you have selected (\"{}\")!",
                self.directory_display()
            ))?;
        } else {
            display.status("File connection(s) successful!")?;
        }

        info!(
            "Connected {} file(s), skipped {}",
            summary.connected.len(),
            summary.skipped.len()
        );
        display.log_elapsed_time();

        Ok(summary)
    }

    // Snapshot the directory listing so files created during the run are not seen
    fn list_entries(&self) -> ConnectResult<Vec<DirEntry>> {
        let root = Path::new(self.directory.as_deref().unwrap_or("."));
        let listing = fs::read_dir(root).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                ConnectError::DirectoryNotFound(self.directory_display().to_string())
            }
            _ => ConnectError::Io(e),
        })?;

        Ok(listing.collect::<io::Result<Vec<_>>>()?)
    }

    // Create the output as a copy of `source`
    fn copy_file<W: Write>(
        &self,
        source: &Path,
        display: &mut StatusDisplay<W>,
    ) -> ConnectResult<FileOutcome> {
        self.copy_opened(source, File::open(source), display)
    }

    // Copy step once `source` has been opened (or failed to open)
    fn copy_opened<W: Write>(
        &self,
        source: &Path,
        opened: io::Result<File>,
        display: &mut StatusDisplay<W>,
    ) -> ConnectResult<FileOutcome> {
        let mut reader = match opened {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return self.skip_denied(source, display)
            }
            Err(e) => return Err(e.into()),
        };
        let permissions = reader.metadata()?.permissions();

        {
            let mut writer = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&self.output_file)
                .map_err(|e| ConnectError::not_creatable(&self.output_file, e))?;
            io::copy(&mut reader, &mut writer)?;
            writer.flush()?;
        }

        // A read-only copy could not take the appends that follow
        if !permissions.readonly() {
            fs::set_permissions(&self.output_file, permissions)?;
        }

        display.status(&format!(
            "* Output file (\"{}\") created and content of \"{}\" successfully appended to the output file.",
            self.output_file,
            source.display()
        ))?;
        Ok(FileOutcome::Connected)
    }

    // Append the text of `source` to the output, separated by one space
    fn append_file<W: Write>(
        &self,
        source: &Path,
        display: &mut StatusDisplay<W>,
    ) -> ConnectResult<FileOutcome> {
        self.append_read(source, fs::read(source), display)
    }

    // Append step once `source` has been read (or failed to read)
    fn append_read<W: Write>(
        &self,
        source: &Path,
        read: io::Result<Vec<u8>>,
        display: &mut StatusDisplay<W>,
    ) -> ConnectResult<FileOutcome> {
        let bytes = match read {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return self.skip_denied(source, display)
            }
            Err(e) => return Err(e.into()),
        };

        let Some(text) = self.encoding.decode(&bytes) else {
            display.error(&format!(
                "\"{}\" is not valid {} text! File skipped.",
                source.display(),
                self.encoding.name()
            ))?;
            return Ok(FileOutcome::Skipped);
        };

        let mut output = match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_file)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return self.skip_denied(source, display)
            }
            Err(e) => return Err(e.into()),
        };
        output.write_all(&self.encoding.encode(&format!(" {}", text)))?;

        display.status(&format!(
            "* Content of \"{}\" successfully appended to the output file (\"{}\").",
            source.display(),
            self.output_file
        ))?;
        Ok(FileOutcome::Connected)
    }

    fn skip_denied<W: Write>(
        &self,
        source: &Path,
        display: &mut StatusDisplay<W>,
    ) -> ConnectResult<FileOutcome> {
        display.error(&format!(
            "Permission denied (\"{}\")! File skipped.",
            source.display()
        ))?;
        Ok(FileOutcome::Skipped)
    }

    // Path of an entry as shown to the user: "<dir><name>"
    fn source_path(&self, file_name: &OsStr) -> PathBuf {
        match &self.directory {
            Some(dir) => Path::new(dir).join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    fn directory_display(&self) -> &str {
        self.directory.as_deref().unwrap_or("")
    }
}

/// Absolute form of the output path; the file itself need not exist yet
fn canonical_output(output: &Path) -> Option<PathBuf> {
    let name = output.file_name()?;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|parent| parent.join(name))
}

fn is_output(entry: &DirEntry, output_identity: Option<&Path>) -> bool {
    match output_identity {
        Some(identity) => entry
            .path()
            .canonicalize()
            .map(|path| path == identity)
            .unwrap_or(false),
        None => false,
    }
}
