use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::io::sanitize_filename;

pub const DEFAULT_PROGRAM: &str = "webarchiver";
pub const ARCHIVE_EXTENSION: &str = "webarchive";

/// Exit status reported when the archiver was killed by a signal.
pub const SIGNALLED_STATUS: i32 = -1;

#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archiver itself is missing or not executable.
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The archiver could not be started for this URL (NUL byte, argument too long).
    #[error("could not start archiver for {url}")]
    Launch {
        url: String,
        #[source]
        source: io::Error,
    },
}

impl ArchiveError {
    /// Whether every later record would fail the same way.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ArchiveError::Spawn { .. })
    }
}

/// Something that can save one URL to an archive file.
pub trait Archiver {
    /// Archive `url` into `output` and return the exit status (0 is success).
    fn archive(&mut self, url: &str, output: &Path) -> Result<i32, ArchiveError>;
}

/// Where the archive for `topic` lands. An empty topic gives `.webarchive`.
pub fn archive_path<P: AsRef<Path>>(destination_dir: P, topic: &str) -> PathBuf {
    let filename = format!("{}.{}", sanitize_filename(topic), ARCHIVE_EXTENSION);
    destination_dir.as_ref().join(filename)
}

pub fn invoke<A: Archiver + ?Sized>(
    archiver: &mut A,
    url: &str,
    destination_dir: &Path,
    topic: &str,
) -> Result<i32, ArchiveError> {
    let output = archive_path(destination_dir, topic);
    archiver.archive(url, &output)
}

/// Runs the external `webarchiver` tool, one process per URL.
#[derive(Debug, Clone)]
pub struct WebArchiver {
    program: PathBuf,
}

impl Default for WebArchiver {
    fn default() -> Self {
        WebArchiver::new(DEFAULT_PROGRAM)
    }
}

impl WebArchiver {
    pub fn new<P: AsRef<OsStr>>(program: P) -> Self {
        WebArchiver {
            program: PathBuf::from(program.as_ref()),
        }
    }

    /// Build the command without a shell; url and output are passed as single arguments.
    pub fn command(&self, url: &str, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-url").arg(url).arg("-output").arg(output);
        cmd
    }
}

impl Archiver for WebArchiver {
    fn archive(&mut self, url: &str, output: &Path) -> Result<i32, ArchiveError> {
        let mut cmd = self.command(url, output);
        log::info!("Calling: {:?}", cmd);

        let status = cmd.status().map_err(|source| match source.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => ArchiveError::Spawn {
                program: self.program.display().to_string(),
                source,
            },
            _ => ArchiveError::Launch {
                url: url.to_string(),
                source,
            },
        })?;

        Ok(status.code().unwrap_or_else(|| {
            log::warn!("{} was terminated by a signal", self.program.display());
            SIGNALLED_STATUS
        }))
    }
}
