pub mod archiver;
pub mod cli;
pub mod config;
pub mod io;
pub mod run;
pub mod source;

#[cfg(test)]
pub mod tests;

pub use crate::archiver::{archive_path, invoke, ArchiveError, Archiver, WebArchiver};
pub use crate::cli::{normalize_legacy_flags, Cli, Mode};
pub use crate::config::PocketConfig;
pub use crate::io::{sanitize_filename, FailureList};
pub use crate::run::{process_bookmark_service, process_export_file, process_records, RunSummary};
pub use crate::source::{bookmark_records, ArticleService, ExportRecords, Record};
