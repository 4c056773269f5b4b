use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::archiver::DEFAULT_PROGRAM;
use crate::config::DEFAULT_CONFIG_FILE;

/// Long flags that may also be written with a single dash (`-pocket`).
const LEGACY_FLAGS: &[&str] = &[
    "destination_dir",
    "instapaper_csv",
    "unprocessed_url_list",
    "pocket",
    "delete_pocket",
    "config",
    "archiver",
    "debug",
];

/// Use an Instapaper CSV export or a Pocket account to convert all pages to webarchive
#[derive(Parser, Debug)]
#[command(name = "webarchive-batch", author, version, about, long_about = None)]
#[command(
    after_help = "Note that webarchiver (https://github.com/newzealandpaul/webarchiver/) must be installed and in path\n\n\
                  Pocket credentials are read from config.toml. To reuse an older config.yaml, \
                  quote each key and use '=':\n  \
                  \"pocket.consumer.key\" = \"...\"\n  \
                  \"pocket.access.token\" = \"...\""
)]
pub struct Cli {
    /// Path to the destination directory to use. Must already exist
    #[arg(long = "destination_dir", value_name = "PATH")]
    pub destination_dir: PathBuf,

    /// Path to the Instapaper CSV export to use
    #[arg(long = "instapaper_csv", value_name = "FILE")]
    pub instapaper_csv: Option<PathBuf>,

    /// If a URL fails to be processed, save it to this file (for future processing)
    #[arg(long = "unprocessed_url_list", value_name = "FILE")]
    pub unprocessed_url_list: PathBuf,

    /// Use Pocket instead of Instapaper
    #[arg(long)]
    pub pocket: bool,

    /// Delete article from Pocket after it has been archived
    #[arg(long = "delete_pocket")]
    pub delete_pocket: bool,

    /// Pocket credentials file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Archiving executable to run for each URL
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_PROGRAM)]
    pub archiver: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Where the URLs for a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Pocket { delete_after_success: bool },
    Export(PathBuf),
}

impl Cli {
    /// Pocket wins whenever it is requested; otherwise an export file is required.
    pub fn mode(&self) -> Option<Mode> {
        if self.pocket {
            return Some(Mode::Pocket {
                delete_after_success: self.delete_pocket,
            });
        }
        self.instapaper_csv.clone().map(Mode::Export)
    }
}

/// Rewrite `-flag` / `-flag=value` to `--flag` for the known long flags so
/// clap accepts the single-dash spelling. Nothing after `--` is touched.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut seen_terminator = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if seen_terminator {
                return arg;
            }
            let Some(text) = arg.to_str().map(str::to_owned) else {
                return arg;
            };
            if text == "--" {
                seen_terminator = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_legacy_flag(rest) => {
                    OsString::from(format!("-{}", text))
                }
                _ => arg,
            }
        })
        .collect()
}

fn is_legacy_flag(flag: &str) -> bool {
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    LEGACY_FLAGS.contains(&name)
}
