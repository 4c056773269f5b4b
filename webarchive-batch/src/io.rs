use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Characters allowed in an archive filename besides ASCII letters and digits.
const FILENAME_PUNCTUATION: &[char] = &['-', '_', '.', '(', ')', ' '];

pub fn is_filename_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || FILENAME_PUNCTUATION.contains(&c)
}

/// Drop every character that is not safe in a filename. Order is kept and
/// nothing is substituted, so an all-symbol title becomes "".
pub fn sanitize_filename(input: &str) -> String {
    input.chars().filter(|&c| is_filename_char(c)).collect()
}

/// CSV list of `url,topic` rows that could not be archived, written in
/// attempt order. Every row is flushed as soon as it is recorded.
pub struct FailureList<W: Write> {
    writer: csv::Writer<W>,
    len: usize,
}

impl FailureList<File> {
    /// Create (or truncate) the failure list at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::create(path_ref).with_context(|| {
            format!("Failed to create unprocessed URL list: {}", path_ref.display())
        })?;
        Ok(FailureList::from_writer(file))
    }
}

impl<W: Write> FailureList<W> {
    pub fn from_writer(writer: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        FailureList { writer, len: 0 }
    }

    pub fn record(&mut self, url: &str, topic: &str) -> Result<()> {
        self.writer
            .write_record([url, topic])
            .with_context(|| format!("Failed to record unprocessed URL {}", url))?;
        self.writer
            .flush()
            .context("Failed to flush unprocessed URL list")?;
        self.len += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|err| err.into_error())
    }
}
