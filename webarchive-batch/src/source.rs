use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use pocket_client::{Article, Pocket, PocketError};

/// One URL to archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub url: String,
    pub topic: String,
    /// Identifier used to delete the record from the service it came from.
    pub item_id: Option<String>,
}

impl Record {
    pub fn new(url: impl Into<String>, topic: impl Into<String>) -> Self {
        Record {
            url: url.into(),
            topic: topic.into(),
            item_id: None,
        }
    }
}

/// Records from an Instapaper-style CSV export (`url,topic,...`).
///
/// The first row is always treated as a header. Rows that are short or
/// cannot be decoded are logged and skipped.
pub struct ExportRecords<R: Read> {
    name: String,
    reader: csv::Reader<R>,
    row: csv::StringRecord,
    skipped: usize,
    done: bool,
}

impl ExportRecords<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref)
            .with_context(|| format!("Failed to open export file: {}", path_ref.display()))?;
        Ok(ExportRecords::from_reader(
            path_ref.display().to_string(),
            file,
        ))
    }
}

impl<R: Read> ExportRecords<R> {
    pub fn from_reader(name: impl Into<String>, reader: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        ExportRecords {
            name: name.into(),
            reader,
            row: csv::StringRecord::new(),
            skipped: 0,
            done: false,
        }
    }

    /// Rows skipped so far because they were short or malformed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn skip_row(&mut self, line: u64, reason: &str) {
        log::error!("Error reading file {}, line {}: {}", self.name, line, reason);
        self.skipped += 1;
    }
}

impl<R: Read> Iterator for ExportRecords<R> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        while !self.done {
            match self.reader.read_record(&mut self.row) {
                Ok(false) => self.done = true,
                Ok(true) => {
                    let line = self.row.position().map_or(0, |pos| pos.line());
                    let columns = (
                        self.row.get(0).map(str::to_string),
                        self.row.get(1).map(str::to_string),
                    );
                    match columns {
                        (Some(url), Some(_)) if url.trim().is_empty() => {
                            self.skip_row(line, "empty URL column")
                        }
                        (Some(url), Some(topic)) => return Some(Record::new(url, topic)),
                        _ => self.skip_row(line, "expected url and topic columns"),
                    }
                }
                Err(err) => {
                    let line = err.position().map_or(0, |pos| pos.line());
                    if let csv::ErrorKind::Io(_) = err.kind() {
                        // Can't resynchronize after a read failure
                        log::error!("Error reading file {}, line {}: {}", self.name, line, err);
                        self.done = true;
                    } else {
                        self.skip_row(line, &err.to_string());
                    }
                }
            }
        }
        None
    }
}

/// A bookmarking service that can list saved articles and delete them.
pub trait ArticleService {
    /// Fetch every saved article in one call.
    fn saved_articles(&mut self) -> Result<Vec<Article>, PocketError>;

    /// Delete one article and commit the change immediately.
    fn delete_article(&mut self, item_id: &str) -> Result<(), PocketError>;
}

impl ArticleService for Pocket {
    fn saved_articles(&mut self) -> Result<Vec<Article>, PocketError> {
        self.get()
    }

    fn delete_article(&mut self, item_id: &str) -> Result<(), PocketError> {
        self.delete(item_id).commit()?;
        Ok(())
    }
}

/// Turn service articles into records, titled by their resolved title.
/// Articles without any URL are logged and dropped.
pub fn bookmark_records(articles: Vec<Article>) -> Vec<Record> {
    articles
        .into_iter()
        .filter_map(|article| {
            let Some(url) = article.url() else {
                log::warn!("Skipping Pocket item {}: no URL", article.item_id);
                return None;
            };
            Some(Record {
                url: url.to_string(),
                topic: article.title().to_string(),
                item_id: Some(article.item_id.clone()),
            })
        })
        .collect()
}
