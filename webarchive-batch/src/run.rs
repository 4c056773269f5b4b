use std::fmt;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::archiver::{invoke, Archiver};
use crate::io::FailureList;
use crate::source::{bookmark_records, ArticleService, ExportRecords, Record};

/// Totals for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub deleted: usize,
    /// Source entries that were never attempted (malformed rows, items without a URL).
    pub skipped: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attempted, {} archived, {} failed, {} skipped",
            self.attempted, self.succeeded, self.failed, self.skipped
        )?;
        if self.deleted > 0 {
            write!(f, ", {} deleted from Pocket", self.deleted)?;
        }
        Ok(())
    }
}

/// Archive each record in order. Failures go to `failures`; `on_success` runs
/// after each successful archive and returns whether it removed the record
/// from its source.
pub fn process_records<I, A, W, S>(
    records: I,
    archiver: &mut A,
    destination_dir: &Path,
    failures: &mut FailureList<W>,
    mut on_success: S,
) -> Result<RunSummary>
where
    I: IntoIterator<Item = Record>,
    A: Archiver + ?Sized,
    W: Write,
    S: FnMut(&Record) -> Result<bool>,
{
    let mut summary = RunSummary::default();

    for record in records {
        summary.attempted += 1;
        let status = match invoke(&mut *archiver, &record.url, destination_dir, &record.topic) {
            Ok(status) => status,
            Err(err) if !err.is_fatal() => {
                failures.record(&record.url, &record.topic)?;
                summary.failed += 1;
                log::error!("{:#}", anyhow::Error::new(err));
                continue;
            }
            Err(err) => {
                return Err(anyhow::Error::new(err).context(format!("Failed to archive {}", record.url)))
            }
        };

        if status == 0 {
            summary.succeeded += 1;
            if on_success(&record)? {
                summary.deleted += 1;
            }
        } else {
            // Leave it at the source and record it for a later run
            failures.record(&record.url, &record.topic)?;
            summary.failed += 1;
            log::error!("Error {} while extracting[{}]", status, record.url);
        }
    }

    Ok(summary)
}

/// Archive every row of an Instapaper CSV export.
pub fn process_export_file<A: Archiver + ?Sized>(
    export_file: &Path,
    destination_dir: &Path,
    unprocessed_url_list: &Path,
    archiver: &mut A,
) -> Result<RunSummary> {
    let mut failures = FailureList::create(unprocessed_url_list)?;
    let mut records = ExportRecords::open(export_file)?;

    let mut summary = process_records(
        records.by_ref(),
        archiver,
        destination_dir,
        &mut failures,
        |_| Ok(false),
    )?;
    summary.skipped = records.skipped();
    Ok(summary)
}

/// Archive every article saved in the bookmark service, optionally deleting
/// the ones that archived successfully.
pub fn process_bookmark_service<S, A>(
    service: &mut S,
    destination_dir: &Path,
    unprocessed_url_list: &Path,
    delete_after_success: bool,
    archiver: &mut A,
) -> Result<RunSummary>
where
    S: ArticleService + ?Sized,
    A: Archiver + ?Sized,
{
    let mut failures = FailureList::create(unprocessed_url_list)?;

    let articles = service
        .saved_articles()
        .context("Failed to retrieve Pocket articles")?;
    let total = articles.len();
    let records = bookmark_records(articles);
    log::info!("Archiving {} Pocket articles", records.len());
    let skipped = total - records.len();

    let mut summary = process_records(
        records,
        archiver,
        destination_dir,
        &mut failures,
        |record| {
            if !delete_after_success {
                return Ok(false);
            }
            let Some(item_id) = record.item_id.as_deref() else {
                return Ok(false);
            };
            service
                .delete_article(item_id)
                .with_context(|| format!("Failed to delete Pocket item {}", item_id))?;
            log::info!("Deleted {} from Pocket", record.url);
            Ok(true)
        },
    )?;
    summary.skipped = skipped;
    Ok(summary)
}
