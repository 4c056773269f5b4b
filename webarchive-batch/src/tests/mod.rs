use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use pocket_client::{Article, PocketError};

use crate::archiver::{ArchiveError, Archiver};
use crate::source::ArticleService;

pub mod fixtures;

/// Archiver that returns scripted exit codes (0 once they run out) and
/// remembers every call.
#[derive(Debug, Default)]
pub struct ScriptedArchiver {
    pub exit_codes: VecDeque<i32>,
    pub calls: Vec<(String, PathBuf)>,
}

impl ScriptedArchiver {
    pub fn with_exit_codes(exit_codes: &[i32]) -> Self {
        ScriptedArchiver {
            exit_codes: exit_codes.iter().copied().collect(),
            calls: Vec::new(),
        }
    }

    pub fn output_names(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|(_, output)| output.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }
}

impl Archiver for ScriptedArchiver {
    fn archive(&mut self, url: &str, output: &Path) -> Result<i32, ArchiveError> {
        self.calls.push((url.to_string(), output.to_path_buf()));
        Ok(self.exit_codes.pop_front().unwrap_or(0))
    }
}

/// In-memory bookmark service that records deletes.
#[derive(Debug, Default)]
pub struct FakeService {
    pub articles: Vec<Article>,
    pub deleted: Vec<String>,
    pub fail_deletes: bool,
}

impl FakeService {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        FakeService {
            articles,
            ..Default::default()
        }
    }
}

impl ArticleService for FakeService {
    fn saved_articles(&mut self) -> Result<Vec<Article>, PocketError> {
        Ok(self.articles.clone())
    }

    fn delete_article(&mut self, item_id: &str) -> Result<(), PocketError> {
        if self.fail_deletes {
            return Err(PocketError::Api {
                endpoint: "/v3/send".to_string(),
                status: 503,
                message: "Pocket server issue".to_string(),
            });
        }
        self.deleted.push(item_id.to_string());
        Ok(())
    }
}

pub fn article(item_id: &str, url: &str, title: &str) -> Article {
    Article {
        item_id: item_id.to_string(),
        resolved_id: Some(item_id.to_string()),
        resolved_url: Some(url.to_string()),
        resolved_title: Some(title.to_string()),
        ..Default::default()
    }
}
