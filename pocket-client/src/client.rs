use std::collections::BTreeMap;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PocketError;

pub const DEFAULT_BASE_URL: &str = "https://getpocket.com";

const RETRIEVE_ENDPOINT: &str = "/v3/get";
const MODIFY_ENDPOINT: &str = "/v3/send";

/// A saved item as returned by `/v3/get`.
///
/// Pocket omits most fields for items it has not resolved yet, so everything
/// but the id is optional.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Article {
    pub item_id: String,
    pub resolved_id: Option<String>,
    pub given_url: Option<String>,
    pub given_title: Option<String>,
    pub resolved_url: Option<String>,
    pub resolved_title: Option<String>,
}

impl Article {
    /// Resolved URL, falling back to the URL the item was saved with.
    pub fn url(&self) -> Option<&str> {
        non_empty(&self.resolved_url).or_else(|| non_empty(&self.given_url))
    }

    /// Resolved title, falling back to the saved title, or "" when neither exists.
    pub fn title(&self) -> &str {
        non_empty(&self.resolved_title)
            .or_else(|| non_empty(&self.given_title))
            .unwrap_or("")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A queued modify action, sent on [`Pocket::commit`].
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Delete { item_id: String },
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct SendResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub action_results: Vec<serde_json::Value>,
}

// Pocket sends `"list": []` instead of an empty object when nothing is saved
#[derive(Deserialize)]
#[serde(untagged)]
enum ArticleList {
    Items(BTreeMap<String, Article>),
    Empty(Vec<serde_json::Value>),
}

#[derive(Deserialize)]
struct RetrieveResponse {
    list: ArticleList,
}

#[derive(Serialize)]
struct Credentials<'a> {
    consumer_key: &'a str,
    access_token: &'a str,
}

#[derive(Serialize)]
struct RetrieveRequest<'a> {
    #[serde(flatten)]
    credentials: Credentials<'a>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    #[serde(flatten)]
    credentials: Credentials<'a>,
    actions: &'a [Action],
}

/// Parse the body of a `/v3/get` response into its articles, in key order.
pub fn parse_retrieve_response(json: &str) -> Result<Vec<Article>, PocketError> {
    let response: RetrieveResponse = decode(RETRIEVE_ENDPOINT, json)?;
    Ok(match response.list {
        ArticleList::Items(items) => items.into_values().collect(),
        ArticleList::Empty(_) => Vec::new(),
    })
}

/// Parse the body of a `/v3/send` response, failing if any action was rejected.
pub fn parse_send_response(json: &str) -> Result<SendResponse, PocketError> {
    let response: SendResponse = decode(MODIFY_ENDPOINT, json)?;
    let rejected = response
        .action_results
        .iter()
        .filter(|result| matches!(result, serde_json::Value::Bool(false)))
        .count();
    if rejected > 0 {
        return Err(PocketError::ActionsRejected {
            rejected,
            total: response.action_results.len(),
        });
    }
    Ok(response)
}

fn decode<T: DeserializeOwned>(endpoint: &str, json: &str) -> Result<T, PocketError> {
    serde_json::from_str(json).map_err(|source| PocketError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Blocking client for a single Pocket account.
///
/// Deletes are queued with [`Pocket::delete`] and only reach the service on
/// [`Pocket::commit`].
#[derive(Debug)]
pub struct Pocket {
    client: Client,
    base_url: String,
    consumer_key: String,
    access_token: String,
    actions: Vec<Action>,
}

impl Pocket {
    pub fn new(
        consumer_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, PocketError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        );
        headers.insert("X-Accept", HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("pocket-client/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(PocketError::Client)?;

        Ok(Pocket {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            consumer_key: consumer_key.into(),
            access_token: access_token.into(),
            actions: Vec::new(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch every saved article in one request. No pagination.
    pub fn get(&self) -> Result<Vec<Article>, PocketError> {
        let body = self.post(
            RETRIEVE_ENDPOINT,
            &RetrieveRequest {
                credentials: self.credentials(),
            },
        )?;
        let articles = parse_retrieve_response(&body)?;
        log::debug!("Retrieved {} articles from Pocket", articles.len());
        Ok(articles)
    }

    /// Queue a delete for `item_id`.
    pub fn delete(&mut self, item_id: &str) -> &mut Pocket {
        self.actions.push(Action::Delete {
            item_id: item_id.to_string(),
        });
        self
    }

    pub fn pending_actions(&self) -> &[Action] {
        &self.actions
    }

    /// Send all queued actions. The queue is cleared even if the request fails.
    pub fn commit(&mut self) -> Result<SendResponse, PocketError> {
        let actions = std::mem::take(&mut self.actions);
        if actions.is_empty() {
            return Ok(SendResponse::default());
        }

        log::debug!("Committing {} Pocket actions", actions.len());
        let body = self.post(
            MODIFY_ENDPOINT,
            &SendRequest {
                credentials: self.credentials(),
                actions: &actions,
            },
        )?;
        parse_send_response(&body)
    }

    fn credentials(&self) -> Credentials<'_> {
        Credentials {
            consumer_key: &self.consumer_key,
            access_token: &self.access_token,
        }
    }

    fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<String, PocketError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let http_error = |source| PocketError::Http {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            // Pocket explains failures in X-Error rather than the body
            let message = response
                .headers()
                .get("X-Error")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error"))
                .to_string();
            return Err(PocketError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        response.text().map_err(http_error)
    }
}
