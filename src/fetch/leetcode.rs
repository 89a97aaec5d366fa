use super::source::SubmissionSource;
use super::types::{Cursor, Page, Status, SubmissionDetail, SubmissionId, SubmissionSummary};
use crate::config::{SourceKind, SyncConfig};
use crate::error::{FetchError, SyncError};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

const USER_AGENT: &str = "Mozilla/5.0";

const RECENT_AC_QUERY: &str = "
query recentAcSubmissions($username: String!, $limit: Int!, $offset: Int!) {
  recentAcSubmissionList(username: $username, limit: $limit, offset: $offset) {
    id
    titleSlug
    lang
    timestamp
  }
}";

const SUBMISSION_DETAIL_QUERY: &str = "
query submissionDetails($id: Int!) {
  submissionDetails(submissionId: $id) {
    code
    lang {
      name
    }
  }
}";

/// [`SubmissionSource`] backed by the LeetCode web API.
///
/// The index is read either from the GraphQL `recentAcSubmissionList` query
/// (accepted submissions only, offset paged) or from the REST
/// `/api/submissions/` listing (every verdict, paged by `last_key`), depending
/// on [`SourceKind`]. Details always come from the GraphQL
/// `submissionDetails` query.
pub struct LeetCodeSource {
    http: Client,
    base_url: String,
    username: String,
    kind: SourceKind,
}

impl LeetCodeSource {
    /// Builds an authenticated client from the run configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(LeetCodeSource)` - A source ready to issue requests.
    /// * `Err(SyncError::Config)` - A credential contains characters not allowed in a header.
    /// * `Err(SyncError::Client)` - The underlying HTTP client could not be built.
    pub fn new(config: &SyncConfig) -> Result<Self, SyncError> {
        let base_url = normalize_url(&config.endpoint);
        let headers = default_headers(config, &base_url)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(SyncError::Client)?;

        Ok(LeetCodeSource {
            http,
            base_url,
            username: config.username.clone(),
            kind: config.source,
        })
    }

    fn graphql_url(&self) -> String {
        format!("{}graphql", self.base_url)
    }

    async fn post_graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, FetchError> {
        let request = self
            .http
            .post(self.graphql_url())
            .json(&json!({ "query": query, "variables": variables }));
        let response: GraphqlResponse<T> = send_json(request).await?;

        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(FetchError::Api(messages.join("; ")));
        }
        response
            .data
            .ok_or_else(|| FetchError::Malformed("GraphQL response has no data".to_string()))
    }

    async fn fetch_recent_accepted(&self, offset: u64, limit: u32) -> Result<Page, FetchError> {
        let data: RecentAcData = self
            .post_graphql(
                RECENT_AC_QUERY,
                json!({ "username": self.username, "limit": limit, "offset": offset }),
            )
            .await?;
        let entries = data.recent_ac_submission_list.ok_or_else(|| {
            FetchError::Malformed("recentAcSubmissionList is null".to_string())
        })?;

        let items = entries
            .into_iter()
            .map(|e| summary(e.id, e.title_slug, e.lang, None, e.timestamp))
            .collect::<Result<Vec<_>, _>>()?;

        let next_cursor = if items.is_empty() {
            None
        } else {
            Some(Cursor::Offset(offset + u64::from(limit)))
        };
        Ok(Page { items, next_cursor })
    }

    async fn fetch_submission_list(&self, last_key: &str, limit: u32) -> Result<Page, FetchError> {
        let url = format!("{}api/submissions/", self.base_url);
        let limit = limit.to_string();
        let request = self
            .http
            .get(&url)
            .query(&[("offset", "0"), ("limit", limit.as_str()), ("lastkey", last_key)]);
        let listing: RestListing = send_json(request).await?;

        let items = listing
            .submissions_dump
            .into_iter()
            .map(|e| {
                let status = e.status_display.as_deref().map(Status::from_label);
                summary(e.id, e.title_slug, e.lang, status, e.timestamp)
            })
            .collect::<Result<Vec<_>, _>>()?;

        // A listing that claims more pages but hands back no key points at the
        // start cursor again, which the reader has already visited.
        let next_cursor = listing
            .has_next
            .then(|| Cursor::Token(listing.last_key.unwrap_or_default()));
        Ok(Page { items, next_cursor })
    }
}

#[async_trait]
impl SubmissionSource for LeetCodeSource {
    fn first_cursor(&self) -> Cursor {
        Cursor::start(self.kind == SourceKind::Rest)
    }

    async fn fetch_page(&self, cursor: &Cursor, page_size: u32) -> Result<Page, FetchError> {
        debug!("Fetching {:?} index page at {}", self.kind, cursor);
        match (self.kind, cursor) {
            (SourceKind::Graphql, Cursor::Offset(offset)) => {
                self.fetch_recent_accepted(*offset, page_size).await
            }
            (SourceKind::Rest, Cursor::Token(last_key)) => {
                self.fetch_submission_list(last_key, page_size).await
            }
            (kind, cursor) => Err(FetchError::Malformed(format!(
                "{:?} source cannot page from {}",
                kind, cursor
            ))),
        }
    }

    async fn fetch_detail(&self, id: &SubmissionId) -> Result<SubmissionDetail, FetchError> {
        let id_value = match id.as_str().parse::<i64>() {
            Ok(n) => json!(n),
            Err(_) => json!(id.as_str()),
        };
        let data: DetailData = self
            .post_graphql(SUBMISSION_DETAIL_QUERY, json!({ "id": id_value }))
            .await?;
        let detail = data.submission_details.ok_or_else(|| {
            FetchError::Api(format!("submission {} is not visible to this session", id))
        })?;

        Ok(SubmissionDetail {
            code: detail.code,
            lang: detail.lang.into_name(),
        })
    }
}

/// Normalizes the base URL by ensuring it ends with a trailing slash.
fn normalize_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

/// Headers sent with every request: JSON content type, the session cookie and,
/// when configured, the CSRF token pair the site expects on GraphQL posts.
fn default_headers(config: &SyncConfig, base_url: &str) -> Result<HeaderMap, SyncError> {
    let mut cookie = format!("LEETCODE_SESSION={}", config.session.trim());
    if let Some(token) = &config.csrf_token {
        cookie.push_str(&format!("; csrftoken={}", token.trim()));
    }

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|_| SyncError::config("session cookie is not a valid header value", "session"))?,
    );
    headers.insert(
        header::REFERER,
        HeaderValue::from_str(base_url)
            .map_err(|_| SyncError::config("endpoint is not a valid header value", "endpoint"))?,
    );
    if let Some(token) = &config.csrf_token {
        headers.insert(
            "x-csrftoken",
            HeaderValue::from_str(token.trim())
                .map_err(|_| SyncError::config("csrf token is not a valid header value", "csrf_token"))?,
        );
    }
    Ok(headers)
}

/// Sends a request and decodes a JSON body, mapping non-2xx answers and
/// undecodable bodies onto [`FetchError`].
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
}

fn summary(
    id: SubmissionId,
    title_slug: String,
    lang: String,
    status: Option<Status>,
    timestamp: i64,
) -> Result<SubmissionSummary, FetchError> {
    if title_slug.trim().is_empty() {
        return Err(FetchError::Malformed(format!(
            "submission {} has an empty titleSlug",
            id
        )));
    }
    Ok(SubmissionSummary {
        id,
        title_slug,
        lang,
        status,
        timestamp,
    })
}

/// Accepts epoch seconds as either a JSON number or a numeric string.
fn flexible_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid timestamp {:?}", s))),
    }
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentAcData {
    recent_ac_submission_list: Option<Vec<RecentAcEntry>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentAcEntry {
    id: SubmissionId,
    title_slug: String,
    lang: String,
    #[serde(deserialize_with = "flexible_timestamp")]
    timestamp: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailData {
    submission_details: Option<DetailEntry>,
}

#[derive(Deserialize)]
struct DetailEntry {
    code: String,
    lang: LangField,
}

/// Older schema versions return the language as a plain string, newer ones as
/// a `{ name, verboseName }` node.
#[derive(Deserialize)]
#[serde(untagged)]
enum LangField {
    Name(String),
    Node { name: String },
}

impl LangField {
    fn into_name(self) -> String {
        match self {
            LangField::Name(name) | LangField::Node { name } => name,
        }
    }
}

#[derive(Deserialize)]
struct RestListing {
    #[serde(default)]
    submissions_dump: Vec<RestEntry>,
    #[serde(default)]
    has_next: bool,
    last_key: Option<String>,
}

#[derive(Deserialize)]
struct RestEntry {
    id: SubmissionId,
    title_slug: String,
    lang: String,
    #[serde(deserialize_with = "flexible_timestamp")]
    timestamp: i64,
    status_display: Option<String>,
}
