use serde::{Deserialize, Deserializer};
use std::fmt;

/// Opaque submission identifier.
///
/// The GraphQL endpoint returns ids as JSON strings while the REST listing
/// returns integers; both normalise to the same string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubmissionId {
    fn from(id: &str) -> Self {
        SubmissionId(id.to_string())
    }
}

impl From<u64> for SubmissionId {
    fn from(id: u64) -> Self {
        SubmissionId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for SubmissionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => SubmissionId(s),
            RawId::Number(n) => SubmissionId(n.to_string()),
        })
    }
}

/// Judge verdict of a submission, as far as the sync cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Accepted,
    /// Any other verdict, keeping the judge's label (e.g. "Wrong Answer").
    Other(String),
}

impl Status {
    /// Maps a judge status label onto [`Status`]. Comparison ignores case and
    /// surrounding whitespace.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("accepted") {
            Status::Accepted
        } else {
            Status::Other(label.trim().to_string())
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Accepted => f.write_str("Accepted"),
            Status::Other(label) => f.write_str(label),
        }
    }
}

/// One entry of the submission index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub id: SubmissionId,
    /// Stable problem identifier, used as the filename stem. Never empty.
    pub title_slug: String,
    /// Judge-reported language tag, e.g. "python3".
    pub lang: String,
    /// `None` when the index endpoint only lists accepted submissions.
    pub status: Option<Status>,
    /// Submission time in seconds since the Unix epoch.
    pub timestamp: i64,
}

/// Full source of a submission, fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDetail {
    pub code: String,
    pub lang: String,
}

/// Pagination position understood by a [`SubmissionSource`](super::SubmissionSource).
///
/// Offset-paged sources count items, token-paged sources hand back an opaque
/// continuation key. The reader treats both the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cursor {
    Offset(u64),
    Token(String),
}

impl Cursor {
    /// Position of the first page for a source with the given paging style.
    pub fn start(token_paged: bool) -> Self {
        if token_paged {
            Cursor::Token(String::new())
        } else {
            Cursor::Offset(0)
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Offset(offset) => write!(f, "offset {}", offset),
            Cursor::Token(token) if token.is_empty() => f.write_str("token <start>"),
            Cursor::Token(token) => write!(f, "token {}", token),
        }
    }
}

/// One page of the submission index.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<SubmissionSummary>,
    /// Where the next page starts; `None` when the source reports no more pages.
    pub next_cursor: Option<Cursor>,
}
