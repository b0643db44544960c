use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod chat;
pub mod form;
pub mod user;

pub use chat::{ChatMessage, ChatRecommendation, ChatReply, MessageContent, Role};
pub use form::FormFilters;
pub use user::{User, UserAction, UserProfile};

/// Identifier the recommendation API assigns to a movie
pub type MovieId = i64;

/// A single genre entry as the catalog encodes it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

/// Genres attached to a movie.
///
/// The API ships genres as a JSON-encoded string (`"[{\"id\": 28, \"name\": \"Action\"}]"`).
/// Anything that does not decode to a list of `{name}` objects becomes `Unknown`
/// instead of failing the whole record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Genres {
    Known(Vec<Genre>),
    #[default]
    Unknown,
}

impl Genres {
    /// Parse the JSON-encoded genre string the API returns
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Vec<Genre>>(raw) {
            Ok(genres) => Genres::Known(genres),
            Err(e) => {
                tracing::debug!(error = %e, "Genre field is not a JSON genre list");
                Genres::Unknown
            }
        }
    }

    fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(raw) => Self::parse(&raw),
            serde_json::Value::Array(_) => serde_json::from_value::<Vec<Genre>>(value)
                .map(Genres::Known)
                .unwrap_or(Genres::Unknown),
            _ => Genres::Unknown,
        }
    }

    /// Genre names in API order; empty when unknown
    pub fn names(&self) -> Vec<String> {
        match self {
            Genres::Known(genres) => genres.iter().map(|g| g.name.clone()).collect(),
            Genres::Unknown => Vec::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Genres::Unknown)
    }
}

impl<'de> Deserialize<'de> for Genres {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw.map(Genres::from_value).unwrap_or_default())
    }
}

impl Serialize for Genres {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Genres::Known(genres) => genres.serialize(serializer),
            Genres::Unknown => serializer.serialize_none(),
        }
    }
}

/// Movie record as returned by the catalog and recommendation endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Genres,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: None,
            genres: Genres::Unknown,
            vote_average: None,
            year: None,
            poster_url: None,
            ai_explanation: None,
            similarity_explanation: None,
            popularity_score: None,
            score: None,
        }
    }

    pub fn genre_names(&self) -> Vec<String> {
        self.genres.names()
    }
}

/// Accepts years encoded as integers, floats (`2009.0`), numeric strings or null.
pub(crate) fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok().map(|f| f as i32),
        _ => None,
    })
}

/// Accepts a number or a numeric string; anything else reads as absent
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite()))
}

/// Accepts a string or a scalar rendered as text; null, objects and arrays read as absent
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Parameters for `GET /catalog`
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    pub q: Option<String>,
    pub limit: u32,
}

impl CatalogQuery {
    pub fn first(limit: u32) -> Self {
        Self { q: None, limit }
    }
}

/// Parameters for `GET /recommend/popular`
#[derive(Debug, Clone, PartialEq)]
pub struct PopularQuery {
    pub top_n: u32,
    pub genre: String,
    pub ai: bool,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub movies: Option<u64>,
}
