use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, timestamp, MissingField, Record};

/// A fragment's front matter, as written in the source.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FragmentMeta {
    pub title: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_opt")]
    pub published_at: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

/// A short, stream-of-consciousness style piece.
#[derive(Debug, Clone, Serialize)]
pub struct Fragment {
    pub title: String,
    pub published_at: DateTime<Utc>,
    #[serde(serialize_with = "crate::util::or_empty")]
    pub image: Option<String>,
    pub content: String,
}

impl Record for Fragment {
    const KIND: &'static str = "fragment";

    type Meta = FragmentMeta;

    fn from_meta(meta: FragmentMeta, path: &Path) -> Result<Self, MissingField> {
        let missing = |field| MissingField { record: Self::KIND, field, path: path.into() };
        let title = required(&meta.title).ok_or_else(|| missing("title"))?;
        let published_at = meta.published_at.ok_or_else(|| missing("published_at"))?;

        Ok(Fragment {
            title: title.to_string(),
            published_at,
            image: meta.image,
            content: String::new(),
        })
    }

    fn with_content(self, content: String) -> Self {
        Fragment { content, ..self }
    }
}
