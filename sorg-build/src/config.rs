use figment::{providers::Env, Figment};
use serde::{Deserialize, Deserializer};

use sorg::chrono::{DateTime, Local};
use sorg::error::Result;

/// The environment variables a build reads.
pub const ENV_KEYS: &[&str] = &[
    "BLACK_SWAN_DATABASE_URL",
    "GOOGLE_ANALYTICS_ID",
    "VERBOSE",
    "RELEASE",
];

/// Build settings, read once from the environment at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Conf {
    /// Where run activity is read from. Without it the runs page is empty.
    pub black_swan_database_url: Option<String>,
    pub google_analytics_id: Option<String>,
    #[serde(default)]
    pub verbose: bool,
    /// Names the versioned assets directory.
    #[serde(default, deserialize_with = "lenient_string")]
    pub release: Option<String>,
}

/// Accepts any scalar as a string: `RELEASE=20240101` parses as a number.
fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        String(String),
        Integer(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Scalar>::deserialize(de)?.map(|scalar| match scalar {
        Scalar::String(s) => s,
        Scalar::Integer(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

impl Conf {
    pub fn figment() -> Figment {
        Figment::from(Env::raw().only(ENV_KEYS))
    }

    pub fn load() -> Result<Self> {
        Self::figment().extract().map_err(|e| sorg::error! {
            "invalid configuration",
            "reason" => e,
        })
    }

    /// The events database URL, if one is set and not blank.
    pub fn database_url(&self) -> Option<&str> {
        self.black_swan_database_url.as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// The analytics id, if one is set and not blank.
    pub fn google_analytics_id(&self) -> Option<&str> {
        self.google_analytics_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// The configured release, or `started` formatted as `%Y%m%d%H%M%S`.
    pub fn release_or(&self, started: DateTime<Local>) -> String {
        match self.release.as_deref().map(str::trim) {
            Some(release) if !release.is_empty() => release.to_string(),
            _ => started.format("%Y%m%d%H%M%S").to_string(),
        }
    }
}
