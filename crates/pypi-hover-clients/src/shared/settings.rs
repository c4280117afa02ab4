use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

/// Default maximum number of cached package records.
pub const CACHE_MAX_COUNT_DEFAULT: i64 = 1000;

/**
    User-facing cache settings.

    The only recognized option is `cache_max_count` - zero or a
    negative value disables size-based eviction entirely.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub cache_max_count: i64,
}

impl CacheSettings {
    /**
        Loads settings from a JSON file, falling back to
        defaults if the file is missing or unreadable.
    */
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(value) => Self::from_json(&value),
            Err(e) => {
                warn!("Ignoring unparseable settings file '{}': {e}", path.display());
                Self::default()
            }
        }
    }

    /**
        Reads settings out of a parsed JSON object.

        A `cache_max_count` that is not an integer (and not a string
        parseable as one) falls back to the default with a diagnostic.
    */
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let cache_max_count = match value.get("cache_max_count") {
            None => CACHE_MAX_COUNT_DEFAULT,
            Some(v) => parse_max_count(v).unwrap_or_else(|| {
                warn!("Invalid cache_max_count value {v}, using default {CACHE_MAX_COUNT_DEFAULT}");
                CACHE_MAX_COUNT_DEFAULT
            }),
        };

        Self { cache_max_count }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            cache_max_count: CACHE_MAX_COUNT_DEFAULT,
        }
    }
}

fn parse_max_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
