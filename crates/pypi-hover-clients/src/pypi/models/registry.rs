use serde::{Deserialize, Serialize};
use serde_json::Value;

/**
    Raw package metadata as returned by the `PyPI` JSON registry.

    The full response is kept as-is rather than deserialized into a
    typed struct - the blob is cached verbatim, and display shaping
    downstream decides which `info` fields it needs and reports
    missing ones itself.
*/
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryMetadata {
    value: Value,
}

impl RegistryMetadata {
    #[allow(clippy::missing_errors_doc)]
    pub fn try_from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn from_blob(blob: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(blob)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn to_blob(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// The `info` section of the response, if present.
    #[must_use]
    pub fn info(&self) -> Option<&Value> {
        self.value.get("info")
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.value
    }
}

impl From<Value> for RegistryMetadata {
    fn from(value: Value) -> Self {
        Self { value }
    }
}
