//! Stream identifiers.

use std::fmt;
use std::str::FromStr;

/// A stream published on the broker, identified as `name:category:status`.
///
/// `category` is the inference type (e.g. `face`, `people`, `car`) and
/// `status` tells original frames (`origin`) from inferred ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamInfo {
    name: String,
    category: String,
    status: String,
}

/// Error for ids that are not `name:category:status`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("incorrect stream id `{0}`")]
pub struct InvalidStreamId(pub String);

impl StreamInfo {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            status: status.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// The broker id of this stream.
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StreamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.category, self.status)
    }
}

impl FromStr for StreamInfo {
    type Err = InvalidStreamId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(category), Some(status), None) => {
                Ok(Self::new(name, category, status))
            }
            _ => Err(InvalidStreamId(s.to_string())),
        }
    }
}
