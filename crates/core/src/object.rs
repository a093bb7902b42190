//! Object names

use std::fmt;

use uuid::Uuid;

use crate::error::{Error, Result};

/// Key of an object within the target bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName(String);

impl ObjectName {
    /// Mint a fresh, random (version 4) UUID name in hyphenated form
    pub fn mint() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Take a caller-supplied name verbatim
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Usage("Object name cannot be empty".into()));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ObjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
