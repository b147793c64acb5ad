//! Core identifier types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Namespace assumed when an identifier string has no `namespace:` prefix
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Identifier parsing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("identifier has an empty path: '{0}'")]
    EmptyPath(String),
    #[error("invalid character '{ch}' in namespace of '{id}'")]
    InvalidNamespace { id: String, ch: char },
    #[error("invalid character '{ch}' in path of '{id}'")]
    InvalidPath { id: String, ch: char },
}

/// Identifier of a weapon definition, rendered as `namespace:path`
///
/// Used both as the registry key and as the target of a parent reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeaponId {
    namespace: String,
    path: String,
}

impl WeaponId {
    /// Create an identifier from its two halves, validating both
    ///
    /// An empty namespace means the default namespace.
    pub fn new(namespace: &str, path: &str) -> Result<Self, IdError> {
        let namespace = if namespace.is_empty() {
            DEFAULT_NAMESPACE
        } else {
            namespace
        };
        let id = WeaponId {
            namespace: namespace.to_string(),
            path: path.to_string(),
        };
        id.validate()?;
        Ok(id)
    }

    /// Parse `namespace:path`, or a bare `path` in the default namespace
    pub fn parse(s: &str) -> Result<Self, IdError> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn validate(&self) -> Result<(), IdError> {
        if self.path.is_empty() {
            return Err(IdError::EmptyPath(self.to_string()));
        }
        if let Some(ch) = self.namespace.chars().find(|c| !is_namespace_char(*c)) {
            return Err(IdError::InvalidNamespace {
                id: self.to_string(),
                ch,
            });
        }
        if let Some(ch) = self.path.chars().find(|c| !is_path_char(*c)) {
            return Err(IdError::InvalidPath {
                id: self.to_string(),
                ch,
            });
        }
        Ok(())
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for WeaponId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for WeaponId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeaponId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        WeaponId::parse(&s).map_err(serde::de::Error::custom)
    }
}
