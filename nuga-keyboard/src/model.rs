//! Keyboard model identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// NuPhy Halo75
pub const HALO75: &str = "Halo75";
/// NuPhy Halo65
pub const HALO65: &str = "Halo65";
/// NuPhy Halo96
pub const HALO96: &str = "Halo96";

/// Keyboard model name, as reported in the USB product string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Model {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Model {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Model {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
