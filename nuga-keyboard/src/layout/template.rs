// Layout templates
// Per-model mapping between key-code slots and physical key names

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Model;

/// Template loading errors
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Template {model}: slot {slot} is named both '{first}' and '{second}'")]
    DuplicateSlot {
        model: Model,
        slot: u8,
        first: String,
        second: String,
    },
}

/// Template document as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateFile {
    pub model: Model,
    /// Key name -> slot index
    pub keys: BTreeMap<String, u8>,
}

/// Layout template for one keyboard model
///
/// Names a subset of the 256 key-code slots. No two names share a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    model: Model,
    by_name: BTreeMap<String, u8>,
    by_slot: HashMap<u8, String>,
}

impl Template {
    /// Build a template, rejecting two names on one slot
    pub fn new(
        model: Model,
        keys: impl IntoIterator<Item = (String, u8)>,
    ) -> Result<Self, TemplateError> {
        let mut by_name = BTreeMap::new();
        let mut by_slot: HashMap<u8, String> = HashMap::new();
        for (name, slot) in keys {
            if let Some(first) = by_slot.get(&slot) {
                return Err(TemplateError::DuplicateSlot {
                    model,
                    slot,
                    first: first.clone(),
                    second: name,
                });
            }
            by_slot.insert(slot, name.clone());
            by_name.insert(name, slot);
        }
        Ok(Self {
            model,
            by_name,
            by_slot,
        })
    }

    /// Load a template from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        let file: TemplateFile = serde_json::from_str(json)?;
        Self::new(file.model, file.keys)
    }

    /// Load a template from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Slot index of a named key
    pub fn slot(&self, name: &str) -> Option<u8> {
        self.by_name.get(name).copied()
    }

    /// Key name at a slot, if the slot is part of the physical layout
    pub fn name(&self, slot: u8) -> Option<&str> {
        self.by_slot.get(&slot).map(String::as_str)
    }

    /// Named keys with their slots, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.by_name.iter().map(|(name, &slot)| (name.as_str(), slot))
    }

    /// Number of named keys
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Convert back to the on-disk form
    pub fn to_file(&self) -> TemplateFile {
        TemplateFile {
            model: self.model.clone(),
            keys: self.by_name.clone(),
        }
    }
}
