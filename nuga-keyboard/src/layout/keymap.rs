//! Named key maps.
//!
//! A [`KeyMap`] is the view of a raw 256-slot key-code array through a
//! [`Template`]: only the slots the template names appear in it. Applying a
//! map writes those slots back and leaves every other slot untouched, so a
//! map read from one device can be patched onto another.

use std::collections::BTreeMap;

use nuga_transport::protocol::keys::SLOTS;
use serde::{Deserialize, Serialize};

use super::template::Template;
use crate::error::KeyboardError;

/// Key name -> key code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMap(BTreeMap<String, u32>);

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the named slots of a raw key-code array
    pub fn parse(codes: &[u32], template: Option<&Template>) -> Result<Self, KeyboardError> {
        let template = template.ok_or(KeyboardError::MissingTemplate)?;
        check_len(codes)?;
        Ok(Self(
            template
                .iter()
                .map(|(name, slot)| (name.to_string(), codes[slot as usize]))
                .collect(),
        ))
    }

    /// Write this map onto a raw key-code array
    ///
    /// Names the template does not know are skipped, so maps built against
    /// a larger layout still apply to a smaller one.
    pub fn apply(&self, codes: &mut [u32], template: Option<&Template>) -> Result<(), KeyboardError> {
        let template = template.ok_or(KeyboardError::MissingTemplate)?;
        check_len(codes)?;
        for (name, &code) in &self.0 {
            if let Some(slot) = template.slot(name) {
                codes[slot as usize] = code;
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    pub fn insert(&mut self, name: impl Into<String>, code: u32) -> Option<u32> {
        self.0.insert(name.into(), code)
    }

    pub fn remove(&mut self, name: &str) -> Option<u32> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, &code)| (name.as_str(), code))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, u32)> for KeyMap {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn check_len(codes: &[u32]) -> Result<(), KeyboardError> {
    if codes.len() != SLOTS {
        return Err(KeyboardError::length("key code array", SLOTS, codes.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    fn template() -> Template {
        Template::new(
            Model::from("Test"),
            [
                ("esc".to_string(), 0),
                ("a".to_string(), 10),
                ("z".to_string(), 255),
            ],
        )
        .unwrap()
    }

    fn codes() -> Vec<u32> {
        (0..SLOTS as u32).map(|i| i * 3 + 1).collect()
    }

    #[test]
    fn test_parse_named_slots_only() {
        let map = KeyMap::parse(&codes(), Some(&template())).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("esc"), Some(1));
        assert_eq!(map.get("a"), Some(31));
        assert_eq!(map.get("z"), Some(766));
    }

    #[test]
    fn test_parse_without_template() {
        assert!(matches!(
            KeyMap::parse(&codes(), None),
            Err(KeyboardError::MissingTemplate)
        ));
    }

    #[test]
    fn test_parse_wrong_length() {
        let short = vec![0u32; SLOTS - 1];
        assert!(matches!(
            KeyMap::parse(&short, Some(&template())),
            Err(KeyboardError::BufferLength {
                expected: SLOTS,
                actual: 255,
                ..
            })
        ));
    }

    #[test]
    fn test_apply_patches_only_named_slots() {
        let mut map = KeyMap::new();
        map.insert("a", 0xdead);
        let mut raw = codes();
        map.apply(&mut raw, Some(&template())).unwrap();

        let mut expected = codes();
        expected[10] = 0xdead;
        assert_eq!(raw, expected);
    }

    #[test]
    fn test_apply_ignores_unknown_names() {
        let mut map = KeyMap::new();
        map.insert("f13", 0xbeef_0000);
        map.insert("esc", 9);
        let mut raw = codes();
        map.apply(&mut raw, Some(&template())).unwrap();
        assert_eq!(raw[0], 9);
        assert!(!raw.contains(&0xbeef_0000));
        assert_eq!(raw[1..], codes()[1..]);
    }
}
