use serde::Serialize;
use std::collections::BTreeMap;

pub const PALETTE: &[&str] = &[
    "#ff0000", "#00ff00", "#0000ff", "#ff00ff", "#00ffff", "#ffff00", "#ff8000",
];

/// Series colors fixed for the lifetime of one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColorTable(BTreeMap<String, &'static str>);

impl ColorTable {
    pub fn assign(keys: &[String]) -> Self {
        Self(
            keys.iter()
                .zip(PALETTE.iter().cycle())
                .map(|(key, color)| (key.clone(), *color))
                .collect(),
        )
    }

    pub fn color_of(&self, key: &str) -> Option<&'static str> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
