//! Per-key style lookup with default fallback.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A value with optional overrides per key (e.g. `"title"`, `"level1"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleMap<T> {
    /// Value used when no key matches
    pub default: T,

    /// Keyed overrides
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub keyed: HashMap<String, T>,
}

impl<T> StyleMap<T> {
    /// Create a map holding only a default.
    pub fn new(default: T) -> Self {
        Self {
            default,
            keyed: HashMap::new(),
        }
    }

    /// Add an override for `key`.
    pub fn with(mut self, key: impl Into<String>, value: T) -> Self {
        self.keyed.insert(key.into(), value);
        self
    }

    /// Value for `key`, or the default.
    pub fn get(&self, key: Option<&str>) -> &T {
        key.and_then(|k| self.keyed.get(k)).unwrap_or(&self.default)
    }

    /// Merge overrides from `other`; its keys win.
    pub fn merge(&mut self, other: HashMap<String, T>) {
        self.keyed.extend(other);
    }
}

/// Style settings of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
    /// Font family name
    pub font_family: StyleMap<String>,

    /// Font size in points
    pub font_size: StyleMap<f32>,

    /// Font variation flags, e.g. `"B"`, `"BI"`
    pub font_style: StyleMap<String>,

    /// Margins in user units (`"top"`, `"bottom"`, `"left"`, `"right"`)
    pub margins: StyleMap<f32>,

    /// Line pitch relative to the font size
    pub line_pitch: f32,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            font_family: StyleMap::new("times".to_string()),
            font_size: StyleMap::new(12.0),
            font_style: StyleMap::new(String::new()),
            margins: StyleMap::new(0.0),
            line_pitch: 1.25,
        }
    }
}

/// Access to a node's style with default fallback.
pub trait Styleable {
    /// Underlying style settings.
    fn style(&self) -> &NodeStyle;

    /// Font family for `key`.
    fn font_family(&self, key: Option<&str>) -> &str {
        self.style().font_family.get(key)
    }

    /// Font size for `key`.
    fn font_size(&self, key: Option<&str>) -> f32 {
        *self.style().font_size.get(key)
    }

    /// Font style for `key`.
    fn font_style(&self, key: Option<&str>) -> &str {
        self.style().font_style.get(key)
    }

    /// Margin for `key`.
    fn margin(&self, key: Option<&str>) -> f32 {
        *self.style().margins.get(key)
    }
}

impl Styleable for NodeStyle {
    fn style(&self) -> &NodeStyle {
        self
    }
}
