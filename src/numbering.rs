//! Hierarchical numbering of content nodes.
//!
//! A node's number is the chain of sibling ordinals of its enumerable
//! ancestors followed by its own, e.g. `1.3.2`. Each content type has its
//! own [`NumberingRule`]; types without an override use the document-wide
//! default.

use crate::error::Warning;
use crate::model::{ContentType, NodeRef};
use crate::number::{Number, NumberFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How numbers of one content type are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberingRule {
    /// Format of every component
    pub format: NumberFormat,

    /// Number of enumerable ancestors contributing components (-1 = all)
    pub level: i32,

    /// Text before the number
    pub prefix: String,

    /// Text after the number
    pub postfix: String,

    /// Text between components
    pub separator: String,

    /// Value of the first sibling
    pub start_index: i64,
}

impl NumberingRule {
    /// Create the default rule: `int`, unlimited depth, `.` separator, starting at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number format.
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the ancestor depth.
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Set the prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the postfix.
    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    /// Set the separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the start index.
    pub fn with_start_index(mut self, start_index: i64) -> Self {
        self.start_index = start_index;
        self
    }
}

impl Default for NumberingRule {
    fn default() -> Self {
        Self {
            format: NumberFormat::Int,
            level: -1,
            prefix: String::new(),
            postfix: String::new(),
            separator: ".".to_string(),
            start_index: 1,
        }
    }
}

/// Per-type partial override of the default rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberingOverride {
    pub format: Option<NumberFormat>,
    pub level: Option<i32>,
    pub prefix: Option<String>,
    pub postfix: Option<String>,
    pub separator: Option<String>,
    pub start_index: Option<i64>,
}

impl NumberingOverride {
    /// Override the format.
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Override the ancestor depth.
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    /// Override the prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Override the postfix.
    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = Some(postfix.into());
        self
    }

    /// Override the separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Override the start index.
    pub fn with_start_index(mut self, start_index: i64) -> Self {
        self.start_index = Some(start_index);
        self
    }

    fn apply(&self, base: &NumberingRule) -> NumberingRule {
        NumberingRule {
            format: self.format.unwrap_or(base.format),
            level: self.level.unwrap_or(base.level),
            prefix: self.prefix.clone().unwrap_or_else(|| base.prefix.clone()),
            postfix: self.postfix.clone().unwrap_or_else(|| base.postfix.clone()),
            separator: self
                .separator
                .clone()
                .unwrap_or_else(|| base.separator.clone()),
            start_index: self.start_index.unwrap_or(base.start_index),
        }
    }
}

/// Numbering configuration of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberingSettings {
    /// Rule for types without an override
    pub default: NumberingRule,

    /// Overrides per content type
    pub types: HashMap<ContentType, NumberingOverride>,
}

impl NumberingSettings {
    /// Create settings with the default rule and no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default rule.
    pub fn with_default(mut self, rule: NumberingRule) -> Self {
        self.default = rule;
        self
    }

    /// Add an override for a content type.
    pub fn with_override(mut self, content_type: ContentType, rule: NumberingOverride) -> Self {
        self.types.insert(content_type, rule);
        self
    }

    /// Effective rule of a content type.
    pub fn rule_for(&self, content_type: ContentType) -> NumberingRule {
        match self.types.get(&content_type) {
            Some(rule) => rule.apply(&self.default),
            None => self.default.clone(),
        }
    }

    /// Replace numbering levels below -1 with -1, clamp start indices into
    /// the 32-bit range, and report both.
    pub fn validate(&mut self) -> Vec<Warning> {
        let mut warnings = Vec::new();
        if self.default.level < -1 {
            warnings.push(Warning::InvalidNumberingLevel {
                content_type: ContentType::Document,
                level: self.default.level,
            });
            self.default.level = -1;
        }
        warnings.extend(clamp_start_index(
            ContentType::Document,
            &mut self.default.start_index,
        ));

        let mut types: Vec<_> = self.types.iter_mut().collect();
        types.sort_by_key(|(content_type, _)| **content_type);
        for (content_type, rule) in types {
            if let Some(level) = rule.level.filter(|level| *level < -1) {
                warnings.push(Warning::InvalidNumberingLevel {
                    content_type: *content_type,
                    level,
                });
                rule.level = Some(-1);
            }
            if let Some(start) = rule.start_index.as_mut() {
                warnings.extend(clamp_start_index(*content_type, start));
            }
        }
        warnings
    }
}

fn clamp_start_index(content_type: ContentType, start_index: &mut i64) -> Option<Warning> {
    let clamped = (*start_index).clamp(i64::from(i32::MIN), i64::from(i32::MAX));
    if clamped == *start_index {
        return None;
    }
    let warning = Warning::InvalidStartIndex {
        content_type,
        start_index: *start_index,
        clamped,
    };
    *start_index = clamped;
    Some(warning)
}

/// Access to the hierarchical number of a node.
pub trait Numberable {
    /// Raw components, outermost first. Empty when the node is not enumerated.
    fn numbers(&self) -> Vec<i64>;

    /// Components rendered with the node type's rule, e.g. `"(2.1)"`.
    fn formatted_numbers(&self) -> String;
}

impl Numberable for NodeRef<'_> {
    fn numbers(&self) -> Vec<i64> {
        if !self.enumerate() || self.id() == self.document().root() {
            return Vec::new();
        }
        let numbering = &self.document().settings().numbering;
        let level = numbering.rule_for(self.content_type()).level;

        let mut chain = vec![*self];
        let ancestors = self.ancestors().filter(|n| n.enumerate());
        match usize::try_from(level) {
            Ok(limit) => chain.extend(ancestors.take(limit)),
            Err(_) => chain.extend(ancestors),
        }

        chain
            .iter()
            .rev()
            .map(|node| {
                let start = numbering.rule_for(node.content_type()).start_index;
                let ordinal = i64::try_from(sibling_ordinal(node)).unwrap_or(i64::MAX);
                start.saturating_add(ordinal - 1)
            })
            .collect()
    }

    fn formatted_numbers(&self) -> String {
        let numbers = self.numbers();
        if numbers.is_empty() {
            return String::new();
        }
        let rule = self
            .document()
            .settings()
            .numbering
            .rule_for(self.content_type());

        let components: Vec<String> = numbers
            .into_iter()
            .map(|n| Number(n).formatted(rule.format))
            .collect();
        format!(
            "{}{}{}",
            rule.prefix,
            components.join(&rule.separator),
            rule.postfix
        )
    }
}

/// 1-based position among enumerated siblings of the same type.
pub fn sibling_ordinal(node: &NodeRef<'_>) -> usize {
    let Some(parent) = node.parent_node() else {
        return 1;
    };
    let content_type = node.content_type();
    parent
        .child_nodes()
        .filter(|sibling| sibling.enumerate() && sibling.content_type() == content_type)
        .position(|sibling| sibling.id() == node.id())
        .map_or(1, |index| index + 1)
}
