//! JSON rendering for generated lists.

use crate::error::{Error, Result};
use crate::list::ListOutput;
use serde_json::Value;

/// Layout of the emitted JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Two-space indentation, one field per line
    #[default]
    Pretty,
    /// Single line
    Compact,
}

/// Serialize a generated list.
///
/// Warnings collected while building the list are appended as a
/// `"warnings"` array of messages; the key is absent when there were none.
pub fn to_json(list: &ListOutput, format: JsonFormat) -> Result<String> {
    let render_error =
        |e: serde_json::Error| Error::Render(format!("JSON serialization error: {}", e));

    let mut value = serde_json::to_value(list).map_err(render_error)?;
    let warnings = list.diagnostics.warnings();
    if let (false, Value::Object(fields)) = (warnings.is_empty(), &mut value) {
        let messages = warnings.iter().map(|w| Value::String(w.to_string())).collect();
        fields.insert("warnings".to_string(), Value::Array(messages));
    }

    match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&value),
        JsonFormat::Compact => serde_json::to_string(&value),
    }
    .map_err(render_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListBuilder;
    use crate::model::Document;

    fn sample() -> ListOutput {
        let mut doc = Document::new();
        let root = doc.root();
        let intro = doc.add_section(root, "Intro").unwrap();
        doc.add_section(intro, "Background").unwrap();
        let out = ListBuilder::new(&doc).preview();
        out
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"iterator_depth\""));
        assert!(json.contains("Background"));
        assert!(json.contains('\n'));
        // unresolved rows carry no link
        assert!(!json.contains("\"link\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"][1]["numbers"], "1.1");
        assert_eq!(value["rows"][1]["level"], 1);
        assert!(value.get("warnings").is_none());
    }

    #[test]
    fn test_to_json_lists_warnings() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.add_section(root, "Intro").unwrap();
        let list = ListBuilder::new(&doc).with_max_depth(-5).preview();

        let json = to_json(&list, JsonFormat::Compact).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["warnings"],
            serde_json::json!(["Invalid max depth -5, defaulting to -1"])
        );
    }
}
