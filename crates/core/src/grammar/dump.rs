use super::ast::Label;

/// Serialize a label tree to a pretty-printed JSON string.
pub fn to_pretty_json(label: &Label) -> String {
    serde_json::to_string_pretty(label).expect("Label serialization cannot fail")
}
