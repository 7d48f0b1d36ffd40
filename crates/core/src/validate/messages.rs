//! User-facing message texts. Tools match on these strings, so the wording
//! must stay stable.

pub(super) fn mismatched_close(name: &str, closing: &str) -> String {
    format!("Tag '<{name}>' is not closed (expected '</{name}>' but got '</{closing}>').")
}

pub(super) fn unsupported_tag(name: &str) -> String {
    format!("Tag '<{name}>' is not supported.")
}

pub(super) fn invalid_parent(name: &str, parent: &str, allowed: &[String]) -> String {
    if allowed.is_empty() {
        return format!("Tag '<{name}>' is not allowed inside '<{parent}>'.");
    }
    let allowed = allowed
        .iter()
        .map(|p| format!("'<{p}>'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Tag '<{name}>' is not allowed inside '<{parent}>', but only inside {allowed}.")
}

pub(super) fn invalid_attribute(attribute: &str, tag: &str) -> String {
    format!("Attribute '{attribute}' is not allowed inside '<{tag}>'.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parent_lists_all_parents_in_order() {
        let allowed = vec!["TD".to_string(), "ROOT".to_string()];
        assert_eq!(
            invalid_parent("U", "table", &allowed),
            "Tag '<U>' is not allowed inside '<table>', but only inside '<TD>', '<ROOT>'."
        );
    }

    #[test]
    fn invalid_parent_without_any_parent() {
        assert_eq!(
            invalid_parent("x", "ROOT", &[]),
            "Tag '<x>' is not allowed inside '<ROOT>'."
        );
    }

    #[test]
    fn mismatched_close_keeps_source_case() {
        assert_eq!(
            mismatched_close("test", "B"),
            "Tag '<test>' is not closed (expected '</test>' but got '</B>')."
        );
    }
}
