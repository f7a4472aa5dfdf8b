//! Allow-list parameter filtering.
//!
//! Decides whether a parameter's value may be rendered in the request
//! log. A pure, total function: an empty allow-list permits every name,
//! a non-empty one permits exact matches only. Excluded parameters are
//! omitted from the record entirely, never masked.

use std::collections::HashSet;

/// Whether a parameter is allowed to appear in log output.
///
/// Matching is exact string equality; an unknown or mistyped name is
/// never logged by accident.
pub fn should_log_parameter(name: &str, allow_list: &HashSet<String>) -> bool {
    allow_list.is_empty() || allow_list.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_allow_list_permits_everything() {
        let list = HashSet::new();
        assert!(should_log_parameter("param1", &list));
        assert!(should_log_parameter("anything", &list));
    }

    #[test]
    fn test_membership_is_exact() {
        let list = allow(&["param1"]);
        assert!(should_log_parameter("param1", &list));
        assert!(!should_log_parameter("param2", &list));
        assert!(!should_log_parameter("Param1", &list));
        assert!(!should_log_parameter("param1 ", &list));
    }
}
