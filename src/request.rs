//! Request parameter sources.
//!
//! The filter builder only needs one capability from the web layer: "give me
//! every parameter whose name starts with a prefix". [`ParameterSource`] is
//! that seam; any request abstraction can implement it.

use std::collections::{BTreeMap, HashMap};

/// Source of raw request parameters, keyed by full parameter name.
pub trait ParameterSource {
    /// Every (name, value) pair whose name starts with `prefix`, in the
    /// source's own iteration order, with the prefix stripped from the
    /// returned names. Values are returned raw (not percent-decoded).
    fn parameters_starting_with(&self, prefix: &str) -> Vec<(String, String)>;
}

impl ParameterSource for Vec<(String, String)> {
    fn parameters_starting_with(&self, prefix: &str) -> Vec<(String, String)> {
        self.iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(prefix)
                    .map(|rest| (rest.to_string(), value.clone()))
            })
            .collect()
    }
}

impl ParameterSource for BTreeMap<String, String> {
    fn parameters_starting_with(&self, prefix: &str) -> Vec<(String, String)> {
        self.iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(prefix)
                    .map(|rest| (rest.to_string(), value.clone()))
            })
            .collect()
    }
}

impl ParameterSource for HashMap<String, String> {
    fn parameters_starting_with(&self, prefix: &str) -> Vec<(String, String)> {
        self.iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(prefix)
                    .map(|rest| (rest.to_string(), value.clone()))
            })
            .collect()
    }
}

/// A raw query string (`a=1&b=2`) split into ordered name/value pairs.
///
/// Values are kept exactly as written; percent-decoding is the filter
/// builder's job.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn parse(input: &str) -> Self {
        let pairs = input
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((name, value)) => (name.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl ParameterSource for QueryString {
    fn parameters_starting_with(&self, prefix: &str) -> Vec<(String, String)> {
        self.pairs.parameters_starting_with(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_parse() {
        let query = QueryString::parse("filter_EQS_name=Alice&page=2&filter_GTI_age=30");
        assert_eq!(
            query.pairs(),
            &[
                ("filter_EQS_name".to_string(), "Alice".to_string()),
                ("page".to_string(), "2".to_string()),
                ("filter_GTI_age".to_string(), "30".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_string_missing_value() {
        let query = QueryString::parse("filter_INS_deleted_at=&flag");
        assert_eq!(
            query.pairs(),
            &[
                ("filter_INS_deleted_at".to_string(), String::new()),
                ("flag".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_query_string_keeps_values_raw() {
        let query = QueryString::parse("filter_LIKES_name=A%20B");
        assert_eq!(query.pairs()[0].1, "A%20B");
    }

    #[test]
    fn test_prefix_selection_strips_prefix() {
        let query = QueryString::parse("filter_EQS_name=Alice&page=2&filter_GTI_age=30");
        let selected = query.parameters_starting_with("filter_");
        assert_eq!(
            selected,
            vec![
                ("EQS_name".to_string(), "Alice".to_string()),
                ("GTI_age".to_string(), "30".to_string()),
            ]
        );
    }

    #[test]
    fn test_vec_source_keeps_order() {
        let source = vec![
            ("filter_GTI_age".to_string(), "30".to_string()),
            ("filter_EQS_name".to_string(), "Alice".to_string()),
        ];
        let selected = source.parameters_starting_with("filter_");
        assert_eq!(selected[0].0, "GTI_age");
        assert_eq!(selected[1].0, "EQS_name");
    }

    #[test]
    fn test_btree_map_source() {
        let mut source = BTreeMap::new();
        source.insert("filter_EQS_name".to_string(), "Alice".to_string());
        source.insert("other".to_string(), "x".to_string());
        let selected = source.parameters_starting_with("filter_");
        assert_eq!(selected, vec![("EQS_name".to_string(), "Alice".to_string())]);
    }

    #[test]
    fn test_hash_map_source() {
        let mut source = HashMap::new();
        source.insert("filter_EQS_name".to_string(), "Alice".to_string());
        source.insert("unrelated_EQS_name".to_string(), "Bob".to_string());
        let selected = source.parameters_starting_with("filter_");
        assert_eq!(selected, vec![("EQS_name".to_string(), "Alice".to_string())]);
    }
}
