use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Equation name -> expression text, iterated in name order
pub type EquationSet = BTreeMap<String, String>;

/// What to do with a variable token that has no defining equation
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedPolicy {
    /// Leave the token in the output as written
    #[default]
    Keep,
    /// Replace the token with nothing
    Empty,
    /// Refuse to expand
    Error,
}

impl UndefinedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UndefinedPolicy::Keep => "keep",
            UndefinedPolicy::Empty => "empty",
            UndefinedPolicy::Error => "error",
        }
    }
}

impl fmt::Display for UndefinedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolver settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub undefined: UndefinedPolicy,
}

impl ResolverConfig {
    pub fn with_undefined(undefined: UndefinedPolicy) -> Self {
        ResolverConfig { undefined }
    }
}

/// A closed walk through the dependency graph, first name repeated at the end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CyclePath {
    path: Vec<String>,
}

impl CyclePath {
    pub fn new(path: Vec<String>) -> Self {
        CyclePath { path }
    }

    pub fn names(&self) -> &[String] {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.path.iter().any(|n| n == name)
    }
}

impl fmt::Display for CyclePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::error::format_cycle(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_display() {
        assert_eq!(UndefinedPolicy::Keep.to_string(), "keep");
        assert_eq!(UndefinedPolicy::Empty.to_string(), "empty");
        assert_eq!(UndefinedPolicy::Error.to_string(), "error");
    }

    #[test]
    fn test_config_defaults_to_keep() {
        assert_eq!(ResolverConfig::default().undefined, UndefinedPolicy::Keep);

        let config: ResolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.undefined, UndefinedPolicy::Keep);

        let config: ResolverConfig = serde_json::from_str(r#"{"undefined":"error"}"#).unwrap();
        assert_eq!(config.undefined, UndefinedPolicy::Error);
    }

    #[test]
    fn test_cycle_path_display() {
        let cycle = CyclePath::new(vec!["A".into(), "B".into(), "C".into(), "A".into()]);
        assert_eq!(cycle.to_string(), "A->B->C->A");
        assert_eq!(cycle.len(), 4);
        assert!(cycle.contains("B"));
        assert!(!cycle.contains("D"));
    }
}
