//! Export policy
//!
//! Decides, for a group that has visible content, whether its PNG is written.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When an eligible group is (re-)exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportPolicy {
    /// Export every eligible group
    Always,

    /// Export only when no file exists at the target path
    IfMissing,

    /// Export when the file is missing or its rendered content differs
    #[default]
    IfChanged,
}

impl ExportPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportPolicy::Always => "always",
            ExportPolicy::IfMissing => "if-missing",
            ExportPolicy::IfChanged => "if-changed",
        }
    }
}

impl fmt::Display for ExportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "always" => Ok(ExportPolicy::Always),
            "if-missing" | "missing" => Ok(ExportPolicy::IfMissing),
            "if-changed" | "changed" => Ok(ExportPolicy::IfChanged),
            other => Err(format!(
                "Unknown export policy '{other}'. Must be one of: always, if-missing, if-changed"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("always", ExportPolicy::Always ; "always")]
    #[test_case("if-missing", ExportPolicy::IfMissing ; "if missing")]
    #[test_case("IF_CHANGED", ExportPolicy::IfChanged ; "screaming snake")]
    #[test_case(" changed ", ExportPolicy::IfChanged ; "short form")]
    fn test_parse(input: &str, expected: ExportPolicy) {
        assert_eq!(input.parse::<ExportPolicy>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "sometimes".parse::<ExportPolicy>().unwrap_err();
        assert!(err.contains("sometimes"));
    }

    #[test]
    fn test_default_is_if_changed() {
        assert_eq!(ExportPolicy::default(), ExportPolicy::IfChanged);
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: ExportPolicy,
        }
        let wrapper: Wrapper = toml::from_str("policy = \"if-missing\"").unwrap();
        assert_eq!(wrapper.policy, ExportPolicy::IfMissing);
        assert_eq!(ExportPolicy::IfMissing.to_string(), "if-missing");
    }
}
