use serde::{Deserialize, Serialize};

use crate::Accessibility;

/// Settings for computing and applying assists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AssistConfig {
    pub change_accessibility: bool,
    pub separate_using_groups: bool,
    pub newline: NewlineStyle,
    /// Targets that replace only the first accessibility keyword of a nested class, keeping
    /// any others.
    pub nested_class_direct_targets: Vec<Accessibility>,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            change_accessibility: true,
            separate_using_groups: true,
            newline: NewlineStyle::Detect,
            nested_class_direct_targets: vec![Accessibility::Internal, Accessibility::Private],
        }
    }
}

/// Line terminator inserted between using groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlineStyle {
    /// The first terminator found in the document, else the platform's.
    #[default]
    Detect,
    Lf,
    Crlf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config: AssistConfig = serde_json::from_str(r#"{ "newline": "crlf" }"#).unwrap();
        assert_eq!(config, AssistConfig { newline: NewlineStyle::Crlf, ..AssistConfig::default() });
    }

    #[test]
    fn nested_targets_are_camel_case() {
        let config: AssistConfig =
            serde_json::from_str(r#"{ "nestedClassDirectTargets": ["public", "protectedInternal"] }"#)
                .unwrap();
        assert_eq!(
            config.nested_class_direct_targets,
            [Accessibility::Public, Accessibility::ProtectedInternal]
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = serde_json::from_str::<AssistConfig>(r#"{ "sortUsings": true }"#).unwrap_err();
        assert!(error.to_string().contains("unknown field `sortUsings`"), "{error}");
    }
}
