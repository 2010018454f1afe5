// Processor Domain Model

use serde::{Deserialize, Serialize};

/// Names an external OCR-D processor.
///
/// `None` is a legal state meaning "default/unspecified processor" and is kept
/// distinct from an empty identifier. The value is exposed as given, without
/// trimming or validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessorIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
}

impl ProcessorIdentity {
    pub fn new(identifier: Option<String>) -> Self {
        Self { identifier }
    }

    pub fn named(identifier: impl Into<String>) -> Self {
        Self::new(Some(identifier.into()))
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// True when no identifier was given at all
    pub fn is_unspecified(&self) -> bool {
        self.identifier.is_none()
    }
}

impl std::fmt::Display for ProcessorIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.identifier {
            Some(identifier) => write!(f, "{}", identifier),
            None => write!(f, "<default>"),
        }
    }
}

/// Human-readable description of what a processor does.
///
/// Carries no identity; callers correlate it with the [`ProcessorIdentity`]
/// they asked about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescription {
    description: String,
}

impl ProcessDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_identifier_differs_from_empty() {
        let absent = ProcessorIdentity::default();
        let empty = ProcessorIdentity::named("");

        assert_eq!(absent.identifier(), None);
        assert_eq!(empty.identifier(), Some(""));
        assert_ne!(absent, empty);
        assert!(absent.is_unspecified());
        assert!(!empty.is_unspecified());
    }

    #[test]
    fn test_identifier_is_not_trimmed() {
        let identity = ProcessorIdentity::named("  ocrd-cis-ocropy-binarize ");
        assert_eq!(identity.identifier(), Some("  ocrd-cis-ocropy-binarize "));
    }

    #[test]
    fn test_identity_wire_shape() {
        let absent: ProcessorIdentity = serde_json::from_str("{}").unwrap();
        assert!(absent.is_unspecified());

        let null: ProcessorIdentity = serde_json::from_str(r#"{"identifier":null}"#).unwrap();
        assert!(null.is_unspecified());

        let empty: ProcessorIdentity = serde_json::from_str(r#"{"identifier":""}"#).unwrap();
        assert_eq!(empty.identifier(), Some(""));

        assert_eq!(serde_json::to_string(&absent).unwrap(), "{}");
    }

    #[test]
    fn test_description_exposed_unchanged() {
        let description = ProcessDescription::new(" Binarize pages ");
        assert_eq!(description.description(), " Binarize pages ");
        assert_eq!(ProcessDescription::default().description(), "");

        let json = serde_json::to_value(&description).unwrap();
        assert_eq!(json, serde_json::json!({"description": " Binarize pages "}));
    }
}
