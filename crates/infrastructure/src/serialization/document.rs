//! JSON and YAML document parsing.

use std::fmt;
use std::path::Path;

use serde_json::Value as Json;

use crate::error::{InfrastructureError, InfrastructureResult};

/// A supported binding document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl DocumentFormat {
    /// Detects the format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`InfrastructureError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> InfrastructureResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(InfrastructureError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

/// Parses `content` into a JSON value tree.
///
/// An empty YAML document parses to `null`.
///
/// # Errors
///
/// Returns an error if the content is not valid for `format`.
pub fn parse_document(content: &str, format: DocumentFormat) -> InfrastructureResult<Json> {
    let value = match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("vars.json")).unwrap(),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("vars.YML")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("dir/vars.yaml")).unwrap(),
            DocumentFormat::Yaml
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = DocumentFormat::from_path(Path::new("vars.toml")).unwrap_err();
        assert!(matches!(
            err,
            InfrastructureError::UnsupportedFormat(p) if p == PathBuf::from("vars.toml")
        ));
        assert!(DocumentFormat::from_path(Path::new("vars")).is_err());
    }

    #[test]
    fn test_parse_json() {
        let value = parse_document(r#"{"name": "Als", "age": 12}"#, DocumentFormat::Json).unwrap();
        assert_eq!(value, json!({"name": "Als", "age": 12}));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "name: Als\nother:\n  codes: true\nhosts:\n  - a\n  - b\n";
        let value = parse_document(yaml, DocumentFormat::Yaml).unwrap();
        assert_eq!(
            value,
            json!({"name": "Als", "other": {"codes": true}, "hosts": ["a", "b"]})
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_document("{\"a\": }", DocumentFormat::Json),
            Err(InfrastructureError::Json(_))
        ));
        assert!(matches!(
            parse_document("a: [1, 2", DocumentFormat::Yaml),
            Err(InfrastructureError::Yaml(_))
        ));
    }
}
