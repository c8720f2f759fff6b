//! Story files: YAML props for a demo combo box.

use pickbox_widgets::{ComboBoxError, ComboBoxProps};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Error loading or validating a story.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Story path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// The YAML did not match the props shape
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// The props cannot mount
    #[error("invalid story: {0}")]
    Invalid(String),
}

impl From<ComboBoxError> for StoryError {
    fn from(err: ComboBoxError) -> Self {
        Self::Invalid(err.to_string())
    }
}

/// Parse story YAML.
pub fn parse(yaml: &str) -> Result<ComboBoxProps, StoryError> {
    Ok(serde_yaml_ng::from_str(yaml)?)
}

/// Read and parse a story file.
pub fn load(path: &Path) -> Result<ComboBoxProps, StoryError> {
    debug!(path = %path.display(), "loading story");
    let yaml = fs::read_to_string(path).map_err(|source| StoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&yaml)
}

/// Validate props, returning non-fatal warnings.
///
/// Fails when the catalog is empty or `value`/`defaultValue` name an
/// unknown option.
pub fn check(props: &ComboBoxProps) -> Result<Vec<String>, StoryError> {
    if props.options.is_empty() {
        return Err(StoryError::Invalid("story has no options".to_string()));
    }
    props.to_combo_box().try_mount()?;

    let mut warnings = Vec::new();
    for label in props.duplicate_labels() {
        warn!(label, "duplicate option label");
        warnings.push(format!("label `{label}` is used by more than one option"));
    }
    if props.value.is_some() && props.default_value.is_some() {
        warnings.push("both value and defaultValue are set; defaultValue wins at mount".to_string());
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONTEND: &str = include_str!("../../../stories/frontend.yaml");

    #[test]
    fn test_frontend_story_parses() {
        let props = parse(FRONTEND).unwrap();
        assert_eq!(props.options.len(), 8);
        assert_eq!(props.default_value.as_ref().map(|id| id.as_str()), Some("html"));
        assert_eq!(props.placeholder, "Frontend");
        assert!(!props.disabled);
        assert!(!props.required);
    }

    #[test]
    fn test_frontend_story_checks_clean() {
        let props = parse(FRONTEND).unwrap();
        assert!(check(&props).unwrap().is_empty());
    }

    #[test]
    fn test_option_id_defaults_to_key() {
        let props = parse("options:\n  a:\n    label: Apple\n").unwrap();
        let option = props.options.iter().next().unwrap();
        assert_eq!(option.id.as_str(), "a");
    }

    #[test]
    fn test_check_rejects_empty_catalog() {
        let props = parse("options: {}\n").unwrap();
        assert!(matches!(check(&props), Err(StoryError::Invalid(_))));
    }

    #[test]
    fn test_check_rejects_unknown_default() {
        let props = parse("options:\n  a: { label: Apple }\ndefaultValue: zz\n").unwrap();
        let err = check(&props).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid story: defaultValue refers to unknown option `zz`"
        );
    }

    #[test]
    fn test_check_warns_on_duplicate_labels() {
        let props = parse("options:\n  a: { label: Apple }\n  b: { label: apple }\n").unwrap();
        let warnings = check(&props).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("apple"));
    }

    #[test]
    fn test_bad_yaml_is_yaml_error() {
        assert!(matches!(parse("options: ["), Err(StoryError::Yaml(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load(Path::new("does/not/exist.yaml")).unwrap_err();
        assert!(matches!(err, StoryError::Io { .. }));
    }
}
