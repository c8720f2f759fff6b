//! Host props for a combo box, as carried by story files.

use crate::catalog::{Catalog, OptionId};
use crate::combo_box::ComboBox;
use serde::{Deserialize, Serialize};

/// Serializable combo box props.
///
/// Field names follow the host's prop names, so `default_value` is spelled
/// `defaultValue` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboBoxProps {
    /// Options offered by the menu
    pub options: Catalog,
    /// Host-controlled committed id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<OptionId>,
    /// Id committed once at mount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<OptionId>,
    /// Text shown while the field is empty
    #[serde(default)]
    pub placeholder: String,
    /// Ignore all interaction
    #[serde(default)]
    pub disabled: bool,
    /// Hide the blank entry
    #[serde(default)]
    pub required: bool,
}

impl ComboBoxProps {
    /// Build an unmounted widget from these props.
    #[must_use]
    pub fn to_combo_box(&self) -> ComboBox {
        let mut combo = ComboBox::new(self.options.clone())
            .placeholder(self.placeholder.clone())
            .disabled(self.disabled)
            .required(self.required);
        if let Some(value) = &self.value {
            combo = combo.value(value.clone());
        }
        if let Some(default_value) = &self.default_value {
            combo = combo.default_value(default_value.clone());
        }
        combo
    }

    /// Labels that appear on more than one option, in catalog order.
    #[must_use]
    pub fn duplicate_labels(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        let mut duplicates = Vec::new();
        for option in self.options.iter() {
            let label = option.label.as_str();
            if seen.iter().any(|s: &&str| crate::filter::labels_equal(s, label)) {
                if !duplicates.contains(&label) {
                    duplicates.push(label);
                }
            } else {
                seen.push(label);
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComboBoxError;

    const STORY_JSON: &str = r#"{
        "options": {
            "css": { "id": "css", "label": "CSS" },
            "html": { "label": "HTML" }
        },
        "defaultValue": "html",
        "placeholder": "Frontend"
    }"#;

    #[test]
    fn test_props_from_host_json() {
        let props: ComboBoxProps = serde_json::from_str(STORY_JSON).unwrap();
        assert_eq!(props.options.len(), 2);
        assert_eq!(props.default_value, Some(OptionId::from("html")));
        assert_eq!(props.value, None);
        assert_eq!(props.placeholder, "Frontend");
        assert!(!props.disabled);
        assert!(!props.required);
    }

    #[test]
    fn test_props_serialize_camel_case() {
        let props = ComboBoxProps {
            options: Catalog::new().with("a", "Apple"),
            default_value: Some("a".into()),
            ..ComboBoxProps::default()
        };
        let json = serde_json::to_string(&props).unwrap();
        assert!(json.contains("\"defaultValue\":\"a\""));
        assert!(!json.contains("\"value\""));
    }

    #[test]
    fn test_props_build_mounts_default() {
        let props: ComboBoxProps = serde_json::from_str(STORY_JSON).unwrap();
        let mut combo = props.to_combo_box();
        combo.mount();
        assert_eq!(combo.input_text(), "HTML");
        assert_eq!(combo.placeholder_text(), "Frontend");
    }

    #[test]
    fn test_props_unknown_value_fails_mount() {
        let props = ComboBoxProps {
            options: Catalog::new().with("a", "Apple"),
            value: Some("zz".into()),
            ..ComboBoxProps::default()
        };
        let err = props.to_combo_box().try_mount().unwrap_err();
        assert_eq!(
            err,
            ComboBoxError::UnknownOption {
                field: "value",
                id: "zz".into()
            }
        );
    }

    #[test]
    fn test_duplicate_labels_case_insensitive() {
        let props = ComboBoxProps {
            options: Catalog::new()
                .with("a", "Apple")
                .with("b", "apple")
                .with("c", "APPLE")
                .with("d", "Date"),
            ..ComboBoxProps::default()
        };
        assert_eq!(props.duplicate_labels(), vec!["apple", "APPLE"]);
    }
}
