//! Scripted interaction steps for `pickbox demo`.

use crate::story::StoryError;
use pickbox_test::Harness;
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Click the text field
    Open,
    /// Click the arrow
    Toggle,
    /// Type text at the end of the field
    Type(String),
    /// Press Enter
    Enter,
    /// Press Backspace
    Backspace,
    /// Click the first row with this label
    Pick(String),
    /// Press somewhere else on the page
    Outside,
}

impl FromStr for Step {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let step = match s.split_once(':') {
            Some(("type", text)) => Self::Type(text.to_string()),
            Some(("pick", label)) => Self::Pick(label.to_string()),
            None => match s {
                "open" => Self::Open,
                "toggle" => Self::Toggle,
                "enter" => Self::Enter,
                "backspace" => Self::Backspace,
                "outside" => Self::Outside,
                _ => return Err(StoryError::Invalid(format!("unknown step `{s}`"))),
            },
            Some(_) => return Err(StoryError::Invalid(format!("unknown step `{s}`"))),
        };
        Ok(step)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Toggle => f.write_str("toggle"),
            Self::Type(text) => write!(f, "type:{text}"),
            Self::Enter => f.write_str("enter"),
            Self::Backspace => f.write_str("backspace"),
            Self::Pick(label) => write!(f, "pick:{label}"),
            Self::Outside => f.write_str("outside"),
        }
    }
}

impl Step {
    /// Perform the step on a mounted harness.
    pub fn apply(&self, harness: &mut Harness) {
        match self {
            Self::Open => {
                harness.open();
            }
            Self::Toggle => {
                harness.toggle();
            }
            Self::Type(text) => {
                harness.type_text(text);
            }
            Self::Enter => {
                harness.enter();
            }
            Self::Backspace => {
                harness.backspace();
            }
            Self::Pick(label) => {
                harness.pick(label);
            }
            Self::Outside => {
                harness.click_outside();
            }
        }
    }
}

/// Describe the widget as the user would see it.
pub fn frame(harness: &Harness) -> String {
    let combo = harness.combo();
    let mut out = String::new();
    let text = if harness.text().is_empty() {
        format!("({})", combo.placeholder_text())
    } else {
        format!("\"{}\"", harness.text())
    };
    let arrow = if harness.is_open() { '▲' } else { '▼' };
    let _ = writeln!(out, "  [{text} {arrow}]  value=\"{}\"", harness.value());

    if harness.is_open() {
        let selected = harness.selected_rows();
        for (index, label) in harness.visible_labels().iter().enumerate() {
            let marker = if selected.contains(&index) { '>' } else { ' ' };
            let label = if label.is_empty() { "(none)" } else { label.as_str() };
            let _ = writeln!(out, "   {marker} {label}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickbox_widgets::{Catalog, ComboBox};

    fn fruit() -> Harness {
        let catalog = Catalog::new().with("a", "Apple").with("b", "Banana");
        Harness::new(ComboBox::new(catalog).placeholder("Fruit"))
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!("open".parse::<Step>().unwrap(), Step::Open);
        assert_eq!(
            "type:an".parse::<Step>().unwrap(),
            Step::Type("an".to_string())
        );
        assert_eq!(
            "pick:Big Apple".parse::<Step>().unwrap(),
            Step::Pick("Big Apple".to_string())
        );
        assert!("jump".parse::<Step>().is_err());
        assert!("drag:x".parse::<Step>().is_err());
    }

    #[test]
    fn test_step_display_parses_back() {
        let step = Step::Type("a:b".to_string());
        assert_eq!(step.to_string().parse::<Step>().unwrap(), step);
    }

    #[test]
    fn test_steps_drive_harness() {
        let mut harness = fruit();
        for step in ["open", "type:banana", "enter"] {
            step.parse::<Step>().unwrap().apply(&mut harness);
        }
        harness.assert_changes(&["b"]).assert_closed();
    }

    #[test]
    fn test_frame_closed_shows_placeholder() {
        let harness = fruit();
        assert_eq!(frame(&harness), "  [(Fruit) ▼]  value=\"\"\n");
    }

    #[test]
    fn test_frame_open_marks_selected() {
        let mut harness = fruit();
        harness.open().type_text("apple");
        let out = frame(&harness);
        assert!(out.contains("\"apple\" ▲"));
        assert!(out.contains("   > Apple\n"));
    }
}
