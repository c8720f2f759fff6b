//! Combo box state machine.
//!
//! [`ComboState`] holds everything the widget renders; [`ComboMessage`]s are
//! the only way it changes. Commits surface as [`ComboEvent::Changed`] inside
//! the returned [`Command`], exactly once per commit.

use crate::catalog::{Catalog, OptionId};
use crate::filter::{self, labels_equal, VisibleEntry};
use pickbox_core::{Command, State};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Rows that fit in the menu before it scrolls.
pub const DEFAULT_PAGE_ROWS: usize = 4;

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboMessage {
    /// Widget mounted; commits `default_value` when present
    Mount {
        /// Option committed once at mount
        default_value: Option<OptionId>,
    },
    /// Input field clicked or focused
    Focus,
    /// Field text replaced by an edit
    Input(String),
    /// Enter pressed in the field
    Enter,
    /// Menu row clicked
    Pick(usize),
    /// Arrow affix clicked
    Toggle,
    /// Pointer pressed outside the widget
    Outside,
    /// Keyboard focus left the field
    Blur,
    /// Host changed the committed value
    SetValue(OptionId),
    /// Menu scrolled by whole rows
    Scroll(i32),
}

impl ComboMessage {
    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mount { .. } => "mount",
            Self::Focus => "focus",
            Self::Input(_) => "input",
            Self::Enter => "enter",
            Self::Pick(_) => "pick",
            Self::Toggle => "toggle",
            Self::Outside => "outside",
            Self::Blur => "blur",
            Self::SetValue(_) => "set_value",
            Self::Scroll(_) => "scroll",
        }
    }
}

/// Notifications for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboEvent {
    /// An option was committed
    Changed(OptionId),
}

/// Snapshot of a combo box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboState {
    /// All options
    pub catalog: Catalog,
    /// No blank entry when set
    pub required: bool,
    /// Interaction suppressed when set
    pub disabled: bool,
    /// Committed value as last reported by the host
    pub value: OptionId,
    /// Menu visibility
    pub is_open: bool,
    /// Text shown in the field
    pub input_text: String,
    /// Option whose label equals `input_text`
    pub matched: Option<OptionId>,
    /// Menu rows
    pub visible: Vec<VisibleEntry>,
    /// Field has keyboard focus
    pub focused: bool,
    /// First menu row shown
    pub scroll_offset: usize,
    /// Rows that fit in the menu
    pub page_rows: usize,
}

impl ComboState {
    /// Create a closed, unfocused state over `catalog`.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let visible = filter::unfiltered(&catalog, false).visible;
        Self {
            catalog,
            required: false,
            disabled: false,
            value: OptionId::none(),
            is_open: false,
            input_text: String::new(),
            matched: None,
            visible,
            focused: false,
            scroll_offset: 0,
            page_rows: DEFAULT_PAGE_ROWS,
        }
    }

    /// Set the required flag.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self.reset_visible();
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the host value.
    #[must_use]
    pub fn value(mut self, value: impl Into<OptionId>) -> Self {
        self.value = value.into();
        self
    }

    /// Set how many rows fit before the menu scrolls.
    #[must_use]
    pub fn page_rows(mut self, rows: usize) -> Self {
        self.page_rows = rows.max(1);
        self
    }

    /// Label of the committed value, empty when nothing is committed.
    #[must_use]
    pub fn committed_label(&self) -> &str {
        if self.value.is_empty() {
            return "";
        }
        self.catalog.label(&self.value).unwrap_or_else(|| {
            warn!(value = %self.value, "committed value missing from catalog");
            ""
        })
    }

    /// Whether row `index` renders as selected.
    ///
    /// A row is selected when its label equals the field text ignoring case.
    /// A required field with no value also highlights its first row.
    #[must_use]
    pub fn is_entry_selected(&self, index: usize) -> bool {
        self.visible.get(index).is_some_and(|entry| {
            labels_equal(&entry.label, &self.input_text)
                || (self.required && index == 0 && self.value.is_empty())
        })
    }

    /// Largest valid scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> usize {
        self.visible.len().saturating_sub(self.page_rows)
    }

    /// Rows currently in view, with their indices.
    pub fn rows_in_view(&self) -> impl Iterator<Item = (usize, &VisibleEntry)> {
        self.visible
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(self.page_rows)
    }

    fn refilter(&mut self) {
        let result = filter::filter(&self.input_text, &self.catalog, self.required);
        self.visible = result.visible;
        self.matched = result.matched;
        self.scroll_offset = 0;
    }

    fn reset_visible(&mut self) {
        self.visible = filter::unfiltered(&self.catalog, self.required).visible;
        self.scroll_offset = 0;
    }

    fn restore_committed(&mut self) {
        self.input_text = self.committed_label().to_string();
        self.matched = (!self.value.is_empty()).then(|| self.value.clone());
    }

    fn commit(&mut self, id: OptionId, label: String) -> Command<ComboEvent> {
        info!(id = %id, label = %label, "option committed");
        self.input_text = label;
        self.matched = (!id.is_empty()).then(|| id.clone());
        self.is_open = false;
        self.reset_visible();
        Command::Emit(ComboEvent::Changed(id))
    }
}

impl State for ComboState {
    type Message = ComboMessage;
    type Output = ComboEvent;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Output> {
        let name = msg.name();
        if self.disabled && !matches!(msg, ComboMessage::Mount { .. } | ComboMessage::SetValue(_)) {
            debug!(message = name, "ignored while disabled");
            return Command::None;
        }

        let cmd = match msg {
            ComboMessage::Mount { default_value } => {
                self.reset_visible();
                match default_value {
                    Some(id) => {
                        let label = self.catalog.label(&id).unwrap_or_default().to_string();
                        self.commit(id, label)
                    }
                    None => {
                        self.restore_committed();
                        Command::None
                    }
                }
            }
            ComboMessage::Focus => {
                self.focused = true;
                self.is_open = true;
                self.refilter();
                Command::None
            }
            ComboMessage::Input(text) => {
                self.is_open = true;
                self.input_text = text;
                self.refilter();
                Command::None
            }
            ComboMessage::Enter => {
                let target = self
                    .matched
                    .as_ref()
                    .filter(|_| self.is_open)
                    .and_then(|id| self.visible.iter().find(|e| e.is_selectable() && &e.id == id))
                    .map(|e| (e.id.clone(), e.label.clone()));
                match target {
                    Some((id, label)) => {
                        self.focused = false;
                        Command::batch([self.commit(id, label), Command::Blur])
                    }
                    None => Command::None,
                }
            }
            ComboMessage::Pick(index) => {
                let target = self
                    .visible
                    .get(index)
                    .filter(|e| self.is_open && e.is_selectable())
                    .map(|e| (e.id.clone(), e.label.clone()));
                match target {
                    Some((id, label)) => self.commit(id, label),
                    None => Command::None,
                }
            }
            ComboMessage::Toggle => {
                self.is_open = !self.is_open;
                if self.is_open {
                    self.reset_visible();
                }
                Command::None
            }
            ComboMessage::Outside => {
                if self.is_open {
                    self.is_open = false;
                    self.focused = false;
                    self.restore_committed();
                    self.reset_visible();
                }
                Command::None
            }
            ComboMessage::Blur => {
                self.focused = false;
                Command::None
            }
            ComboMessage::SetValue(id) => {
                self.value = id;
                if !self.is_open {
                    self.restore_committed();
                }
                Command::None
            }
            ComboMessage::Scroll(delta) => {
                if self.is_open {
                    let target = self.scroll_offset.saturating_add_signed(delta as isize);
                    self.scroll_offset = target.min(self.max_scroll());
                }
                Command::None
            }
        };

        debug!(
            message = name,
            open = self.is_open,
            visible = self.visible.len(),
            text = %self.input_text,
            "combo transition"
        );
        cmd
    }
}
