//! Searchable combo box widget for Pickbox.
//!
//! - [`Catalog`]: insertion-ordered options supplied by the host
//! - [`filter()`]: pure query → visible rows + exact match
//! - [`ComboState`]: the open/closed state machine
//! - [`DismissalWatcher`]: scoped outside-click listener
//! - [`ComboBox`]: the widget that paints it all

pub mod catalog;
pub mod combo_box;
pub mod combo_state;
pub mod dismissal;
pub mod filter;
pub mod props;

pub use catalog::{Catalog, CatalogOption, OptionId};
pub use combo_box::{ComboBox, ComboBoxChanged, ComboBoxError, ComboBoxStyle};
pub use combo_state::{ComboEvent, ComboMessage, ComboState, DEFAULT_PAGE_ROWS};
pub use dismissal::{
    DismissalWatcher, PointerBus, PointerDown, PointerListener, PointerSource, Registration,
};
pub use filter::{
    filter, labels_equal, unfiltered, EntryKind, FilterResult, VisibleEntry, NO_OPTIONS_ID,
    NO_OPTIONS_LABEL,
};
pub use props::ComboBoxProps;
