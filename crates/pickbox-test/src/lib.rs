//! Testing harness for the Pickbox combo box.
//!
//! [`Harness`] mounts a widget headlessly and acts as its host page: it owns
//! the committed value, feeds input events, delivers page-level pointer
//! presses, and offers fluent assertions.
//!
//! ```
//! use pickbox_test::Harness;
//! use pickbox_widgets::{Catalog, ComboBox};
//!
//! let catalog = Catalog::new().with("a", "Apple").with("b", "Banana");
//! let mut harness = Harness::new(ComboBox::new(catalog));
//! harness.open().type_text("an").enter();
//! harness.assert_visible(&["Banana"]).assert_changes(&[]);
//! ```

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

mod harness;

pub use harness::Harness;
