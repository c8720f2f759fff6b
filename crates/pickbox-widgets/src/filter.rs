//! Filter engine: maps typed text to the visible subset of a catalog.
//!
//! Matching is a case-insensitive substring test on labels. An option whose
//! label equals the query (ignoring case) is also reported as the exact match,
//! which is what Enter commits.

use crate::catalog::{Catalog, CatalogOption, OptionId};
use serde::{Deserialize, Serialize};

/// Id carried by the "No options" sentinel.
pub const NO_OPTIONS_ID: &str = "null";

/// Label carried by the "No options" sentinel.
pub const NO_OPTIONS_LABEL: &str = "No options";

/// What a visible row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// A catalog option
    Option,
    /// Synthetic empty entry that clears the selection
    Blank,
    /// Placeholder shown when nothing matches; never selectable
    NoOptions,
}

/// One row of the open menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleEntry {
    /// Id reported on commit
    pub id: OptionId,
    /// Row text
    pub label: String,
    /// Entry kind
    pub kind: EntryKind,
}

impl VisibleEntry {
    fn option(option: &CatalogOption) -> Self {
        Self {
            id: option.id.clone(),
            label: option.label.clone(),
            kind: EntryKind::Option,
        }
    }

    fn blank() -> Self {
        Self {
            id: OptionId::none(),
            label: String::new(),
            kind: EntryKind::Blank,
        }
    }

    fn no_options() -> Self {
        Self {
            id: OptionId::from(NO_OPTIONS_ID),
            label: NO_OPTIONS_LABEL.to_string(),
            kind: EntryKind::NoOptions,
        }
    }

    /// Whether clicking this row commits it.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.kind != EntryKind::NoOptions
    }
}

/// Output of [`filter`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterResult {
    /// Rows to show, in catalog order
    pub visible: Vec<VisibleEntry>,
    /// Option whose label equals the query, ignoring case
    pub matched: Option<OptionId>,
}

impl FilterResult {
    /// Whether the result is the lone "No options" sentinel.
    #[must_use]
    pub fn is_no_options(&self) -> bool {
        matches!(self.visible.as_slice(), [only] if only.kind == EntryKind::NoOptions)
    }

    /// Row index of a selectable entry with this id.
    #[must_use]
    pub fn position(&self, id: &OptionId) -> Option<usize> {
        self.visible
            .iter()
            .position(|e| e.is_selectable() && &e.id == id)
    }

    fn or_no_options(mut self) -> Self {
        if self.visible.is_empty() {
            self.visible.push(VisibleEntry::no_options());
        }
        self
    }
}

/// Case-insensitive equality, the same folding used for substring matching.
#[must_use]
pub fn labels_equal(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// The full catalog as shown for an empty query.
///
/// When the field is not required a blank entry is prepended so the
/// selection can be cleared.
#[must_use]
pub fn unfiltered(catalog: &Catalog, required: bool) -> FilterResult {
    let blank = (!required).then(VisibleEntry::blank);
    FilterResult {
        visible: blank
            .into_iter()
            .chain(catalog.iter().map(VisibleEntry::option))
            .collect(),
        matched: None,
    }
    .or_no_options()
}

/// Filter `catalog` by `query`.
///
/// When several labels equal the query ignoring case, the last one in catalog
/// order is reported as the match.
///
/// ```
/// use pickbox_widgets::{filter, Catalog, OptionId};
///
/// let catalog = Catalog::new().with("a", "Apple").with("b", "Banana");
/// let result = filter("an", &catalog, false);
/// assert_eq!(result.visible.len(), 1);
/// assert_eq!(result.visible[0].label, "Banana");
/// assert_eq!(result.matched, None);
///
/// let exact = filter("APPLE", &catalog, false);
/// assert_eq!(exact.matched, Some(OptionId::from("a")));
/// ```
#[must_use]
pub fn filter(query: &str, catalog: &Catalog, required: bool) -> FilterResult {
    if query.is_empty() {
        return unfiltered(catalog, required);
    }

    let needle = query.to_lowercase();
    let mut result = FilterResult::default();
    for option in catalog.iter() {
        let label = option.label.to_lowercase();
        if label.contains(&needle) {
            result.visible.push(VisibleEntry::option(option));
        }
        if label == needle {
            result.matched = Some(option.id.clone());
        }
    }
    result.or_no_options()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fruit() -> Catalog {
        Catalog::new().with("a", "Apple").with("b", "Banana")
    }

    fn labels(result: &FilterResult) -> Vec<&str> {
        result.visible.iter().map(|e| e.label.as_str()).collect()
    }

    // =========================================================================
    // Empty Query Tests
    // =========================================================================

    #[test]
    fn test_empty_query_prepends_blank_when_optional() {
        let result = filter("", &fruit(), false);
        assert_eq!(labels(&result), vec!["", "Apple", "Banana"]);
        assert_eq!(result.visible[0].kind, EntryKind::Blank);
        assert!(result.visible[0].id.is_empty());
        assert_eq!(result.matched, None);
    }

    #[test]
    fn test_empty_query_required_is_catalog() {
        let result = filter("", &fruit(), true);
        assert_eq!(labels(&result), vec!["Apple", "Banana"]);
        assert!(result.visible.iter().all(|e| e.kind == EntryKind::Option));
    }

    #[test]
    fn test_empty_required_catalog_shows_sentinel() {
        let result = unfiltered(&Catalog::new(), true);
        assert!(result.is_no_options());
    }

    // =========================================================================
    // Substring Tests
    // =========================================================================

    #[test]
    fn test_substring_case_insensitive() {
        let result = filter("AN", &fruit(), false);
        assert_eq!(labels(&result), vec!["Banana"]);
        assert_eq!(result.matched, None);
    }

    #[test]
    fn test_substring_keeps_catalog_order() {
        let catalog = Catalog::new()
            .with("ts", "Typescript")
            .with("js", "JS")
            .with("css", "CSS");
        let result = filter("s", &catalog, true);
        assert_eq!(labels(&result), vec!["Typescript", "JS", "CSS"]);
    }

    #[test]
    fn test_no_match_yields_sentinel() {
        let result = filter("zzz", &fruit(), false);
        assert!(result.is_no_options());
        assert_eq!(result.visible[0].id.as_str(), NO_OPTIONS_ID);
        assert_eq!(result.visible[0].label, NO_OPTIONS_LABEL);
        assert!(!result.visible[0].is_selectable());
        assert_eq!(result.matched, None);
    }

    #[test]
    fn test_real_null_id_is_selectable() {
        let catalog = Catalog::new().with("null", "Nothing");
        let result = filter("noth", &catalog, true);
        assert!(!result.is_no_options());
        assert!(result.visible[0].is_selectable());
        assert_eq!(result.position(&"null".into()), Some(0));
    }

    // =========================================================================
    // Exact Match Tests
    // =========================================================================

    #[test]
    fn test_exact_match_ignores_case() {
        let result = filter("banana", &fruit(), false);
        assert_eq!(result.matched, Some(OptionId::from("b")));
    }

    #[test]
    fn test_exact_match_last_wins() {
        let catalog = Catalog::new()
            .with("first", "Mobx")
            .with("second", "MOBX");
        let result = filter("mobx", &catalog, true);
        assert_eq!(result.visible.len(), 2);
        assert_eq!(result.matched, Some(OptionId::from("second")));
    }

    #[test]
    fn test_partial_has_no_match() {
        let result = filter("app", &fruit(), false);
        assert_eq!(result.matched, None);
        assert_eq!(result.position(&"a".into()), Some(0));
    }

    #[test]
    fn test_labels_equal() {
        assert!(labels_equal("React", "rEACT"));
        assert!(!labels_equal("React", "Reac"));
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    fn catalog_strategy() -> impl Strategy<Value = Catalog> {
        prop::collection::vec("[a-cA-C]{1,4}", 1..12).prop_map(|labels| {
            labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| (format!("id{i}"), label))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_visible_labels_contain_query(catalog in catalog_strategy(), query in "[a-cA-C]{1,3}") {
            let result = filter(&query, &catalog, false);
            if !result.is_no_options() {
                let needle = query.to_lowercase();
                for entry in &result.visible {
                    prop_assert!(entry.label.to_lowercase().contains(&needle));
                }
            }
        }

        #[test]
        fn prop_matched_is_visible(catalog in catalog_strategy(), query in "[a-cA-C]{1,3}") {
            let result = filter(&query, &catalog, false);
            if let Some(id) = &result.matched {
                prop_assert!(result.position(id).is_some());
            }
        }

        #[test]
        fn prop_visible_never_empty(catalog in catalog_strategy(), query in "[a-dA-D]{0,3}", required: bool) {
            prop_assert!(!filter(&query, &catalog, required).visible.is_empty());
        }

        #[test]
        fn prop_empty_query_optional_adds_one(catalog in catalog_strategy()) {
            let result = filter("", &catalog, false);
            prop_assert_eq!(result.visible.len(), catalog.len() + 1);
            let ids: Vec<_> = result.visible[1..].iter().map(|e| e.id.clone()).collect();
            let expected: Vec<_> = catalog.iter().map(|o| o.id.clone()).collect();
            prop_assert_eq!(ids, expected);
        }

        #[test]
        fn prop_empty_query_required_equals_catalog(catalog in catalog_strategy()) {
            let result = filter("", &catalog, true);
            let pairs: Vec<_> = result.visible.iter().map(|e| (e.id.clone(), e.label.clone())).collect();
            let expected: Vec<_> = catalog.iter().map(|o| (o.id.clone(), o.label.clone())).collect();
            prop_assert_eq!(pairs, expected);
        }
    }
}
