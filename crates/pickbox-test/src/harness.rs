//! Headless host for a mounted combo box.
//!
//! The harness plays the page: it owns the committed `value`, writes every
//! commit back into the widget the way a host's `onChange` would, and owns a
//! [`PointerBus`] standing in for the document's pointer stream.

use pickbox_core::{Constraints, Event, Key, MouseButton, Point, Rect, RecordingCanvas, Widget};
use pickbox_widgets::{
    ComboBox, ComboBoxError, DismissalWatcher, OptionId, PointerBus, PointerDown,
};
use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Test harness for interacting with a [`ComboBox`].
pub struct Harness {
    combo: Rc<RefCell<ComboBox>>,
    bus: Rc<PointerBus>,
    watcher: DismissalWatcher,
    commits: Arc<Mutex<Vec<OptionId>>>,
    written_back: usize,
    write_back: bool,
    event_queue: VecDeque<Event>,
    viewport: Rect,
}

impl Harness {
    /// Mount `combo`, panicking on invalid props.
    ///
    /// The harness installs its own `on_change` to record commits.
    pub fn new(combo: ComboBox) -> Self {
        match Self::try_new(combo) {
            Ok(harness) => harness,
            Err(err) => panic!("failed to mount combo box: {err}"),
        }
    }

    /// Mount `combo`, reporting invalid props.
    pub fn try_new(combo: ComboBox) -> Result<Self, ComboBoxError> {
        let commits = Arc::new(Mutex::new(Vec::new()));
        let sink = commits.clone();
        let mut combo = combo.on_change(move |id| {
            if let Ok(mut commits) = sink.lock() {
                commits.push(id.clone());
            }
        });

        let viewport = Rect::new(0.0, 0.0, 320.0, 200.0);
        let size = combo.measure(Constraints::loose(viewport.size()));
        combo.layout(Rect::from_size(size));
        combo.try_mount()?;

        let combo = Rc::new(RefCell::new(combo));
        let bus = Rc::new(PointerBus::new());
        let watcher = DismissalWatcher::attach(bus.clone(), &combo);

        let mut harness = Self {
            combo,
            bus,
            watcher,
            commits,
            written_back: 0,
            write_back: true,
            event_queue: VecDeque::new(),
            viewport,
        };
        harness.sync_host();
        Ok(harness)
    }

    /// Stop writing commits back into the widget's `value`.
    #[must_use]
    pub fn without_write_back(mut self) -> Self {
        self.write_back = false;
        self
    }

    // === Event Simulation ===

    /// Click inside the text field (left of the arrow).
    pub fn click_field(&mut self) -> &mut Self {
        let point = {
            let combo = self.combo();
            let field = combo.field_rect();
            Point::new(field.x + combo.style_ref().padding_x + 4.0, field.center().y)
        };
        self.click_at(point)
    }

    /// Open the menu by clicking the field.
    pub fn open(&mut self) -> &mut Self {
        self.click_field()
    }

    /// Click the arrow affix.
    pub fn toggle(&mut self) -> &mut Self {
        let point = self.combo().affix_rect().center();
        self.click_at(point)
    }

    /// Press at `point` in surface coordinates.
    ///
    /// The document-level pointer listener sees the press first, then the
    /// widget receives the mouse events.
    pub fn click_at(&mut self, point: Point) -> &mut Self {
        self.bus.press(PointerDown::Surface(point));
        self.event_queue.push_back(Event::MouseMove { position: point });
        self.event_queue.push_back(Event::MouseDown {
            position: point,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::MouseUp {
            position: point,
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Press somewhere else on the page.
    pub fn click_outside(&mut self) -> &mut Self {
        self.bus.press(PointerDown::Elsewhere);
        self.sync_host();
        self
    }

    /// Type text one character at a time.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            self.event_queue.push_back(Event::TextInput {
                text: c.to_string(),
            });
        }
        self.process_events();
        self
    }

    /// Simulate a key press.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.event_queue.push_back(Event::KeyDown { key });
        self.event_queue.push_back(Event::KeyUp { key });
        self.process_events();
        self
    }

    /// Press Enter.
    pub fn enter(&mut self) -> &mut Self {
        self.press_key(Key::Enter)
    }

    /// Press Backspace.
    pub fn backspace(&mut self) -> &mut Self {
        self.press_key(Key::Backspace)
    }

    /// Scroll the menu by `delta` pixels.
    pub fn scroll(&mut self, delta: f32) -> &mut Self {
        self.event_queue.push_back(Event::Scroll {
            delta_x: 0.0,
            delta_y: delta,
        });
        self.process_events();
        self
    }

    /// Hover row `index`.
    pub fn hover_row(&mut self, index: usize) -> &mut Self {
        let position = self.combo().row_rect(index).center();
        self.event_queue.push_back(Event::MouseMove { position });
        self.process_events();
        self
    }

    /// Click menu row `index`, scrolling it into view first.
    pub fn pick_index(&mut self, index: usize) -> &mut Self {
        let (offset, page) = {
            let combo = self.combo();
            (combo.state().scroll_offset, combo.state().page_rows)
        };
        if index < offset || index >= offset + page {
            let pitch = self.combo().style_ref().row_pitch();
            let rows = index as f32 - offset as f32;
            self.scroll(rows * pitch);
        }
        let point = self.combo().row_rect(index).center();
        self.click_at(point)
    }

    /// Click the first row labelled `label`. Does nothing if there is none.
    pub fn pick(&mut self, label: &str) -> &mut Self {
        if let Some(index) = self.row_index(label) {
            self.pick_index(index);
        }
        self
    }

    // === Queries ===

    /// Borrow the mounted widget.
    pub fn combo(&self) -> Ref<'_, ComboBox> {
        self.combo.borrow()
    }

    /// Shared handle to the widget.
    pub fn combo_handle(&self) -> Rc<RefCell<ComboBox>> {
        self.combo.clone()
    }

    /// The pointer bus standing in for the document.
    pub fn bus(&self) -> Rc<PointerBus> {
        self.bus.clone()
    }

    /// Field text.
    pub fn text(&self) -> String {
        self.combo().input_text().to_string()
    }

    /// Check if the menu is open.
    pub fn is_open(&self) -> bool {
        self.combo().is_open()
    }

    /// Host-held committed value.
    pub fn value(&self) -> OptionId {
        self.combo().current_value().clone()
    }

    /// Every id reported to `on_change`, in order.
    pub fn changes(&self) -> Vec<OptionId> {
        self.commits.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Labels of the menu rows.
    pub fn visible_labels(&self) -> Vec<String> {
        self.combo()
            .visible_entries()
            .iter()
            .map(|e| e.label.clone())
            .collect()
    }

    /// Indices of rows rendered as selected.
    pub fn selected_rows(&self) -> Vec<usize> {
        let combo = self.combo();
        (0..combo.visible_entries().len())
            .filter(|&i| combo.is_entry_selected(i))
            .collect()
    }

    /// Index of the first row labelled `label`.
    pub fn row_index(&self, label: &str) -> Option<usize> {
        self.combo()
            .visible_entries()
            .iter()
            .position(|e| e.label == label)
    }

    /// Paint the widget into a fresh recording canvas.
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.combo().paint(&mut canvas);
        canvas
    }

    /// Viewport the widget was laid out in.
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Remove the outside-click listener ahead of drop.
    pub fn unmount(&mut self) {
        self.watcher.detach();
    }

    // === Assertions ===

    /// Assert the field text.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, expected: &str) -> &Self {
        let actual = self.text();
        assert_eq!(actual, expected, "Expected field text '{expected}' but got '{actual}'");
        self
    }

    /// Assert the menu is open.
    ///
    /// # Panics
    ///
    /// Panics if the menu is closed.
    pub fn assert_open(&self) -> &Self {
        assert!(self.is_open(), "Expected menu to be open");
        self
    }

    /// Assert the menu is closed.
    ///
    /// # Panics
    ///
    /// Panics if the menu is open.
    pub fn assert_closed(&self) -> &Self {
        assert!(!self.is_open(), "Expected menu to be closed");
        self
    }

    /// Assert the host-held value.
    ///
    /// # Panics
    ///
    /// Panics if the value does not match.
    pub fn assert_value(&self, expected: &str) -> &Self {
        let actual = self.value();
        assert_eq!(actual.as_str(), expected, "Expected value '{expected}' but got '{actual}'");
        self
    }

    /// Assert the full sequence of reported commits.
    ///
    /// # Panics
    ///
    /// Panics if the sequence does not match.
    pub fn assert_changes(&self, expected: &[&str]) -> &Self {
        let actual = self.changes();
        let actual: Vec<&str> = actual.iter().map(OptionId::as_str).collect();
        assert_eq!(actual, expected, "Unexpected on_change calls");
        self
    }

    /// Assert the menu row labels.
    ///
    /// # Panics
    ///
    /// Panics if the labels do not match.
    pub fn assert_visible(&self, expected: &[&str]) -> &Self {
        let actual = self.visible_labels();
        assert_eq!(actual, expected, "Unexpected menu rows");
        self
    }

    // === Internal ===

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            let changed = self.combo.borrow_mut().event(&event);
            if changed.is_some() {
                debug!(event = event.name(), "commit observed");
            }
        }
        self.sync_host();
    }

    /// Write new commits back as the host's `value`.
    fn sync_host(&mut self) {
        if !self.write_back {
            return;
        }
        let pending: Vec<OptionId> = match self.commits.lock() {
            Ok(commits) => commits[self.written_back..].to_vec(),
            Err(_) => return,
        };
        self.written_back += pending.len();
        let mut combo = self.combo.borrow_mut();
        for id in pending {
            combo.set_value(id);
        }
    }
}

impl std::fmt::Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("combo", &*self.combo.borrow())
            .field("watcher", &self.watcher)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickbox_widgets::Catalog;

    fn fruit() -> Catalog {
        Catalog::new().with("a", "Apple").with("b", "Banana")
    }

    #[test]
    fn test_harness_mounts_and_registers_listener() {
        let harness = Harness::new(ComboBox::new(fruit()));
        assert_eq!(harness.bus().listener_count(), 1);
        harness.assert_closed().assert_text("").assert_changes(&[]);
    }

    #[test]
    fn test_harness_try_new_reports_unknown() {
        let err = Harness::try_new(ComboBox::new(fruit()).default_value("x")).unwrap_err();
        assert!(matches!(err, ComboBoxError::UnknownOption { .. }));
    }

    #[test]
    fn test_harness_writes_back_value() {
        let mut harness = Harness::new(ComboBox::new(fruit()));
        harness.open().pick("Banana");
        harness.assert_value("b").assert_text("Banana");
    }

    #[test]
    fn test_harness_without_write_back() {
        let mut harness = Harness::new(ComboBox::new(fruit())).without_write_back();
        harness.open().pick("Banana");
        harness.assert_value("").assert_changes(&["b"]);
    }

    #[test]
    fn test_harness_unmount_removes_listener() {
        let mut harness = Harness::new(ComboBox::new(fruit()));
        let bus = harness.bus();
        harness.unmount();
        assert_eq!(bus.listener_count(), 0);
        drop(harness);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_harness_drop_removes_listener() {
        let harness = Harness::new(ComboBox::new(fruit()));
        let bus = harness.bus();
        drop(harness);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_harness_pick_scrolls_into_view() {
        let catalog: Catalog = (0..12).map(|i| (format!("o{i}"), format!("Item {i}"))).collect();
        let mut harness = Harness::new(ComboBox::new(catalog).required(true));
        harness.open().pick("Item 9");
        harness.assert_changes(&["o9"]).assert_text("Item 9");
    }
}
