//! Searchable combo box widget.
//!
//! A text field with a toggle arrow and a scrollable menu underneath. Typing
//! filters the menu; Enter or a click commits an option and reports its id to
//! the host through `on_change`.

use crate::catalog::{Catalog, OptionId};
use crate::combo_state::{ComboEvent, ComboMessage, ComboState};
use crate::dismissal::PointerDown;
use crate::filter::{EntryKind, VisibleEntry};
use pickbox_core::{
    widget::{AccessibleRole, LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, Key, MouseButton, Point, Rect, Size, Store, TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use thiserror::Error;
use tracing::{debug, warn};

/// Message emitted by [`Widget::event`] when an option is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboBoxChanged {
    /// The committed id (empty when the selection was cleared)
    pub id: OptionId,
}

/// Construction-time errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComboBoxError {
    /// `value` or `default_value` names an id missing from the catalog
    #[error("{field} refers to unknown option `{id}`")]
    UnknownOption {
        /// Prop that carried the id
        field: &'static str,
        /// The unknown id
        id: OptionId,
    },
}

/// Presentation constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboBoxStyle {
    /// Widest the field may grow
    pub max_width: f32,
    /// Field height including padding
    pub field_height: f32,
    /// Horizontal text padding
    pub padding_x: f32,
    /// Border width for field and menu
    pub border_width: f32,
    /// Corner radius for field, menu and rows
    pub corner_radius: f32,
    /// Toggle arrow box size
    pub affix_size: f32,
    /// Space between field and menu
    pub menu_gap: f32,
    /// Menu inner padding
    pub menu_padding: f32,
    /// Tallest the menu may grow
    pub menu_max_height: f32,
    /// Row height
    pub row_height: f32,
    /// Space between rows
    pub row_gap: f32,
    /// Scrollbar thumb width
    pub scrollbar_width: f32,
    /// Font size
    pub font_size: f32,
    /// Accent for border, selection and scrollbar
    pub accent: Color,
    /// Field and menu background
    pub background: Color,
    /// Field background when disabled
    pub disabled_background: Color,
    /// Text color
    pub text_color: Color,
    /// Text color on a selected row
    pub selected_text_color: Color,
    /// Placeholder text color
    pub placeholder_color: Color,
}

impl Default for ComboBoxStyle {
    fn default() -> Self {
        let accent = Color::rgba8(181, 66, 19, 1.0);
        Self {
            max_width: 250.0,
            field_height: 40.0,
            padding_x: 10.0,
            border_width: 2.0,
            corner_radius: 8.0,
            affix_size: 24.0,
            menu_gap: 1.0,
            menu_padding: 5.0,
            menu_max_height: 100.0,
            row_height: 20.0,
            row_gap: 1.0,
            scrollbar_width: 7.0,
            font_size: 14.0,
            accent,
            background: Color::WHITE,
            disabled_background: Color::new(0.93, 0.93, 0.93, 1.0),
            text_color: Color::BLACK,
            selected_text_color: accent.legible_text(),
            placeholder_color: Color::new(0.6, 0.6, 0.6, 1.0),
        }
    }
}

impl ComboBoxStyle {
    /// Vertical distance between consecutive rows.
    #[must_use]
    pub fn row_pitch(&self) -> f32 {
        self.row_height + self.row_gap
    }

    /// Rows that fit in the menu before it scrolls.
    #[must_use]
    pub fn page_rows(&self) -> usize {
        let chrome = 2.0f32.mul_add(self.border_width, 2.0 * self.menu_padding);
        let usable = self.menu_max_height - chrome + self.row_gap;
        ((usable / self.row_pitch()).floor() as usize).max(1)
    }

    /// Hovered row fill.
    #[must_use]
    pub fn hover_color(&self) -> Color {
        self.accent.with_alpha(0.6)
    }

    /// Menu border color.
    #[must_use]
    pub fn menu_border_color(&self) -> Color {
        self.accent.with_alpha(0.8)
    }
}

type ChangeCallback = Box<dyn FnMut(&OptionId) + Send + Sync>;

/// Searchable dropdown widget.
pub struct ComboBox {
    store: Store<ComboState>,
    default_value: Option<OptionId>,
    placeholder: String,
    style: ComboBoxStyle,
    width: Option<f32>,
    on_change: Option<ChangeCallback>,
    mounted: bool,
    test_id_value: Option<String>,
    accessible_name_value: Option<String>,
    bounds: Rect,
    hovered_row: Option<usize>,
    blur_requested: bool,
}

impl ComboBox {
    /// Create a combo box over `options`.
    #[must_use]
    pub fn new(options: Catalog) -> Self {
        let style = ComboBoxStyle::default();
        let state = ComboState::new(options).page_rows(style.page_rows());
        Self {
            store: Store::new(state),
            default_value: None,
            placeholder: String::new(),
            style,
            width: None,
            on_change: None,
            mounted: false,
            test_id_value: None,
            accessible_name_value: None,
            bounds: Rect::default(),
            hovered_row: None,
            blur_requested: false,
        }
    }

    /// Set the committed value held by the host.
    #[must_use]
    pub fn value(mut self, id: impl Into<OptionId>) -> Self {
        self.store.state_mut().value = id.into();
        self
    }

    /// Set an option to commit once at mount.
    #[must_use]
    pub fn default_value(mut self, id: impl Into<OptionId>) -> Self {
        let id = id.into();
        self.default_value = (!id.is_empty()).then_some(id);
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set disabled state.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.store.state_mut().disabled = disabled;
        self
    }

    /// Set required state (hides the blank entry).
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        let state = self.store.state_mut();
        *state = state.clone().required(required);
        self
    }

    /// Set the change callback.
    #[must_use]
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&OptionId) + Send + Sync + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Set preferred width (still capped by the style's maximum).
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width.max(self.style.affix_size * 2.0));
        self
    }

    /// Set accent color.
    #[must_use]
    pub fn accent_color(mut self, color: Color) -> Self {
        self.style.accent = color;
        self.style.selected_text_color = color.legible_text();
        self
    }

    /// Replace all presentation constants.
    #[must_use]
    pub fn style(mut self, style: ComboBoxStyle) -> Self {
        self.store.state_mut().page_rows = style.page_rows();
        self.style = style;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Mount the widget, committing `default_value` if set.
    ///
    /// # Panics
    ///
    /// Panics when `value` or `default_value` is missing from the catalog.
    pub fn mount(&mut self) {
        if let Err(err) = self.try_mount() {
            panic!("combo box mounted with invalid props: {err}");
        }
    }

    /// Mount the widget, reporting unknown ids instead of panicking.
    pub fn try_mount(&mut self) -> Result<(), ComboBoxError> {
        if self.mounted {
            debug!("combo box already mounted");
            return Ok(());
        }
        self.check_props()?;
        self.mounted = true;
        let default_value = self.default_value.clone();
        self.send(ComboMessage::Mount { default_value });
        Ok(())
    }

    fn check_props(&self) -> Result<(), ComboBoxError> {
        let state = self.store.state();
        let props = [("value", Some(&state.value)), ("defaultValue", self.default_value.as_ref())];
        for (field, id) in props {
            if let Some(id) = id.filter(|id| !id.is_empty() && !state.catalog.contains(id)) {
                warn!(field, id = %id, "unknown option id");
                return Err(ComboBoxError::UnknownOption {
                    field,
                    id: id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Host write-back of the committed value.
    pub fn set_value(&mut self, id: impl Into<OptionId>) {
        self.send(ComboMessage::SetValue(id.into()));
    }

    /// Apply a message, invoking `on_change` for every commit.
    ///
    /// Returns the last committed id, if any.
    pub fn send(&mut self, msg: ComboMessage) -> Option<OptionId> {
        let cmd = self.store.dispatch(msg);
        if cmd.requests_blur() {
            debug!("focus released");
            self.blur_requested = true;
        }
        let mut last = None;
        for ComboEvent::Changed(id) in cmd.into_emitted() {
            if let Some(callback) = self.on_change.as_mut() {
                callback(&id);
            }
            last = Some(id);
        }
        if !self.store.state().is_open {
            self.hovered_row = None;
        }
        last
    }

    /// React to a page-level pointer press.
    ///
    /// Closes the menu and restores the committed text when the press lands
    /// outside the widget. Returns whether state changed.
    pub fn pointer_down(&mut self, down: PointerDown) -> bool {
        let outside = match down {
            PointerDown::Elsewhere => true,
            PointerDown::Surface(point) => !self.region().contains_point(&point),
        };
        if !outside {
            return false;
        }
        let state = self.store.state();
        if state.is_open {
            self.send(ComboMessage::Outside);
            true
        } else if state.focused {
            self.send(ComboMessage::Blur);
            true
        } else {
            false
        }
    }

    /// Observe every state change.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&ComboState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback);
    }

    /// Borrow the current state.
    #[must_use]
    pub const fn state(&self) -> &ComboState {
        self.store.state()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ComboState {
        self.store.state().clone()
    }

    /// Check if the menu is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state().is_open
    }

    /// Text shown in the field.
    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.state().input_text
    }

    /// Committed value as last reported by the host.
    #[must_use]
    pub fn current_value(&self) -> &OptionId {
        &self.state().value
    }

    /// Menu rows.
    #[must_use]
    pub fn visible_entries(&self) -> &[VisibleEntry] {
        &self.state().visible
    }

    /// Whether row `index` renders as selected.
    #[must_use]
    pub fn is_entry_selected(&self, index: usize) -> bool {
        self.state().is_entry_selected(index)
    }

    /// Row under the pointer.
    #[must_use]
    pub const fn hovered_row(&self) -> Option<usize> {
        self.hovered_row
    }

    /// Consume a pending request to release host keyboard focus.
    ///
    /// Set when a commit by Enter blurs the field; the host should move focus
    /// off the widget's surface.
    pub fn take_blur_request(&mut self) -> bool {
        std::mem::take(&mut self.blur_requested)
    }

    /// Placeholder text.
    #[must_use]
    pub fn placeholder_text(&self) -> &str {
        &self.placeholder
    }

    /// Check whether the widget is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.state().disabled
    }

    /// Check whether `mount` has run.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Presentation constants in use.
    #[must_use]
    pub const fn style_ref(&self) -> &ComboBoxStyle {
        &self.style
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    fn preferred_width(&self) -> f32 {
        self.width
            .unwrap_or(self.style.max_width)
            .min(self.style.max_width)
    }

    /// Input field bounds.
    #[must_use]
    pub fn field_rect(&self) -> Rect {
        Rect::new(
            self.bounds.x,
            self.bounds.y,
            self.bounds.width.min(self.style.max_width),
            self.style.field_height,
        )
    }

    /// Toggle arrow bounds.
    #[must_use]
    pub fn affix_rect(&self) -> Rect {
        let field = self.field_rect();
        let size = self.style.affix_size;
        Rect::new(
            field.right() - self.style.padding_x - size + self.style.border_width,
            field.y + (field.height - size) / 2.0,
            size,
            size,
        )
    }

    /// Menu bounds (meaningful while open).
    #[must_use]
    pub fn menu_rect(&self) -> Rect {
        let field = self.field_rect();
        let rows = self.state().visible.len().min(self.state().page_rows) as f32;
        let chrome = 2.0f32.mul_add(self.style.border_width, 2.0 * self.style.menu_padding);
        let content = rows.mul_add(self.style.row_pitch(), -self.style.row_gap).max(0.0);
        Rect::new(
            field.x,
            field.bottom() + self.style.menu_gap,
            field.width,
            (content + chrome).min(self.style.menu_max_height),
        )
    }

    fn menu_inner(&self) -> Rect {
        self.menu_rect()
            .inset(self.style.border_width + self.style.menu_padding)
    }

    /// Bounds of row `index`, accounting for scroll.
    #[must_use]
    pub fn row_rect(&self, index: usize) -> Rect {
        let inner = self.menu_inner();
        let slot = index as f32 - self.state().scroll_offset as f32;
        let scrollbar = if self.needs_scrollbar() {
            self.style.scrollbar_width + self.style.menu_padding
        } else {
            0.0
        };
        Rect::new(
            inner.x,
            slot.mul_add(self.style.row_pitch(), inner.y),
            inner.width - scrollbar,
            self.style.row_height,
        )
    }

    fn needs_scrollbar(&self) -> bool {
        self.state().visible.len() > self.state().page_rows
    }

    /// Row index under `point`, if the menu is open and a row is there.
    #[must_use]
    pub fn row_at(&self, point: &Point) -> Option<usize> {
        if !self.is_open() {
            return None;
        }
        self.state()
            .rows_in_view()
            .map(|(index, _)| index)
            .find(|&index| self.row_rect(index).contains_point(point))
    }

    /// Area that counts as "inside" for dismissal.
    #[must_use]
    pub fn region(&self) -> Rect {
        let field = self.field_rect();
        if self.is_open() {
            field.union(&self.menu_rect())
        } else {
            field
        }
    }

    fn scroll_rows(&self, delta_y: f32) -> i32 {
        if delta_y == 0.0 {
            return 0;
        }
        let rows = (delta_y / self.style.row_pitch()).round() as i32;
        if rows == 0 {
            delta_y.signum() as i32
        } else {
            rows
        }
    }

    // -------------------------------------------------------------------------
    // Painting
    // -------------------------------------------------------------------------

    fn text_style(&self, color: Color) -> TextStyle {
        TextStyle {
            size: self.style.font_size,
            color,
        }
    }

    fn paint_field(&self, canvas: &mut dyn Canvas) {
        let style = &self.style;
        let field = self.field_rect();
        let disabled = self.is_disabled();

        let background = if disabled {
            style.disabled_background
        } else {
            style.background
        };
        canvas.fill_rounded_rect(field, style.corner_radius, background);
        let border = if disabled {
            style.placeholder_color
        } else {
            style.accent
        };
        canvas.stroke_rounded_rect(field, style.corner_radius, border, style.border_width);

        let text_rect = Rect::new(
            field.x + style.padding_x,
            field.y,
            (self.affix_rect().x - field.x - style.padding_x).max(0.0),
            field.height,
        );
        let position = Point::new(
            text_rect.x,
            field.y + (field.height - style.font_size) / 2.0,
        );
        canvas.push_clip(text_rect);
        let text = self.input_text();
        if text.is_empty() {
            canvas.draw_text(
                &self.placeholder,
                position,
                &self.text_style(style.placeholder_color),
            );
        } else {
            let color = if disabled {
                style.placeholder_color
            } else {
                style.text_color
            };
            canvas.draw_text(text, position, &self.text_style(color));
        }
        canvas.pop_clip();
    }

    fn paint_affix(&self, canvas: &mut dyn Canvas) {
        let center = self.affix_rect().center();
        let (w, h) = (5.0, 2.5);
        // Arrow points down when closed, up when open.
        let flip = if self.is_open() { -1.0 } else { 1.0 };
        let points = [
            Point::new(center.x - w, center.y - h * flip),
            Point::new(center.x + w, center.y - h * flip),
            Point::new(center.x, center.y + h * flip),
        ];
        let color = if self.is_disabled() {
            self.style.placeholder_color
        } else {
            self.style.text_color
        };
        canvas.fill_polygon(&points, color);
    }

    fn paint_menu(&self, canvas: &mut dyn Canvas) {
        let style = &self.style;
        let menu = self.menu_rect();
        canvas.fill_rounded_rect(menu, style.corner_radius, style.background);
        canvas.stroke_rounded_rect(
            menu,
            style.corner_radius,
            style.menu_border_color(),
            style.border_width,
        );

        canvas.push_clip(self.menu_inner());
        for (index, entry) in self.state().rows_in_view() {
            let row = self.row_rect(index);
            let selected = self.is_entry_selected(index);
            let fill = if selected {
                Some(style.accent)
            } else if self.hovered_row == Some(index) && entry.kind != EntryKind::NoOptions {
                Some(style.hover_color())
            } else {
                None
            };
            if let Some(fill) = fill {
                canvas.fill_rounded_rect(row, style.corner_radius, fill);
            }

            let color = if selected {
                style.selected_text_color
            } else {
                style.text_color
            };
            let position = Point::new(
                row.x + 6.0,
                row.y + (style.row_height - style.font_size) / 2.0,
            );
            canvas.draw_text(&entry.label, position, &self.text_style(color));
        }
        canvas.pop_clip();

        if self.needs_scrollbar() {
            let inner = self.menu_inner();
            let total = self.state().visible.len() as f32;
            let page = self.state().page_rows as f32;
            let offset = self.state().scroll_offset as f32;
            let thumb = Rect::new(
                inner.right() - style.scrollbar_width,
                inner.y + inner.height * offset / total,
                style.scrollbar_width,
                inner.height * page / total,
            );
            canvas.fill_rounded_rect(thumb, style.scrollbar_width / 2.0, style.accent);
        }
    }
}

impl Widget for ComboBox {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(self.preferred_width(), self.style.field_height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.paint_field(canvas);
        self.paint_affix(canvas);
        if self.is_open() {
            self.paint_menu(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let committed = match event {
            Event::MouseMove { position } => {
                self.hovered_row = self.row_at(position);
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if self.affix_rect().contains_point(position) {
                    self.send(ComboMessage::Toggle)
                } else if self.field_rect().contains_point(position) {
                    self.send(ComboMessage::Focus)
                } else if let Some(index) = self.row_at(position) {
                    self.send(ComboMessage::Pick(index))
                } else {
                    None
                }
            }
            Event::Scroll { delta_y, .. } if self.is_open() => {
                let rows = self.scroll_rows(*delta_y);
                if rows == 0 {
                    None
                } else {
                    self.send(ComboMessage::Scroll(rows))
                }
            }
            Event::TextInput { text } if self.state().focused => {
                let next = format!("{}{text}", self.input_text());
                self.send(ComboMessage::Input(next))
            }
            Event::KeyDown { key } if self.state().focused => match key {
                Key::Backspace => {
                    let mut next = self.input_text().to_string();
                    if next.pop().is_some() {
                        self.send(ComboMessage::Input(next))
                    } else {
                        None
                    }
                }
                Key::Enter => self.send(ComboMessage::Enter),
                _ => None,
            },
            Event::FocusIn => self.send(ComboMessage::Focus),
            Event::FocusOut => self.send(ComboMessage::Blur),
            _ => None,
        };

        committed.map(|id| Box::new(ComboBoxChanged { id }) as Box<dyn Any + Send>)
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn is_interactive(&self) -> bool {
        !self.is_disabled()
    }

    fn is_focusable(&self) -> bool {
        !self.is_disabled()
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value
            .as_deref()
            .or_else(|| (!self.placeholder.is_empty()).then_some(self.placeholder.as_str()))
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ComboBox
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl std::fmt::Debug for ComboBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboBox")
            .field("state", self.store.state())
            .field("placeholder", &self.placeholder)
            .field("mounted", &self.mounted)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}
