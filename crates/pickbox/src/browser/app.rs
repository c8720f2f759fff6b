//! WASM application entry point.

use super::canvas2d::Canvas2DRenderer;
use super::dismissal::{DocumentPointerSource, ListenerGuard};
use super::events::{keyboard_event_to_pickbox, mouse_event_to_pickbox, wheel_event_to_pickbox};
use super::{parse_story, AppError};
use pickbox_core::{Constraints, Event, Key, RecordingCanvas, Rect, Size, Widget};
use pickbox_widgets::{ComboBox, DismissalWatcher, OptionId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

/// State shared by the app and its DOM listeners.
struct Runtime {
    combo: Rc<RefCell<ComboBox>>,
    canvas: HtmlCanvasElement,
    renderer: Canvas2DRenderer,
    commits: Arc<Mutex<Vec<OptionId>>>,
    dirty: Arc<AtomicBool>,
    callback: RefCell<Option<js_sys::Function>>,
    pointer_pressed: Cell<bool>,
}

impl Runtime {
    /// Route an event to the widget. Returns whether the widget consumed it.
    ///
    /// A commit by Enter moves DOM focus off the canvas once the commit has
    /// been delivered.
    fn dispatch(&self, event: &Event) -> bool {
        let Ok(mut combo) = self.combo.try_borrow_mut() else {
            web_sys::console::warn_1(&JsValue::from_str("combo box busy; event dropped"));
            return false;
        };
        let hovered = combo.hovered_row();
        let before = combo.snapshot();
        combo.event(event);
        let consumed = combo.state() != &before;
        if combo.hovered_row() != hovered {
            self.dirty.store(true, Ordering::SeqCst);
        }
        let blur = combo.take_blur_request();
        drop(combo);
        self.flush();
        if blur {
            self.canvas.blur().ok();
        }
        consumed
    }

    fn is_focused(&self) -> bool {
        self.combo.try_borrow().is_ok_and(|combo| combo.state().focused)
    }

    fn is_open(&self) -> bool {
        self.combo.try_borrow().is_ok_and(|combo| combo.is_open())
    }

    /// Deliver pending commits, then repaint if anything changed.
    fn flush(&self) {
        self.deliver_commits();
        if self.dirty.swap(false, Ordering::SeqCst) {
            self.render();
        }
    }

    fn deliver_commits(&self) {
        let Some(callback) = self.callback.borrow().clone() else {
            return;
        };
        let pending = self
            .commits
            .lock()
            .map(|mut commits| std::mem::take(&mut *commits))
            .unwrap_or_default();
        for id in pending {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(id.as_str())) {
                web_sys::console::error_2(&JsValue::from_str("on_change threw"), &err);
            }
        }
    }

    fn render(&self) {
        let Ok(combo) = self.combo.try_borrow() else {
            self.dirty.store(true, Ordering::SeqCst);
            return;
        };
        let mut canvas = RecordingCanvas::new();
        combo.paint(&mut canvas);
        self.renderer.render(canvas.commands());
        let expanded = if combo.is_open() { "true" } else { "false" };
        self.canvas.set_attribute("aria-expanded", expanded).ok();
    }
}

/// A combo box mounted on a canvas element.
///
/// Commits are reported to the function passed to [`ComboBoxApp::on_change`];
/// the page is expected to write the id back with
/// [`ComboBoxApp::set_value`]. Commits made before a callback is registered,
/// such as the `defaultValue` commit at mount, are delivered once one is.
#[wasm_bindgen]
pub struct ComboBoxApp {
    runtime: Rc<Runtime>,
    source: Rc<DocumentPointerSource>,
    watcher: Option<DismissalWatcher>,
    canvas_listeners: Option<ListenerGuard>,
}

#[wasm_bindgen]
impl ComboBoxApp {
    /// Mount a combo box described by `story_json` on the canvas `canvas_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, story_json: &str) -> Result<ComboBoxApp, JsValue> {
        console_error_panic_hook::set_once();
        Ok(Self::mount(canvas_id, story_json)?)
    }

    /// Host write-back of the committed id.
    pub fn set_value(&self, id: &str) {
        if let Ok(mut combo) = self.runtime.combo.try_borrow_mut() {
            combo.set_value(id);
        }
        self.runtime.flush();
    }

    /// Committed id as last written by the host.
    pub fn value(&self) -> String {
        self.runtime
            .combo
            .try_borrow()
            .map(|combo| combo.current_value().to_string())
            .unwrap_or_default()
    }

    /// Current field text.
    pub fn text(&self) -> String {
        self.runtime
            .combo
            .try_borrow()
            .map(|combo| combo.input_text().to_string())
            .unwrap_or_default()
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.runtime.is_open()
    }

    /// Register the change callback, called with the committed id.
    pub fn on_change(&self, callback: js_sys::Function) {
        *self.runtime.callback.borrow_mut() = Some(callback);

        // Deliver queued commits after this call returns, so the callback
        // may call back into the app.
        let runtime = Rc::clone(&self.runtime);
        let deliver = Closure::once_into_js(move || runtime.flush());
        if let Some(win) = window() {
            win.queue_microtask(deliver.unchecked_ref());
        }
    }

    /// Repaint unconditionally.
    pub fn render(&self) {
        self.runtime.dirty.store(false, Ordering::SeqCst);
        self.runtime.render();
    }

    /// Remove every DOM listener. The app stays readable but inert.
    pub fn destroy(&mut self) {
        self.canvas_listeners = None;
        if let Some(mut watcher) = self.watcher.take() {
            watcher.detach();
        }
    }

    /// Number of live document pointer registrations.
    pub fn pointer_listener_count(&self) -> usize {
        self.source.listener_count()
    }
}

impl ComboBoxApp {
    fn mount(canvas_id: &str, story_json: &str) -> Result<Self, AppError> {
        let document = window()
            .ok_or(AppError::NoWindow("window"))?
            .document()
            .ok_or(AppError::NoWindow("document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| AppError::CanvasNotFound(canvas_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::NotACanvas(canvas_id.to_string()))?;
        let renderer = Canvas2DRenderer::new(canvas.clone())?;

        let props = parse_story(story_json)?;
        let commits = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&commits);
        let mut combo = props
            .to_combo_box()
            .with_test_id(canvas_id)
            .on_change(move |id| {
                if let Ok(mut commits) = sink.lock() {
                    commits.push(id.clone());
                }
            });

        let dirty = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&dirty);
        combo.subscribe(move |_| flag.store(true, Ordering::SeqCst));

        let viewport = Size::new(renderer.width() as f32, renderer.height() as f32);
        let size = combo.measure(Constraints::loose(viewport));
        combo.layout(Rect::from_size(size));
        combo.try_mount()?;

        canvas.set_attribute("tabindex", "0").ok();
        canvas.set_attribute("role", "combobox").ok();
        if let Some(name) = combo.accessible_name() {
            canvas.set_attribute("aria-label", name).ok();
        }
        if combo.is_disabled() {
            canvas.set_attribute("aria-disabled", "true").ok();
        }

        let runtime = Rc::new(Runtime {
            combo: Rc::new(RefCell::new(combo)),
            canvas: canvas.clone(),
            renderer,
            commits,
            dirty,
            callback: RefCell::new(None),
            pointer_pressed: Cell::new(false),
        });

        let repaint = Rc::clone(&runtime);
        let source = DocumentPointerSource::new(document, canvas.clone())
            .after_delivery(move || repaint.flush());
        let source = Rc::new(source);
        let watcher = DismissalWatcher::attach(source.clone(), &runtime.combo);
        let canvas_listeners = Self::canvas_listeners(&runtime, &canvas);

        runtime.flush();
        web_sys::console::log_1(&JsValue::from_str(&format!("pickbox mounted on #{canvas_id}")));

        Ok(Self {
            runtime,
            source,
            watcher: Some(watcher),
            canvas_listeners: Some(canvas_listeners),
        })
    }

    fn canvas_listeners(runtime: &Rc<Runtime>, canvas: &HtmlCanvasElement) -> ListenerGuard {
        let mut guard = ListenerGuard::new(canvas.clone().into());

        for event_type in ["mousedown", "mouseup", "mousemove"] {
            let rt = Rc::clone(runtime);
            let target = canvas.clone();
            guard.listen(event_type, move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Some(event) = mouse_event_to_pickbox(mouse, &target) else {
                    return;
                };
                match event {
                    Event::MouseDown { .. } => rt.pointer_pressed.set(true),
                    Event::MouseUp { .. } => rt.pointer_pressed.set(false),
                    _ => {}
                }
                rt.dispatch(&event);
            });
        }

        let rt = Rc::clone(runtime);
        guard.listen("wheel", move |event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            if rt.is_open() {
                event.prevent_default();
                rt.dispatch(&wheel_event_to_pickbox(wheel));
            }
        });

        let rt = Rc::clone(runtime);
        guard.listen("focus", move |_| {
            // A click already dispatched Focus or Toggle for this press.
            if !rt.pointer_pressed.get() {
                rt.dispatch(&Event::FocusIn);
            }
        });

        let rt = Rc::clone(runtime);
        guard.listen("blur", move |_| {
            rt.dispatch(&Event::FocusOut);
        });

        let rt = Rc::clone(runtime);
        guard.listen("keydown", move |event| {
            if !rt.is_focused() {
                return;
            }
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(converted) = keyboard_event_to_pickbox(key) else {
                return;
            };
            let editing = matches!(
                converted,
                Event::TextInput { .. }
                    | Event::KeyDown {
                        key: Key::Backspace | Key::Enter
                    }
            );
            rt.dispatch(&converted);
            if editing {
                event.prevent_default();
            }
        });

        guard
    }
}

impl Drop for ComboBoxApp {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
