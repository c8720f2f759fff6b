//! Document-level pointer listeners.
//!
//! [`DocumentPointerSource`] feeds every `pointerdown` on the page to the
//! widget's dismissal watcher. All DOM listeners are owned by a
//! [`ListenerGuard`], which removes them when dropped.

use super::events::canvas_position;
use pickbox_widgets::{PointerDown, PointerListener, PointerSource, Registration};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, HtmlCanvasElement, MouseEvent};

type DomHandler = Closure<dyn FnMut(web_sys::Event)>;

/// DOM listeners on one target, removed on drop.
pub struct ListenerGuard {
    target: EventTarget,
    listeners: Vec<(&'static str, DomHandler)>,
}

impl ListenerGuard {
    /// Create an empty guard for `target`.
    pub fn new(target: EventTarget) -> Self {
        Self {
            target,
            listeners: Vec::new(),
        }
    }

    /// Add a listener for `event_type`.
    pub fn listen<F>(&mut self, event_type: &'static str, handler: F)
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = DomHandler::new(handler);
        if let Err(err) = self
            .target
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
        {
            web_sys::console::error_2(&JsValue::from_str("addEventListener failed"), &err);
            return;
        }
        self.listeners.push((event_type, closure));
    }

    /// Number of live listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if no listener is live.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener now.
    pub fn clear(&mut self) {
        for (event_type, closure) in self.listeners.drain(..) {
            self.target
                .remove_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.clear();
    }
}

/// [`PointerSource`] backed by the document's `pointerdown` events.
///
/// A press whose target is `canvas` is reported as
/// [`PointerDown::Surface`] in canvas-local pixels; anything else is
/// [`PointerDown::Elsewhere`]. The optional after-delivery hook runs once the
/// listener has handled the press.
pub struct DocumentPointerSource {
    document: Document,
    canvas: HtmlCanvasElement,
    after_delivery: Option<Rc<dyn Fn()>>,
    guards: RefCell<Vec<(Registration, ListenerGuard)>>,
    next_id: Cell<u64>,
}

impl DocumentPointerSource {
    /// Create a source for presses relative to `canvas`.
    pub fn new(document: Document, canvas: HtmlCanvasElement) -> Self {
        Self {
            document,
            canvas,
            after_delivery: None,
            guards: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Run `hook` after every delivered press.
    #[must_use]
    pub fn after_delivery(mut self, hook: impl Fn() + 'static) -> Self {
        self.after_delivery = Some(Rc::new(hook));
        self
    }

    /// Number of live registrations.
    pub fn listener_count(&self) -> usize {
        self.guards.borrow().len()
    }
}

impl PointerSource for DocumentPointerSource {
    fn register(&self, mut listener: PointerListener) -> Registration {
        let id = Registration::new(self.next_id.get());
        self.next_id.set(id.raw() + 1);

        let canvas = self.canvas.clone();
        let hook = self.after_delivery.clone();
        let mut guard = ListenerGuard::new(self.document.clone().into());
        guard.listen("pointerdown", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let on_canvas = event
                .target()
                .is_some_and(|target| &target == canvas.unchecked_ref::<EventTarget>());
            let down = if on_canvas {
                PointerDown::Surface(canvas_position(mouse, &canvas))
            } else {
                PointerDown::Elsewhere
            };
            listener(down);
            if let Some(hook) = &hook {
                hook();
            }
        });
        self.guards.borrow_mut().push((id, guard));
        id
    }

    fn deregister(&self, registration: Registration) {
        // The guard's drop removes the DOM listener.
        self.guards.borrow_mut().retain(|(id, _)| *id != registration);
    }
}
