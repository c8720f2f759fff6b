//! Outside-pointer dismissal.
//!
//! A [`DismissalWatcher`] owns one listener on a page-wide [`PointerSource`]
//! for as long as it lives. Dropping the watcher removes the listener, so
//! several combo boxes can share a source without leaking registrations.

use crate::combo_box::ComboBox;
use pickbox_core::Point;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

/// Where a page-level pointer press landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerDown {
    /// On the surface hosting the widget, in surface-local coordinates
    Surface(Point),
    /// Anywhere else on the page
    Elsewhere,
}

/// Handle returned by [`PointerSource::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Registration(u64);

impl Registration {
    /// Wrap a raw handle.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Listener invoked for every page-level pointer press.
pub type PointerListener = Box<dyn FnMut(PointerDown)>;

/// A page-wide stream of pointer presses.
pub trait PointerSource {
    /// Add a listener.
    fn register(&self, listener: PointerListener) -> Registration;

    /// Remove a listener. Unknown registrations are ignored.
    fn deregister(&self, registration: Registration);
}

/// Scoped outside-click listener for one [`ComboBox`].
pub struct DismissalWatcher {
    source: Rc<dyn PointerSource>,
    registration: Option<Registration>,
}

impl DismissalWatcher {
    /// Register the widget's outside-click listener on `source`.
    ///
    /// The listener holds the widget weakly; once the widget is gone the
    /// listener does nothing until the watcher is dropped.
    pub fn attach(source: Rc<dyn PointerSource>, widget: &Rc<RefCell<ComboBox>>) -> Self {
        let widget: Weak<RefCell<ComboBox>> = Rc::downgrade(widget);
        let registration = source.register(Box::new(move |down| {
            let Some(widget) = widget.upgrade() else {
                return;
            };
            let Ok(mut widget) = widget.try_borrow_mut() else {
                warn!("pointer press while combo box is busy; ignored");
                return;
            };
            widget.pointer_down(down);
        }));
        debug!(registration = registration.raw(), "dismissal listener attached");
        Self {
            source,
            registration: Some(registration),
        }
    }

    /// Current registration handle.
    #[must_use]
    pub const fn registration(&self) -> Option<Registration> {
        self.registration
    }

    /// Remove the listener now rather than at drop.
    pub fn detach(&mut self) {
        if let Some(registration) = self.registration.take() {
            self.source.deregister(registration);
            debug!(registration = registration.raw(), "dismissal listener detached");
        }
    }
}

impl Drop for DismissalWatcher {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for DismissalWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DismissalWatcher")
            .field("registration", &self.registration)
            .finish_non_exhaustive()
    }
}

/// In-memory [`PointerSource`] for headless hosts.
#[derive(Default)]
pub struct PointerBus {
    listeners: RefCell<Vec<(Registration, PointerListener)>>,
    removed: RefCell<Vec<Registration>>,
    delivering: Cell<bool>,
    next_id: Cell<u64>,
}

impl PointerBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver a press to every listener in registration order.
    pub fn press(&self, down: PointerDown) {
        let mut active = std::mem::take(&mut *self.listeners.borrow_mut());
        let nested = self.delivering.replace(true);
        for (_, listener) in &mut active {
            listener(down);
        }
        self.delivering.set(nested);

        // Listeners may have registered or deregistered during delivery.
        let mut listeners = self.listeners.borrow_mut();
        active.append(&mut listeners);
        let removed = std::mem::take(&mut *self.removed.borrow_mut());
        active.retain(|(id, _)| !removed.contains(id));
        *listeners = active;
    }
}

impl PointerSource for PointerBus {
    fn register(&self, listener: PointerListener) -> Registration {
        let id = Registration::new(self.next_id.get());
        self.next_id.set(id.raw() + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn deregister(&self, registration: Registration) {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != registration);
        // Mid-delivery the listener is out of the list; drop it afterwards.
        if listeners.len() == before && self.delivering.get() {
            self.removed.borrow_mut().push(registration);
        }
    }
}

impl std::fmt::Debug for PointerBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerBus")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}
