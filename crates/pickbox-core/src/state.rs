//! State management for Pickbox widgets.
//!
//! This module implements the Elm Architecture pattern for predictable state
//! management: `State + Message → (State, Command)`.
//!
//! # Examples
//!
//! ```
//! use pickbox_core::{Command, State};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Default, Serialize, Deserialize)]
//! struct Toggle {
//!     open: bool,
//! }
//!
//! enum ToggleMessage {
//!     Flip,
//! }
//!
//! impl State for Toggle {
//!     type Message = ToggleMessage;
//!     type Output = bool;
//!
//!     fn update(&mut self, msg: Self::Message) -> Command<Self::Output> {
//!         match msg {
//!             ToggleMessage::Flip => self.open = !self.open,
//!         }
//!         Command::Emit(self.open)
//!     }
//! }
//!
//! let mut state = Toggle::default();
//! let cmd = state.update(ToggleMessage::Flip);
//! assert_eq!(cmd.into_emitted(), vec![true]);
//! ```

use serde::{Deserialize, Serialize};

/// Widget state trait.
///
/// Implements the Elm Architecture: State + Message → (State, Command)
pub trait State: Clone + Serialize + for<'de> Deserialize<'de> + Send + Sync {
    /// Message type for state updates
    type Message: Send;

    /// Notification type carried by [`Command::Emit`]
    type Output: Send;

    /// Update state in response to a message.
    ///
    /// Returns a command describing side effects for the host.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Output>;
}

/// Side effects requested by a state update.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Command<M> {
    /// No command
    #[default]
    None,
    /// Execute multiple commands in order
    Batch(Vec<Command<M>>),
    /// Deliver a notification to the host
    Emit(M),
    /// Release keyboard focus
    Blur,
}

impl<M> Command<M> {
    /// Create a batch of commands.
    pub fn batch(commands: impl IntoIterator<Item = Self>) -> Self {
        Self::Batch(commands.into_iter().collect())
    }

    /// Check if this is the none command.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Check whether this command (or any nested command) requests a blur.
    #[must_use]
    pub fn requests_blur(&self) -> bool {
        match self {
            Self::Blur => true,
            Self::Batch(cmds) => cmds.iter().any(Self::requests_blur),
            Self::None | Self::Emit(_) => false,
        }
    }

    /// Flatten into the emitted notifications, in order.
    #[must_use]
    pub fn into_emitted(self) -> Vec<M> {
        let mut out = Vec::new();
        self.collect_emitted(&mut out);
        out
    }

    fn collect_emitted(self, out: &mut Vec<M>) {
        match self {
            Self::Emit(m) => out.push(m),
            Self::Batch(cmds) => {
                for cmd in cmds {
                    cmd.collect_emitted(out);
                }
            }
            Self::None | Self::Blur => {}
        }
    }
}

/// Type alias for state change subscribers.
type Subscriber<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Store owns a state value and notifies subscribers after every dispatch.
pub struct Store<S: State> {
    state: S,
    subscribers: Vec<Subscriber<S>>,
}

impl<S: State> Store<S> {
    /// Create a new store with initial state.
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            subscribers: Vec::new(),
        }
    }

    /// Get current state.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Mutable access that bypasses subscribers; for configuring state before
    /// the first dispatch.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Dispatch a message to update state.
    pub fn dispatch(&mut self, msg: S::Message) -> Command<S::Output> {
        let cmd = self.state.update(msg);
        self.notify_subscribers();
        cmd
    }

    /// Subscribe to state changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify_subscribers(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
    }
}

impl<S: State + std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
