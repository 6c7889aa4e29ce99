//! Command-indexed handler registry.
//!
//! Handlers are registered per command name and kept in registration
//! order. [`Events::dispatch`] runs every handler registered for a
//! message's command, one after another, each seeing the same message and
//! context. Unknown commands are ignored.
//!
//! # Example
//!
//! ```
//! use anolis::{Context, Events, Message};
//!
//! let events = Events::with_defaults();
//! events.register("privmsg", |msg: &mut Message, ctx: &dyn Context| {
//!     if msg.payload() == "!ping" {
//!         if let Some(target) = msg.arg(0) {
//!             ctx.commands().privmsg(target, "pong");
//!         }
//!     }
//! });
//! assert_eq!(events.count("PRIVMSG"), 2);
//! ```

pub mod handlers;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::context::Context;
use crate::message::Message;

/// Something that reacts to a dispatched message.
///
/// Handlers cannot fail. One that is missing what it needs should return
/// without doing anything so later handlers and later messages still run.
/// The message is mutable so the built-in NICK handler can apply
/// [`Message::rename_source`]; other handlers should leave it alone.
pub trait Handler: Send + Sync {
    /// React to `msg`.
    fn handle(&self, msg: &mut Message, ctx: &dyn Context);
}

impl<F> Handler for F
where
    F: Fn(&mut Message, &dyn Context) + Send + Sync,
{
    fn handle(&self, msg: &mut Message, ctx: &dyn Context) {
        self(msg, ctx)
    }
}

/// Registry mapping uppercased command names to ordered handler lists.
#[derive(Default)]
pub struct Events {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn Handler>>>>,
}

impl Events {
    /// A registry with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with the built-in protocol handlers.
    pub fn with_defaults() -> Self {
        let events = Self::new();
        handlers::register_defaults(&events);
        events
    }

    /// Append `handler` to the list for `command` (case-insensitive).
    pub fn register<F>(&self, command: &str, handler: F)
    where
        F: Fn(&mut Message, &dyn Context) + Send + Sync + 'static,
    {
        self.register_handler(command, Arc::new(handler));
    }

    /// Append an already-shared handler to the list for `command`.
    pub fn register_handler(&self, command: &str, handler: Arc<dyn Handler>) {
        self.handlers
            .write()
            .entry(command.to_ascii_uppercase())
            .or_default()
            .push(handler);
    }

    /// Number of handlers registered for `command`.
    pub fn count(&self, command: &str) -> usize {
        self.handlers
            .read()
            .get(&command.to_ascii_uppercase())
            .map_or(0, Vec::len)
    }

    /// Snapshot of the handlers registered for `command`, in order.
    fn snapshot(&self, command: &str) -> Vec<Arc<dyn Handler>> {
        self.handlers
            .read()
            .get(&command.to_ascii_uppercase())
            .cloned()
            .unwrap_or_default()
    }

    /// Run every handler registered for `msg.command`, in registration order.
    ///
    /// The registry lock is released before the first handler runs, so
    /// handlers may register further handlers.
    pub fn dispatch(&self, msg: &mut Message, ctx: &dyn Context) {
        let handlers = self.snapshot(&msg.command);
        trace!(command = %msg.command, handlers = handlers.len(), "dispatching");
        for handler in handlers {
            handler.handle(msg, ctx);
        }
    }
}

impl fmt::Debug for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.read();
        let mut map = f.debug_map();
        for (command, list) in handlers.iter() {
            map.entry(command, &list.len());
        }
        map.finish()
    }
}
