//! One connected session's state engine.
//!
//! A [`Session`] owns the channel directory, the local nickname, the event
//! registry and the outgoing queue. It performs no I/O: lines go in through
//! [`Session::handle_line`], outgoing lines come out of the [`Outbox`], and
//! termination is announced once through [`Session::closed`].
//!
//! # Example
//!
//! ```
//! use anolis::{Context, Session};
//!
//! let (session, mut outbox) = Session::new("anolis");
//!
//! session.handle_line(":anolis!bot@host JOIN #rust").unwrap();
//! session.handle_line(":ferris!crab@host JOIN :#rust").unwrap();
//! session.handle_line("PING :irc.example.net").unwrap();
//!
//! let channel = session.channels().get("#rust").unwrap();
//! assert!(channel.users().has_name("ferris"));
//! assert_eq!(outbox.try_recv().unwrap(), "PONG irc.example.net");
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::context::{Commands, Context};
use crate::directory::Channels;
use crate::error::MessageParseError;
use crate::event::Events;
use crate::message::Message;

/// Receiving end of a session's outgoing lines.
pub type Outbox = mpsc::UnboundedReceiver<String>;

/// Why a session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CloseReason {
    /// The transport reached end of stream.
    ConnectionClosed,
    /// The local user quit.
    Quit,
    /// The server sent `ERROR`.
    ServerError(String),
    /// Reading or writing the transport failed.
    Transport(String),
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionClosed => write!(f, "connection closed"),
            Self::Quit => write!(f, "quit"),
            Self::ServerError(reason) => write!(f, "server error: {}", reason),
            Self::Transport(reason) => write!(f, "transport error: {}", reason),
        }
    }
}

/// State engine for one connected session.
pub struct Session {
    nickname: RwLock<String>,
    channels: Channels,
    events: Events,
    outgoing: mpsc::UnboundedSender<String>,
    closed: watch::Sender<Option<CloseReason>>,
}

impl Session {
    /// A session for `nickname` with the built-in handlers registered.
    pub fn new(nickname: impl Into<String>) -> (Arc<Self>, Outbox) {
        Self::with_events(nickname, Events::with_defaults())
    }

    /// A session using `events` as its registry.
    pub fn with_events(nickname: impl Into<String>, events: Events) -> (Arc<Self>, Outbox) {
        let (outgoing, outbox) = mpsc::unbounded_channel();
        let (closed, _) = watch::channel(None);
        let session = Arc::new(Self {
            nickname: RwLock::new(nickname.into()),
            channels: Channels::new(),
            events,
            outgoing,
            closed,
        });
        (session, outbox)
    }

    /// The event registry, for adding handlers.
    pub fn events(&self) -> &Events {
        &self.events
    }

    /// Run all handlers registered for `message`'s command.
    ///
    /// Returns the message as the handlers left it. Once the session is
    /// closed nothing runs and the message comes back untouched.
    pub fn dispatch(&self, mut message: Message) -> Message {
        if self.is_closed() {
            debug!(command = %message.command, "session closed; dropping message");
            return message;
        }
        self.events.dispatch(&mut message, self);
        message
    }

    /// Parse `raw` and dispatch it.
    ///
    /// Malformed lines are returned as errors and change nothing. Lines
    /// arriving after the session closed are dropped.
    pub fn handle_line(&self, raw: &str) -> Result<(), MessageParseError> {
        let message = Message::parse(raw)?;
        self.dispatch(message);
        Ok(())
    }

    /// End the session and release its channel directory.
    ///
    /// Returns `true` for the call that closed it; later calls change
    /// nothing and return `false`.
    pub fn close(&self, reason: CloseReason) -> bool {
        let first = self.closed.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason.clone());
            true
        });
        if first {
            info!(%reason, "session closed");
            self.channels.clear();
        }
        first
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.borrow().is_some()
    }

    /// The reason given to the first [`close`](Self::close), if any.
    pub fn close_reason(&self) -> Option<CloseReason> {
        self.closed.borrow().clone()
    }

    /// Wait until the session closes, then return why.
    pub async fn closed(&self) -> CloseReason {
        let mut rx = self.closed.subscribe();
        let reason = match rx.wait_for(Option::is_some).await {
            Ok(reason) => (*reason).clone(),
            Err(_) => None,
        };
        reason.unwrap_or(CloseReason::ConnectionClosed)
    }
}

impl Commands for Session {
    fn raw(&self, line: String) {
        if self.outgoing.send(line).is_err() {
            debug!("outbox dropped; discarding line");
        }
    }

    fn quit(&self, reason: &str) {
        self.raw(format!("QUIT :{}", reason));
        self.close(CloseReason::Quit);
    }
}

impl Context for Session {
    fn channels(&self) -> &Channels {
        &self.channels
    }

    fn current_nickname(&self) -> String {
        self.nickname.read().clone()
    }

    fn update_local_nickname(&self, nickname: &str) {
        let mut current = self.nickname.write();
        debug!(old = %*current, new = %nickname, "local nickname changed");
        *current = nickname.to_string();
    }

    fn commands(&self) -> &dyn Commands {
        self
    }

    fn close(&self, reason: CloseReason) -> bool {
        Session::close(self, reason)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("nickname", &*self.nickname.read())
            .field("channels", &self.channels)
            .field("events", &self.events)
            .field("closed", &*self.closed.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_is_idempotent() {
        let (session, _outbox) = Session::new("anolis");
        assert!(!session.is_closed());
        assert!(session.close(CloseReason::ConnectionClosed));
        assert!(!session.close(CloseReason::Quit));
        assert_eq!(session.close_reason(), Some(CloseReason::ConnectionClosed));
    }

    #[test]
    fn test_close_releases_channels() {
        let (session, _outbox) = Session::new("anolis");
        session.handle_line(":anolis!bot@host JOIN #x").unwrap();
        assert!(session.channels().has("#x"));
        session.close(CloseReason::ConnectionClosed);
        assert!(session.channels().is_empty());
    }

    #[test]
    fn test_lines_after_close_are_dropped() {
        let (session, _outbox) = Session::new("anolis");
        session.close(CloseReason::Quit);
        session.handle_line(":anolis!bot@host JOIN #x").unwrap();
        assert!(session.channels().is_empty());
    }

    #[test]
    fn test_dispatch_after_close_changes_nothing() {
        let (session, mut outbox) = Session::new("anolis");
        session.handle_line(":anolis!bot@host JOIN #x").unwrap();
        session.close(CloseReason::ServerError("bye".to_string()));

        let msg = Message::parse(":anolis!bot@host JOIN #y").unwrap();
        let returned = session.dispatch(msg.clone());
        assert_eq!(returned, msg);
        session.dispatch(Message::parse("PING :late").unwrap());

        assert!(session.channels().is_empty());
        assert!(outbox.try_recv().is_err());
    }

    #[test]
    fn test_malformed_line_is_reported() {
        let (session, _outbox) = Session::new("anolis");
        assert_eq!(session.handle_line(""), Err(MessageParseError::EmptyMessage));
        assert!(!session.is_closed());
    }

    #[test]
    fn test_quit_sends_and_closes() {
        let (session, mut outbox) = Session::new("anolis");
        session.commands().quit("bye");
        assert_eq!(outbox.try_recv().unwrap(), "QUIT :bye");
        assert_eq!(session.close_reason(), Some(CloseReason::Quit));
    }

    #[test]
    fn test_raw_after_outbox_dropped() {
        let (session, outbox) = Session::new("anolis");
        drop(outbox);
        session.commands().join("#x");
    }

    #[tokio::test]
    async fn test_closed_resolves() {
        let (session, _outbox) = Session::new("anolis");
        let waiter = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.closed().await })
        };
        session.close(CloseReason::ServerError("bye".to_string()));
        assert_eq!(
            waiter.await.unwrap(),
            CloseReason::ServerError("bye".to_string())
        );
    }

    #[tokio::test]
    async fn test_closed_after_close() {
        let (session, _outbox) = Session::new("anolis");
        session.close(CloseReason::Quit);
        assert_eq!(session.closed().await, CloseReason::Quit);
    }
}
