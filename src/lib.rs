//! # anolis
//!
//! A state engine for IRC client sessions.
//!
//! anolis reads what the server narrates (joins, parts, kicks, quits,
//! nick and topic changes) and keeps a live directory of the channels the
//! local user is in and who is in them. Applications hook in by
//! registering handlers for any command or numeric.
//!
//! ## Features
//!
//! - Line parser producing [`Message`] values with a parsed [`User`] source
//! - Thread-safe [`Channels`] and [`Users`] directories
//! - An [`Events`] registry with built-in protocol handlers
//! - A sans-IO [`Session`] that can be fed lines from anywhere
//! - Optional Tokio client (`client` feature, on by default)

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ```rust
//! use anolis::{Context, Session};
//!
//! let (session, _outbox) = Session::new("anolis");
//! session.handle_line(":anolis!bot@host JOIN #rust").unwrap();
//! session.handle_line(":ferris!crab@host JOIN :#rust").unwrap();
//! session.handle_line(":ferris!crab@host NICK :crab").unwrap();
//!
//! let channel = session.channels().get("#rust").unwrap();
//! assert!(channel.users().has_name("crab"));
//! assert!(!channel.users().has_name("ferris"));
//! ```
//!
//! ### Custom handlers
//!
//! ```rust
//! use anolis::{Context, Message, Session};
//!
//! let (session, mut outbox) = Session::new("anolis");
//! session.events().register("privmsg", |msg: &mut Message, ctx: &dyn Context| {
//!     if msg.payload() == "!ping" {
//!         if let Some(target) = msg.arg(0) {
//!             ctx.commands().privmsg(target, "pong");
//!         }
//!     }
//! });
//!
//! session.handle_line(":foo!bar@host PRIVMSG #rust :!ping").unwrap();
//! assert_eq!(outbox.try_recv().unwrap(), "PRIVMSG #rust :pong");
//! ```

pub mod context;
pub mod directory;
pub mod error;
pub mod event;
pub mod message;
pub mod session;
pub mod user;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod line;
#[cfg(feature = "client")]
pub mod transport;

pub use self::context::{Commands, Context};
pub use self::directory::{Channel, Channels, Users};
pub use self::error::{MessageParseError, ProtocolError};
pub use self::event::{Events, Handler};
pub use self::message::{Message, Rename};
pub use self::session::{CloseReason, Outbox, Session};
pub use self::user::User;

#[cfg(feature = "client")]
pub use self::client::Client;
#[cfg(feature = "client")]
pub use self::config::{Config, DispatchMode};
#[cfg(feature = "client")]
pub use self::error::ConfigError;
#[cfg(feature = "client")]
pub use self::line::{LineCodec, MAX_IRC_LINE_LEN};
#[cfg(feature = "client")]
pub use self::transport::{Transport, TransportReadError};
