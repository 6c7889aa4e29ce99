//! Concurrent channel and member directories.
//!
//! [`Channels`] maps channel names to [`Channel`]s, and every channel owns a
//! [`Users`] directory mapping nicknames to [`User`](crate::User)s. Each
//! structure has its own reader-writer lock; no lock is held across a call
//! into another structure or into caller code.

mod channel;
mod channels;
mod users;

pub use self::channel::Channel;
pub use self::channels::Channels;
pub use self::users::Users;
