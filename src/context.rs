//! Capabilities handed to event handlers.
//!
//! Handlers never see the session directly. They get a [`Context`], which
//! exposes the channel directory, the local nickname, outgoing commands,
//! and the ability to end the session.

use crate::directory::Channels;
use crate::session::CloseReason;

/// Outgoing IRC commands.
///
/// Implementors provide [`raw`](Self::raw); every other method formats a
/// verb and forwards it there. Lines are passed without CRLF, framing is
/// the transport's job.
pub trait Commands: Send + Sync {
    /// Queue one line for sending.
    fn raw(&self, line: String);

    /// `JOIN <channel>`
    fn join(&self, channel: &str) {
        self.raw(format!("JOIN {}", channel));
    }

    /// `PART <channel>`
    fn part(&self, channel: &str) {
        self.raw(format!("PART {}", channel));
    }

    /// `KICK <channel> <nick> :<reason>`
    fn kick(&self, channel: &str, nick: &str, reason: &str) {
        self.raw(format!("KICK {} {} :{}", channel, nick, reason));
    }

    /// `NICK <nick>`
    fn nick(&self, nick: &str) {
        self.raw(format!("NICK {}", nick));
    }

    /// `QUIT :<reason>`
    fn quit(&self, reason: &str) {
        self.raw(format!("QUIT :{}", reason));
    }

    /// `PRIVMSG <target> :<text>`
    fn privmsg(&self, target: &str, text: &str) {
        self.raw(format!("PRIVMSG {} :{}", target, text));
    }

    /// `NOTICE <target> :<text>`
    fn notice(&self, target: &str, text: &str) {
        self.raw(format!("NOTICE {} :{}", target, text));
    }

    /// `PONG <payload>`, echoing a PING payload verbatim.
    fn pong(&self, payload: &str) {
        self.raw(format!("PONG {}", payload));
    }
}

/// What a handler may read and change.
pub trait Context: Send + Sync {
    /// The session's channel directory.
    fn channels(&self) -> &Channels;

    /// The nickname the session currently goes by.
    fn current_nickname(&self) -> String;

    /// Record that the local user now goes by `nickname`.
    fn update_local_nickname(&self, nickname: &str);

    /// Outgoing command sink.
    fn commands(&self) -> &dyn Commands;

    /// End the session. Only the first call has an effect.
    fn close(&self, reason: CloseReason) -> bool;
}
