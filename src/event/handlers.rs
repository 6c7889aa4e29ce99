//! Built-in protocol handlers.
//!
//! These keep the channel directory in step with what the server narrates:
//! joins, parts, kicks, quits, nick changes and topic changes. They also
//! answer PING and end the session on ERROR.
//!
//! Every handler returns early when the message lacks what it needs; a
//! line that does not fit is never an error.

use tracing::{debug, warn};

use crate::context::Context;
use crate::message::{Message, Rename};
use crate::session::CloseReason;

use super::Events;

/// Register the built-in handlers on `events`.
pub fn register_defaults(events: &Events) {
    events.register("PING", ping);
    events.register("JOIN", join);
    events.register("PART", part);
    events.register("KICK", kick);
    events.register("QUIT", quit);
    events.register("NICK", nick);
    events.register("TOPIC", topic);
    events.register("PRIVMSG", privmsg);
    events.register("ERROR", error);
}

/// Whether `target` names a channel rather than a user.
pub fn is_channel(target: &str) -> bool {
    target.starts_with('#')
}

/// Answers with `PONG <payload>`.
pub fn ping(msg: &mut Message, ctx: &dyn Context) {
    let payload = match &msg.trailing {
        Some(payload) => payload.as_str(),
        None => msg.arg(0).unwrap_or_default(),
    };
    ctx.commands().pong(payload);
}

/// Tracks channel creation and arrivals.
///
/// The argument form (`JOIN #chan`) is how the server confirms our own
/// join and creates the channel fresh. A peer arriving in that form, in a
/// channel we already track, is only added. The payload form
/// (`JOIN :#chan`) adds the source to an existing channel.
pub fn join(msg: &mut Message, ctx: &dyn Context) {
    let Some(source) = msg.source.clone() else {
        return;
    };
    let channels = ctx.channels();

    if let Some(name) = msg.arg(0) {
        match channels.get(name) {
            Some(channel) if source.nickname != ctx.current_nickname() => {
                channel.users().add(source);
            }
            _ => {
                channels.add(name).users().add(source);
            }
        }
    } else if let Some(channel) = msg.trailing.as_deref().and_then(|name| channels.get(name)) {
        channel.users().add(source);
    }
}

/// Drops the channel when we leave it, otherwise drops the leaving user.
pub fn part(msg: &mut Message, ctx: &dyn Context) {
    let (Some(source), Some(name)) = (&msg.source, msg.arg(0)) else {
        return;
    };

    if source.nickname == ctx.current_nickname() {
        ctx.channels().remove(name);
    } else if let Some(channel) = ctx.channels().get(name) {
        channel.users().remove(source);
    }
}

/// Drops the channel when we are kicked, otherwise drops the kickee.
pub fn kick(msg: &mut Message, ctx: &dyn Context) {
    if msg.args.len() < 2 {
        return;
    }
    let (Some(name), Some(kickee)) = (msg.arg(0), msg.last_arg()) else {
        return;
    };

    if kickee == ctx.current_nickname() {
        debug!(channel = %name, by = ?msg.source_nick(), "kicked from channel");
        ctx.channels().remove(name);
    } else if let Some(channel) = ctx.channels().get(name) {
        channel.users().remove_name(kickee);
    }
}

/// Removes the quitting user from every channel it was seen in.
pub fn quit(msg: &mut Message, ctx: &dyn Context) {
    let Some(source) = &msg.source else {
        return;
    };
    ctx.channels()
        .for_each_containing(source, |channel| channel.users().remove(source));
}

/// Renames the source on the message and in every channel.
///
/// The rename happens on the message first so later handlers read the new
/// nickname; membership is then moved from the old key using the snapshot
/// taken before the rename.
pub fn nick(msg: &mut Message, ctx: &dyn Context) {
    let Some(new_nick) = msg.arg(0).or(msg.trailing.as_deref()).map(str::to_string) else {
        return;
    };
    let Some(Rename { old, new }) = msg.rename_source(&new_nick) else {
        return;
    };

    if old.nickname == ctx.current_nickname() {
        ctx.update_local_nickname(&new.nickname);
    }

    ctx.channels().for_each_containing(&old, |channel| {
        channel.users().update_nick(&old.nickname, new.clone());
    });
}

/// Records a topic change on a tracked channel.
pub fn topic(msg: &mut Message, ctx: &dyn Context) {
    let Some(channel) = msg.arg(0).and_then(|name| ctx.channels().get(name)) else {
        return;
    };
    channel.set_topic(msg.payload());
}

/// Treats a channel message as proof the sender is in that channel.
///
/// Recovers members whose JOIN we never saw. Only existing channels are
/// touched.
pub fn privmsg(msg: &mut Message, ctx: &dyn Context) {
    let (Some(source), Some(target)) = (&msg.source, msg.arg(0)) else {
        return;
    };
    if !is_channel(target) {
        return;
    }
    if let Some(channel) = ctx.channels().get(target) {
        channel.users().add(source.clone());
    }
}

/// A server `ERROR` ends the session.
pub fn error(msg: &mut Message, ctx: &dyn Context) {
    warn!(reason = %msg.payload(), "server sent ERROR");
    ctx.close(CloseReason::ServerError(msg.payload().to_string()));
}
