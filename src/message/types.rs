use std::fmt;

use crate::user::User;

/// A parsed inbound IRC line.
///
/// Messages are built once per line and treated as read-only, with a
/// single exception: a NICK announcement renames [`source`](Self::source)
/// through [`Message::rename_source`] so that handlers running after the
/// built-in NICK handler observe the new nickname.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Origin of the line, present when it started with a `:prefix`.
    pub source: Option<User>,
    /// Uppercased command name or numeric.
    pub command: String,
    /// Middle arguments in wire order. Empty, never absent, when there are none.
    pub args: Vec<String>,
    /// Payload after the first `" :"`, verbatim.
    pub trailing: Option<String>,
    /// The original line, kept for diagnostics.
    pub raw: String,
}

/// Result of [`Message::rename_source`]: both identities of a NICK change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rename {
    /// Snapshot taken before the change.
    pub old: User,
    /// The source as it reads after the change.
    pub new: User,
}

impl Message {
    /// Argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Last middle argument, if any.
    pub fn last_arg(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    /// The trailing payload, or `""` when the line had none.
    pub fn payload(&self) -> &str {
        self.trailing.as_deref().unwrap_or("")
    }

    /// Nickname of the source, if the line had a prefix.
    pub fn source_nick(&self) -> Option<&str> {
        self.source.as_ref().map(|u| u.nickname.as_str())
    }

    /// Rewrite the source's nickname in place.
    ///
    /// Returns the pre-change snapshot together with the renamed source,
    /// or `None` when the message has no source.
    pub fn rename_source(&mut self, nickname: &str) -> Option<Rename> {
        let source = self.source.as_mut()?;
        let new = source.with_nick(nickname);
        let old = std::mem::replace(source, new.clone());
        Some(Rename { old, new })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.command)?;
        if let Some(source) = &self.source {
            write!(f, " {}", source)?;
        }
        if !self.args.is_empty() {
            write!(f, " ({})", self.args.join(", "))?;
        }
        if let Some(trailing) = &self.trailing {
            write!(f, " {}", trailing)?;
        }
        Ok(())
    }
}
