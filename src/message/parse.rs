use std::str::FromStr;

use crate::error::{MessageParseError, ProtocolError};
use crate::user::User;

use super::nom_parser::parse_line;
use super::types::Message;

/// Most middle arguments a line may carry; further tokens belong to the
/// trailing payload (RFC 2812 section 2.3.1).
pub const MAX_MIDDLE_ARGS: usize = 14;

impl Message {
    /// Parse a raw line into a [`Message`].
    ///
    /// Trailing CR/LF is ignored. The command is uppercased, the prefix is
    /// parsed as a [`User`], and only the first `" :"` separates the
    /// arguments from the trailing payload.
    ///
    /// ```
    /// use anolis::Message;
    ///
    /// let msg = Message::parse(":a!b@c PRIVMSG #x :hello :) more :colons").unwrap();
    /// assert_eq!(msg.command, "PRIVMSG");
    /// assert_eq!(msg.args, vec!["#x"]);
    /// assert_eq!(msg.payload(), "hello :) more :colons");
    /// ```
    pub fn parse(raw: &str) -> Result<Message, MessageParseError> {
        let trimmed = raw.trim_end_matches(['\r', '\n']);
        let line = parse_line(trimmed)?;

        let mut args: Vec<String> = line.args.iter().map(|a| a.to_string()).collect();
        let mut trailing = line.trailing.map(str::to_string);

        if args.len() > MAX_MIDDLE_ARGS {
            let mut overflow = args.split_off(MAX_MIDDLE_ARGS).join(" ");
            if let Some(text) = trailing {
                overflow.push(' ');
                overflow.push_str(&text);
            }
            trailing = Some(overflow);
        }

        Ok(Message {
            source: line.prefix.map(User::parse),
            command: line.command.to_ascii_uppercase(),
            args,
            trailing,
            raw: trimmed.to_string(),
        })
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Message::parse(s).map_err(|cause| ProtocolError::InvalidMessage {
            string: s.to_string(),
            cause,
        })
    }
}
