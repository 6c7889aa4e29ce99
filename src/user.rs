//! User identity parsed from a `nick!user@host` prefix.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// An IRC user as seen in a message prefix or a bare name.
///
/// Two users are equal when their nicknames are byte-identical; username
/// and hostname do not take part in comparison or hashing. No case folding
/// is applied.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    /// The live identity key.
    pub nickname: String,
    /// Ident, empty for bare names.
    pub username: String,
    /// Host, empty for bare names.
    pub hostname: String,
}

impl User {
    /// Parse a `nick!user@host` string or a bare name.
    ///
    /// A string without `!` is taken whole as the nickname (this covers
    /// server names such as `irc.example.net`). Otherwise the nickname is
    /// everything before the first `!`, and the remainder is split on its
    /// first `@` into username and hostname.
    ///
    /// ```
    /// use anolis::User;
    ///
    /// let user = User::parse("foo!bar@irc.localhost");
    /// assert_eq!(user.nickname, "foo");
    /// assert_eq!(user.username, "bar");
    /// assert_eq!(user.hostname, "irc.localhost");
    ///
    /// let server = User::parse("irc.localhost");
    /// assert_eq!(server.nickname, "irc.localhost");
    /// assert!(server.username.is_empty());
    /// ```
    pub fn parse(raw: &str) -> Self {
        let Some((nickname, rest)) = raw.split_once('!') else {
            return Self::from_nick(raw);
        };

        let (username, hostname) = rest.split_once('@').unwrap_or((rest, ""));
        Self {
            nickname: nickname.to_string(),
            username: username.to_string(),
            hostname: hostname.to_string(),
        }
    }

    /// A user known only by nickname.
    pub fn from_nick(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            ..Self::default()
        }
    }

    /// A copy of this user carrying `nickname` instead.
    #[must_use]
    pub fn with_nick(&self, nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            username: self.username.clone(),
            hostname: self.hostname.clone(),
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.nickname == other.nickname
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nickname.hash(state);
    }
}

impl FromStr for User {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nickname)
    }
}
