//! Connection configuration loaded from TOML.
//!
//! ```toml
//! hostname = "irc.libera.chat"
//! port = 6667
//! nickname = "anolis"
//! channels = ["#anolis"]
//! dispatch = "serial"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// How the client hands parsed lines to the handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Each line is dispatched on its own task; a slow handler does not
    /// hold up reading. Lines may be handled out of order.
    #[default]
    Concurrent,
    /// Lines are dispatched one at a time on the reading task, in order.
    Serial,
}

/// Everything needed to open and register a session.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Server host name.
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Server password, sent as `PASS` when set.
    #[serde(default)]
    pub password: Option<String>,
    /// Nickname to register with.
    #[serde(default = "default_nickname")]
    pub nickname: String,
    /// Ident; the nickname when absent.
    #[serde(default)]
    pub username: Option<String>,
    /// Real name; the nickname when absent.
    #[serde(default)]
    pub realname: Option<String>,
    /// Nickname to fall back to when ours is taken; the nickname with a
    /// trailing `_` when absent.
    #[serde(default)]
    pub alternative: Option<String>,
    /// Channels to join once the server welcomes us.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Dispatch ordering.
    #[serde(default)]
    pub dispatch: DispatchMode,
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    6667
}

fn default_nickname() -> String {
    "anolis".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            port: default_port(),
            password: None,
            nickname: default_nickname(),
            username: None,
            realname: None,
            alternative: None,
            channels: Vec::new(),
            dispatch: DispatchMode::default(),
        }
    }
}

impl Config {
    /// Load a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// `host:port` for connecting.
    pub fn address(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }

    /// The ident to register with.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.nickname)
    }

    /// The real name to register with.
    pub fn realname(&self) -> &str {
        self.realname.as_deref().unwrap_or(&self.nickname)
    }

    /// The nickname to try when the server rejects ours as in use.
    pub fn alternative(&self) -> String {
        match &self.alternative {
            Some(alternative) => alternative.clone(),
            None => format!("{}_", self.nickname),
        }
    }
}
