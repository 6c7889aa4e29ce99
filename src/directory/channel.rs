use parking_lot::RwLock;

use super::users::Users;

/// A joined channel: its name, topic, and member directory.
#[derive(Debug)]
pub struct Channel {
    name: String,
    topic: RwLock<String>,
    users: Users,
}

impl Channel {
    /// A channel named `name` with no topic and no members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            topic: RwLock::new(String::new()),
            users: Users::new(),
        }
    }

    /// The channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The member directory.
    pub fn users(&self) -> &Users {
        &self.users
    }

    /// The current topic, empty if none was observed.
    pub fn topic(&self) -> String {
        self.topic.read().clone()
    }

    /// Replace the topic.
    pub fn set_topic(&self, topic: impl Into<String>) {
        *self.topic.write() = topic.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::User;

    #[test]
    fn test_members() {
        let user = User::parse("foo!bar@irc.localhost");
        let ch = Channel::new("#test");
        assert_eq!(ch.name(), "#test");

        ch.users().add(user.clone());
        assert!(ch.users().has_name("foo"));

        ch.users().remove(&user);
        assert!(!ch.users().has(&user));
    }

    #[test]
    fn test_topic() {
        let ch = Channel::new("#test");
        assert_eq!(ch.topic(), "");
        ch.set_topic("welcome :) all");
        assert_eq!(ch.topic(), "welcome :) all");
    }
}
