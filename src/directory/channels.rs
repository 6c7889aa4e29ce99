use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::user::User;

use super::channel::Channel;

/// Concurrent channel name → [`Channel`] mapping for one session.
///
/// Channels are handed out as `Arc`s so callers can work on a channel's
/// members without holding this directory's lock.
#[derive(Debug, Default)]
pub struct Channels {
    map: RwLock<HashMap<String, Arc<Channel>>>,
}

impl Channels {
    /// An empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh channel named `name`, replacing any existing entry.
    ///
    /// Returns the new channel. This never preserves an existing member
    /// list; use [`get`](Self::get) to look one up.
    pub fn add(&self, name: &str) -> Arc<Channel> {
        debug!(channel = %name, "adding channel");
        let channel = Arc::new(Channel::new(name));
        self.map.write().insert(name.to_string(), Arc::clone(&channel));
        channel
    }

    /// Drop the channel named `name`. Absent names are ignored.
    pub fn remove(&self, name: &str) {
        if self.map.write().remove(name).is_some() {
            debug!(channel = %name, "removed channel");
        }
    }

    /// Whether a channel named `name` exists.
    pub fn has(&self, name: &str) -> bool {
        self.map.read().contains_key(name)
    }

    /// The channel named `name`.
    pub fn get(&self, name: &str) -> Option<Arc<Channel>> {
        self.map.read().get(name).cloned()
    }

    /// Snapshot of all channel names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.map.read().keys().cloned().collect()
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Whether no channels are tracked.
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    /// Drop every channel.
    pub fn clear(&self) {
        let mut map = self.map.write();
        debug!(count = map.len(), "clearing channels");
        map.clear();
    }

    /// Call `f` for every channel whose members currently include `user`.
    ///
    /// Names are snapshotted first and each channel is looked up again,
    /// so channels added or removed while this runs may or may not be
    /// visited. No lock is held while `f` runs.
    pub fn for_each_containing<F>(&self, user: &User, mut f: F)
    where
        F: FnMut(&Channel),
    {
        for name in self.names() {
            if let Some(channel) = self.get(&name) {
                if channel.users().has(user) {
                    f(&*channel);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let channels = Channels::new();
        channels.add("#foo");
        assert!(channels.has("#foo"));

        channels.remove("#foo");
        assert!(!channels.has("#foo"));

        channels.remove("#never");
        assert!(channels.is_empty());
    }

    #[test]
    fn test_names() {
        let channels = Channels::new();
        channels.add("#foo");
        channels.add("#bar");

        let names = channels.names();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"#foo".to_string()));
        assert!(names.contains(&"#bar".to_string()));
    }

    #[test]
    fn test_add_replaces_membership() {
        let channels = Channels::new();
        channels.add("#foo").users().add(User::from_nick("a"));
        channels.add("#foo");
        assert!(channels.get("#foo").unwrap().users().is_empty());
    }

    #[test]
    fn test_for_each_containing() {
        let channels = Channels::new();
        let user = User::parse("foo!bar@irc.localhost");
        channels.add("#a").users().add(user.clone());
        channels.add("#b").users().add(user.clone());
        channels.add("#c").users().add(User::from_nick("other"));

        let mut seen = Vec::new();
        channels.for_each_containing(&user, |ch| seen.push(ch.name().to_string()));
        seen.sort();
        assert_eq!(seen, vec!["#a", "#b"]);
    }

    #[test]
    fn test_clear() {
        let channels = Channels::new();
        channels.add("#a");
        channels.add("#b");
        channels.clear();
        assert!(channels.is_empty());
    }
}
