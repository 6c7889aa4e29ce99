use std::collections::HashMap;

use parking_lot::RwLock;

use crate::user::User;

/// Concurrent nickname → [`User`] mapping for one channel.
///
/// Each method takes the lock for a single map operation and releases it
/// before returning. A key always equals its value's nickname.
#[derive(Debug, Default)]
pub struct Users {
    map: RwLock<HashMap<String, User>>,
}

impl Users {
    /// An empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `user`'s nickname is present.
    pub fn has(&self, user: &User) -> bool {
        self.has_name(&user.nickname)
    }

    /// Whether `name` is present.
    pub fn has_name(&self, name: &str) -> bool {
        self.map.read().contains_key(name)
    }

    /// A copy of the user stored under `name`.
    pub fn get(&self, name: &str) -> Option<User> {
        self.map.read().get(name).cloned()
    }

    /// Insert `user`, replacing any entry with the same nickname.
    pub fn add(&self, user: User) {
        self.map.write().insert(user.nickname.clone(), user);
    }

    /// Remove `user` by nickname. Absent users are ignored.
    pub fn remove(&self, user: &User) {
        self.remove_name(&user.nickname);
    }

    /// Remove the entry for `name`. Absent names are ignored.
    pub fn remove_name(&self, name: &str) {
        self.map.write().remove(name);
    }

    /// Move the entry at `old_name` to `user`'s nickname in one step.
    ///
    /// `user` is stored even when `old_name` was not present.
    pub fn update_nick(&self, old_name: &str, user: User) {
        let mut map = self.map.write();
        map.remove(old_name);
        map.insert(user.nickname.clone(), user);
    }

    /// Snapshot of the nicknames present.
    pub fn names(&self) -> Vec<String> {
        self.map.read().keys().cloned().collect()
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    /// Whether every key matches its value's nickname.
    pub fn is_consistent(&self) -> bool {
        self.map.read().iter().all(|(k, v)| *k == v.nickname)
    }
}
