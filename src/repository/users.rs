//! User directory: append-only, looked up by username

use crate::models::user::User;

#[derive(Debug, Default, Clone)]
pub struct UsersRepository {
    users: Vec<User>,
}

impl UsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user. Uniqueness is the caller's responsibility.
    pub fn add(&mut self, user: User) {
        self.users.push(user);
    }

    /// Get user by username (first match)
    pub fn get_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username() == username)
    }

    pub fn exists(&self, username: &str) -> bool {
        self.get_by_username(username).is_some()
    }

    /// Users in registration order
    pub fn list(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
