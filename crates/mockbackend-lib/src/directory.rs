//! Static, read-only user directory.
//!
//! The directory is an ordered list of [`User`] records fixed at process
//! start. There is no API to add, modify, or remove users once a directory has
//! been built.

use serde::{Deserialize, Serialize};

/// Identifier of a user record.
pub type UserId = u32;

/// Records seeded into every deployment, in directory order.
const SEED_USERS: [(UserId, &str); 2] = [(1, "Alice"), (2, "Bob")];

/// A single user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Immutable ordered collection of users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Build the directory every deployment ships with: Alice (1) and Bob (2).
    pub fn seeded() -> Self {
        Self {
            users: SEED_USERS
                .iter()
                .map(|&(id, name)| User::new(id, name))
                .collect(),
        }
    }

    /// All users in directory order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_directory_contents() {
        let directory = UserDirectory::seeded();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.users()[0], User::new(1, "Alice"));
        assert_eq!(directory.users()[1], User::new(2, "Bob"));
    }

    #[test]
    fn test_seeded_directory_is_stable() {
        assert_eq!(UserDirectory::seeded(), UserDirectory::seeded());
        assert!(!UserDirectory::default().is_empty());
    }

    #[test]
    fn test_user_serialization_shape() {
        let json = serde_json::to_string(&User::new(1, "Alice")).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"Alice"}"#);
    }
}
