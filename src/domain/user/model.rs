use chrono::{DateTime, Utc};

use super::NewUserData;

/// Persisted user record.
///
/// `passphrase` always holds the one-way hash, never the plaintext.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub passphrase: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build an unsaved record (id 0) from creation data and an already
    /// hashed passphrase. The repository assigns the real id on add.
    pub fn unsaved(data: NewUserData, passphrase_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username: data.username,
            passphrase: passphrase_hash,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            role: data.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when every stored field except id and timestamps matches.
    pub fn same_content(&self, other: &User) -> bool {
        self.username == other.username
            && self.passphrase == other.passphrase
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.email == other.email
            && self.role == other.role
            && self.is_active == other.is_active
    }
}

/// Role a user may be assigned to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Roles every repository starts with, as `(name, description)`.
pub const DEFAULT_ROLES: [(&str, &str); 3] = [
    ("admin", "Full access to user management"),
    ("operator", "Day-to-day operations"),
    ("viewer", "Read-only access"),
];
