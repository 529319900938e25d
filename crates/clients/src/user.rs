use serde::{Deserialize, Serialize};

use brandhub_core::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Member,
}

/// An agency team member. Users are agency-wide and have no brand view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub role: Role,
}

impl EntityKind for User {
    const COLLECTION: &'static str = "db_users";
}

impl User {
    /// A new member with the avatar derived from the email address.
    pub fn invite(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        let email = email.into();
        Self {
            name: name.into(),
            avatar_url: Some(format!("https://i.pravatar.cc/150?u={email}")),
            email,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
