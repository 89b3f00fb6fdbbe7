//! Domain model for an authenticated session.
use chrono::{DateTime, Utc};
use shared::Role;

/// An authenticated user, created on login and passed explicitly to every
/// service call that needs to know who is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_cashier(&self) -> bool {
        self.role == Role::Cashier
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}
