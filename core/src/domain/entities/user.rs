//! User record returned by the identity directory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user as seen by the access-control core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login email
    pub email: String,
}

impl User {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
