//! Hand-off value from the authentication collaborator.
//!
//! Credential validation happens outside this crate; by the time onboarding
//! starts, the host supplies an already-authenticated [`User`]. The wizard
//! uses it only to personalize the greeting in the first bot prompt.

use serde::{Deserialize, Serialize};

/// An authenticated user, as delivered by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
