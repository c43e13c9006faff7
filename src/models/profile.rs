use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile not found")]
    NotFound,

    #[error("Profile unavailable: {0}")]
    Unavailable(String),
}

/// What a profile screen shows. Renderers must handle every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileState {
    Loading,
    Presenting(User),
    Failed(ProfileError),
}

impl ProfileState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ProfileState::Loading)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            ProfileState::Presenting(user) => Some(user),
            _ => None,
        }
    }
}

impl From<Result<User, ProfileError>> for ProfileState {
    fn from(result: Result<User, ProfileError>) -> Self {
        match result {
            Ok(user) => ProfileState::Presenting(user),
            Err(e) => ProfileState::Failed(e),
        }
    }
}
