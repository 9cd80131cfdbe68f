pub mod error;
pub mod model;
pub mod service;

pub use error::UserServiceError;
pub use model::User;
pub use service::{UserService, UserServiceApi};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/users
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: String,
}

/// Request for PATCH /api/users/:userId
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub display_name: String,
}

/// Response for user endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
