use super::error::UserServiceError;
use super::{CreateUserRequest, UpdateUserRequest, User, UserResponse};
use crate::infrastructure::repositories::UserRepository;
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

const MAX_DISPLAY_NAME_LENGTH: usize = 100;
const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
pub trait UserServiceApi: Send + Sync {
    async fn register(&self, request: CreateUserRequest)
        -> Result<UserResponse, UserServiceError>;

    async fn get_user(&self, user_id: Uuid) -> Result<UserResponse, UserServiceError>;

    async fn list_users(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<UserResponse>, UserServiceError>;

    async fn rename(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, UserServiceError>;

    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserServiceError>;
}

#[async_trait]
impl UserServiceApi for UserService {
    async fn register(
        &self,
        request: CreateUserRequest,
    ) -> Result<UserResponse, UserServiceError> {
        let email = normalize_email(&request.email);
        validate_email(&email)?;
        let display_name = validate_display_name(&request.display_name)?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(UserServiceError::Conflict);
        }

        let user = self.user_repo.create(&email, display_name).await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(UserResponse::from(user))
    }

    async fn get_user(&self, user_id: Uuid) -> Result<UserResponse, UserServiceError> {
        let user = self.find_user(user_id).await?;
        Ok(UserResponse::from(user))
    }

    async fn list_users(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<UserResponse>, UserServiceError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = offset.unwrap_or(0).max(0);

        let users = self.user_repo.list(limit, offset).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn rename(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, UserServiceError> {
        let display_name = validate_display_name(&request.display_name)?;

        let user = self
            .user_repo
            .update_display_name(user_id, display_name)
            .await?
            .ok_or(UserServiceError::NotFound)?;

        Ok(UserResponse::from(user))
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserServiceError> {
        if !self.user_repo.delete(user_id).await? {
            return Err(UserServiceError::NotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}

impl UserService {
    async fn find_user(&self, user_id: Uuid) -> Result<User, UserServiceError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(UserServiceError::NotFound)
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> Result<(), UserServiceError> {
    if !email_pattern().is_match(email) {
        return Err(UserServiceError::Invalid("Invalid email format".to_string()));
    }
    Ok(())
}

fn validate_display_name(display_name: &str) -> Result<&str, UserServiceError> {
    let trimmed = display_name.trim();
    if trimmed.is_empty() {
        return Err(UserServiceError::Invalid(
            "Display name cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(UserServiceError::Invalid(format!(
            "Display name must be {} characters or less",
            MAX_DISPLAY_NAME_LENGTH
        )));
    }
    Ok(trimmed)
}
