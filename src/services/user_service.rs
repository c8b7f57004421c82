//! User service for account business logic.
//!
//! Registration hashes the password and enforces email/username uniqueness
//! before touching the unique indexes; authentication never reveals whether
//! the email or the password was wrong.

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserRepository;
use crate::utils::password::{hash_password, verify_password};

/// User service for handling user-related business logic.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Creates a new UserService with the given repository.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Registers a new account.
    ///
    /// # Arguments
    /// * `username` - Unique display name
    /// * `email` - Unique email address
    /// * `password` - Plain text password, hashed with Argon2id before insert
    ///
    /// # Returns
    /// The created user with generated id and timestamps
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User> {
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Duplicate {
                entity: "user".to_string(),
                field: "email".to_string(),
                value: email,
            });
        }
        if self.repo.find_by_username(&username).await?.is_some() {
            return Err(AppError::Duplicate {
                entity: "user".to_string(),
                field: "username".to_string(),
                value: username,
            });
        }

        let hashed = hash_password(&password)?;
        self.repo
            .create(NewUser {
                username,
                email,
                password: hashed,
            })
            .await
    }

    /// Verifies email/password credentials.
    ///
    /// Unknown email and wrong password produce the same `Unauthorized`
    /// message.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(password, &user.password)? {
            return Err(invalid_credentials());
        }

        Ok(user)
    }

    /// Gets a user by their ID, or `NotFound`.
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "user".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized {
        message: "Invalid email or password".to_string(),
    }
}
