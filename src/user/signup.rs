use tracing::info;
use validator::Validate;

use super::models::{CreateUserDto, NewUser, User};
use super::password::hash_password;
use crate::errors::AppError;
use crate::storage::Storage;

/// Validate the signup payload, hash the password and persist the user.
///
/// A taken username surfaces as a constraint violation from storage.
pub async fn register(storage: &dyn Storage, dto: CreateUserDto) -> Result<User, AppError> {
    dto.validate()?;

    let username = dto.username.trim().to_string();
    let password_hash = hash_password(&dto.password)?;

    let user = storage
        .create_user(NewUser {
            username,
            password_hash,
        })
        .await?;

    info!(user_id = user.id, "Registered user");
    Ok(user)
}
