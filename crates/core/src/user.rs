//! Seller and attendant validation.

use crate::error::CoreError;

/// Roles a store user may hold.
pub const USER_ROLES: &[&str] = &["owner", "seller", "attendant"];

/// Maximum length of a user's display name.
pub const MAX_USER_NAME_LENGTH: usize = 120;

pub fn validate_user_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_USER_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name must not exceed {MAX_USER_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_user_role(role: &str) -> Result<(), CoreError> {
    if USER_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown role '{role}'; expected one of {}",
            USER_ROLES.join(", ")
        )))
    }
}
