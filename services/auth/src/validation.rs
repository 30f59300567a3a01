//! Input validation utilities
//!
//! Field validators return the message for the first rule a value breaks;
//! the payload-level helpers collect every failing field so responses can
//! report them all at once.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{NewUser, UpdateProfile};

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 50;
const MIN_AGE: i32 = 18;
const MAX_AGE: i32 = 120;
const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate a name field
pub fn validate_name(value: &str, field: &str) -> Result<(), String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(format!("{field} is required"));
    }

    if trimmed.len() < MIN_NAME_LENGTH {
        return Err(format!(
            "{field} must be at least {MIN_NAME_LENGTH} characters"
        ));
    }

    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(format!("{field} must not exceed {MAX_NAME_LENGTH} characters"));
    }

    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z\s]+$").expect("Failed to compile name regex"));

    if !regex.is_match(trimmed) {
        return Err(format!("{field} can only contain letters"));
    }

    Ok(())
}

/// Validate an age value
pub fn validate_age(age: i32) -> Result<(), String> {
    if age < MIN_AGE {
        return Err(format!("You must be at least {MIN_AGE} years old"));
    }

    if age > MAX_AGE {
        return Err(format!("Age must not exceed {MAX_AGE} years"));
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
        ));
    }

    Ok(())
}

/// Collect every validation failure of a registration payload
pub fn validate_registration(payload: &NewUser) -> Vec<String> {
    [
        validate_name(&payload.first_name, "First name").err(),
        validate_name(&payload.last_name, "Last name").err(),
        validate_age(payload.age).err(),
        validate_email(&payload.email).err(),
        validate_password(&payload.password).err(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Collect every validation failure of a profile update
pub fn validate_profile_update(payload: &UpdateProfile) -> Vec<String> {
    [
        validate_name(&payload.first_name, "First name").err(),
        validate_name(&payload.last_name, "Last name").err(),
        validate_age(payload.age).err(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
