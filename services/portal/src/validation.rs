//! Input validation utilities
//!
//! These rules are authoritative: any client-side pre-checks are advisory
//! only and every rule here is enforced again on the server.

use regex::Regex;
use std::sync::OnceLock;

/// Normalize an email address before storage or comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    let length = username.chars().count();
    if !(3..=20).contains(&length) {
        return Err("Username must be 3-20 characters".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username must be alphanumeric".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Please provide a valid email".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number".to_string());
    }

    Ok(())
}

/// Validate that the password confirmation matches
pub fn validate_confirmation(password: &str, confirm_password: &str) -> Result<(), String> {
    if password != confirm_password {
        return Err("Passwords do not match".to_string());
    }

    Ok(())
}

/// Run the full signup rule chain, first violation wins
pub fn validate_signup(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), String> {
    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)?;
    validate_confirmation(password, confirm_password)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username_accepts_alphanumeric() {
        assert!(validate_username("ben10").is_ok());
        assert!(validate_username("Upgrade").is_ok());
    }

    #[test]
    fn test_validate_username_rejects_bad_length() {
        assert_eq!(
            validate_username("ab"),
            Err("Username must be 3-20 characters".to_string())
        );
        assert_eq!(
            validate_username("a".repeat(21).as_str()),
            Err("Username must be 3-20 characters".to_string())
        );
    }

    #[test]
    fn test_validate_username_rejects_non_alphanumeric() {
        assert_eq!(
            validate_username("ben_10"),
            Err("Username must be alphanumeric".to_string())
        );
        assert_eq!(
            validate_username("ben 10"),
            Err("Username must be alphanumeric".to_string())
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ben@omnitrix.io").is_ok());
        assert_eq!(
            validate_email("not-an-email"),
            Err("Please provide a valid email".to_string())
        );
        assert_eq!(
            validate_email("missing@tld"),
            Err("Please provide a valid email".to_string())
        );
    }

    #[test]
    fn test_validate_password_rules() {
        assert!(validate_password("Upgrade1").is_ok());
        assert_eq!(
            validate_password("Short1"),
            Err("Password must be at least 8 characters".to_string())
        );
        assert_eq!(
            validate_password("upgrade1"),
            Err("Password must contain at least one uppercase letter".to_string())
        );
        assert_eq!(
            validate_password("UpgradeX"),
            Err("Password must contain at least one number".to_string())
        );
    }

    #[test]
    fn test_validate_confirmation() {
        assert!(validate_confirmation("Upgrade1", "Upgrade1").is_ok());
        assert_eq!(
            validate_confirmation("Upgrade1", "Upgrade2"),
            Err("Passwords do not match".to_string())
        );
    }

    #[test]
    fn test_validate_signup_reports_first_violation() {
        assert_eq!(
            validate_signup("x", "ben@omnitrix.io", "Upgrade1", "Upgrade1"),
            Err("Username must be 3-20 characters".to_string())
        );
        assert!(validate_signup("ben10", "ben@omnitrix.io", "Upgrade1", "Upgrade1").is_ok());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ben@Omnitrix.IO "), "ben@omnitrix.io");
    }
}
