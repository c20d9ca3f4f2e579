use crate::core::errors::{EncryptzError, Result};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that satisfy the symbol requirement.
pub const PASSWORD_SYMBOLS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

/// Check a password against the encryption policy.
///
/// At least 8 characters with one uppercase letter, one lowercase letter,
/// one digit and one symbol from `!@#$%^&*(),.?":{}|<>`. Only applied
/// before encryption; decryption accepts whatever password was used.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(EncryptzError::WeakPassword {
            reason: format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long"),
        });
    }

    let has = |pred: fn(char) -> bool| password.chars().any(pred);
    let complete = has(|c| c.is_ascii_uppercase())
        && has(|c| c.is_ascii_lowercase())
        && has(|c| c.is_ascii_digit())
        && has(|c| PASSWORD_SYMBOLS.contains(c));

    if !complete {
        return Err(EncryptzError::WeakPassword {
            reason: "Password must contain at least one uppercase letter, one lowercase letter, \
                     one digit, and one special character"
                .into(),
        });
    }

    Ok(())
}
