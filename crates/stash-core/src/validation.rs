//! Input checks shared by the auth, profile, and bookmark services.
//!
//! Every function returns the cleaned value on success so callers never
//! persist untrimmed input.

use url::Url;

use crate::error::AppError;

/// RFC 5321 caps a forward path at 254 octets.
const MAX_EMAIL_LEN: usize = 254;
const MAX_TITLE_LEN: usize = 512;
const MAX_NAME_LEN: usize = 255;
const MAX_LINK_LEN: usize = 2048;

/// Trim and lower-case an email address, rejecting empty or malformed input.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(AppError::Validation("email should not be empty".into()));
    }
    if email.len() > MAX_EMAIL_LEN || !is_well_formed_email(email) {
        return Err(AppError::Validation("email must be an email".into()));
    }
    Ok(email.to_lowercase())
}

fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}

/// Reject empty passwords and passwords shorter than `min_len` characters.
pub fn check_password(password: &str, min_len: usize) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::Validation("password should not be empty".into()));
    }
    if password.chars().count() < min_len {
        return Err(AppError::Validation(format!(
            "password must be at least {min_len} characters"
        )));
    }
    Ok(())
}

/// Trim free text, rejecting NUL (PostgreSQL text columns cannot store it).
pub fn normalize_text(field: &str, raw: &str) -> Result<String, AppError> {
    if raw.contains('\0') {
        return Err(AppError::Validation(format!(
            "{field} must not contain NUL characters"
        )));
    }
    Ok(raw.trim().to_string())
}

/// Trim a required text field and reject it if nothing is left.
pub fn require_text(field: &str, raw: &str) -> Result<String, AppError> {
    let value = normalize_text(field, raw)?;
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} should not be empty")));
    }
    Ok(value)
}

/// Trim a profile name, capped at the column width.
pub fn normalize_name(field: &str, raw: &str) -> Result<String, AppError> {
    let name = normalize_text(field, raw)?;
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

pub fn normalize_title(raw: &str) -> Result<String, AppError> {
    let title = require_text("title", raw)?;
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title)
}

/// Accept only absolute `http`/`https` URLs with a host.
///
/// The trimmed input is returned as written; the parsed form is only used
/// for checking, so `https://example.com` is not rewritten with a trailing
/// slash.
pub fn normalize_link(raw: &str) -> Result<String, AppError> {
    let link = require_text("link", raw)?;
    if link.len() > MAX_LINK_LEN {
        return Err(AppError::Validation(format!(
            "link must be at most {MAX_LINK_LEN} characters"
        )));
    }
    let parsed = Url::parse(&link)
        .map_err(|_| AppError::Validation("link must be a URL address".into()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AppError::Validation("link must be a URL address".into()));
    }
    Ok(link)
}

/// Trim optional free text; blank input collapses to `None`.
pub fn normalize_optional_text(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<String>, AppError> {
    Ok(raw
        .map(|text| normalize_text(field, text))
        .transpose()?
        .filter(|text| !text.is_empty()))
}
