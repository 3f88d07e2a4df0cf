use super::AppError;

/// Lower-cases and trims an email. Users, consultants and companies are
/// linked only through this normalised form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Loose shape check: one `@`, something on both sides, a dot in the domain.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

/// Returns the trimmed value of a required text field or a 400.
pub fn required(value: Option<&str>, field: &str) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::bad_request(format!("{} is required", field))),
    }
}

/// Trims an optional text field, dropping it when blank.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Required email field, normalised and shape-checked.
pub fn required_email(value: Option<&str>) -> Result<String, AppError> {
    let email = normalize_email(&required(value, "email")?);
    if !is_valid_email(&email) {
        return Err(AppError::bad_request("email is not a valid address"));
    }
    Ok(email)
}

pub fn non_negative(value: Option<f64>, field: &str) -> Result<Option<f64>, AppError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(AppError::bad_request(format!("{} must be a non-negative number", field)))
        }
        other => Ok(other),
    }
}

/// Optional http(s) link.
pub fn optional_url(value: Option<String>, field: &str) -> Result<Option<String>, AppError> {
    match optional(value) {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => Err(
            AppError::bad_request(format!("{} must start with http:// or https://", field)),
        ),
        other => Ok(other),
    }
}

/// Trims skill tags and drops blanks and case-insensitive duplicates.
pub fn clean_skills(skills: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let skill = skill.trim();
        if skill.is_empty() {
            continue;
        }
        if !cleaned.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            cleaned.push(skill.to_string());
        }
    }
    cleaned
}
