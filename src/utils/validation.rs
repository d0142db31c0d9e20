/// Checks a field's character count against an inclusive range.
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        return Err(format!("{} must be at least {} characters", field, min));
    }
    if len > max {
        return Err(format!("{} cannot exceed {} characters", field, max));
    }
    Ok(())
}

/// Shape check only: one `@`, a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    let invalid = || Err("email must be a valid email address".to_string());

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return invalid();
    }

    let Some((local, domain)) = email.split_once('@') else {
        return invalid();
    };

    if local.is_empty() || domain.contains('@') {
        return invalid();
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return invalid();
    }

    Ok(())
}

/// Names shown to users must contain something printable.
pub fn validate_name(field: &str, value: &str, max: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field));
    }
    if trimmed.contains('\0') {
        return Err(format!("{} contains invalid characters", field));
    }
    validate_length(field, trimmed, 1, max)
}
