//! Input validation and normalisation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants;

/// Seat numbers are short alphanumeric codes, optionally with dashes
static SEAT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{0,15}$").expect("valid seat regex"));

/// Normalise a seat number read from a sheet
///
/// Spreadsheets often hand integer seats over as floats, so `"12.0"` becomes `"12"`.
pub fn normalize_seat_number(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.strip_suffix(".0") {
        Some(integer) if !integer.is_empty() && integer.chars().all(|c| c.is_ascii_digit()) => {
            integer.to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// Validate seat number format
pub fn validate_seat_number(seat: &str) -> Result<(), &'static str> {
    if SEAT_NUMBER_RE.is_match(seat) {
        Ok(())
    } else {
        Err("Seat number must be 1-16 letters, digits or dashes")
    }
}

/// Emails are compared case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Validate and sanitize an exam name
pub fn validate_exam_name(name: &str) -> Result<String, &'static str> {
    let sanitized = sanitize_string(name);
    if sanitized.is_empty() {
        return Err("Exam name cannot be empty");
    }
    if sanitized.chars().count() as u64 > constants::MAX_EXAM_NAME_LENGTH {
        return Err("Exam name is too long");
    }
    Ok(sanitized)
}

/// Validate user role
pub fn validate_role(role: &str) -> Result<(), &'static str> {
    if constants::roles::ALL.contains(&role) {
        Ok(())
    } else {
        Err("Invalid role")
    }
}

/// Validate a score value
pub fn validate_score(value: f64) -> Result<(), &'static str> {
    if value.is_finite() {
        Ok(())
    } else {
        Err("Score must be a finite number")
    }
}

/// Read a numeric score out of a sheet cell
///
/// Numbers and numeric strings are accepted. Blank cells and markers such as
/// `"Abs"` or `"N/A"` yield `None`.
pub fn parse_score_cell(cell: &serde_json::Value) -> Option<f64> {
    let value = match cell {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    validate_score(value).ok().map(|_| value)
}

/// Read a seat number out of a sheet cell
pub fn parse_seat_cell(cell: &serde_json::Value) -> Option<String> {
    let raw = match cell {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let seat = normalize_seat_number(&raw);
    (!seat.is_empty()).then_some(seat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_seat_number() {
        assert_eq!(normalize_seat_number(" 12.0 "), "12");
        assert_eq!(normalize_seat_number("12"), "12");
        assert_eq!(normalize_seat_number("A12.0"), "A12.0");
        assert_eq!(normalize_seat_number(".0"), ".0");
    }

    #[test]
    fn test_validate_seat_number() {
        assert!(validate_seat_number("12").is_ok());
        assert!(validate_seat_number("A-07").is_ok());
        assert!(validate_seat_number("").is_err());
        assert!(validate_seat_number("-1").is_err());
        assert!(validate_seat_number("12 3").is_err());
    }

    #[test]
    fn test_validate_exam_name() {
        assert_eq!(validate_exam_name("  Mock Exam 1 ").unwrap(), "Mock Exam 1");
        assert!(validate_exam_name("   ").is_err());
        assert!(validate_exam_name(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_parse_score_cell() {
        assert_eq!(parse_score_cell(&json!(87.5)), Some(87.5));
        assert_eq!(parse_score_cell(&json!(90)), Some(90.0));
        assert_eq!(parse_score_cell(&json!(" 72 ")), Some(72.0));
        assert_eq!(parse_score_cell(&json!("Abs")), None);
        assert_eq!(parse_score_cell(&json!("NaN")), None);
        assert_eq!(parse_score_cell(&json!(null)), None);
        assert_eq!(parse_score_cell(&json!(true)), None);
    }

    #[test]
    fn test_parse_seat_cell() {
        assert_eq!(parse_seat_cell(&json!(12.0)), Some("12".to_string()));
        assert_eq!(parse_seat_cell(&json!(7)), Some("7".to_string()));
        assert_eq!(parse_seat_cell(&json!(" 15 ")), Some("15".to_string()));
        assert_eq!(parse_seat_cell(&json!("")), None);
        assert_eq!(parse_seat_cell(&json!(null)), None);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" Student@School.EDU "), "student@school.edu");
    }
}
