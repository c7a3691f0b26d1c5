use sqlx::types::BigDecimal;
use std::fmt;

pub const PRODUCT_NAME_MAX_LEN: usize = 120;
pub const PAYMENT_METHOD_MAX_LEN: usize = 30;
pub const TRANSACTION_REF_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

pub fn sanitize_string(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn validate_required(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }

    Ok(())
}

pub fn validate_max_len(field: &'static str, value: &str, max_len: usize) -> ValidationResult {
    if value.len() > max_len {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max_len),
        ));
    }

    Ok(())
}

pub fn validate_positive_quantity(quantity: i32) -> ValidationResult {
    if quantity <= 0 {
        return Err(ValidationError::new(
            "quantity",
            "must be greater than zero",
        ));
    }

    Ok(())
}

pub fn validate_price(field: &'static str, price: &BigDecimal) -> ValidationResult {
    if price < &BigDecimal::from(0) {
        return Err(ValidationError::new(field, "must not be negative"));
    }

    Ok(())
}

/// Item sequences must be non-empty before the placement transaction runs.
pub fn validate_not_empty<T>(field: &'static str, items: &[T]) -> ValidationResult {
    if items.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn validates_required_field() {
        assert!(validate_required("field", "value").is_ok());
        assert!(validate_required("field", "   ").is_err());
    }

    #[test]
    fn validates_max_len() {
        assert!(validate_max_len("field", "abc", 3).is_ok());
        assert!(validate_max_len("field", "abcd", 3).is_err());
    }

    #[test]
    fn sanitizes_string() {
        assert_eq!(sanitize_string("  wireless\tmouse  "), "wireless mouse");
        assert_eq!(sanitize_string("single"), "single");
        assert_eq!(sanitize_string(" \n "), "");
        assert_eq!(sanitize_string("ab\u{0000}cd\u{0007}"), "abcd");
    }

    #[test]
    fn validates_quantity() {
        assert!(validate_positive_quantity(1).is_ok());
        assert!(validate_positive_quantity(0).is_err());
        assert!(validate_positive_quantity(-3).is_err());
    }

    #[test]
    fn validates_price() {
        let zero = BigDecimal::from(0);
        let positive = BigDecimal::from_str("9.99").unwrap();
        let negative = BigDecimal::from_str("-0.01").unwrap();

        assert!(validate_price("price", &zero).is_ok());
        assert!(validate_price("price", &positive).is_ok());
        assert!(validate_price("price", &negative).is_err());
    }

    #[test]
    fn rejects_empty_sequence() {
        let empty: [i32; 0] = [];
        assert_eq!(validate_not_empty("items", &empty).unwrap_err().field, "items");
        assert!(validate_not_empty("items", &[1]).is_ok());
    }
}
