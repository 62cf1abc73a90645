// ==================== SCHEMA-DRIVEN VALIDATION ====================
// One rule per configured form field, derived from the field table at
// startup. Checking a candidate value runs, in order: required, email
// grammar, min length, max length, pattern (whole-string match).

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex_lite::Regex;
use serde::Serialize;

use crate::config::{FieldDescriptor, FieldKind};
use crate::utils::error::AppError;

lazy_static! {
    // Same grammar the browser applies to <input type="email">
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email grammar");
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

struct FieldRule {
    name: &'static str,
    label: &'static str,
    required: bool,
    is_email: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
}

impl FieldRule {
    fn from_descriptor(field: &FieldDescriptor) -> Self {
        let rules = field.rules.clone().unwrap_or_default();
        // Anchoring the configured pattern makes it match the whole value,
        // never a substring of it
        let pattern = rules.pattern.map(|p| {
            Regex::new(&format!("^(?:{})$", p)).expect("invalid pattern in field configuration")
        });

        FieldRule {
            name: field.name,
            label: field.label,
            required: field.required,
            is_email: field.kind == FieldKind::Email,
            min_length: rules.min_length,
            max_length: rules.max_length,
            pattern,
        }
    }

    fn check(&self, value: Option<&str>) -> Option<String> {
        let value = value.unwrap_or("");

        if value.is_empty() {
            if self.required {
                return Some(format!("{} is required", self.label));
            }
            // Optional field left blank: valid absence
            return None;
        }

        if self.is_email && !EMAIL_RE.is_match(value) {
            return Some("Invalid email address".to_string());
        }

        if let Some(min) = self.min_length {
            if value.chars().count() < min {
                return Some(format!("{} must be at least {} characters", self.label, min));
            }
        }

        if let Some(max) = self.max_length {
            if value.chars().count() > max {
                return Some(format!("{} must be at most {} characters", self.label, max));
            }
        }

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(value) {
                return Some(format!("Invalid {} format", self.label));
            }
        }

        None
    }
}

pub struct Validator {
    rules: Vec<FieldRule>,
}

impl Validator {
    pub fn from_fields(fields: &[FieldDescriptor]) -> Self {
        Validator {
            rules: fields.iter().map(FieldRule::from_descriptor).collect(),
        }
    }

    /// Checks every configured field against the candidate values.
    /// Pure function: no side effects, same input always gives the same result.
    pub fn validate(&self, values: &BTreeMap<String, String>) -> Result<(), AppError> {
        let mut errors = Vec::new();

        for rule in &self.rules {
            if let Some(message) = rule.check(values.get(rule.name).map(String::as_str)) {
                errors.push(FieldError {
                    field: rule.name.to_string(),
                    message,
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationFailed(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    fn valid_values() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("firstName".to_string(), "Ana".to_string()),
            ("lastName".to_string(), "Lee".to_string()),
            ("email".to_string(), "ana@x.com".to_string()),
            ("phone".to_string(), "5551234567".to_string()),
        ])
    }

    fn field_errors(result: Result<(), AppError>) -> Vec<FieldError> {
        match result {
            Err(AppError::ValidationFailed(errors)) => errors,
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_candidate_passes() {
        assert!(config::validator().validate(&valid_values()).is_ok());
    }

    #[test]
    fn test_required_field_empty_then_filled() {
        let mut values = valid_values();
        values.remove("firstName");

        let errors = field_errors(config::validator().validate(&values));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "firstName");
        assert_eq!(errors[0].message, "First Name is required");

        values.insert("firstName".to_string(), "Ana".to_string());
        assert!(config::validator().validate(&values).is_ok());
    }

    #[test]
    fn test_email_grammar() {
        let mut values = valid_values();
        values.insert("email".to_string(), "a@b.com".to_string());
        assert!(config::validator().validate(&values).is_ok());

        values.insert("email".to_string(), "not-an-email".to_string());
        let errors = field_errors(config::validator().validate(&values));
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "Invalid email address");
    }

    #[test]
    fn test_phone_pattern_is_whole_string() {
        let mut values = valid_values();
        values.insert("phone".to_string(), "1234567890".to_string());
        assert!(config::validator().validate(&values).is_ok());

        for bad in ["12345", "12345678901", "12345abcde"] {
            values.insert("phone".to_string(), bad.to_string());
            let errors = field_errors(config::validator().validate(&values));
            assert_eq!(errors[0].field, "phone");
            assert_eq!(errors[0].message, "Invalid Phone Number format");
        }
    }

    #[test]
    fn test_min_length_message_uses_label() {
        let mut values = valid_values();
        values.insert("lastName".to_string(), "X".to_string());

        let errors = field_errors(config::validator().validate(&values));
        assert_eq!(errors[0].field, "lastName");
        assert_eq!(errors[0].message, "Last Name must be at least 2 characters");
    }

    #[test]
    fn test_optional_empty_field_skips_rules() {
        let fields = vec![FieldDescriptor {
            name: "nickname",
            label: "Nickname",
            kind: FieldKind::Text,
            placeholder: None,
            required: false,
            rules: Some(crate::config::ValidationRules {
                min_length: Some(3),
                ..Default::default()
            }),
        }];
        let validator = Validator::from_fields(&fields);

        // Absent and blank are both valid absence for an optional field
        assert!(validator.validate(&BTreeMap::new()).is_ok());
        let blank = BTreeMap::from([("nickname".to_string(), String::new())]);
        assert!(validator.validate(&blank).is_ok());

        // But a present value still has to satisfy the rules
        let short = BTreeMap::from([("nickname".to_string(), "ab".to_string())]);
        assert!(validator.validate(&short).is_err());
    }

    #[test]
    fn test_new_descriptor_is_enforced_without_code_changes() {
        let mut fields = config::form_fields().to_vec();
        fields.push(FieldDescriptor {
            name: "birthDate",
            label: "Birth Date",
            kind: FieldKind::Date,
            placeholder: None,
            required: true,
            rules: None,
        });
        let validator = Validator::from_fields(&fields);

        let errors = field_errors(validator.validate(&valid_values()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "birthDate");
        assert_eq!(errors[0].message, "Birth Date is required");
    }

    #[test]
    fn test_all_failures_reported_together() {
        let errors = field_errors(config::validator().validate(&BTreeMap::new()));
        assert_eq!(errors.len(), config::form_fields().len());
    }
}
