// ==================== USER FORM CONFIGURATION ====================
// This table drives the whole form: rendering order, input types and
// validation rules. To expose a new user attribute, add an entry here -
// the form and the validator pick it up without any code changes.

use lazy_static::lazy_static;
use serde::Serialize;

use crate::validation::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Number,
}

impl FieldKind {
    /// Value for the HTML input `type` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Date => "date",
            FieldKind::Number => "number",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationRules {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    pub rules: Option<ValidationRules>,
}

lazy_static! {
    static ref USER_FORM_FIELDS: Vec<FieldDescriptor> = vec![
        FieldDescriptor {
            name: "firstName",
            label: "First Name",
            kind: FieldKind::Text,
            placeholder: Some("John"),
            required: true,
            rules: Some(ValidationRules {
                min_length: Some(2),
                ..Default::default()
            }),
        },
        FieldDescriptor {
            name: "lastName",
            label: "Last Name",
            kind: FieldKind::Text,
            placeholder: Some("Doe"),
            required: true,
            rules: Some(ValidationRules {
                min_length: Some(2),
                ..Default::default()
            }),
        },
        FieldDescriptor {
            name: "email",
            label: "Email Address",
            kind: FieldKind::Email,
            placeholder: Some("john.doe@example.com"),
            required: true,
            rules: None,
        },
        FieldDescriptor {
            name: "phone",
            label: "Phone Number",
            kind: FieldKind::Tel,
            placeholder: Some("1234567890"),
            required: true,
            rules: Some(ValidationRules {
                pattern: Some(r"^\d{10}$"),
                ..Default::default()
            }),
        },
    ];

    // Built once from the table above; never changes while the process runs
    static ref USER_VALIDATOR: Validator = Validator::from_fields(&USER_FORM_FIELDS);
}

/// The form fields, in rendering order
pub fn form_fields() -> &'static [FieldDescriptor] {
    &USER_FORM_FIELDS
}

pub fn validator() -> &'static Validator {
    &USER_VALIDATOR
}

/// True when `name` is one of the configured form fields
pub fn is_form_field(name: &str) -> bool {
    USER_FORM_FIELDS.iter().any(|field| field.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_names_are_unique() {
        let names: HashSet<&str> = form_fields().iter().map(|f| f.name).collect();
        assert_eq!(names.len(), form_fields().len());
    }

    #[test]
    fn test_field_order_matches_table() {
        let names: Vec<&str> = form_fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["firstName", "lastName", "email", "phone"]);
    }

    #[test]
    fn test_is_form_field() {
        assert!(is_form_field("email"));
        assert!(!is_form_field("id"));
        assert!(!is_form_field("unknown"));
    }
}
