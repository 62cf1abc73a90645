// ==================== FORM CONTROLLER ====================
// Backs the create and edit views. Inputs are generated from the form
// configuration table, in table order; validation runs before any store
// call, and a failed save keeps the entered values on screen.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::config;
use crate::models::User;
use crate::services::UserService;
use crate::utils::error::AppError;

const SAVE_FAILED_MESSAGE: &str = "Failed to save user. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FormState {
    LoadingExisting,
    Ready,
    Submitting,
}

/// What a submit attempt amounted to, from the shell's point of view
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Persisted; the shell should navigate back to the list
    Saved(User),
    /// One or more fields failed validation; the store was never called
    Rejected,
    /// Validation passed but the store call failed
    Failed(AppError),
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub kind: config::FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub title: String,
    pub submit_label: String,
    pub state: FormState,
    pub fields: Vec<FieldView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_error: Option<String>,
}

pub struct FormController {
    service: UserService,
    mode: FormMode,
    state: FormState,
    values: BTreeMap<String, String>,
    field_errors: BTreeMap<String, String>,
    form_error: Option<String>,
}

impl FormController {
    pub fn create(service: UserService) -> FormController {
        FormController {
            service,
            mode: FormMode::Create,
            state: FormState::Ready,
            values: BTreeMap::new(),
            field_errors: BTreeMap::new(),
            form_error: None,
        }
    }

    pub fn edit(service: UserService, id: String) -> FormController {
        FormController {
            service,
            mode: FormMode::Edit(id),
            state: FormState::LoadingExisting,
            values: BTreeMap::new(),
            field_errors: BTreeMap::new(),
            form_error: None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// In edit mode, fetches the record and prefills every configured field
    /// the record has a value for. Create mode is ready immediately.
    pub async fn enter(&mut self) -> Result<(), AppError> {
        let id = match &self.mode {
            FormMode::Create => {
                self.state = FormState::Ready;
                return Ok(());
            }
            FormMode::Edit(id) => id.clone(),
        };

        let user = self.service.get_by_id(&id).await.map_err(|e| {
            log::error!("❌ Failed to fetch user {} for editing: {}", id, e);
            e
        })?;

        if let Value::Object(attributes) = user.to_attributes() {
            for field in config::form_fields() {
                if let Some(value) = attributes.get(field.name) {
                    self.values
                        .insert(field.name.to_string(), attribute_to_string(value));
                }
            }
        }

        self.state = FormState::Ready;
        Ok(())
    }

    /// Accepts a value for a configured field; unknown names are ignored
    pub fn set_value(&mut self, name: &str, value: String) {
        if config::is_form_field(name) {
            self.values.insert(name.to_string(), value);
        }
    }

    /// Validates the entered values and, only when every field passes, saves
    /// through the record store. Entered values survive any failure.
    pub async fn submit(&mut self) -> SubmitOutcome {
        match config::validator().validate(&self.values) {
            Ok(()) => {}
            Err(AppError::ValidationFailed(errors)) => {
                log::warn!("⚠️ Submit rejected: {} invalid field(s)", errors.len());
                self.field_errors = errors
                    .into_iter()
                    .map(|error| (error.field, error.message))
                    .collect();
                self.form_error = None;
                return SubmitOutcome::Rejected;
            }
            Err(other) => {
                log::error!("❌ Validation error: {}", other);
                self.form_error = Some(SAVE_FAILED_MESSAGE.to_string());
                return SubmitOutcome::Failed(other);
            }
        }

        self.field_errors.clear();
        self.form_error = None;
        self.state = FormState::Submitting;

        let result = match &self.mode {
            FormMode::Create => self.service.create(&self.values).await,
            FormMode::Edit(id) => self.service.update(id, &self.values).await,
        };

        match result {
            Ok(user) => SubmitOutcome::Saved(user),
            Err(e) => {
                log::error!("❌ Failed to save user: {}", e);
                self.form_error = Some(SAVE_FAILED_MESSAGE.to_string());
                self.state = FormState::Ready;
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// One input per configured field, in table order
    pub fn view(&self) -> FormView {
        let editing = matches!(self.mode, FormMode::Edit(_));

        FormView {
            title: if editing { "Edit User" } else { "Create New User" }.to_string(),
            submit_label: if editing { "Update User" } else { "Create User" }.to_string(),
            state: self.state,
            form_error: self.form_error.clone(),
            fields: config::form_fields()
                .iter()
                .map(|field| FieldView {
                    name: field.name.to_string(),
                    label: field.label.to_string(),
                    kind: field.kind,
                    placeholder: field.placeholder.map(str::to_string),
                    required: field.required,
                    value: self.values.get(field.name).cloned().unwrap_or_default(),
                    error: self.field_errors.get(field.name).cloned(),
                })
                .collect(),
        }
    }
}

fn attribute_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
