use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failed for key `{key}`: {message}")]
    Backend { key: String, message: String },

    #[error("failed to serialize task collection")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub fn backend(key: &str, message: impl Into<String>) -> Self {
        Self::Backend {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Which form rejected the input. The message shown to the user depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", missing_fields_message(.form))]
    MissingFields { form: FormKind, fields: Vec<&'static str> },

    #[error("Unknown category `{0}`.")]
    UnknownCategory(String),

    #[error("Invalid due date `{0}`; expected YYYY-MM-DD.")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn missing_fields_message(form: &FormKind) -> &'static str {
    match form {
        FormKind::Create => "Please fill all fields to add a task.",
        FormKind::Edit => "Please complete all fields before saving changes.",
    }
}
