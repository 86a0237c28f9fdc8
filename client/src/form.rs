use thiserror::Error;

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;

/// Why a name typed into the form was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Name is required")]
    Required,

    #[error("Name must be at least {0} characters")]
    TooShort(usize),

    #[error("Name must be at most {0} characters")]
    TooLong(usize),
}

/// Check a name the way the form does before submitting
///
/// Surrounding whitespace is dropped; the length is counted in characters.
pub fn validate_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();
    let chars = name.chars().count();

    if chars == 0 {
        return Err(NameError::Required);
    }
    if chars < NAME_MIN_CHARS {
        return Err(NameError::TooShort(NAME_MIN_CHARS));
    }
    if chars > NAME_MAX_CHARS {
        return Err(NameError::TooLong(NAME_MAX_CHARS));
    }

    Ok(name.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Create/edit dialog state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemForm {
    pub mode: FormMode,
    pub name: String,
    pub error: Option<NameError>,
    pub submitting: bool,
}

impl ItemForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            error: None,
            submitting: false,
        }
    }

    pub fn edit(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mode: FormMode::Edit { id: id.into() },
            name: name.into(),
            error: None,
            submitting: false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New item",
            FormMode::Edit { .. } => "Edit item",
        }
    }

    /// Replace the typed name, clearing any previous validation message
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.error = None;
    }
}
