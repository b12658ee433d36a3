use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryName, TypeConstraintError};

/// JSON body accepted by category create and update.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub enable: bool,
}

/// Validated category form fields.
#[derive(Debug, Clone)]
pub struct CategoryFormPayload {
    pub name: CategoryName,
    pub enable: bool,
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(String),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CategoryForm> for CategoryFormPayload {
    type Error = CategoryFormError;

    fn try_from(form: CategoryForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: CategoryName::new(form.name)?,
            enable: form.enable,
        })
    }
}

impl CategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name,
            enable: self.enable,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_valid_form() {
        let form = CategoryForm {
            name: " Chairs ".into(),
            enable: true,
        };
        let payload = CategoryFormPayload::try_from(form).unwrap();
        assert_eq!(payload.name.as_str(), "Chairs");
        assert!(payload.enable);
    }

    #[test]
    fn rejects_empty_name_through_field_rules() {
        let form = CategoryForm {
            name: String::new(),
            enable: false,
        };
        let err = CategoryFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, CategoryFormError::Validation(_)));
    }

    #[test]
    fn rejects_blank_name() {
        // Whitespace passes the length rule but trims to nothing.
        let form = CategoryForm {
            name: "  ".into(),
            enable: false,
        };
        let err = CategoryFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, CategoryFormError::TypeConstraint(_)));
    }
}
