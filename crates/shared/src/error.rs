use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    MalformedState,
    Forbidden,
    Internal,
}

/// Form field named by a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DishField {
    Name,
    Description,
    Course,
    Price,
}

impl fmt::Display for DishField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Course => "course",
            Self::Price => "price",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("invalid {field}: {reason}")]
    Validation { field: DishField, reason: String },
    #[error("malformed menu state: {reason}")]
    MalformedState { reason: String },
    #[error("only the chef may {action}")]
    Forbidden { action: &'static str },
    #[error("no unique dish id after {attempts} attempts")]
    IdentifierExhausted { attempts: usize },
}

pub type MenuResult<T> = Result<T, MenuError>;

impl MenuError {
    pub fn validation(field: DishField, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedState {
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::Validation,
            Self::MalformedState { .. } => ErrorCode::MalformedState,
            Self::Forbidden { .. } => ErrorCode::Forbidden,
            Self::IdentifierExhausted { .. } => ErrorCode::Internal,
        }
    }
}

impl From<MenuError> for ErrorPayload {
    fn from(value: MenuError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
