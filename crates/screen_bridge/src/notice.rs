//! Conversion of model errors into messages shown at the screen boundary.

use shared::error::{ErrorCode, MenuError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeContext {
    AddDish,
    RemoveDish,
    ResetMenu,
    Navigation,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    severity: NoticeSeverity,
    context: NoticeContext,
    message: String,
}

impl UserNotice {
    pub fn info(context: NoticeContext, message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Info,
            context,
            message: message.into(),
        }
    }

    pub fn from_error(context: NoticeContext, err: &MenuError) -> Self {
        let (severity, message) = match err {
            MenuError::Validation { field, reason } => (
                NoticeSeverity::Error,
                format!("Please fill in all fields ({field} {reason})."),
            ),
            MenuError::MalformedState { .. } => (
                NoticeSeverity::Warning,
                "Menu data could not be read; keeping the last known menu.".to_string(),
            ),
            MenuError::Forbidden { action } => (
                NoticeSeverity::Error,
                format!("Only the chef can {action}."),
            ),
            MenuError::IdentifierExhausted { .. } => (
                NoticeSeverity::Error,
                "Could not create the dish; please try again.".to_string(),
            ),
        };
        Self {
            severity,
            context,
            message,
        }
    }

    pub fn severity(&self) -> NoticeSeverity {
        self.severity
    }

    pub fn context(&self) -> NoticeContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Validation and permission problems are fixed by the user, not retried.
    pub fn is_user_correctable(err: &MenuError) -> bool {
        matches!(err.code(), ErrorCode::Validation | ErrorCode::Forbidden)
    }
}
