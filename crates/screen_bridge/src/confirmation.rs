//! Outcome of a yes/no prompt guarding a destructive action.

use menu_core::MenuCollection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

impl Confirmation {
    /// Only an explicit yes confirms; anything else, including no answer, cancels.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Self::Confirmed,
            _ => Self::Cancelled,
        }
    }

    pub fn is_confirmed(self) -> bool {
        self == Self::Confirmed
    }
}

/// Runs `action` on `current` when confirmed; otherwise returns `current` unchanged.
pub fn gated(
    decision: Confirmation,
    current: &MenuCollection,
    action: impl FnOnce(&MenuCollection) -> MenuCollection,
) -> MenuCollection {
    match decision {
        Confirmation::Confirmed => action(current),
        Confirmation::Cancelled => current.clone(),
    }
}
