use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ActionResult {
    Success,
    /// The action went through but skipped part of its input.
    SuccessWithWarning(String),
    Error(LayoutError),
}

impl ActionResult {
    /// Returns `true` for both `Success` and `SuccessWithWarning`.
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success | ActionResult::SuccessWithWarning(_))
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            ActionResult::SuccessWithWarning(w) => Some(w.as_str()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LayoutError> {
        match self {
            ActionResult::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Result<(), LayoutError>> for ActionResult {
    fn from(result: Result<(), LayoutError>) -> Self {
        match result {
            Ok(()) => ActionResult::Success,
            Err(e) => ActionResult::Error(e),
        }
    }
}
