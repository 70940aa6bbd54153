use crate::types::StateId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ConversationError {
    pub code: String,
    pub message: String,
    pub state_id: Option<StateId>,
}

impl ConversationError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            state_id: None,
        }
    }

    pub fn at_state(code: impl Into<String>, message: impl Into<String>, state_id: StateId) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            state_id: Some(state_id),
        }
    }

    pub fn with_state_id(mut self, state_id: StateId) -> Self {
        if self.state_id.is_none() {
            self.state_id = Some(state_id);
        }
        self
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn display_joins_code_and_message() {
        let error = ConversationError::new("ENGINE_ACTION_FAILED", "boom");
        assert_eq!(error.to_string(), "ENGINE_ACTION_FAILED: boom");
        assert_eq!(error.state_id, None);
    }

    #[test]
    fn with_state_id_keeps_first_location() {
        let error = ConversationError::at_state("X", "y", 3).with_state_id(7);
        assert_eq!(error.state_id, Some(3));

        let error = ConversationError::new("X", "y").with_state_id(7);
        assert_eq!(error.state_id, Some(7));
    }
}
