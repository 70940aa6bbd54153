use cv_core::{ConversationError, Script, State};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ScriptDocument {
    #[serde(default)]
    states: Vec<State>,
}

impl ScriptDocument {
    pub(crate) fn into_script(self) -> Result<Script, ConversationError> {
        Script::new(self.states)
    }
}
