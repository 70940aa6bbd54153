use cv_core::{ConversationError, Script};

use crate::document::ScriptDocument;

pub fn compile_json_script(source: &str) -> Result<Script, ConversationError> {
    let document: ScriptDocument = serde_json::from_str(source)
        .map_err(|error| ConversationError::new("PARSE_JSON_ERROR", error.to_string()))?;
    document.into_script()
}
