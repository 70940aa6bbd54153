use cv_core::{ConversationError, Script};

use crate::document::ScriptDocument;

pub fn compile_yaml_script(source: &str) -> Result<Script, ConversationError> {
    if source.trim().is_empty() {
        return Ok(Script::default());
    }
    let document: ScriptDocument = serde_yaml::from_str(source)
        .map_err(|error| ConversationError::new("PARSE_YAML_ERROR", error.to_string()))?;
    document.into_script()
}
