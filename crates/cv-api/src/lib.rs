use std::path::Path;
use std::sync::Arc;

use cv_core::{ConversationError, Script};
use cv_parser::{compile_script_source, load_script_file};
use cv_runtime::{
    ActionRegistry, ConversationEngine, ConversationEngineOptions, PredicateRegistry,
};

#[derive(Clone)]
pub struct CreateEngineOptions {
    pub source_name: String,
    pub source: String,
    pub actions: Option<Arc<ActionRegistry>>,
    pub predicates: Option<Arc<PredicateRegistry>>,
}

pub fn compile_script(source_name: &str, source: &str) -> Result<Script, ConversationError> {
    compile_script_source(source_name, source)
}

pub fn load_script(path: &Path) -> Result<Script, ConversationError> {
    load_script_file(path)
}

pub fn create_engine(options: CreateEngineOptions) -> Result<ConversationEngine, ConversationError> {
    let script = compile_script(&options.source_name, &options.source)?;
    Ok(engine_for_script(
        Arc::new(script),
        options.actions,
        options.predicates,
    ))
}

pub fn create_engine_from_path(
    path: &Path,
    actions: Option<Arc<ActionRegistry>>,
    predicates: Option<Arc<PredicateRegistry>>,
) -> Result<ConversationEngine, ConversationError> {
    let script = load_script(path)?;
    Ok(engine_for_script(Arc::new(script), actions, predicates))
}

pub fn engine_for_script(
    script: Arc<Script>,
    actions: Option<Arc<ActionRegistry>>,
    predicates: Option<Arc<PredicateRegistry>>,
) -> ConversationEngine {
    ConversationEngine::new(ConversationEngineOptions {
        script,
        actions,
        predicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_core::{EngineOutput, Termination};
    use cv_runtime::builtins::standard_predicates;
    use cv_runtime::{RecordingOutput, ScriptedInput};

    const GREETING_XML: &str = r#"
<conversation>
  <state id="0" input="name" text="Your name?"><next right="1" right-if="isEmpty({name})" left="2"/></state>
  <state id="1" text="Nobody, then."><next right="999"/></state>
  <state id="2" text="hi {name}"><next right="999"/></state>
</conversation>
"#;

    fn options(source_name: &str, source: &str) -> CreateEngineOptions {
        CreateEngineOptions {
            source_name: source_name.to_string(),
            source: source.to_string(),
            actions: None,
            predicates: Some(Arc::new(standard_predicates())),
        }
    }

    #[test]
    fn compile_script_dispatches_on_source_name() {
        let script = compile_script("greeting.xml", GREETING_XML).expect("xml should compile");
        assert_eq!(script.len(), 3);

        let script = compile_script(
            "greeting.json",
            r#"{"states":[{"id":0,"text":"hello"}]}"#,
        )
        .expect("json should compile");
        assert_eq!(script.len(), 1);
    }

    #[test]
    fn create_engine_starts_at_first_state() {
        let mut engine =
            create_engine(options("greeting.xml", GREETING_XML)).expect("engine should build");

        let first = engine.next_output().expect("next should succeed");
        assert_eq!(
            first,
            EngineOutput::Text {
                text: "Your name?".to_string()
            }
        );
    }

    #[test]
    fn create_engine_runs_branching_script() {
        let mut engine =
            create_engine(options("greeting.xml", GREETING_XML)).expect("engine should build");
        let mut input = ScriptedInput::new(["Ann"]);
        let mut output = RecordingOutput::new();

        let termination = engine
            .run(&mut input, &mut output)
            .expect("run should succeed");

        assert_eq!(termination, Termination::Completed);
        assert_eq!(output.lines(), ["Your name?".to_string(), "hi Ann".to_string()]);
    }

    #[test]
    fn create_engine_surfaces_load_errors() {
        let error = create_engine(options("greeting.yml", "states: []"))
            .err()
            .expect("unsupported source should fail");
        assert_eq!(error.code, "PARSE_UNSUPPORTED_SOURCE");

        let error = create_engine(options("greeting.xml", "<conversation>"))
            .err()
            .expect("broken xml should fail");
        assert_eq!(error.code, "PARSE_XML_ERROR");
    }

    #[test]
    fn engine_for_script_shares_compiled_script() {
        let script = Arc::new(compile_script("greeting.xml", GREETING_XML).expect("compile"));
        let predicates = Some(Arc::new(standard_predicates()));

        let mut first = engine_for_script(Arc::clone(&script), None, predicates.clone());
        let mut second = engine_for_script(Arc::clone(&script), None, predicates);

        let mut output = RecordingOutput::new();
        first
            .run(&mut ScriptedInput::new([""]), &mut output)
            .expect("first run");
        assert_eq!(output.lines()[1], "Nobody, then.");

        let mut output = RecordingOutput::new();
        second
            .run(&mut ScriptedInput::new(["Zoe"]), &mut output)
            .expect("second run");
        assert_eq!(output.lines()[1], "hi Zoe");
        assert_eq!(Arc::strong_count(&script), 3);
    }
}
