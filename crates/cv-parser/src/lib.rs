mod document;
mod json;
mod script;
mod xml;
mod yaml;

use std::fs;
use std::path::Path;

use cv_core::{ConversationError, Script};
use tracing::debug;

pub use json::compile_json_script;
pub use script::compile_xml_script;
pub use xml::{parse_xml_document, XmlDocument, XmlElementNode, XmlNode};
pub use yaml::compile_yaml_script;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Xml,
    Json,
    Yaml,
}

impl ScriptFormat {
    pub fn from_source_name(source_name: &str) -> Option<Self> {
        let lower = source_name.to_ascii_lowercase();
        if lower.ends_with(".xml") {
            Some(Self::Xml)
        } else if lower.ends_with(".json") {
            Some(Self::Json)
        } else if lower.ends_with(".yml") || lower.ends_with(".yaml") {
            Some(Self::Yaml)
        } else {
            None
        }
    }
}

pub fn compile_script(format: ScriptFormat, source: &str) -> Result<Script, ConversationError> {
    let script = match format {
        ScriptFormat::Xml => compile_xml_script(source)?,
        ScriptFormat::Json => compile_json_script(source)?,
        ScriptFormat::Yaml => compile_yaml_script(source)?,
    };
    debug!(?format, states = script.len(), "compiled conversation script");
    Ok(script)
}

pub fn compile_script_source(source_name: &str, source: &str) -> Result<Script, ConversationError> {
    let format = ScriptFormat::from_source_name(source_name).ok_or_else(|| {
        ConversationError::new(
            "PARSE_UNSUPPORTED_SOURCE",
            format!(
                "Unsupported script source \"{}\": expected .xml, .json, .yml or .yaml.",
                source_name
            ),
        )
    })?;
    compile_script(format, source)
}

pub fn load_script_file(path: &Path) -> Result<Script, ConversationError> {
    let source = fs::read_to_string(path).map_err(|error| {
        ConversationError::new(
            "PARSE_SOURCE_READ",
            format!("Failed to read {}: {}", path.display(), error),
        )
    })?;
    compile_script_source(&path.to_string_lossy(), &source)
}

#[cfg(test)]
mod lib_tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should move forward")
            .as_nanos();
        std::env::temp_dir().join(format!("cv-parser-{}-{}", nanos, name))
    }

    #[test]
    fn script_format_follows_extension() {
        assert_eq!(
            ScriptFormat::from_source_name("a/conversation.XML"),
            Some(ScriptFormat::Xml)
        );
        assert_eq!(
            ScriptFormat::from_source_name("conversation.json"),
            Some(ScriptFormat::Json)
        );
        assert_eq!(
            ScriptFormat::from_source_name("conversation.yml"),
            Some(ScriptFormat::Yaml)
        );
        assert_eq!(
            ScriptFormat::from_source_name("conversation.YAML"),
            Some(ScriptFormat::Yaml)
        );
        assert_eq!(ScriptFormat::from_source_name("conversation.toml"), None);
    }

    #[test]
    fn compile_script_source_rejects_unknown_extension() {
        let error = compile_script_source("conversation.toml", "states = []")
            .expect_err("toml is not supported");
        assert_eq!(error.code, "PARSE_UNSUPPORTED_SOURCE");
    }

    #[test]
    fn load_script_file_reads_both_formats() {
        let xml = temp_path("conversation.xml");
        fs::write(&xml, r#"<conversation><state id="0" text="hello"/></conversation>"#)
            .expect("xml should be written");
        let script = load_script_file(&xml).expect("xml should load");
        assert_eq!(script.get_state(0).expect("state 0").text, "hello");

        let json = temp_path("conversation.json");
        fs::write(&json, r#"{"states":[{"id":0,"text":"hello"}]}"#)
            .expect("json should be written");
        let script = load_script_file(&json).expect("json should load");
        assert_eq!(script.len(), 1);

        let yaml = temp_path("conversation.yml");
        fs::write(&yaml, "states:\n  - id: 0\n    text: hello\n    next:\n      right: 999\n")
            .expect("yaml should be written");
        let script = load_script_file(&yaml).expect("yaml should load");
        assert_eq!(script.get_state(0).expect("state 0").next.right, 999);
    }

    #[test]
    fn load_script_file_reports_missing_file() {
        let error = load_script_file(&temp_path("missing.xml")).expect_err("missing file");
        assert_eq!(error.code, "PARSE_SOURCE_READ");
    }
}
