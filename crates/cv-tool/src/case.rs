use cv_core::Termination;
use serde::{Deserialize, Serialize};

pub const TESTCASE_SCHEMA_V1: &str = "cv-tool-case.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub schema_version: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub expected_events: Vec<ExpectedEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExpectedEvent {
    Text { text: String },
    Print { text: String },
    Input { variable: String },
    End { termination: Termination },
}

#[cfg(test)]
mod case_tests {
    use super::*;

    #[test]
    fn testcase_deserialize_applies_defaults() {
        let parsed: TestCase = serde_json::from_str(
            r#"{
  "schemaVersion": "cv-tool-case.v1"
}"#,
        )
        .expect("testcase should deserialize");

        assert_eq!(parsed.schema_version, TESTCASE_SCHEMA_V1);
        assert!(parsed.inputs.is_empty());
        assert!(parsed.expected_events.is_empty());
    }

    #[test]
    fn expected_event_deserialize_supports_all_variants() {
        let parsed: Vec<ExpectedEvent> = serde_json::from_str(
            r#"[
  {"kind":"text","text":"a"},
  {"kind":"print","text":"b"},
  {"kind":"input","variable":"name"},
  {"kind":"end","termination":"completed"},
  {"kind":"end","termination":{"stateNotFound":{"id":3}}}
]"#,
        )
        .expect("events should deserialize");

        assert_eq!(parsed.len(), 5);
        assert!(matches!(parsed[0], ExpectedEvent::Text { .. }));
        assert!(matches!(parsed[1], ExpectedEvent::Print { .. }));
        assert!(matches!(parsed[2], ExpectedEvent::Input { .. }));
        assert_eq!(
            parsed[3],
            ExpectedEvent::End {
                termination: Termination::Completed
            }
        );
        assert_eq!(
            parsed[4],
            ExpectedEvent::End {
                termination: Termination::StateNotFound { id: 3 }
            }
        );
    }
}
