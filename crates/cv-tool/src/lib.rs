mod case;
mod runner;
mod scenario;
mod source;

pub use case::{ExpectedEvent, TestCase, TESTCASE_SCHEMA_V1};
pub use runner::{assert_case, run_case, RunReport, MAX_STEPS};
pub use scenario::{discover_scenarios, Scenario, TESTCASE_FILE_NAME};
pub use source::{find_script_file, read_test_case, SCRIPT_FILE_NAMES};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CvToolError {
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse testcase {path}: {source}")]
    ParseCase {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid testcase schema version \"{found}\", expected \"{expected}\".")]
    InvalidSchemaVersion { expected: String, found: String },
    #[error("No conversation.xml, .json, .yml or .yaml under {path}.")]
    ScriptMissing { path: PathBuf },
    #[error("Scenario has no testcase file at {path}.")]
    TestcaseMissing { path: PathBuf },
    #[error("Scenario root {path} is not a directory.")]
    ScenarioRootMissing { path: PathBuf },
    #[error("Engine error: {0}")]
    Engine(#[from] cv_core::ConversationError),
    #[error("Input missing at event index {event_index} for variable \"{variable}\".")]
    MissingInput { event_index: usize, variable: String },
    #[error("Unused inputs: used {used} of {total}.")]
    UnusedInputs { used: usize, total: usize },
    #[error("Guard exceeded: max_steps={max_steps}.")]
    GuardExceeded { max_steps: usize },
    #[error("Expected event count {expected}, actual {actual}. observed={observed}")]
    EventCountMismatch {
        expected: usize,
        actual: usize,
        observed: String,
    },
    #[error("Event mismatch at index {index}. expected={expected} actual={actual}")]
    EventMismatch {
        index: usize,
        expected: String,
        actual: String,
    },
    #[error("Failed to serialize event for diff: {0}")]
    EventSerialize(serde_json::Error),
}
