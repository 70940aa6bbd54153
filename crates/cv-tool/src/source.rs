use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{CvToolError, TestCase, TESTCASE_SCHEMA_V1};

pub const SCRIPT_FILE_NAMES: [&str; 4] = [
    "conversation.xml",
    "conversation.json",
    "conversation.yml",
    "conversation.yaml",
];

pub fn find_script_file(scenario_dir: &Path) -> Result<PathBuf, CvToolError> {
    let mut found: Vec<PathBuf> = WalkDir::new(scenario_dir)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            SCRIPT_FILE_NAMES
                .iter()
                .any(|name| entry.file_name().to_string_lossy() == *name)
        })
        .map(|entry| entry.into_path())
        .collect();
    found.sort_by_key(|path| {
        SCRIPT_FILE_NAMES
            .iter()
            .position(|name| path.ends_with(name))
    });

    found
        .into_iter()
        .next()
        .ok_or_else(|| CvToolError::ScriptMissing {
            path: scenario_dir.to_path_buf(),
        })
}

pub fn read_test_case(case_path: &Path) -> Result<TestCase, CvToolError> {
    let raw = fs::read_to_string(case_path).map_err(|source| CvToolError::ReadFile {
        path: case_path.to_path_buf(),
        source,
    })?;
    let parsed: TestCase = serde_json::from_str(&raw).map_err(|source| CvToolError::ParseCase {
        path: case_path.to_path_buf(),
        source,
    })?;

    if parsed.schema_version != TESTCASE_SCHEMA_V1 {
        return Err(CvToolError::InvalidSchemaVersion {
            expected: TESTCASE_SCHEMA_V1.to_string(),
            found: parsed.schema_version,
        });
    }

    Ok(parsed)
}
