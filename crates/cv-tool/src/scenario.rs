use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::source::find_script_file;
use crate::CvToolError;

pub const TESTCASE_FILE_NAME: &str = "testcase.json";

// A scenario is a directory holding one conversation script and its testcase.json.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub dir: PathBuf,
    pub script: PathBuf,
    pub testcase: PathBuf,
}

impl Scenario {
    pub fn load(dir: &Path) -> Result<Self, CvToolError> {
        let script = find_script_file(dir)?;
        let testcase = dir.join(TESTCASE_FILE_NAME);
        if !testcase.is_file() {
            return Err(CvToolError::TestcaseMissing { path: testcase });
        }
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            name,
            dir: dir.to_path_buf(),
            script,
            testcase,
        })
    }
}

pub fn discover_scenarios(root: &Path) -> Result<Vec<Scenario>, CvToolError> {
    if !root.is_dir() {
        return Err(CvToolError::ScenarioRootMissing {
            path: root.to_path_buf(),
        });
    }

    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| Scenario::load(entry.path()))
        .collect()
}
