use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use cv_api::create_engine_from_path;
use cv_core::EngineOutput;
use cv_runtime::builtins::standard_predicates;
use cv_runtime::ActionRegistry;

use crate::source::{find_script_file, read_test_case};
use crate::{CvToolError, ExpectedEvent, TestCase};

pub const MAX_STEPS: usize = 5_000;

const PRINT_ACTION: &str = "print";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub observed_events: Vec<ExpectedEvent>,
    pub consumed_inputs: usize,
    pub steps: usize,
}

fn recording_actions(printed: Arc<Mutex<Vec<String>>>) -> ActionRegistry {
    ActionRegistry::new().with_action(PRINT_ACTION, move |value, _memory| {
        printed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(value.to_string());
        Ok(())
    })
}

fn drain_printed(printed: &Mutex<Vec<String>>, observed_events: &mut Vec<ExpectedEvent>) {
    let mut printed = printed.lock().unwrap_or_else(PoisonError::into_inner);
    observed_events.extend(printed.drain(..).map(|text| ExpectedEvent::Print { text }));
}

pub fn run_case(scenario_dir: &Path, case: &TestCase) -> Result<RunReport, CvToolError> {
    let script_path = find_script_file(scenario_dir)?;
    let printed = Arc::new(Mutex::new(Vec::new()));
    let mut engine = create_engine_from_path(
        &script_path,
        Some(Arc::new(recording_actions(Arc::clone(&printed)))),
        Some(Arc::new(standard_predicates())),
    )?;

    let mut observed_events = Vec::new();
    let mut input_index = 0usize;

    for step in 1..=MAX_STEPS {
        let output = engine.next_output();
        drain_printed(&printed, &mut observed_events);
        match output? {
            EngineOutput::Text { text } => {
                observed_events.push(ExpectedEvent::Text { text });
            }
            EngineOutput::Input { variable } => {
                observed_events.push(ExpectedEvent::Input {
                    variable: variable.clone(),
                });
                let line = case
                    .inputs
                    .get(input_index)
                    .ok_or_else(|| CvToolError::MissingInput {
                        event_index: observed_events.len() - 1,
                        variable,
                    })?;
                engine.submit_input(line.trim())?;
                input_index += 1;
            }
            EngineOutput::End { termination } => {
                observed_events.push(ExpectedEvent::End { termination });
                if input_index != case.inputs.len() {
                    return Err(CvToolError::UnusedInputs {
                        used: input_index,
                        total: case.inputs.len(),
                    });
                }
                return Ok(RunReport {
                    observed_events,
                    consumed_inputs: input_index,
                    steps: step,
                });
            }
        }
    }

    Err(CvToolError::GuardExceeded {
        max_steps: MAX_STEPS,
    })
}

pub fn assert_case(scenario_dir: &Path, case_path: &Path) -> Result<(), CvToolError> {
    let case = read_test_case(case_path)?;
    let report = run_case(scenario_dir, &case)?;

    if report.observed_events.len() != case.expected_events.len() {
        let observed = serde_json::to_string_pretty(&report.observed_events)
            .map_err(CvToolError::EventSerialize)?;
        return Err(CvToolError::EventCountMismatch {
            expected: case.expected_events.len(),
            actual: report.observed_events.len(),
            observed,
        });
    }

    for (index, (expected, actual)) in case
        .expected_events
        .iter()
        .zip(report.observed_events.iter())
        .enumerate()
    {
        if expected != actual {
            let expected = serde_json::to_string(expected).map_err(CvToolError::EventSerialize)?;
            let actual = serde_json::to_string(actual).map_err(CvToolError::EventSerialize)?;
            return Err(CvToolError::EventMismatch {
                index,
                expected,
                actual,
            });
        }
    }

    Ok(())
}
