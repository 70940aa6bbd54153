use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConversationError;

pub type StateId = i64;

pub const START_STATE_ID: StateId = 0;

// Reaching this id ends a run normally; no state may declare it.
pub const TERMINAL_STATE_ID: StateId = 999;

// Omitted targets read as the start id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Next {
    #[serde(default)]
    pub right: StateId,
    #[serde(default, rename = "rightIf", alias = "right-if")]
    pub right_if: String,
    #[serde(default)]
    pub left: StateId,
}

impl Next {
    pub fn to(target: StateId) -> Self {
        Self {
            right: target,
            right_if: String::new(),
            left: START_STATE_ID,
        }
    }

    pub fn branch(right_if: impl Into<String>, right: StateId, left: StateId) -> Self {
        Self {
            right,
            right_if: right_if.into(),
            left,
        }
    }

    pub fn is_simple(&self) -> bool {
        self.right_if.is_empty()
    }
}

impl Default for Next {
    fn default() -> Self {
        Self::to(START_STATE_ID)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    #[serde(default)]
    pub before: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub after: String,
    #[serde(default)]
    pub next: Next,
}

impl State {
    pub fn new(id: StateId, text: impl Into<String>, next: Next) -> Self {
        Self {
            id,
            before: String::new(),
            text: text.into(),
            input: String::new(),
            after: String::new(),
            next,
        }
    }

    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = before.into();
        self
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = after.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionBranch {
    Right,
    Left,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingTarget {
    pub state_id: StateId,
    pub branch: TransitionBranch,
    pub target: StateId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    states: Vec<State>,
    index: BTreeMap<StateId, usize>,
}

impl Script {
    pub fn new(states: Vec<State>) -> Result<Self, ConversationError> {
        let mut index = BTreeMap::new();
        for (position, state) in states.iter().enumerate() {
            if state.id < START_STATE_ID {
                return Err(ConversationError::at_state(
                    "SCRIPT_INVALID_STATE_ID",
                    format!("State id {} is negative.", state.id),
                    state.id,
                ));
            }
            if state.id == TERMINAL_STATE_ID {
                return Err(ConversationError::at_state(
                    "SCRIPT_RESERVED_STATE_ID",
                    format!(
                        "State id {} is reserved for the terminal transition.",
                        TERMINAL_STATE_ID
                    ),
                    state.id,
                ));
            }
            if index.insert(state.id, position).is_some() {
                return Err(ConversationError::at_state(
                    "SCRIPT_DUPLICATE_STATE_ID",
                    format!("State id {} is declared more than once.", state.id),
                    state.id,
                ));
            }
        }

        Ok(Self { states, index })
    }

    pub fn get_state(&self, id: StateId) -> Option<&State> {
        self.index.get(&id).map(|position| &self.states[*position])
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn dangling_targets(&self) -> Vec<DanglingTarget> {
        let mut dangling = Vec::new();
        for state in &self.states {
            let mut check = |branch: TransitionBranch, target: StateId| {
                if target != TERMINAL_STATE_ID && !self.index.contains_key(&target) {
                    dangling.push(DanglingTarget {
                        state_id: state.id,
                        branch,
                        target,
                    });
                }
            };
            check(TransitionBranch::Right, state.next.right);
            if !state.next.is_simple() {
                check(TransitionBranch::Left, state.next.left);
            }
        }
        dangling
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Termination {
    Completed,
    StateNotFound { id: StateId },
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EngineOutput {
    Text { text: String },
    Input { variable: String },
    End { termination: Termination },
}

#[cfg(test)]
mod types_tests {
    use super::*;

    #[test]
    fn next_is_simple_only_without_predicate() {
        assert!(Next::to(1).is_simple());
        assert!(!Next::branch("isEmpty({x})", 1, 2).is_simple());
    }

    #[test]
    fn script_rejects_duplicate_ids() {
        let error = Script::new(vec![
            State::new(0, "a", Next::to(1)),
            State::new(0, "b", Next::default()),
        ])
        .expect_err("duplicate ids should fail");
        assert_eq!(error.code, "SCRIPT_DUPLICATE_STATE_ID");
        assert_eq!(error.state_id, Some(0));
    }

    #[test]
    fn script_rejects_terminal_id() {
        let error = Script::new(vec![State::new(TERMINAL_STATE_ID, "x", Next::default())])
            .expect_err("reserved id should fail");
        assert_eq!(error.code, "SCRIPT_RESERVED_STATE_ID");
    }

    #[test]
    fn script_rejects_negative_ids() {
        let error = Script::new(vec![
            State::new(0, "a", Next::to(1)),
            State::new(-1, "b", Next::default()),
        ])
        .expect_err("negative id should fail");
        assert_eq!(error.code, "SCRIPT_INVALID_STATE_ID");
        assert_eq!(error.state_id, Some(-1));
    }

    #[test]
    fn get_state_finds_by_id_not_position() {
        let script = Script::new(vec![
            State::new(5, "five", Next::to(0)),
            State::new(0, "zero", Next::to(5)),
        ])
        .expect("script should build");

        assert_eq!(script.get_state(0).map(|state| state.text.as_str()), Some("zero"));
        assert_eq!(script.get_state(5).map(|state| state.text.as_str()), Some("five"));
        assert!(script.get_state(1).is_none());
        assert_eq!(script.len(), 2);
    }

    #[test]
    fn empty_script_has_no_start_state() {
        let script = Script::new(Vec::new()).expect("empty script is valid");
        assert!(script.is_empty());
        assert!(script.get_state(START_STATE_ID).is_none());
    }

    #[test]
    fn dangling_targets_skip_terminal_and_unused_left() {
        let script = Script::new(vec![
            State::new(0, "a", Next::to(1)),
            State::new(1, "b", Next::branch("isEmpty({x})", 0, 42)),
            State::new(2, "c", Next::to(TERMINAL_STATE_ID)),
            State::new(3, "d", Next::to(7)),
        ])
        .expect("script should build");

        assert_eq!(
            script.dangling_targets(),
            vec![
                DanglingTarget {
                    state_id: 1,
                    branch: TransitionBranch::Left,
                    target: 42,
                },
                DanglingTarget {
                    state_id: 3,
                    branch: TransitionBranch::Right,
                    target: 7,
                },
            ]
        );
    }

    #[test]
    fn state_deserialize_applies_defaults_and_aliases() {
        let parsed: State = serde_json::from_str(
            r#"{"id":3,"text":"hi","next":{"right":4,"right-if":"isEmpty({x})"}}"#,
        )
        .expect("state should deserialize");

        assert_eq!(parsed.before, "");
        assert_eq!(parsed.input, "");
        assert_eq!(parsed.next.right, 4);
        assert_eq!(parsed.next.right_if, "isEmpty({x})");
        assert_eq!(parsed.next.left, START_STATE_ID);

        let bare: State = serde_json::from_str(r#"{"id":1}"#).expect("bare state");
        assert_eq!(bare.next, Next::default());
        assert_eq!(bare.next.right, START_STATE_ID);

        let empty: State = serde_json::from_str(r#"{"id":2,"next":{}}"#).expect("empty next");
        assert_eq!(empty.next, Next::branch("", START_STATE_ID, START_STATE_ID));
    }

    #[test]
    fn engine_output_serializes_with_kind_tag() {
        let json = serde_json::to_string(&EngineOutput::End {
            termination: Termination::StateNotFound { id: 4 },
        })
        .expect("output should serialize");
        assert_eq!(
            json,
            r#"{"kind":"end","termination":{"stateNotFound":{"id":4}}}"#
        );
    }
}
