use std::fmt;
use std::sync::Arc;

use cv_core::{
    render_text, ConversationError, EngineOutput, Expression, Memory, Script, State, StateId,
    Termination, START_STATE_ID, TERMINAL_STATE_ID,
};
use tracing::{debug, error, info};

use crate::io::{InputSource, OutputSink};
use crate::registry::{ActionRegistry, PredicateRegistry};

#[derive(Clone)]
pub struct ConversationEngineOptions {
    pub script: Arc<Script>,
    pub actions: Option<Arc<ActionRegistry>>,
    pub predicates: Option<Arc<PredicateRegistry>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPoint {
    Before,
    After,
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Enter,
    AwaitingInput,
    Resolve,
    Ended(Termination),
}

pub struct ConversationEngine {
    script: Arc<Script>,
    actions: Arc<ActionRegistry>,
    predicates: Arc<PredicateRegistry>,
    memory: Memory,
    cursor: StateId,
    phase: Phase,
}

impl ConversationEngine {
    pub fn new(options: ConversationEngineOptions) -> Self {
        Self {
            script: options.script,
            actions: options.actions.unwrap_or_default(),
            predicates: options.predicates.unwrap_or_default(),
            memory: Memory::new(),
            cursor: START_STATE_ID,
            phase: Phase::Enter,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn cursor(&self) -> StateId {
        self.cursor
    }

    pub fn termination(&self) -> Option<&Termination> {
        match &self.phase {
            Phase::Ended(termination) => Some(termination),
            _ => None,
        }
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.phase == Phase::AwaitingInput
    }

    pub fn restart(&mut self) {
        debug!("conversation restarted");
        self.memory = Memory::new();
        self.cursor = START_STATE_ID;
        self.phase = Phase::Enter;
    }

    pub fn abort(&mut self, error: ConversationError) -> ConversationError {
        error!(state_id = self.cursor, error = %error, "run aborted by host");
        self.fail(error)
    }

    pub fn next_output(&mut self) -> Result<EngineOutput, ConversationError> {
        loop {
            match self.phase.clone() {
                Phase::Ended(termination) => return Ok(EngineOutput::End { termination }),
                Phase::AwaitingInput => {
                    let state = self.current_state()?;
                    return Ok(EngineOutput::Input {
                        variable: state.input.clone(),
                    });
                }
                Phase::Resolve => self.leave_state()?,
                Phase::Enter => {
                    if let Some(text) = self.enter_state()? {
                        return Ok(EngineOutput::Text { text });
                    }
                }
            }
        }
    }

    pub fn submit_input(&mut self, line: &str) -> Result<(), ConversationError> {
        if self.phase != Phase::AwaitingInput {
            return Err(ConversationError::new(
                "ENGINE_NO_PENDING_INPUT",
                "No pending input is available.",
            ));
        }

        let variable = self.current_state()?.input.clone();
        debug!(state_id = self.cursor, %variable, "input stored");
        self.memory.set(variable, line);
        self.phase = Phase::Resolve;
        Ok(())
    }

    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        output: &mut dyn OutputSink,
    ) -> Result<Termination, ConversationError> {
        info!(states = self.script.len(), "conversation run started");
        loop {
            match self.next_output()? {
                EngineOutput::Text { text } => {
                    output.emit(&text).map_err(|error| self.fail(error))?;
                }
                EngineOutput::Input { .. } => {
                    let line = input.read_line().map_err(|error| self.fail(error))?;
                    self.submit_input(&line)?;
                }
                EngineOutput::End { termination } => {
                    info!(?termination, "conversation run finished");
                    return Ok(termination);
                }
            }
        }
    }

    fn enter_state(&mut self) -> Result<Option<String>, ConversationError> {
        if self.cursor == TERMINAL_STATE_ID {
            self.phase = Phase::Ended(Termination::Completed);
            return Ok(None);
        }

        let script = Arc::clone(&self.script);
        let Some(state) = script.get_state(self.cursor) else {
            debug!(state_id = self.cursor, "no state for cursor");
            self.phase = Phase::Ended(Termination::StateNotFound { id: self.cursor });
            return Ok(None);
        };

        debug!(state_id = state.id, "entering state");
        self.invoke_hook(state, HookPoint::Before)?;

        let text = render_text(&state.text, &self.memory);
        self.phase = if state.input.is_empty() {
            Phase::Resolve
        } else {
            Phase::AwaitingInput
        };
        Ok(Some(text))
    }

    fn leave_state(&mut self) -> Result<(), ConversationError> {
        let script = Arc::clone(&self.script);
        let state = script.get_state(self.cursor).ok_or_else(|| self.missing_state())?;

        let next_id = self.resolve_next(state);
        self.invoke_hook(state, HookPoint::After)?;

        debug!(from = state.id, to = next_id, "transition");
        self.cursor = next_id;
        self.phase = Phase::Enter;
        Ok(())
    }

    fn resolve_next(&self, state: &State) -> StateId {
        let next = &state.next;
        if next.is_simple() {
            return next.right;
        }

        let expression = Expression::parse(&next.right_if);
        match self.predicates.lookup(expression.function) {
            Some(predicate) => {
                if predicate.test(self.memory.get(expression.variable)) {
                    next.right
                } else {
                    next.left
                }
            }
            None => {
                debug!(
                    state_id = state.id,
                    predicate = expression.function,
                    "predicate not registered, taking right branch"
                );
                next.right
            }
        }
    }

    fn invoke_hook(&mut self, state: &State, point: HookPoint) -> Result<(), ConversationError> {
        let raw = match point {
            HookPoint::Before => &state.before,
            HookPoint::After => &state.after,
        };
        if raw.is_empty() {
            return Ok(());
        }

        let expression = Expression::parse(raw);
        let actions = Arc::clone(&self.actions);
        let Some(action) = actions.lookup(expression.function) else {
            debug!(
                state_id = state.id,
                %point,
                action = expression.function,
                "action not registered, skipping hook"
            );
            return Ok(());
        };

        let argument = self.memory.get(expression.variable).to_string();
        debug!(state_id = state.id, %point, action = expression.function, "invoking action");
        action.invoke(&argument, &mut self.memory).map_err(|failure| {
            error!(
                state_id = state.id,
                %point,
                action = expression.function,
                error = %failure,
                "action failed"
            );
            self.fail(failure)
        })
    }

    fn current_state(&self) -> Result<&State, ConversationError> {
        self.script
            .get_state(self.cursor)
            .ok_or_else(|| self.missing_state())
    }

    fn missing_state(&self) -> ConversationError {
        ConversationError::at_state(
            "ENGINE_STATE_MISSING",
            format!("State {} disappeared during the run.", self.cursor),
            self.cursor,
        )
    }

    fn fail(&mut self, error: ConversationError) -> ConversationError {
        self.phase = Phase::Ended(Termination::Failed);
        error.with_state_id(self.cursor)
    }
}
