pub mod builtins;
mod engine;
mod io;
mod registry;

pub use engine::{ConversationEngine, ConversationEngineOptions, HookPoint};
pub use io::{InputSource, LineInput, OutputSink, RecordingOutput, ScriptedInput, WriterOutput};
pub use registry::{Action, ActionRegistry, Predicate, PredicateRegistry, Registry};
