pub mod error;
pub mod expr;
pub mod memory;
pub mod types;

pub use error::ConversationError;
pub use expr::{extract_function_name, extract_variable_name, render_text, Expression};
pub use memory::Memory;
pub use types::*;
