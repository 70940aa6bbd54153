use cv_core::ConversationError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> ConversationError {
    ConversationError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: ConversationError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    if let Some(state_id) = error.state_id {
        println!("ERROR_STATE:{}", state_id);
    }
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).unwrap_or_else(|_| "\"\"".to_string())
    );
    1
}

pub(crate) fn map_cli_io(error: std::io::Error) -> ConversationError {
    map_error("CLI_IO", error)
}

pub(crate) fn map_cli_config_read(error: std::io::Error) -> ConversationError {
    map_error("CLI_CONFIG_READ", error)
}

pub(crate) fn map_cli_config_invalid(error: serde_json::Error) -> ConversationError {
    map_error("CLI_CONFIG_INVALID", error)
}

#[cfg(test)]
mod error_map_tests {
    use super::*;

    #[test]
    fn emit_error_returns_non_zero_exit_code() {
        let code = emit_error(ConversationError::at_state("ERR", "failed", 3));
        assert_eq!(code, 1);
    }

    #[test]
    fn mapping_helpers_keep_error_codes() {
        assert_eq!(map_cli_io(std::io::Error::other("io")).code, "CLI_IO");
        assert_eq!(
            map_cli_config_read(std::io::Error::other("read")).code,
            "CLI_CONFIG_READ"
        );

        let invalid = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        assert_eq!(map_cli_config_invalid(invalid).code, "CLI_CONFIG_INVALID");
    }
}
