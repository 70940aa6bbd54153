use std::fs;
use std::path::Path;

use cv_core::ConversationError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{map_cli_config_invalid, map_cli_config_read};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerConfig {
    #[serde(default = "default_true")]
    pub(crate) color: bool,
    #[serde(default = "default_prompt")]
    pub(crate) prompt: String,
    #[serde(default = "default_true")]
    pub(crate) end_marker: bool,
}

fn default_true() -> bool {
    true
}

fn default_prompt() -> String {
    "> ".to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            color: default_true(),
            prompt: default_prompt(),
            end_marker: default_true(),
        }
    }
}

pub(crate) fn load_player_config(path: Option<&Path>) -> Result<PlayerConfig, ConversationError> {
    let Some(path) = path else {
        return Ok(PlayerConfig::default());
    };

    if !path.exists() {
        return Err(ConversationError::new(
            "CLI_CONFIG_NOT_FOUND",
            format!("Config file does not exist: {}", path.display()),
        ));
    }

    let raw = fs::read_to_string(path).map_err(map_cli_config_read)?;
    let config: PlayerConfig = serde_json::from_str(&raw).map_err(map_cli_config_invalid)?;
    debug!(path = %path.display(), ?config, "loaded player config");
    Ok(config)
}
