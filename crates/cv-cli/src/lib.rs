use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use cv_api::create_engine_from_path;
use cv_core::ConversationError;

mod check;
mod cli_args;
mod config;
mod error_map;
mod host;
mod line_player;

pub(crate) use check::{report_script, run_check};
pub(crate) use cli_args::{CheckArgs, Cli, Mode, PlayArgs};
pub(crate) use config::{load_player_config, PlayerConfig};
pub(crate) use error_map::{emit_error, map_cli_config_invalid, map_cli_config_read, map_cli_io};
pub(crate) use host::{host_actions, host_predicates, PrintQueue};
pub(crate) use line_player::run_line_player;
#[cfg(test)]
pub(crate) use line_player::{handle_player_command, run_line_player_with_io};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayerCommandAction {
    NotHandled,
    Continue,
    Quit,
}

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, ConversationError> {
    match cli.command {
        Mode::Play(args) => run_play(args),
        Mode::Check(args) => run_check(args),
    }
}

fn run_play(args: PlayArgs) -> Result<i32, ConversationError> {
    let mut config = load_player_config(args.config.as_deref().map(Path::new))?;
    if args.plain {
        config.color = false;
    }

    let prints = PrintQueue::default();
    let mut engine = create_engine_from_path(
        Path::new(&args.script),
        Some(Arc::new(host_actions(&prints))),
        Some(Arc::new(host_predicates())),
    )?;

    run_line_player(&mut engine, &config, &prints)
}
