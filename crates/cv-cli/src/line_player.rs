use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use cv_core::{ConversationError, EngineOutput, Termination};
use cv_runtime::ConversationEngine;
use tracing::info;

use crate::{map_cli_io, PlayerCommandAction, PlayerConfig, PrintQueue};

const HELP_LINE: &str = "commands: :help :restart :quit";

pub(crate) fn run_line_player(
    engine: &mut ConversationEngine,
    config: &PlayerConfig,
    prints: &PrintQueue,
) -> Result<i32, ConversationError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_line_player_with_io(engine, config, prints, &mut reader, &mut writer)
}

pub(crate) fn run_line_player_with_io(
    engine: &mut ConversationEngine,
    config: &PlayerConfig,
    prints: &PrintQueue,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, ConversationError> {
    writeln!(writer, "{}", HELP_LINE).map_err(map_cli_io)?;

    loop {
        let output = engine.next_output();
        flush_prints(prints, config, writer)?;
        match output? {
            EngineOutput::Text { text } => {
                if config.color {
                    writeln!(writer, "{}", text.as_str().green()).map_err(map_cli_io)?;
                } else {
                    writeln!(writer, "{}", text).map_err(map_cli_io)?;
                }
            }
            EngineOutput::Input { .. } => {
                let raw = prompt_input_from(&config.prompt, reader, writer)
                    .map_err(|error| engine.abort(error))?;
                let line = raw.trim();
                let mut emit = |message: &str| writeln!(writer, "{}", message);
                match handle_player_command(line, engine, &mut emit).map_err(map_cli_io)? {
                    PlayerCommandAction::Continue => continue,
                    PlayerCommandAction::Quit => return Ok(0),
                    PlayerCommandAction::NotHandled => engine.submit_input(line)?,
                }
            }
            EngineOutput::End { termination } => {
                info!(?termination, "conversation ended");
                if config.end_marker {
                    writeln!(writer, "{}", end_marker(&termination)).map_err(map_cli_io)?;
                }
                return Ok(0);
            }
        }
    }
}

fn flush_prints(
    prints: &PrintQueue,
    config: &PlayerConfig,
    writer: &mut dyn Write,
) -> Result<(), ConversationError> {
    for line in prints.drain() {
        if config.color {
            writeln!(writer, "{}", line.as_str().blue()).map_err(map_cli_io)?;
        } else {
            writeln!(writer, "{}", line).map_err(map_cli_io)?;
        }
    }
    Ok(())
}

fn end_marker(termination: &Termination) -> String {
    match termination {
        Termination::Completed => "[END]".to_string(),
        Termination::StateNotFound { id } => format!("[END] no state {}", id),
        Termination::Failed => "[END] failed".to_string(),
    }
}

pub(crate) fn handle_player_command(
    raw: &str,
    engine: &mut ConversationEngine,
    emit: &mut dyn FnMut(&str) -> io::Result<()>,
) -> io::Result<PlayerCommandAction> {
    match raw {
        ":help" => {
            emit(HELP_LINE)?;
            Ok(PlayerCommandAction::Continue)
        }
        ":restart" => {
            engine.restart();
            emit("restarted")?;
            Ok(PlayerCommandAction::Continue)
        }
        ":quit" => {
            emit("bye")?;
            Ok(PlayerCommandAction::Quit)
        }
        _ => Ok(PlayerCommandAction::NotHandled),
    }
}

pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<String, ConversationError> {
    write!(writer, "{}", prefix).map_err(map_cli_io)?;
    writer.flush().map_err(map_cli_io)?;
    let mut input = String::new();
    let read = reader.read_line(&mut input).map_err(map_cli_io)?;
    if read == 0 {
        return Err(ConversationError::new(
            "INPUT_EOF",
            "Input stream ended before a line was available.",
        ));
    }
    Ok(input.trim_end_matches(&['\r', '\n'][..]).to_string())
}
