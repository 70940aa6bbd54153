use std::io::{self, Write};
use std::path::Path;

use cv_api::load_script;
use cv_core::{ConversationError, Script, TransitionBranch};
use tracing::warn;

use crate::{map_cli_io, CheckArgs};

pub(crate) fn run_check(args: CheckArgs) -> Result<i32, ConversationError> {
    let script = load_script(Path::new(&args.script))?;
    let mut writer = io::stdout();
    report_script(&script, &mut writer)?;
    Ok(0)
}

pub(crate) fn report_script(script: &Script, writer: &mut dyn Write) -> Result<(), ConversationError> {
    writeln!(writer, "RESULT:OK").map_err(map_cli_io)?;
    writeln!(writer, "STATES:{}", script.len()).map_err(map_cli_io)?;

    for state in script.states() {
        let input = if state.input.is_empty() {
            String::new()
        } else {
            format!(" input={}", state.input)
        };
        writeln!(writer, "STATE:{}{}", state.id, input).map_err(map_cli_io)?;
    }

    for dangling in script.dangling_targets() {
        let branch = match dangling.branch {
            TransitionBranch::Right => "right",
            TransitionBranch::Left => "left",
        };
        warn!(
            state_id = dangling.state_id,
            branch,
            target = dangling.target,
            "transition target has no state"
        );
        writeln!(
            writer,
            "WARN_DANGLING:state={} branch={} target={}",
            dangling.state_id, branch, dangling.target
        )
        .map_err(map_cli_io)?;
    }

    Ok(())
}
