use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cv-cli")]
#[command(about = "Scripted conversation player")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Play(PlayArgs),
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub(crate) struct PlayArgs {
    #[arg(long = "script")]
    pub(crate) script: String,
    #[arg(long = "config")]
    pub(crate) config: Option<String>,
    #[arg(long = "plain")]
    pub(crate) plain: bool,
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    #[arg(long = "script")]
    pub(crate) script: String,
}
