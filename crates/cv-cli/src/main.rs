use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Logs go to stderr so the stdout protocol stays clean; RUST_LOG enables them.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    std::process::exit(cv_cli::run_cli_from_args(std::env::args_os()));
}
