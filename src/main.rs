use clap::Parser;
use mobsast::{handle_delete, handle_run, Cli};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(ref hash) = cli.delete {
        return handle_delete(hash);
    }

    handle_run()
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "mobsast=debug" } else { "mobsast=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
