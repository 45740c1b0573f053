mod cli;
mod commands;
mod logging;
mod report;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::ProcessArgs;
use parcelamento::StatusFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_format)?;

    tracing::debug!("parcelamento v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Process {
            archive,
            output,
            search,
            rf,
            pgfn,
            json,
            workers,
            no_progress,
        } => {
            let config = commands::resolve_config(cli.config.as_deref())?;
            let args = ProcessArgs {
                archive,
                output,
                search,
                status: StatusFilter {
                    receita_federal: rf,
                    pgfn,
                },
                json,
                workers,
                show_progress: !no_progress,
            };
            commands::run_process(args, config)
        }
        Commands::Classify { file } => commands::run_classify(&file),
    }
}
