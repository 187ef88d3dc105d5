use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use vimgolf::App;
use vimgolf::args::Cli;
use vimgolf::config::Config;
use vimgolf::error::CliError;
use vimgolf::{logging, output};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(err) = color_eyre::install() {
        eprintln!("{}", err);
    }

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        if let Err(err) = Cli::command().print_help() {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            output::error(format!("Error: {}", err));
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.paths.ensure() {
        output::error(format!("Error: {}", err));
        return ExitCode::FAILURE;
    }
    // a broken log directory should not stop the game
    if let Err(err) = logging::init(&config.paths.log_dir()) {
        output::error(format!("Logging is disabled: {}", err));
    }

    let app = App::new(config);
    match app.run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:?}", err);
            for (idx, cause) in err.chain().enumerate() {
                if idx == 0 {
                    output::error(format!("Error: {}", cause));
                } else {
                    output::error(format!("  caused by: {}", cause));
                }
            }
            if let Some(hint) = err.downcast_ref::<CliError>().and_then(CliError::hint) {
                output::info(hint);
            }
            ExitCode::FAILURE
        }
    }
}
