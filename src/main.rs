use std::error::Error;
use std::io;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use reqres_cli::cli::{Cli, Commands, UserCommands};
use reqres_cli::commands;
use reqres_cli::config::Config;
use reqres_cli::error::Result;
use reqres_cli::{logging, output, queue};
use reqres_cli::{ReqwestTransport, Transport, UserService};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    output::set_json_output(cli.json);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "reqres", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run()?;
        }
        // Commands that require config and client
        command => {
            let config = Config::load()?;
            let endpoint = config.endpoint(cli.timeout)?;
            tracing::debug!(base_url = %endpoint.base_url, timeout = ?endpoint.timeout, "using endpoint");

            // Completions run on this task while it drives the loop.
            let (response_queue, mut response_loop) = queue::channel();
            let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new());
            let service = Arc::new(UserService::new(
                transport,
                endpoint,
                response_queue,
                tokio::runtime::Handle::current(),
            ));

            match command {
                Commands::Users(args) => {
                    commands::users::list(&service, &mut response_loop, args.page).await?;
                }
                Commands::User { action } => match action {
                    UserCommands::Show(args) => {
                        commands::users::show(&service, &mut response_loop, args).await?;
                    }
                    UserCommands::Avatar(args) => {
                        commands::avatar::download(&service, args).await?;
                    }
                },
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
