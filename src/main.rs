use askdocs::cli::output::Output;
use askdocs::cli::{Cli, Commands};
use askdocs::{app, logging, Config};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let out = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        Some(Commands::Init { path, force }) => {
            askdocs::cli::init::run(&path, force, &out)?;
        }
        Some(Commands::Config { validate }) => {
            let mut config = Config::load(&cli.config)?;
            if let Some(server) = cli.server {
                config.server.base_url = server;
            }
            if validate {
                config.validate()?;
                out.success("Configuration is valid");
            } else {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
        None => {
            let mut config = Config::load(&cli.config)?;
            if let Some(server) = cli.server {
                config.server.base_url = server;
            }
            if cli.verbose {
                config.ui.log_level = "debug".to_string();
            }
            config.validate()?;

            let _guard = logging::init(&config.ui)?;
            tracing::info!(
                server = %config.server.base_url,
                version = env!("CARGO_PKG_VERSION"),
                "starting askdocs"
            );

            if let Err(e) = app::run(config).await {
                out.error(&e.to_string());
                return Err(e.into());
            }
        }
    }

    Ok(())
}
