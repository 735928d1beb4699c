mod build;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use wikigraph_core::{Config, Identity};

#[derive(Parser)]
#[command(name = "wikigraph")]
#[command(about = "Extract a knowledge graph from a wiki page tree", long_about = None)]
struct Cli {
    /// Config file (defaults to ./wikigraph.toml, then the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Page directory, overriding the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph once and print it as JSON
    Build {
        /// Build as this user (anonymous if omitted)
        #[arg(long)]
        user: Option<String>,
        /// Group membership of the acting user (repeatable)
        #[arg(long = "group")]
        groups: Vec<String>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Serve the graph over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Open the graph endpoint in a browser
        #[arg(long)]
        open: bool,
    },
    /// Print the default configuration
    Config,
}

fn load_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        None => Config::load().wrap_err("failed to load configuration")?,
    };

    if let Some(dir) = &cli.data_dir {
        config.corpus.data_dir = dir.to_string_lossy().to_string();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("wikigraph=info".parse()?))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Build {
            user,
            groups,
            output,
            pretty,
        } => {
            let config = load_config(&cli)?;
            let identity = Identity {
                user: user.clone(),
                groups: groups.clone(),
            };
            build::run(
                &config,
                build::BuildOptions {
                    identity,
                    output: output.clone(),
                    pretty: *pretty,
                },
            )
            .await?;
        }
        Commands::Serve { port, open } => {
            let mut config = load_config(&cli)?;
            if let Some(port) = port {
                config.server.port = *port;
            }
            if *open {
                config.server.open_browser = true;
            }
            serve::start_server(&config).await?;
        }
        Commands::Config => {
            print!("{}", Config::default_config_string());
        }
    }

    Ok(())
}
