use clap::Parser;
use clap::Subcommand;
use cmd::command::generate;
use cmd::command::generate::Generate;
use cmd::command::init_db;
use cmd::command::init_db::InitDb;
use cmd::command::load;
use cmd::command::load::Load;
use cmd::config::Config;
use cmd::error::Result;
use cmd::tracing::LogLevel;
use tracing::error;
use tracing::info;

#[derive(Subcommand, Clone)]
enum Commands {
    /// Write a synthetic season of CSV extracts
    Generate(Generate),
    /// Create the analytics tables if they don't exist
    InitDb(InitDb),
    /// Load CSV extracts into the database
    Load(Load),
}

#[derive(Parser)]
#[command(propagate_version = true)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Overrides the configured log level
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Commands,
}

async fn run(args: &Cli, cfg: &Config) -> Result<()> {
    match &args.command {
        Commands::Generate(opts) => generate::run(opts)?,
        Commands::InitDb(_) => init_db::run(cfg).await?,
        Commands::Load(load) => {
            let summary = load::run(load, cfg).await?;
            info!("load finished in {} stages", summary.stages.len());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let config_path = match &args.command {
        Commands::Generate(_) => None,
        Commands::InitDb(init) => init.config.as_deref(),
        Commands::Load(load) => load.config.as_deref(),
    };
    let cfg = Config::load(config_path)?;
    cmd::tracing::init(args.log_level.unwrap_or(cfg.log.level))?;

    let version = env!("CARGO_PKG_VERSION");
    info!("hotel v{version}");

    if let Err(err) = run(&args, &cfg).await {
        error!("{err}");
        return Err(err);
    }

    Ok(())
}
