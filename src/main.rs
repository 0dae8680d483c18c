use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use signforge::config::EngineConfig;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hand-gesture recognition from landmark frames", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with engine settings; explicit flags still win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify every frame of a recording independently.
    Classify(cmd::classify::ClassifyArgs),
    /// Run a recording through the confirmation engine.
    Replay(cmd::replay::ReplayArgs),
    /// Drive the engine from the simulated detector.
    Simulate(cmd::simulate::SimulateArgs),
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// File settings as the base, explicit CLI flags on top.
fn resolve_engine_config(
    path: &Option<String>,
    cli_engine: &EngineConfig,
    sub_matches: &ArgMatches,
) -> EngineConfig {
    let mut config = match path {
        Some(p) => {
            info!("⚙️  Loading engine config from: {}", p);
            EngineConfig::load_from_file(p).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            })
        }
        None => return cli_engine.clone(),
    };

    config.merge_from_cli(cli_engine, sub_matches);
    if let Err(e) = config.validate() {
        error!("{}", e);
        process::exit(1);
    }
    config
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Classify(args) => cmd::classify::run(&args),
        Commands::Replay(args) => {
            let sub = matches
                .subcommand_matches("replay")
                .expect("clap dispatched the replay subcommand");
            let engine = resolve_engine_config(&cli.config, &args.engine, sub);
            cmd::replay::run(&args, engine)
        }
        Commands::Simulate(args) => {
            let sub = matches
                .subcommand_matches("simulate")
                .expect("clap dispatched the simulate subcommand");
            let engine = resolve_engine_config(&cli.config, &args.engine, sub);
            cmd::simulate::run(&args, engine)
        }
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
