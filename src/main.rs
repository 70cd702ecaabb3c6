use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    AppContext, ConfigCommand, FoodCommand, GoalCommand, HistoryCommand, ProductCommand,
    WorkoutCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "fitcare")]
#[command(version)]
#[command(about = "Track food against your Fitness2Care calorie goal", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current calorie goal
    Goal(GoalCommand),

    /// Search the product catalogue
    Product(ProductCommand),

    /// Record and remove eaten food
    Food(FoodCommand),

    /// Show the running calorie totals of the current goal
    History(HistoryCommand),

    /// List workouts and attach them to the current goal
    Workout(WorkoutCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cli_config_path = cli.config.clone();
    let config = Config::load(cli.config)?;

    match &cli.command {
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path),
        Some(command) => {
            let ctx = AppContext::from_config(&config)?;
            execute_command(command, &ctx).await
        }
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}

async fn execute_command(
    command: &Commands,
    ctx: &AppContext<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Goal(cmd) => cmd.run(ctx).await,
        Commands::Product(cmd) => cmd.run(ctx).await,
        Commands::Food(cmd) => cmd.run(ctx).await,
        Commands::History(cmd) => cmd.run(ctx).await,
        Commands::Workout(cmd) => cmd.run(ctx).await,
        Commands::Config(cmd) => cmd.run(ctx.config, None),
    }
}
