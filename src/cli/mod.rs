// CLI module for administrative operations against the catalog database

pub mod migrate;
pub mod seed;

use clap::{Args, Parser, Subcommand};

use crate::app_data::AppData;

/// Catalog backend server and administrative commands
#[derive(Parser, Debug)]
#[command(name = "catalog-backend")]
#[command(about = "Item catalog administration backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Fill the catalog with generated sample items
    Seed(SeedArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SeedArgs {
    /// Total number of items to create
    #[arg(long, default_value_t = 250)]
    pub count: u64,

    /// Items inserted per statement
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: u64,

    /// Keep existing items instead of clearing the table first
    #[arg(long)]
    pub keep_existing: bool,
}

impl Cli {
    /// The subcommand to run, `serve` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

/// Execute an administrative CLI command
///
/// `serve` is handled by main and is a no-op here.
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(
    command: Commands,
    app_data: &AppData,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => {}
        Commands::Migrate => {
            migrate::run_migrations(&app_data.connections).await?;
        }
        Commands::Seed(args) => {
            let report = seed::seed_items(app_data, &args).await?;
            println!(
                "Seed complete: {} items created, {} removed",
                report.created, report.removed
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["catalog-backend"]).unwrap();

        assert_eq!(cli.command(), Commands::Serve);
    }

    #[test]
    fn test_seed_defaults() {
        let cli = Cli::try_parse_from(["catalog-backend", "seed"]).unwrap();

        assert_eq!(
            cli.command(),
            Commands::Seed(SeedArgs {
                count: 250,
                batch_size: 50,
                keep_existing: false,
            })
        );
    }

    #[test]
    fn test_seed_flags() {
        let cli = Cli::try_parse_from([
            "catalog-backend",
            "seed",
            "--count",
            "10",
            "--batch-size",
            "3",
            "--keep-existing",
        ])
        .unwrap();

        assert_eq!(
            cli.command(),
            Commands::Seed(SeedArgs {
                count: 10,
                batch_size: 3,
                keep_existing: true,
            })
        );
    }

    #[test]
    fn test_seed_rejects_zero_batch_size() {
        assert!(Cli::try_parse_from(["catalog-backend", "seed", "--batch-size", "0"]).is_err());
    }
}
