use anyhow::Result;
use clap::{Parser, Subcommand};
use ntm_core::PlatformTuple;

mod render;
mod upgrade;

#[derive(Parser, Debug)]
#[command(name = "ntm")]
#[command(about = "Multi-agent terminal session orchestrator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace this binary with the latest published release
    Upgrade(upgrade::UpgradeArgs),
    /// Print version information
    Version {
        /// Print only the version number
        #[arg(long)]
        short: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Upgrade(args) => upgrade::run(args),
        Commands::Version { short } => {
            let version = env!("CARGO_PKG_VERSION");
            if short {
                println!("{version}");
            } else {
                let platform = PlatformTuple::host(version);
                println!("ntm {version} ({}/{})", platform.os, platform.arch);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
