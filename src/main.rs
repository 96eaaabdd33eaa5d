use anyhow::Result;
use clap::Parser;
use courtside::cli::{self, Cli, Commands, ConfigCommand};
use courtside::config::Config;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.command {
        Commands::Backtest(args) => {
            let config = Config::load(&args.config)?;
            config.init_logging();
            cli::backtest::execute(&config, &args)?;
        }
        Commands::Config(ConfigCommand::Validate(arg)) => {
            if let Err(e) = cli::config::execute_validate(&arg.config) {
                cli::output::error(&format!("{} is invalid", arg.config.display()));
                return Err(e.into());
            }
        }
        Commands::Config(ConfigCommand::Show(arg)) => {
            cli::config::execute_show(&arg.config)?;
        }
    }

    Ok(())
}
