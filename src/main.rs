use clap::Parser;

use marquee_rs::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match cli::load_and_merge_config(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{:#}", e);
            eprintln!("{}", Cli::get_validation_help());
            std::process::exit(1);
        }
    };

    // dry runs print their own report, a subscriber would only add noise
    if !cli.dry_run() {
        cli::init_logger_from_settings(&settings)?;
    }

    if let Err(e) = cli::execute_command(&cli, settings).await {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
