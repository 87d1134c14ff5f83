use clap::Parser;
use sheet_ticker::cli::{Cli, Commands};
use sheet_ticker::config::Config;
use sheet_ticker::error::SyncError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), SyncError> {
    let config = Config::load(&cli.config)?;

    if let Err(e) = sheet_ticker::telemetry::init_telemetry(&config.telemetry) {
        eprintln!("Warning: telemetry init failed: {}", e);
    }

    match cli.command {
        Commands::Update(args) => {
            tracing::info!(spreadsheet_id = %config.spreadsheet.spreadsheet_id, "Starting update run");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Spreadsheet: {}", config.spreadsheet.spreadsheet_id);
            println!(
                "  Ranges: time={} symbols={} prices={}",
                config.spreadsheet.update_time_range_name,
                config.spreadsheet.crypto_ticker_range_name,
                config.spreadsheet.to_write_range_name
            );
            println!("  Value input: {:?}", config.spreadsheet.value_input_option);
            println!("  Market: {} (limit {})", config.market.base_url, config.market.limit);
        }
    }

    Ok(())
}
