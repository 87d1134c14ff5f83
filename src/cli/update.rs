//! Update command implementation

use crate::auth::{Authenticator, AuthenticatorConfig};
use crate::config::{resolve_config_path, Config};
use crate::error::SyncError;
use crate::market::{CmcClient, CmcConfig};
use crate::sheets::{SheetsClient, SheetsConfig};
use crate::update;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Assemble and print the batch payload without writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl UpdateArgs {
    pub async fn execute(&self, config: &Config) -> Result<(), SyncError> {
        let authenticator = Authenticator::new(AuthenticatorConfig {
            // The client secret co-resides with the executable, like the config
            client_secret_path: resolve_config_path(&config.auth.client_secret_path),
            token_cache_path: config.auth.token_cache_path.clone(),
        })
        .map_err(SyncError::Auth)?;
        let access_token = authenticator.access_token().await.map_err(SyncError::Auth)?;

        let sheets_config = SheetsConfig::new(&config.spreadsheet.spreadsheet_id);
        let store = SheetsClient::new(sheets_config, access_token).map_err(SyncError::SheetRead)?;

        let market = CmcClient::with_config(CmcConfig {
            base_url: config.market.base_url.clone(),
            timeout: Duration::from_secs(config.market.timeout_secs),
            limit: config.market.limit,
        })
        .map_err(SyncError::TickerFetch)?;

        if self.dry_run {
            let data = update::prepare_batch(&store, &market, &config.spreadsheet).await?;
            let json = serde_json::to_string_pretty(&data)
                .map_err(|e| SyncError::BatchWrite(e.into()))?;
            println!("{}", json);
            tracing::info!("Dry run: batch payload printed, nothing written");
            return Ok(());
        }

        update::run_cycle(&store, &market, &config.spreadsheet).await?;
        Ok(())
    }
}
