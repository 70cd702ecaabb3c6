mod config_cmd;
mod food;
mod goal;
mod history;
mod product;
mod workout;

pub use config_cmd::ConfigCommand;
pub use food::FoodCommand;
pub use goal::GoalCommand;
pub use history::HistoryCommand;
pub use product::ProductCommand;
pub use workout::WorkoutCommand;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use std::sync::Arc;
use std::time::Duration;

use fitcare_core::{CalorieTracker, GoalApi, HttpGoalApi, LedgerStores, Reconciler};

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parses a `YYYY-MM-DD` argument, defaulting to today.
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate, String> {
    match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", d)),
        None => Ok(Local::now().date_naive()),
    }
}

/// Services a command runs against, built once from the configuration.
pub struct AppContext<'a> {
    pub config: &'a Config,
    pub reconciler: Reconciler,
}

impl<'a> AppContext<'a> {
    pub fn from_config(config: &'a Config) -> Result<Self, Box<dyn std::error::Error>> {
        let api = HttpGoalApi::with_timeout(
            config.api_url.value.clone(),
            Duration::from_secs(config.request_timeout_secs.value),
        )?;
        let stores = LedgerStores::json(&config.data_dir.value);
        tracing::debug!(
            "Ledger documents in {}, goal service at {}",
            config.data_dir.value.display(),
            api.server_url()
        );

        Ok(Self {
            config,
            reconciler: Reconciler::new(stores, Arc::new(api)),
        })
    }

    pub fn api(&self) -> &Arc<dyn GoalApi> {
        self.reconciler.api()
    }

    /// A tracking session with the member's goal for `date` loaded.
    pub async fn tracker(
        &self,
        date: NaiveDate,
    ) -> Result<CalorieTracker, Box<dyn std::error::Error>> {
        let member_id = self.config.require_member_id()?;
        let mut tracker = CalorieTracker::new(self.reconciler.clone());
        tracker.load_goal(member_id, date).await.map_err(|e| {
            format!(
                "No current goal for member {} on {}: {}",
                member_id, date, e
            )
        })?;
        Ok(tracker)
    }
}
