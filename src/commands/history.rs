use clap::Args;

use fitcare_core::CalorieHistoryItem;

use super::{parse_date, AppContext, OutputFormat};

pub const EMPTY_HISTORY: &str = "No calorie history yet. Add food to start tracking.";

#[derive(Args)]
pub struct HistoryCommand {
    /// Read the local history of this goal ID without contacting the service
    #[arg(long, short, conflicts_with = "date")]
    goal: Option<i64>,

    /// Goal date (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    date: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl HistoryCommand {
    pub async fn run(&self, ctx: &AppContext<'_>) -> Result<(), Box<dyn std::error::Error>> {
        let history = match self.goal {
            Some(goal_id) => ctx.reconciler.load_history(goal_id)?,
            None => {
                let date = parse_date(self.date.as_deref())?;
                ctx.tracker(date).await?.history()?
            }
        };

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&history)?);
            }
            OutputFormat::Text => print!("{}", format_history(&history)),
        }
        Ok(())
    }
}

fn format_history(history: &[CalorieHistoryItem]) -> String {
    let Some(first) = history.first() else {
        return format!("{}\n", EMPTY_HISTORY);
    };

    let mut out = format!("Daily budget: {} kcal\n\n", first.initial_kcal);
    out.push_str(&format!(
        "{:<17}  {:>9}  {:>9}\n",
        "Time", "Consumed", "Remaining"
    ));
    out.push_str(&format!("{}\n", "-".repeat(39)));
    for point in history {
        out.push_str(&format!(
            "{:<17}  {:>9}  {:>9}\n",
            point.date.format("%Y-%m-%d %H:%M"),
            point.consumed_kcal,
            point.remaining_kcal
        ));
    }
    out
}
