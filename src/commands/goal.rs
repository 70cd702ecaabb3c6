use clap::{Args, Subcommand};

use super::{parse_date, AppContext, OutputFormat};

#[derive(Args)]
pub struct GoalCommand {
    #[command(subcommand)]
    pub command: GoalSubcommand,
}

#[derive(Subcommand)]
pub enum GoalSubcommand {
    /// Show the member's current goal
    Show {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl GoalCommand {
    pub async fn run(&self, ctx: &AppContext<'_>) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            GoalSubcommand::Show { date, format } => {
                let date = parse_date(date.as_deref())?;
                let tracker = ctx.tracker(date).await?;
                let goal = tracker.goal().ok_or("No current goal")?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(goal)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", goal);
                        println!("ID: {}", goal.goal_id);
                        if !goal.workouts.is_empty() {
                            println!("Burned by workouts: {} kcal", goal.workout_kcal());
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
