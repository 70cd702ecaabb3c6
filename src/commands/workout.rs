use clap::{Args, Subcommand};

use fitcare_core::{Goal, WorkoutId};

use super::{parse_date, AppContext, OutputFormat};

#[derive(Args)]
pub struct WorkoutCommand {
    #[command(subcommand)]
    pub command: WorkoutSubcommand,
}

#[derive(Subcommand)]
pub enum WorkoutSubcommand {
    /// List available workouts
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Attach a workout to the current goal
    Attach {
        /// Workout ID
        workout_id: WorkoutId,

        /// Goal date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Detach a workout from the current goal
    Detach {
        /// Workout ID
        workout_id: WorkoutId,

        /// Goal date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },
}

impl WorkoutCommand {
    pub async fn run(&self, ctx: &AppContext<'_>) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            WorkoutSubcommand::List { format } => {
                let workouts = ctx.api().list_workouts().await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&workouts)?);
                    }
                    OutputFormat::Text => {
                        if workouts.is_empty() {
                            println!("No workouts available.");
                        }
                        for workout in &workouts {
                            print!("[{}] {}", workout.workout_id, workout);
                        }
                    }
                }
                Ok(())
            }

            WorkoutSubcommand::Attach { workout_id, date } => {
                let goal = self.current_goal(ctx, date.as_deref()).await?;
                let updated = ctx
                    .api()
                    .add_workout_to_goal(goal.goal_id, *workout_id)
                    .await?;
                println!("Attached workout {} to '{}'.", workout_id, updated.goal_name);
                print_burned(&updated);
                Ok(())
            }

            WorkoutSubcommand::Detach { workout_id, date } => {
                let goal = self.current_goal(ctx, date.as_deref()).await?;
                let updated = ctx
                    .api()
                    .remove_workout_from_goal(goal.goal_id, *workout_id)
                    .await?;
                println!("Detached workout {} from '{}'.", workout_id, updated.goal_name);
                print_burned(&updated);
                Ok(())
            }
        }
    }

    async fn current_goal(
        &self,
        ctx: &AppContext<'_>,
        date: Option<&str>,
    ) -> Result<Goal, Box<dyn std::error::Error>> {
        let date = parse_date(date)?;
        let tracker = ctx.tracker(date).await?;
        Ok(tracker.goal().cloned().ok_or("No current goal")?)
    }
}

fn print_burned(goal: &Goal) {
    println!(
        "{} workout(s) attached, {} kcal burned",
        goal.workouts.len(),
        goal.workout_kcal()
    );
}
