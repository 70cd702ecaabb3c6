use clap::{Args, Subcommand};

use fitcare_core::{ConsumedItem, GramQuantity, Recorded, Removal};

use super::{parse_date, AppContext, OutputFormat};

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// Record eating a product
    Add {
        /// Product name to search for
        name: String,

        /// Pick the search result with this barcode instead of the first one
        #[arg(long, short)]
        barcode: Option<i64>,

        /// Amount eaten in grams (default: 100)
        #[arg(long, short, allow_hyphen_values = true)]
        grams: Option<String>,

        /// Goal date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Remove a recorded item
    Remove {
        /// Item ID as shown by `food list`
        item_id: String,

        /// Goal date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// List recorded items for the current goal
    List {
        /// Goal date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl FoodCommand {
    pub async fn run(&self, ctx: &AppContext<'_>) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FoodSubcommand::Add {
                name,
                barcode,
                grams,
                date,
            } => {
                // Validate before touching the network
                let grams = GramQuantity::parse(grams.as_deref())?;
                let date = parse_date(date.as_deref())?;
                let mut tracker = ctx.tracker(date).await?;

                let results = ctx.api().search_products(name, 0).await?;
                let product = results.pick(*barcode).ok_or_else(|| match barcode {
                    Some(code) => format!("No product '{}' with barcode {}", name, code),
                    None => format!("No products found for '{}'", name),
                })?;

                let recorded = tracker.add(product, grams).await?;
                print!("{}", format_recorded(&recorded));
                Ok(())
            }

            FoodSubcommand::Remove { item_id, date } => {
                let date = parse_date(date.as_deref())?;
                let mut tracker = ctx.tracker(date).await?;

                match tracker.remove(item_id).await? {
                    Removal::Removed(removed) => {
                        println!(
                            "Removed {} ({} kcal). Remaining: {} kcal",
                            removed.item.product_name, removed.item.kcal, removed.goal.kcal
                        );
                    }
                    Removal::NotFound => {
                        println!("No recorded item with ID {}", item_id);
                    }
                }
                Ok(())
            }

            FoodSubcommand::List { date, format } => {
                let date = parse_date(date.as_deref())?;
                let tracker = ctx.tracker(date).await?;
                let items = tracker.consumed_items()?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&items)?);
                    }
                    OutputFormat::Text => print!("{}", format_items(&items)),
                }
                Ok(())
            }
        }
    }
}

fn format_recorded(recorded: &Recorded) -> String {
    let mut out = format!(
        "Added {} ({}g): -{} kcal. Remaining: {} kcal\n",
        recorded.item.product_name, recorded.item.grams, recorded.item.kcal, recorded.goal.kcal
    );
    if recorded.will_exceed {
        out.push_str(&format!(
            "Warning: goal exceeded by {} kcal\n",
            -recorded.goal.kcal
        ));
    }
    out
}

fn format_items(items: &[ConsumedItem]) -> String {
    if items.is_empty() {
        return "No food recorded for this goal.\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        out.push_str(&format!("{}  [{}]\n", item, item.id));
    }
    let total: i64 = items.iter().map(|i| i.kcal).sum();
    out.push_str(&format!("\n{} item(s), {} kcal total\n", items.len(), total));
    out
}
