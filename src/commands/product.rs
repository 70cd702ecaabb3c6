use clap::{Args, Subcommand};

use fitcare_core::ProductPage;

use super::{AppContext, OutputFormat};

#[derive(Args)]
pub struct ProductCommand {
    #[command(subcommand)]
    pub command: ProductSubcommand,
}

#[derive(Subcommand)]
pub enum ProductSubcommand {
    /// Search products by name
    Search {
        /// Product name (or part of it)
        name: String,

        /// Zero-based result page
        #[arg(long, short, default_value_t = 0)]
        page: u32,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ProductCommand {
    pub async fn run(&self, ctx: &AppContext<'_>) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ProductSubcommand::Search { name, page, format } => {
                let results = ctx.api().search_products(name, *page).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&results)?);
                    }
                    OutputFormat::Text => print!("{}", format_page(name, &results)),
                }
                Ok(())
            }
        }
    }
}

fn format_page(name: &str, page: &ProductPage) -> String {
    if page.content.is_empty() {
        return format!("No products found for '{}'.\n", name);
    }

    let mut out = String::new();
    for product in &page.content {
        out.push_str(&format!("{}\n", product));
    }
    out.push_str(&format!(
        "\nPage {} of {} ({} products)\n",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    ));
    if !page.is_last() {
        out.push_str(&format!("Next: --page {}\n", page.number + 1));
    }
    out
}
