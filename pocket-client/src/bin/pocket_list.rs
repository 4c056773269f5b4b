use anyhow::{Context, Result};
use clap::Parser;
use pocket_client::{Pocket, DEFAULT_BASE_URL};

/// List the articles saved in a Pocket account
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pocket application consumer key
    #[arg(long)]
    consumer_key: String,

    /// Access token for the account
    #[arg(long)]
    access_token: String,

    /// Print the articles as JSON instead of a listing
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let pocket = Pocket::new(cli.consumer_key, cli.access_token)
        .context("Failed to create Pocket client")?
        .with_base_url(cli.base_url);
    let articles = pocket.get().context("Failed to retrieve Pocket articles")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&articles)
            .context("Failed to serialize Pocket articles")?;
        println!("{}", json);
        return Ok(());
    }

    println!("Found {} saved articles", articles.len());
    for (index, article) in articles.iter().enumerate() {
        println!("{}. {} [{}]", index + 1, article.title(), article.item_id);
        println!("   URL: {}", article.url().unwrap_or("(none)"));
    }

    Ok(())
}
