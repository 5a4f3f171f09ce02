use clap::Parser;
use coinwatch::application::dashboard::DashboardOptions;
use coinwatch::application::resolver::Fetched;
use coinwatch::cli::commands::{Cli, Commands};
use coinwatch::CoinWatch;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cw = CoinWatch::new();

    if let Err(e) = run_command(&cw, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(cw: &CoinWatch, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Coins { page, per_page } => print_fetched(cw.get_coins(page, per_page).await?)?,
        Commands::Global => print_fetched(cw.get_global_stats().await?)?,
        Commands::Coin { id } => print_fetched(cw.get_coin_by_id(&id).await?)?,
        Commands::History { coin_id, days } => {
            print_fetched(cw.get_coin_history(&coin_id, days).await?)?
        }
        Commands::Trending => print_fetched(cw.get_trending_coins().await?)?,
        Commands::Search { query, raw } => {
            if raw {
                print_json(&cw.search_coins(&query).await?)?;
            } else {
                let found = cw.search_coins_intelligent(&query).await?;
                if found.is_fallback {
                    eprintln!("Upstream unavailable; showing cached data (may be stale)");
                }
                if found.results.is_empty() && !found.suggestions.is_empty() {
                    eprintln!("No matches for {query:?}; showing top coins instead");
                }
                print_json(&found)?;
            }
        }
        Commands::Pie => print_fetched(cw.get_top_coins_for_pie_chart().await?)?,
        Commands::Dashboard { per_page, coin, days } => {
            let options = DashboardOptions {
                coins_per_page: per_page,
                history_coin: coin,
                history_days: days,
                ..Default::default()
            };
            let result = cw.load_dashboard_data(&options).await;
            if result.is_stale() {
                let parts: Vec<String> = result.fallbacks_used.iter().map(|p| p.to_string()).collect();
                eprintln!("Stale data served for: {}", parts.join(", "));
            }
            for err in &result.errors {
                eprintln!("Failed to load {}: {}", err.kind, err.error);
            }
            print_json(&result)?;
        }
    }
    Ok(())
}

fn print_fetched<T: Serialize>(fetched: Fetched<T>) -> Result<(), serde_json::Error> {
    if fetched.is_fallback {
        eprintln!("Upstream unavailable; showing cached data (may be stale)");
    }
    print_json(&fetched.data)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
