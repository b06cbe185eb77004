use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use listing_search::clock::{Clock, SystemClock};
use listing_search::harness::{
    InMemoryProbe, SuiteConfig, builtin_scenarios, quick_benchmark, render_report, run_suite,
    sample_dataset,
};
use listing_search::{
    RankingWeights, SearchQuery, SearchableEntity, SortBy, TypeFilter, generate_analytics, search,
};

#[derive(Parser)]
#[command(name = "lsearch", version, about = "Search ranking engine for local business listings")]
struct Cli {
    /// Emit machine-readable JSON instead of human output.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one query over a dataset and print the ranked results.
    Search {
        /// Query text; omit to browse.
        #[arg(short, long)]
        query: Option<String>,
        /// Listing kind: all, service, shop, user, product.
        #[arg(long, value_parser = parse_kind, default_value = "all")]
        kind: TypeFilter,
        /// Sort mode: relevance, rating, distance, popularity, newest, price.
        #[arg(long, value_parser = parse_sort, default_value = "relevance")]
        sort: SortBy,
        /// Exact category filter.
        #[arg(long)]
        category: Option<String>,
        /// JSON dataset path; the built-in sample when omitted.
        #[arg(long)]
        data: Option<PathBuf>,
        /// Maximum results to print.
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Also print an aggregate summary of the result set.
        #[arg(long)]
        analytics: bool,
    },
    /// Run the performance suite and print the report.
    Perf {
        /// JSON dataset path; the built-in sample when omitted.
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Time three representative query shapes over the dataset.
    Bench {
        /// JSON dataset path; the built-in sample when omitted.
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

fn parse_kind(value: &str) -> Result<TypeFilter, String> {
    match value {
        "all" => Ok(TypeFilter::All),
        "service" => Ok(TypeFilter::Service),
        "shop" => Ok(TypeFilter::Shop),
        "user" => Ok(TypeFilter::User),
        "product" => Ok(TypeFilter::Product),
        other => Err(format!("unknown kind '{other}'")),
    }
}

fn parse_sort(value: &str) -> Result<SortBy, String> {
    match value {
        "relevance" => Ok(SortBy::Relevance),
        "rating" => Ok(SortBy::Rating),
        "distance" => Ok(SortBy::Distance),
        "popularity" => Ok(SortBy::Popularity),
        "newest" => Ok(SortBy::Newest),
        "price" => Ok(SortBy::Price),
        other => Err(format!("unknown sort mode '{other}'")),
    }
}

fn load_entities(path: Option<&Path>, now: DateTime<Utc>) -> Result<Vec<SearchableEntity>> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading dataset {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing dataset {}", path.display()))
        }
        None => Ok(sample_dataset(now)),
    }
}

fn main() -> Result<()> {
    // Load .env early; ignore if missing.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let clock = SystemClock;
    let now = clock.now();
    let weights = RankingWeights::default();

    match cli.command {
        Commands::Search {
            query,
            kind,
            sort,
            category,
            data,
            limit,
            analytics,
        } => {
            let entities = load_entities(data.as_deref(), now)?;
            let search_query = SearchQuery {
                query,
                kind,
                sort_by: sort,
                category,
                ..SearchQuery::default()
            };
            let results = search(&entities, &search_query, &weights, now);
            let summary = analytics.then(|| generate_analytics(&results, &search_query, now));

            if cli.json {
                let shown: Vec<_> = results.iter().take(limit).collect();
                if let Some(summary) = &summary {
                    let payload = serde_json::json!({
                        "results": shown,
                        "analytics": summary,
                    });
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                } else {
                    println!("{}", serde_json::to_string_pretty(&shown)?);
                }
            } else {
                println!("{} results", results.len());
                for item in results.iter().take(limit) {
                    let rating = item
                        .entity
                        .rating
                        .map(|r| format!("  rating {r:.1}"))
                        .unwrap_or_default();
                    let distance = item
                        .distance_km()
                        .map(|km| format!("  {km:.1}km"))
                        .unwrap_or_default();
                    println!(
                        "{:>3}. {} [{}]  score {}{}{}",
                        item.search_rank,
                        item.entity.name,
                        item.entity.kind,
                        item.relevance_score,
                        rating,
                        distance,
                    );
                }
                if let Some(summary) = &summary {
                    println!();
                    println!("Average relevance score: {:.1}", summary.avg_relevance_score);
                    println!(
                        "Verified: {} | Rated: {} | Highly rated: {}",
                        summary.quality.verified_count,
                        summary.quality.with_rating_count,
                        summary.quality.high_rated_count,
                    );
                    for (category, count) in &summary.top_categories {
                        println!("  {category}: {count}");
                    }
                }
            }
        }
        Commands::Perf { data } => {
            let entities = load_entities(data.as_deref(), now)?;
            let probe = Arc::new(InMemoryProbe::new(entities.clone(), now));
            let result = run_suite(
                builtin_scenarios(),
                probe,
                &entities,
                &weights,
                &clock,
                &SuiteConfig::from_env(),
            );
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_report(&result));
            }
        }
        Commands::Bench { data } => {
            let entities = load_entities(data.as_deref(), now)?;
            let bench = quick_benchmark(&entities, &weights, now);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&bench)?);
            } else {
                println!("Basic search:    {:.3}ms", bench.basic_search_ms);
                println!("Filtered search: {:.3}ms", bench.filtered_search_ms);
                println!("Location search: {:.3}ms", bench.location_search_ms);
                println!("Dataset size:    {:.1}KB", bench.memory_size_kb);
                println!("{}", bench.recommendation);
            }
        }
    }

    Ok(())
}
