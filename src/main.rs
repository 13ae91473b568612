mod browser;
mod cache;
mod db;
mod error;
mod model;
mod parser;
mod settings;

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::cache::{cache_key, DbCache, PageCache};
use crate::model::{truncate, Profile};
use crate::settings::{Credentials, Settings};

#[derive(Parser)]
#[command(name = "resume_bud", about = "Scrape a LinkedIn profile and parse it into structured data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a profile (or reuse the cached page) and parse it
    #[command(name = "scrape-profile", alias = "ScrapeProfile")]
    ScrapeProfile {
        /// Profile URL, e.g. https://www.linkedin.com/in/someone/
        url: String,
    },
    /// Parse a cached page without opening a browser
    Parse {
        url: String,
        /// Print the full profile as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Show the stored result of the last parse
    Show { url: String },
    /// Re-parse every cached page
    Reparse {
        /// Max pages to re-parse (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Parsed profiles overview table
    Profiles {
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Show cache statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let source = settings::source().context("Failed to load configuration")?;
    let settings = Settings::from_config(&source).context("Invalid configuration")?;

    let result = match cli.command {
        Commands::ScrapeProfile { url } => {
            let credentials =
                Credentials::from_config(&source).context("Set RESUME_BUD_USERNAME and RESUME_BUD_PASSWORD")?;
            let conn = open_db(&settings)?;
            let cache = DbCache::new(&conn);
            let key = cache_key(&url);

            let fetch = if cache.exists(&key)? {
                prompt_refetch()?
            } else {
                true
            };
            if fetch {
                let markup = fetch_markup(&settings, credentials, &url).await?;
                cache.write(&key, &cache::entry(&url, &markup))?;
                println!("Cached {} under {}", url, key);
            }

            let profile = parse_and_store(&conn, &cache, &key)?;
            println!("{}", profile);
            Ok(())
        }
        Commands::Parse { url, json } => {
            let conn = open_db(&settings)?;
            let cache = DbCache::new(&conn);
            let key = cache_key(&url);
            let profile = parse_and_store(&conn, &cache, &key)
                .with_context(|| format!("No usable cached page for {}. Run 'scrape-profile' first.", url))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("{}", profile);
            }
            Ok(())
        }
        Commands::Show { url } => {
            let conn = open_db(&settings)?;
            match db::load_profile(&conn, &cache_key(&url))? {
                Some(profile) => println!("{}", profile),
                None => println!("No parsed profile for {}. Run 'parse' first.", url),
            }
            Ok(())
        }
        Commands::Reparse { limit } => {
            let conn = open_db(&settings)?;
            let cached = db::get_stats(&conn)?.cached as usize;
            let total = limit.map_or(cached, |n| n.min(cached));
            if total == 0 {
                println!("No cached pages. Run 'scrape-profile' first.");
                return Ok(());
            }
            println!("Re-parsing {} cached pages...", total);
            let counts = reparse_pages(&conn, total, REPARSE_CHUNK)?;
            println!("Saved {} profiles, {} unreadable.", counts.parsed, counts.unreadable);
            Ok(())
        }
        Commands::Profiles { limit } => {
            let conn = open_db(&settings)?;
            let rows = db::fetch_overview(&conn, limit)?;
            if rows.is_empty() {
                println!("No profiles parsed yet.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<22} | {:<30} | {:<18} | {:>5} | {:>4} | {:>4} | {:>4}",
                "#", "Name", "Headline", "Location", "Posts", "Exp", "Edu", "Proj"
            );
            println!("{}", "-".repeat(112));
            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<22} | {:<30} | {:<18} | {:>5} | {:>4} | {:>4} | {:>4}",
                    i + 1,
                    truncate(&r.name, 22),
                    truncate(&r.headline, 30),
                    truncate(&r.location, 18),
                    r.posts,
                    r.experiences,
                    r.education,
                    r.projects
                );
            }

            println!("\n--- URLs ---");
            for r in &rows {
                println!("  {}: {}", truncate(&r.name, 22), r.url);
            }
            println!("\n{} profiles", rows.len());
            Ok(())
        }
        Commands::Stats => {
            let conn = open_db(&settings)?;
            let s = db::get_stats(&conn)?;
            println!("Cached:   {}", s.cached);
            println!("Parsed:   {}", s.parsed);
            println!("Unparsed: {}", s.unparsed);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn open_db(settings: &Settings) -> Result<rusqlite::Connection> {
    let conn = db::connect(&settings.db_path)?;
    db::init_schema(&conn)?;
    Ok(conn)
}

/// Ask until the answer is y or n. End of input means reuse.
fn prompt_refetch() -> Result<bool> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("This profile has been scraped before. Scrape it again? (Y/N): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(false);
        };
        match line?.trim().to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => println!("Please enter a valid response"),
        }
    }
}

/// The browser API is blocking; keep it off the async runtime.
async fn fetch_markup(settings: &Settings, credentials: Credentials, url: &str) -> Result<String> {
    let settings = settings.clone();
    let url = url.to_string();
    let markup = tokio::task::spawn_blocking(move || {
        let plan = browser::ScrollPlan::from_settings(&settings);
        let mut session = browser::ChromeSession::launch(&settings)?;
        browser::fetch_profile_markup(&mut session, &credentials, &url, &plan)
    })
    .await
    .context("Browser task panicked")??;
    Ok(markup)
}

fn parse_and_store(conn: &rusqlite::Connection, cache: &impl PageCache, key: &str) -> Result<Profile> {
    let text = cache.read(key)?;
    let profile = parser::parse_cached(&text)?;
    db::save_profiles(conn, &[db::ProfileRow::new(key, &profile)?])?;
    info!("Parsed profile {} ({})", profile.name, profile.url);
    Ok(profile)
}

struct ReparseCounts {
    parsed: usize,
    unreadable: usize,
}

/// Pages read from the cache per batch; only one batch is held in memory.
const REPARSE_CHUNK: usize = 200;

fn reparse_pages(conn: &rusqlite::Connection, total: usize, chunk_size: usize) -> Result<ReparseCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = ReparseCounts {
        parsed: 0,
        unreadable: 0,
    };

    let mut after = String::new();
    let mut remaining = total;
    while remaining > 0 {
        let chunk = db::fetch_cached_page(conn, &after, remaining.min(chunk_size))?;
        let Some(last) = chunk.last() else {
            break;
        };
        after = last.key.clone();
        remaining -= chunk.len();

        // each document parses independently; nothing is shared between them
        let results: Vec<_> = chunk
            .par_iter()
            .map(|page| (page.key.as_str(), parser::parse_cached(&page.document)))
            .collect();

        let mut rows = Vec::with_capacity(results.len());
        for (key, result) in results {
            match result {
                Ok(profile) => rows.push(db::ProfileRow::new(key, &profile)?),
                Err(e) => {
                    warn!("Skipping cached page {}: {}", key, e);
                    counts.unreadable += 1;
                }
            }
        }

        counts.parsed += rows.len();
        db::save_profiles(conn, &rows)?;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
