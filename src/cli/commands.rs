//! CLI commands implementation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;

use newsfront::config::{load_settings_with_options, LoadOptions, Settings};
use newsfront::controller::{FlowOutcome, LoadReport};
use newsfront::fetch::{fetch_json, FetchError};
use newsfront::models::{ArticleCollection, EventCollection};
use newsfront::page::HtmlPage;
use newsfront::utils::parse_timestamp;

#[derive(Parser)]
#[command(name = "newsfront")]
#[command(about = "Populate a static news site's pages from its article and event data")]
#[command(version)]
pub struct Cli {
    /// Data source: base URL or site directory
    #[arg(long, global = true)]
    data: Option<String>,

    /// Config file (default: discovered automatically)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Load a page shell, fill its mount points and write the result
    Render {
        /// HTML page shell (e.g. index.html or article.html)
        shell: PathBuf,
        /// Query string of the page address (e.g. "slug=new-park")
        #[arg(short, long, default_value = "")]
        query: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List articles in collection order
    Articles,

    /// Validate the articles and events resources
    Check,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings_with_options(LoadOptions {
        config_path: cli.config,
        data: cli.data,
    })
    .await?;

    match cli.command {
        Commands::Render {
            shell,
            query,
            output,
        } => cmd_render(&settings, &shell, &query, output.as_deref()).await,
        Commands::Articles => cmd_articles(&settings).await,
        Commands::Check => cmd_check(&settings).await,
    }
}

async fn cmd_render(
    settings: &Settings,
    shell: &Path,
    query: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let source = tokio::fs::read_to_string(shell)
        .await
        .with_context(|| format!("Failed to read page shell {}", shell.display()))?;
    let mut page = HtmlPage::from_html(&source, query)
        .with_context(|| format!("Invalid page shell {}", shell.display()))?;

    let controller = settings.controller()?;
    let report = controller.load(&mut page).await;
    tracing::info!("Wrote mount points: {:?}", page.modified_mounts());

    if report == LoadReport::default() {
        eprintln!(
            "{} {} has no hero or article-content mount point; nothing to render",
            style("!").yellow(),
            shell.display()
        );
    } else if report.has_failures() {
        eprintln!(
            "{} Some data failed to load from {}; affected sections keep their initial content",
            style("!").yellow(),
            settings.data
        );
    }
    if report.article == Some(FlowOutcome::NotFound) {
        eprintln!("{} No article matches the requested slug", style("!").yellow());
    }

    let html = page.to_html();
    match output {
        Some(path) => {
            tokio::fs::write(path, html)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Wrote {}", style("✓").green(), path.display());
        }
        None => print!("{}", html),
    }

    Ok(())
}

async fn cmd_articles(settings: &Settings) -> anyhow::Result<()> {
    let fetcher = settings.fetcher()?;
    let collection: ArticleCollection = fetch_json(&*fetcher, &settings.paths.articles).await?;

    if collection.articles.is_empty() {
        println!("{} No articles in {}", style("!").yellow(), fetcher.describe());
        return Ok(());
    }

    let dates = settings.date_formatter();
    println!(
        "\n{:<2} {:<30} {:<12} {}",
        "",
        style("Slug").bold(),
        style("Date").bold(),
        style("Title").bold()
    );
    println!("{}", "-".repeat(80));

    for (i, article) in collection.articles.iter().enumerate() {
        let marker = if i == 0 { "*" } else { "" };
        println!(
            "{:<2} {:<30} {:<12} {}",
            marker,
            truncate(&article.slug, 30),
            dates.format_date(&article.date),
            truncate(&article.title, 50)
        );
    }

    println!("\n{} articles (* = featured)", collection.articles.len());
    Ok(())
}

async fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    let fetcher = settings.fetcher()?;
    println!("\n{}", style("newsfront data check").bold());
    println!("{}", "-".repeat(40));
    println!("{:<20} {}", "Data source:", fetcher.describe());

    let (articles, events) = tokio::join!(
        fetch_json::<ArticleCollection, _>(&*fetcher, &settings.paths.articles),
        fetch_json::<EventCollection, _>(&*fetcher, &settings.paths.events),
    );

    let mut failures = 0;
    let mut warnings = Vec::new();

    match articles {
        Ok(collection) => {
            println!("{:<20} {}", "Articles:", collection.articles.len());
            warnings.extend(article_warnings(&collection));
        }
        Err(e) => {
            failures += 1;
            print_failure(&e);
        }
    }

    match events {
        Ok(collection) => {
            println!("{:<20} {}", "Events:", collection.events.len());
            warnings.extend(event_warnings(&collection));
        }
        Err(e) => {
            failures += 1;
            print_failure(&e);
        }
    }

    for warning in &warnings {
        println!("{} {}", style("!").yellow(), warning);
    }

    if failures > 0 {
        anyhow::bail!("{} resource(s) failed to load", failures);
    }
    println!("{} Data looks good", style("✓").green());
    Ok(())
}

fn print_failure(err: &FetchError) {
    println!("{} {}", style("✗").red(), err);
}

/// Problems in the article list that don't stop pages from rendering.
fn article_warnings(collection: &ArticleCollection) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (i, article) in collection.articles.iter().enumerate() {
        if article.slug.is_empty() {
            warnings.push(format!("Article #{} ({}) has an empty slug", i + 1, article.title));
        } else if let Some(first) = seen.get(article.slug.as_str()) {
            warnings.push(format!(
                "Duplicate slug {:?} in articles #{} and #{}; only the first is reachable",
                article.slug,
                first + 1,
                i + 1
            ));
        } else {
            seen.insert(article.slug.as_str(), i);
        }
        if parse_timestamp(&article.date).is_none() {
            warnings.push(format!(
                "Article {:?} has an unparseable date {:?}",
                article.slug, article.date
            ));
        }
    }

    warnings
}

fn event_warnings(collection: &EventCollection) -> Vec<String> {
    collection
        .events
        .iter()
        .filter(|event| parse_timestamp(&event.date).is_none())
        .map(|event| {
            format!(
                "Event {:?} has an unparseable date {:?}",
                event.title, event.date
            )
        })
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
