//! Catalyst CLI: chart a symbol's price history against its news catalysts.
//!
//! Commands:
//! - `chart`: fetch a symbol and summarize its series and catalyst days
//! - `annotations`: list the per-day annotations (key, day, color, labels)
//! - `tooltip`: tooltip footer for a chart x-value
//! - `select`: articles of the catalyst day nearest a timestamp
//! - `pick`: simulate a click on a linear time axis spanning the price series

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use catalyst_core::catalyst::{query_timestamp, Annotation, SelectionResult};
use catalyst_core::config::{ArticleSourceKind, CatalystConfig, PriceSourceKind};
use catalyst_core::domain::{parse_instant, DayKey};
use catalyst_core::{AppState, ChartSnapshot, RefreshOutcome, SourceSet};

#[derive(Parser)]
#[command(
    name = "catalyst",
    about = "Catalyst chart: daily prices annotated with news catalysts"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to <config dir>/catalyst/config.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the price/article feed (overrides [feed] base_url).
    #[arg(long, global = true)]
    feed_url: Option<String>,

    /// Fixture directory for the file source (overrides [sources] data_dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read prices and articles from the fixture directory only.
    #[arg(long, global = true, default_value_t = false)]
    offline: bool,

    /// Debug-level logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a symbol and summarize its chart.
    Chart {
        symbol: String,

        /// Print the full snapshot as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List catalyst annotations in chart order.
    Annotations {
        symbol: String,

        /// Print annotations as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the tooltip footer for a chart x-value.
    Tooltip {
        symbol: String,

        /// RFC 3339 instant, YYYY-MM-DD, or epoch milliseconds.
        #[arg(long)]
        at: String,
    },
    /// Show the articles of the catalyst day nearest a timestamp.
    Select {
        symbol: String,

        /// RFC 3339 instant, YYYY-MM-DD, or epoch milliseconds.
        #[arg(long)]
        at: String,

        /// Selection tolerance in milliseconds (overrides [selection] tolerance_ms).
        #[arg(long)]
        tolerance_ms: Option<u64>,

        /// Print the selection as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Simulate a pointer click on a linear time axis spanning the price series.
    Pick {
        symbol: String,

        /// Pointer x position in pixels.
        #[arg(long, allow_negative_numbers = true)]
        pixel_x: f64,

        /// Left edge of the plotted area in pixels.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        axis_left: f64,

        /// Right edge of the plotted area in pixels.
        #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true)]
        axis_right: f64,

        /// Print the selection as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Chart { symbol, json } => run_chart(&config, &symbol, json),
        Commands::Annotations { symbol, json } => run_annotations(&config, &symbol, json),
        Commands::Tooltip { symbol, at } => run_tooltip(&config, &symbol, &at),
        Commands::Select {
            symbol,
            at,
            tolerance_ms,
            json,
        } => {
            if let Some(tolerance_ms) = tolerance_ms {
                if tolerance_ms == 0 {
                    bail!("--tolerance-ms must be greater than zero");
                }
                config.selection.tolerance_ms = tolerance_ms;
            }
            run_select(&config, &symbol, &at, json)
        }
        Commands::Pick {
            symbol,
            pixel_x,
            axis_left,
            axis_right,
            json,
        } => run_pick(&config, &symbol, pixel_x, axis_left, axis_right, json),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("catalyst").join("config.toml"))
}

/// Explicit `--config`, else the per-user file if it exists, else defaults;
/// then command-line overrides.
fn load_config(cli: &Cli) -> Result<CatalystConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => read_config(&path)?,
            None => CatalystConfig::default(),
        },
    };

    if let Some(url) = &cli.feed_url {
        config.feed.base_url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.sources.data_dir = dir.clone();
    }
    if cli.offline {
        config.sources.prices = PriceSourceKind::Files;
        config.sources.articles = ArticleSourceKind::Files;
    }

    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<CatalystConfig> {
    debug!(path = %path.display(), "loading config");
    CatalystConfig::from_file(path).with_context(|| format!("loading {}", path.display()))
}

/// Fetch a symbol into a fresh state. A failed fetch prints the generic
/// notification and exits non-zero.
fn load_state(config: &CatalystConfig, symbol: &str) -> Result<AppState> {
    let sources = SourceSet::from_config(config)?;
    let mut app = AppState::new(config.selection.tolerance_ms);

    match app.refresh(symbol, sources.prices.as_ref(), sources.articles.as_ref()) {
        RefreshOutcome::Updated => Ok(app),
        RefreshOutcome::Skipped => bail!("a symbol is required"),
        RefreshOutcome::Failed => {
            if let Some(notification) = app.last_notification() {
                error!(detail = %notification.detail, "fetch failed");
                eprintln!("{}", notification.message);
            }
            std::process::exit(1);
        }
    }
}

fn snapshot_of(app: &AppState) -> Result<&ChartSnapshot> {
    app.snapshot.as_ref().context("no chart loaded")
}

fn parse_time(text: &str) -> Result<i64> {
    match parse_instant(text.trim()) {
        Some(instant) => Ok(instant.timestamp_millis()),
        None => bail!("cannot parse time '{text}' (expected RFC 3339, YYYY-MM-DD, or epoch ms)"),
    }
}

fn run_chart(config: &CatalystConfig, symbol: &str, json: bool) -> Result<()> {
    let app = load_state(config, symbol)?;
    let snap = snapshot_of(&app)?;

    if json {
        println!("{}", serde_json::to_string_pretty(snap)?);
        return Ok(());
    }

    println!("{}", snap.title());
    println!("{}", "=".repeat(50));
    println!(
        "  {}: {} days ({} up)",
        snap.price_label(),
        snap.series.len(),
        snap.series.up_count()
    );
    if let Some((first, last)) = snap.series.x_range() {
        let fmt = |ms: i64| {
            DayKey::from_timestamp_ms(ms)
                .map(|d| d.to_string())
                .unwrap_or_default()
        };
        println!("  Range:          {} .. {}", fmt(first), fmt(last));
    }
    println!(
        "  Catalyst days:  {} ({} articles)",
        snap.catalysts.len(),
        snap.catalysts.article_count()
    );
    if snap.dropped_articles > 0 {
        println!("  Undated:        {} articles not placed", snap.dropped_articles);
    }
    Ok(())
}

fn run_annotations(config: &CatalystConfig, symbol: &str, json: bool) -> Result<()> {
    let app = load_state(config, symbol)?;
    let snap = snapshot_of(&app)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snap.annotations.annotations)?);
        return Ok(());
    }

    if snap.annotations.annotations.is_empty() {
        println!("No catalysts for {}", snap.symbol);
        return Ok(());
    }
    for annotation in &snap.annotations.annotations {
        println!("{}", annotation_line(annotation));
    }
    Ok(())
}

fn annotation_line(annotation: &Annotation) -> String {
    format!(
        "{:<14} {}  {:<7} {:<14} {}",
        annotation.key(),
        annotation.day,
        annotation.color(),
        annotation.color_tier.label(),
        annotation.label_lines.join(" | ")
    )
}

fn run_tooltip(config: &CatalystConfig, symbol: &str, at: &str) -> Result<()> {
    let x_ms = parse_time(at)?;
    let app = load_state(config, symbol)?;
    match app.tooltip_at(x_ms) {
        Some(footer) => println!("{footer}"),
        None => println!("(no news)"),
    }
    Ok(())
}

fn run_select(config: &CatalystConfig, symbol: &str, at: &str, json: bool) -> Result<()> {
    let query_ms = parse_time(at)?;
    let mut app = load_state(config, symbol)?;
    let selection = app.select_at(query_ms);
    print_selection(selection, json)
}

fn run_pick(
    config: &CatalystConfig,
    symbol: &str,
    pixel_x: f64,
    axis_left: f64,
    axis_right: f64,
    json: bool,
) -> Result<()> {
    if axis_right <= axis_left {
        bail!("--axis-right must be greater than --axis-left");
    }
    let mut app = load_state(config, symbol)?;
    let axis = match snapshot_of(&app)?.series.time_axis(axis_left, axis_right) {
        Some(axis) => axis,
        None => bail!("no price data to build a time axis"),
    };

    match query_timestamp(pixel_x, &axis) {
        Some(ms) => debug!(pixel_x, query_ms = ms, "click mapped to time axis"),
        None => debug!(pixel_x, "click outside plotted area"),
    }
    let selection = app.click(pixel_x, &axis);
    print_selection(selection, json)
}

fn print_selection(selection: &SelectionResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(selection)?);
    } else {
        print!("{}", render_selection(selection));
    }
    Ok(())
}

/// Text panel for a selection: a header line, then per article the
/// date/category/sentiment line, summary, title and indented content.
fn render_selection(selection: &SelectionResult) -> String {
    let Some(day) = selection.day else {
        return "No catalyst near this point.\n".to_string();
    };

    let mut out = format!("Catalyst day {day}\n");
    for article in &selection.articles {
        out.push('\n');
        out.push_str(&format!(
            "Date: {} | Category: {} | Sentiment: {}\n",
            article.date_text(),
            article.category,
            article.sentiment.as_deref().unwrap_or("N/A")
        ));
        out.push_str(&format!("{}\n", article.summary));
        out.push_str(&format!("  {}\n", article.title));
        for line in article.content.lines().filter(|l| !l.trim().is_empty()) {
            out.push_str(&format!("    {line}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalyst_core::catalyst::{aggregate, build_annotations, resolve_default};
    use catalyst_core::domain::Article;

    fn selection_for(article: Article) -> SelectionResult {
        let map = aggregate(&[article]);
        let day: DayKey = "2024-01-05".parse().unwrap();
        resolve_default(day.start_ms(), &map)
    }

    #[test]
    fn selection_panel_shows_every_field() {
        let article = Article::new("2024-01-05", "Topline data")
            .with_summary("Primary endpoint met.")
            .with_category("Clinical")
            .with_sentiment("Positive")
            .with_content("First paragraph.\n\nSecond paragraph.");

        let text = render_selection(&selection_for(article));
        assert_eq!(
            text,
            "Catalyst day 2024-01-05\n\
             \n\
             Date: 2024-01-05 | Category: Clinical | Sentiment: Positive\n\
             Primary endpoint met.\n\
             \x20 Topline data\n\
             \x20   First paragraph.\n\
             \x20   Second paragraph.\n"
        );
    }

    #[test]
    fn missing_sentiment_and_content() {
        let text = render_selection(&selection_for(Article::new("2024-01-05", "Bare")));
        assert!(text.contains("| Sentiment: N/A\n"));
        assert!(text.ends_with("  Bare\n"));
    }

    #[test]
    fn empty_selection_panel() {
        assert_eq!(
            render_selection(&SelectionResult::empty()),
            "No catalyst near this point.\n"
        );
    }

    #[test]
    fn annotation_line_includes_tier() {
        let map = aggregate(&[
            Article::new("2024-01-05", "Up").with_sentiment("positive"),
            Article::new("2024-01-05", "Down").with_sentiment("negative"),
        ]);
        let set = build_annotations(&map);
        let line = annotation_line(&set.annotations[0]);
        assert!(line.starts_with("catalyst-0"));
        assert!(line.contains("2024-01-05"));
        assert!(line.contains("green"));
        assert!(line.contains("positive"));
        assert!(line.ends_with("Up | Down"));
    }
}
