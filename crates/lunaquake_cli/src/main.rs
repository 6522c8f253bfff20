mod config;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use lunaquake_events::{
    EventFeed, EventSource, GeoJsonFileSource, UsgsFeedConfig, UsgsFeedSource, correlate,
};
use lunaquake_oracle::{LunarOracle, MeeusOracle};
use lunaquake_search::{
    PerigeeConfig, Syzygy, SyzygyKind, estimate_perigee_with, find_syzygies, forecast, next_syzygy,
};
use lunaquake_time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::FileConfig;
use crate::output::{
    FeedStatus, WindowsDocument, phase_name, print_perigee, print_reports, print_syzygy,
};

#[derive(Parser)]
#[command(name = "lunaquake", version, about = "Lunar-timing seismic window explorer")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins if set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    New,
    Full,
}

impl From<KindArg> for SyzygyKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::New => SyzygyKind::NewMoon,
            KindArg::Full => SyzygyKind::FullMoon,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Lunar phase and distance at an instant
    Phase {
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ or YYYY-MM-DD)
        #[arg(long, required_unless_present = "jd")]
        date: Option<String>,
        /// Julian Date on the UTC axis
        #[arg(long, conflicts_with = "date")]
        jd: Option<f64>,
    },
    /// Find the next full moon
    NextFull {
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ or YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Find the next new moon
    NextNew {
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ or YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// List syzygies of one kind after a date
    Syzygies {
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ or YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Days to scan forward
        #[arg(long, default_value = "60")]
        days: f64,
        /// Maximum results
        #[arg(long, default_value = "2")]
        count: usize,
        #[arg(long, value_enum, default_value = "full")]
        kind: KindArg,
    },
    /// Estimate the perigee nearest a date
    Perigee {
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ or YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Refine the 2-hour grid minimum
        #[arg(long)]
        refine: bool,
    },
    /// Build ranked seismic windows and correlate them with recent events
    Windows {
        /// Reference instant (defaults to now)
        #[arg(long)]
        date: Option<String>,
        /// Days to scan forward for syzygies
        #[arg(long)]
        days: Option<f64>,
        /// Syzygies collected per kind
        #[arg(long)]
        per_kind: Option<usize>,
        /// Maximum windows built
        #[arg(long)]
        max_windows: Option<usize>,
        /// Refine each perigee estimate
        #[arg(long)]
        refine: bool,
        /// Fetch events from the USGS FDSN service
        #[arg(long, conflicts_with_all = ["feed_url", "feed_file"])]
        usgs: bool,
        /// Fetch events from a USGS-compatible GeoJSON endpoint
        #[arg(long, conflicts_with = "feed_file")]
        feed_url: Option<String>,
        /// Read events from a saved GeoJSON feed
        #[arg(long)]
        feed_file: Option<PathBuf>,
        /// Days of recent events to load
        #[arg(long)]
        feed_days: Option<u32>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_instant(s: &str) -> Result<Instant> {
    s.parse()
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DDThh:mm:ssZ"))
}

fn resolve_instant(date: Option<&str>, jd: Option<f64>) -> Result<Instant> {
    match (date, jd) {
        (_, Some(jd)) => Instant::from_jd_utc(jd).with_context(|| format!("invalid JD {jd}")),
        (Some(d), None) => parse_instant(d),
        (None, None) => bail!("either --date or --jd is required"),
    }
}

fn print_next(oracle: &impl LunarOracle, date: &str, kind: SyzygyKind) -> Result<()> {
    let from = parse_instant(date)?;
    match next_syzygy(oracle, from, kind)? {
        Some(s) => print_syzygy("Next", &s),
        None => println!("No {kind} found in search range"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let oracle = MeeusOracle::new();

    match cli.command {
        Commands::Phase { date, jd } => {
            let at = resolve_instant(date.as_deref(), jd)?;
            let phase = oracle.illumination(at)?;
            let distance = oracle.distance_km(at)?;
            println!("{at}: {} (phase {phase:.4})", phase_name(phase));
            println!("  JD (UTC): {:.5}", at.to_jd_utc());
            println!("  Distance: {distance:.0} km");
        }

        Commands::NextFull { date } => print_next(&oracle, &date, SyzygyKind::FullMoon)?,

        Commands::NextNew { date } => print_next(&oracle, &date, SyzygyKind::NewMoon)?,

        Commands::Syzygies {
            date,
            days,
            count,
            kind,
        } => {
            let start = parse_instant(&date)?;
            let kind = SyzygyKind::from(kind);
            let found = find_syzygies(&oracle, start, days, kind.target_phase(), count)?;
            if found.is_empty() {
                println!("No {kind} found in {days} days from {start}");
            }
            for (i, t) in found.into_iter().enumerate() {
                print_syzygy(&format!("{:>2}", i + 1), &Syzygy::new(kind, t));
            }
        }

        Commands::Perigee { date, refine } => {
            let center = parse_instant(&date)?;
            let config = PerigeeConfig {
                refine,
                ..PerigeeConfig::default()
            };
            let p = estimate_perigee_with(&oracle, center, &config)?;
            print_perigee(center, &p);
        }

        Commands::Windows {
            date,
            days,
            per_kind,
            max_windows,
            refine,
            usgs,
            feed_url,
            feed_file,
            feed_days,
            json,
            config,
        } => {
            let file = match &config {
                Some(path) => FileConfig::from_file(path)?,
                None => FileConfig::default(),
            };
            let now = match date {
                Some(d) => parse_instant(&d)?,
                None => Instant::now(),
            };

            let mut fc = file.forecast_config();
            if let Some(d) = days {
                fc.days_forward = d;
            }
            if let Some(n) = per_kind {
                fc.per_kind = n;
            }
            if let Some(n) = max_windows {
                fc.max_windows = n;
            }
            if refine {
                fc.perigee.refine = true;
            }
            debug!(?fc, %now, "forecast configuration");

            let windows = forecast(&oracle, now, &fc).context("window computation failed")?;

            let window_days = feed_days.unwrap_or(file.feed.days);
            let source: Option<Box<dyn EventSource>> = if let Some(path) = feed_file {
                Some(Box::new(GeoJsonFileSource::new(path, now)))
            } else if let Some(url) = feed_url {
                Some(Box::new(UsgsFeedSource::new(file.feed.usgs_config(url), now)?))
            } else if usgs {
                let url = UsgsFeedConfig::default().url;
                Some(Box::new(UsgsFeedSource::new(file.feed.usgs_config(url), now)?))
            } else if let Some(path) = file.feed.file.clone() {
                Some(Box::new(GeoJsonFileSource::new(path, now)))
            } else if let Some(url) = file.feed.url.clone() {
                Some(Box::new(UsgsFeedSource::new(file.feed.usgs_config(url), now)?))
            } else {
                None
            };

            let feed = match source {
                Some(s) => EventFeed::load(s.as_ref(), window_days).await,
                None => EventFeed::Unavailable {
                    reason: "no event source configured".to_string(),
                },
            };
            let reports = correlate(&windows, &feed);

            if json {
                let doc = WindowsDocument {
                    reference: now,
                    primary_index: windows.primary_index(),
                    feed: FeedStatus::of(&feed),
                    windows: &reports,
                };
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print_reports(now, &feed, &reports);
            }
        }
    }

    Ok(())
}
