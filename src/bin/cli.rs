//! Indexy CLI
//!
//! Command-line tools for the mascot and page chrome:
//! - Replay a page session on a virtual clock
//! - Inspect message pools and page classification
//! - Validate URL batches
//! - Compute chart segments

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use indexy::chart::IndexingSummary;
use indexy::chrome;
use indexy::config::{generate_default_config, Config};
use indexy::mascot::{
    FormEvent, MessageCategory, PageContext, SeededRandom, Simulation, TimelineEntry, ViewEvent,
};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "indexy-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tools for the Indexy mascot and page chrome")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a page session on a virtual clock
    Simulate {
        /// Page path, e.g. /processing
        #[arg(default_value = "/")]
        path: String,
        /// Progress values delivered one per poll, e.g. 10,45,85,100
        #[arg(short, long, value_delimiter = ',')]
        progress: Vec<u8>,
        /// Timed events: MS:focus, MS:input:TEXT, MS:submit, MS:files:N, MS:click, MS:state:NAME, MS:say:TEXT
        #[arg(short, long)]
        event: Vec<String>,
        /// Total simulated time (seconds)
        #[arg(short, long, default_value = "60")]
        seconds: u64,
        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// List message pools
    Messages {
        /// Only this category
        category: Option<String>,
    },

    /// Show how a path is classified
    Classify {
        /// Page path
        path: String,
    },

    /// Validate a URL batch (file or stdin)
    Validate {
        /// File with one URL per line (default: stdin)
        path: Option<PathBuf>,
    },

    /// Compute doughnut chart segments
    Chart {
        /// Indexed URL count
        indexed: u64,
        /// Not-indexed URL count
        not_indexed: u64,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// A user action at a point in simulated time
#[derive(Debug)]
enum SessionAction {
    Form(FormEvent),
    Click,
    State(String),
    Say(String),
}

fn parse_event(raw: &str) -> anyhow::Result<(u64, SessionAction)> {
    let mut parts = raw.splitn(3, ':');
    let at = parts
        .next()
        .unwrap_or_default()
        .parse::<u64>()
        .with_context(|| format!("Event {:?} must start with a time in ms", raw))?;
    let kind = parts.next().unwrap_or_default();
    let arg = parts.next();

    let action = match (kind, arg) {
        ("focus", _) => SessionAction::Form(FormEvent::UrlFocus),
        ("input", Some(text)) => SessionAction::Form(FormEvent::UrlInput(text.replace("\\n", "\n"))),
        ("submit", _) => SessionAction::Form(FormEvent::Submit),
        ("files", Some(n)) => SessionAction::Form(FormEvent::FilesSelected(
            n.parse().with_context(|| format!("Bad file count in {:?}", raw))?,
        )),
        ("click", _) => SessionAction::Click,
        ("state", Some(name)) => SessionAction::State(name.to_string()),
        ("say", Some(text)) => SessionAction::Say(text.to_string()),
        _ => bail!("Unknown event {:?}", raw),
    };

    Ok((at, action))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    indexy::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Simulate {
            path,
            progress,
            event,
            seconds,
            seed,
        } => {
            let mut events = event
                .iter()
                .map(|raw| parse_event(raw))
                .collect::<anyhow::Result<Vec<_>>>()?;
            events.sort_by_key(|(at, _)| *at);

            let mut sim = Simulation::new(
                config.mascot.clone(),
                config.messages.catalog(),
                SeededRandom::new(seed),
            );
            sim.engine_mut().initialize(&path);

            for (at, action) in events {
                sim.advance_to(at);
                let engine = sim.engine_mut();
                match action {
                    SessionAction::Form(form) => engine.handle_form_event(form),
                    SessionAction::Click => engine.on_mascot_click(),
                    SessionAction::State(name) => {
                        if let Err(e) = engine.set_state_named(&name) {
                            eprintln!("At {}ms: {}", at, e);
                        }
                    }
                    SessionAction::Say(text) => engine.say(text),
                }
            }

            sim.feed_progress(&progress);
            sim.advance_to(seconds * 1000);
            sim.engine_mut().shutdown();

            print_timeline(sim.timeline().entries(), &cli.format)?;
        }

        Commands::Messages { category } => {
            let catalog = config.messages.catalog();
            let categories = match category {
                Some(name) => vec![name.parse::<MessageCategory>()?],
                None => MessageCategory::ALL.to_vec(),
            };

            if cli.format == "json" {
                let pools: serde_json::Map<String, serde_json::Value> = categories
                    .iter()
                    .map(|c| (c.to_string(), serde_json::json!(catalog.messages(*c))))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&pools)?);
            } else {
                for category in categories {
                    println!("{}:", category);
                    for message in catalog.messages(category) {
                        println!("  - {}", message);
                    }
                    println!();
                }
            }
        }

        Commands::Classify { path } => {
            let page = PageContext::classify(&path);
            match page.greeting() {
                Some((state, greeting)) => {
                    println!("{} → {} (state: {})", path, page, state);
                    println!("  \"{}\"", greeting);
                    if page == PageContext::Home {
                        println!("  form helpers: on");
                    }
                    if page == PageContext::Processing {
                        println!("  progress polling: every {}ms", config.mascot.progress_poll_ms);
                    }
                }
                None => println!("{} → {} (no greeting)", path, page),
            }
        }

        Commands::Validate { path } => {
            let text = match path {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {:?}", path))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            if let Err(e) = chrome::validate_url_batch(&text, config.chrome.max_url_lines) {
                eprintln!("{}", e);
                std::process::exit(1);
            }

            let lines = chrome::parse_url_batch(&text);
            let invalid: Vec<_> = lines.iter().filter(|l| !l.valid).collect();

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&lines)?);
            } else {
                println!("URLs: {} ({} invalid)", lines.len(), invalid.len());
                for line in &invalid {
                    println!("  line {}: {}", line.line, line.url);
                }
            }

            if !invalid.is_empty() {
                std::process::exit(2);
            }
        }

        Commands::Chart {
            indexed,
            not_indexed,
        } => {
            let summary = IndexingSummary::new(indexed, not_indexed);
            let segments = summary.segments();

            if cli.format == "json" {
                let body = serde_json::json!({
                    "summary": summary,
                    "index_rate": summary.index_rate(),
                    "segments": segments,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else if segments.is_empty() {
                println!("No URLs checked yet.");
            } else {
                println!("Index rate: {:.1}%", summary.index_rate());
                for segment in &segments {
                    println!(
                        "  {:<40} {} {:.3}..{:.3} rad",
                        segment.legend(),
                        segment.color,
                        segment.start_angle,
                        segment.end_angle
                    );
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn print_timeline(entries: &[TimelineEntry], format: &str) -> anyhow::Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    println!("{:>9}  {}", "Time", "Event");
    println!("{}", "-".repeat(60));
    for entry in entries {
        let description = match &entry.event {
            ViewEvent::Mounted => "mascot mounted".to_string(),
            ViewEvent::Shown { text } => format!("💬 {}", text),
            ViewEvent::FadeStarted => "fading".to_string(),
            ViewEvent::Hidden => "hidden".to_string(),
            ViewEvent::StateChanged { from, to } => format!("state {} → {}", from, to),
            ViewEvent::FormHelpersBound => "form helpers bound".to_string(),
            ViewEvent::TornDown => "torn down".to_string(),
        };
        println!("{:>7}ms  {}", entry.at_ms, description);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event() {
        let (at, action) = parse_event("1500:input:a\\nb").unwrap();
        assert_eq!(at, 1500);
        assert!(matches!(action, SessionAction::Form(FormEvent::UrlInput(ref t)) if t == "a\nb"));

        assert!(matches!(
            parse_event("10:files:2").unwrap().1,
            SessionAction::Form(FormEvent::FilesSelected(2))
        ));
        assert!(parse_event("soon:submit").is_err());
        assert!(parse_event("10:dance").is_err());
    }
}
