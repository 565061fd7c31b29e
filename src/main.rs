//! Indexy live demo
//!
//! Runs the mascot in real time and prints what it says to the terminal.
//! On `/processing` a fake progress bar ramps from 0 to 100%.

use clap::Parser;
use indexy::config::Config;
use indexy::mascot::{DisplayState, MascotView, ThreadRandom};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "indexy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Watch Indexy react to a page in real time")]
struct Args {
    /// Page path the mascot believes it is on
    #[arg(short, long, default_value = "/")]
    path: String,

    /// How long to run (seconds)
    #[arg(short, long, default_value = "60")]
    seconds: u64,

    /// Time for the fake progress bar to reach 100% (seconds)
    #[arg(long, default_value = "20")]
    ramp: u64,
}

/// Prints the speech bubble and state changes
struct ConsoleView {
    started: Instant,
    ramp: Duration,
}

impl ConsoleView {
    fn stamp(&self) -> String {
        format!("[{:>7.2}s]", self.started.elapsed().as_secs_f64())
    }
}

impl MascotView for ConsoleView {
    fn mount(&mut self) {
        println!("{} 🕷  Indexy is here", self.stamp());
    }

    fn show_text(&mut self, text: &str) {
        println!("{} 💬 {}", self.stamp(), text);
    }

    fn begin_fade(&mut self) {
        tracing::debug!("Speech bubble fading");
    }

    fn apply_state(&mut self, previous: DisplayState, next: DisplayState) {
        if previous != next {
            println!("{} ({} → {})", self.stamp(), previous, next);
        }
    }

    fn read_progress(&self) -> Option<u8> {
        if self.ramp.is_zero() {
            return Some(100);
        }
        let fraction = self.started.elapsed().as_secs_f64() / self.ramp.as_secs_f64();
        Some((fraction * 100.0).min(100.0) as u8)
    }

    fn teardown(&mut self) {
        println!("{} 👋 Bye!", self.stamp());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load_default();
    indexy::logging::init_logging(&config.logging);

    tracing::info!("Indexy v{}", env!("CARGO_PKG_VERSION"));

    let view = ConsoleView {
        started: Instant::now(),
        ramp: Duration::from_secs(args.ramp),
    };

    indexy::run_realtime(
        view,
        ThreadRandom,
        config.mascot.clone(),
        config.messages.catalog(),
        &args.path,
        Duration::from_secs(args.seconds),
    )
    .await;

    Ok(())
}
