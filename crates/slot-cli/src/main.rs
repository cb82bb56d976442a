//! `slots` CLI: compute bookable slots from JSON requests.
//!
//! ## Usage
//!
//! ```sh
//! # Availability for one schedule (stdin → stdout)
//! echo '{"from":"2017-01-23","to":"2017-01-24","interval":30,"duration":30,
//!        "schedule":{"monday":{"from":"09:00","to":"12:00"}}}' | slots availability
//!
//! # From file to file, pretty-printed
//! slots availability -i request.json -o slots.json --pretty
//!
//! # Slots free in every schedule
//! slots intersect -i schedules.json
//!
//! # Older output defaults (per-day flags / grouped times)
//! slots availability --legacy -i request.json
//!
//! # Trace the pipeline on stderr
//! slots --log-level debug availability -i request.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slot_engine::{
    get_availabilities, get_intersection, AvailabilityRequest, IntersectionRequest, Response,
    Scheduler,
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Bookable slot availability from recurring schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter for diagnostics on stderr (e.g. "debug", "slot_engine=trace")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the free slots of one schedule
    Availability {
        #[command(flatten)]
        args: IoArgs,
    },
    /// Compute the slots free in every given schedule
    Intersect {
        #[command(flatten)]
        args: IoArgs,
    },
}

#[derive(clap::Args)]
struct IoArgs {
    /// Input request file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Apply the legacy output defaults when the request leaves them unset
    #[arg(long)]
    legacy: bool,
    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,
}

impl IoArgs {
    /// The raw request body, from `--input` or stdin.
    fn read_request(&self) -> Result<String> {
        match &self.input {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display())),
            None => io::read_to_string(io::stdin().lock()).context("Failed to read from stdin"),
        }
    }

    /// Write the rendered response to `--output`, or to stdout with a
    /// trailing newline.
    fn write_response(&self, body: &str) -> Result<()> {
        match &self.output {
            Some(path) => fs::write(path, body)
                .with_context(|| format!("Failed to write file: {}", path.display())),
            None => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{body}").context("Failed to write to stdout")
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let (args, response) = match cli.command {
        Commands::Availability { args } => {
            let json = args.read_request()?;
            let request =
                AvailabilityRequest::from_json(&json).context("Failed to parse availability request")?;
            debug!(legacy = args.legacy, "running availability request");
            let response = if args.legacy {
                Scheduler::new().get_availability(request)
            } else {
                get_availabilities(&request)
            }
            .context("Invalid availability request")?;
            (args, response)
        }
        Commands::Intersect { args } => {
            let json = args.read_request()?;
            let request =
                IntersectionRequest::from_json(&json).context("Failed to parse intersection request")?;
            debug!(
                legacy = args.legacy,
                schedules = request.schedules.len(),
                "running intersection request"
            );
            let response = if args.legacy {
                Scheduler::new().get_intersection(request)
            } else {
                get_intersection(&request)
            }
            .context("Invalid intersection request")?;
            (args, response)
        }
    };

    let body = render(&response, args.pretty)?;
    args.write_response(&body)
}

fn render(response: &Response, pretty: bool) -> Result<String> {
    let json = if pretty {
        response.to_json_pretty()
    } else {
        response.to_json()
    };
    json.context("Failed to serialize response")
}
