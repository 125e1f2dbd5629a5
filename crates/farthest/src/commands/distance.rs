//! Distance command: farthest distance from home per day.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use chrono::{NaiveDate, Utc};
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};

use farthest_core::config::Config;
use farthest_core::table::DayDistance;
use farthest_core::{
    Coordinate, DateRange, Destination, DistanceFormula, OutputFormat, SortKey, SortedTable,
    aggregate, history,
};

/// Arguments for the `distance` subcommand.
#[derive(Args, Debug)]
pub struct DistanceArgs {
    /// Location-history export (JSON with a `locations` array).
    #[arg(short, long, value_name = "FILE")]
    pub file: Utf8PathBuf,

    /// First day to include, YYYY-MM-DD (inclusive). Defaults to 1970-01-01.
    #[arg(short, long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Day to stop at, YYYY-MM-DD (exclusive). Defaults to now.
    #[arg(short, long, value_name = "DATE")]
    pub end: Option<NaiveDate>,

    /// Home latitude in decimal degrees.
    #[arg(short = 'l', long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Home longitude in decimal degrees.
    #[arg(short = 'u', long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Sort rows by distance instead of by day.
    #[arg(long)]
    pub by_distance: bool,

    /// Table rendering.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Distance formula.
    #[arg(long, value_enum)]
    pub formula: Option<DistanceFormula>,

    /// Write the table to FILE instead of standard output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}

#[derive(Serialize)]
struct DistanceReport<'a> {
    start: NaiveDate,
    end: NaiveDate,
    home: Coordinate,
    formula: DistanceFormula,
    sort: SortKey,
    samples: usize,
    in_range: usize,
    days: &'a [DayDistance],
}

/// Combine command-line and configured home coordinates.
///
/// Each axis falls back to the config independently.
fn resolve_home(args: &DistanceArgs, config: &Config) -> anyhow::Result<Coordinate> {
    let lat = args.latitude.or(config.home.map(|h| h.lat));
    let lon = args.longitude.or(config.home.map(|h| h.lon));
    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                bail!("home coordinate {lat}, {lon} is out of range");
            }
            Ok(Coordinate::new(lat, lon))
        }
        _ => bail!(
            "no home coordinate: pass --latitude and --longitude or set `home` in the config file"
        ),
    }
}

/// Pick the output destination, falling back to stdout when the directory is missing.
fn resolve_destination(output: Option<&camino::Utf8Path>) -> Destination {
    match Destination::for_path(output) {
        Ok(destination) => destination,
        Err(err) => {
            debug!(error = %err, "output path rejected");
            eprintln!(
                "{} {err}; writing to standard output",
                "warning:".if_supports_color(Stream::Stderr, |t| t.yellow())
            );
            Destination::Stdout
        }
    }
}

/// Compute and print the farthest distance from home for each day.
#[instrument(name = "cmd_distance", skip_all, fields(file = %args.file))]
pub fn cmd_distance(args: DistanceArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(
        file = %args.file,
        start = ?args.start,
        end = ?args.end,
        output = ?args.output,
        "executing distance command"
    );

    let home = resolve_home(&args, config)?;
    let range = DateRange::from_bounds(args.start, args.end, Utc::now())?;
    let formula = args.formula.or(config.formula).unwrap_or_default();
    let sort = if args.by_distance {
        SortKey::Distance
    } else {
        config.sort.unwrap_or_default()
    };
    let format = args.format.or(config.format).unwrap_or_default();

    let samples = history::load(&args.file).context("failed to load location history")?;
    let agg = aggregate::aggregate(&samples, &range, home, formula);
    let table = SortedTable::build(&agg.days, sort);

    let destination = resolve_destination(args.output.as_deref());
    let rendered = if global_json {
        let report = DistanceReport {
            start: range.start(),
            end: range.end(),
            home,
            formula,
            sort,
            samples: agg.considered,
            in_range: agg.in_range,
            days: table.rows(),
        };
        format!("{}\n", serde_json::to_string_pretty(&report)?)
    } else {
        table.render(format)
    };

    destination
        .write(&rendered)
        .with_context(|| format!("failed to write {destination}"))?;

    if let Destination::File(ref path) = destination
        && !global_json
    {
        println!(
            "{} {} days written to {}",
            "OK:".if_supports_color(Stream::Stdout, |t| t.green()),
            table.len(),
            path.if_supports_color(Stream::Stdout, |t| t.cyan())
        );
    }

    Ok(())
}
