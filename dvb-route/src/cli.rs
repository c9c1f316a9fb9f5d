//! Command line interface.
//!
//! Running the binary without a command performs the default route query,
//! Helmholtzstraße to Postplatz departing now.

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::debug;

use crate::domain::{DvbTime, StopId};
use crate::dump::{DEFAULT_DEPTH, DEFAULT_MAX_ARRAY_LENGTH, DumpOptions};
use crate::query::{
    DEFAULT_DESTINATION, DEFAULT_ORIGIN, Output, QueryError, RouteQuery, emit, run_route_query,
};
use crate::vvo::{
    DEFAULT_BASE_URL, MockVvoClient, VvoClient, VvoConfig, VvoError, changes, monitor, point, trip,
};

/// dvb-route CLI
#[derive(Debug, Parser)]
#[command(name = "dvb-route")]
#[command(version, about = "Query the VVO WebAPI for public transport in Dresden", long_about = None)]
pub struct Cli {
    /// WebAPI base URL
    #[arg(long, env = "VVO_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "VVO_TIMEOUT_SECS", default_value_t = 15, global = true)]
    pub timeout: u64,

    /// Serve routes from a recorded `tr/trips` response instead of the API
    #[arg(long, env = "VVO_MOCK_FILE", global = true)]
    pub mock: Option<PathBuf>,

    /// Nesting depth shown in the output
    #[arg(long, default_value_t = DEFAULT_DEPTH, global = true)]
    pub depth: usize,

    /// Array items shown before truncating
    #[arg(long, default_value_t = DEFAULT_MAX_ARRAY_LENGTH, global = true)]
    pub max_array_length: usize,

    /// Print pretty JSON instead of the bounded dump
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Find routes between two stops (the default)
    Route(RouteArgs),

    /// Search for stops by name
    Find {
        /// Free-text query, e.g. "Postplatz"
        query: String,

        /// Maximum number of matches
        #[arg(short, long)]
        limit: Option<u32>,

        /// Include addresses and points of interest
        #[arg(long)]
        all: bool,
    },

    /// Show upcoming departures at a stop
    Departures {
        /// Stop id
        stop: StopId,

        /// Maximum number of departures
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// List the stops of one vehicle run
    Trip {
        /// Trip id, from a departure or a route's `StatelessId`
        trip_id: String,

        /// A stop the trip serves
        stop: StopId,

        /// Time at that stop (defaults to now)
        #[arg(long)]
        time: Option<DvbTime>,
    },

    /// List the lines serving a stop
    Lines {
        /// Stop id
        stop: StopId,
    },

    /// Show announced route changes and disruptions
    Changes {
        /// Include short-term changes
        #[arg(long, conflicts_with = "lines")]
        short_term: bool,

        /// Only list the lines affected by changes
        #[arg(long)]
        lines: bool,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Route(_) => "route",
            Command::Find { .. } => "find",
            Command::Departures { .. } => "departures",
            Command::Trip { .. } => "trip",
            Command::Lines { .. } => "lines",
            Command::Changes { .. } => "changes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct RouteArgs {
    /// Origin stop id
    #[arg(default_value = DEFAULT_ORIGIN)]
    pub origin: StopId,

    /// Destination stop id
    #[arg(default_value = DEFAULT_DESTINATION)]
    pub destination: StopId,

    /// Treat the time as the desired arrival
    #[arg(long)]
    pub arrival: bool,

    /// Departure or arrival time, RFC 3339 or `/Date(..)/` (defaults to now)
    #[arg(long)]
    pub time: Option<DvbTime>,

    /// Route via this stop
    #[arg(long)]
    pub via: Option<StopId>,
}

impl Default for RouteArgs {
    fn default() -> Self {
        Self {
            origin: StopId::from_static(DEFAULT_ORIGIN),
            destination: StopId::from_static(DEFAULT_DESTINATION),
            arrival: false,
            time: None,
            via: None,
        }
    }
}

impl RouteArgs {
    /// The query these arguments describe, resolving a missing time to now.
    pub fn query(&self) -> RouteQuery {
        RouteQuery::new(
            self.origin.clone(),
            self.destination.clone(),
            self.time.unwrap_or_else(DvbTime::now),
        )
        .with_arrival(self.arrival)
        .with_via(self.via.clone())
    }
}

impl Cli {
    /// How results should be printed.
    pub fn output(&self) -> Output {
        if self.json {
            Output::Json
        } else {
            Output::Inspect(DumpOptions::new(
                Some(self.depth),
                Some(self.max_array_length),
            ))
        }
    }

    pub fn config(&self) -> VvoConfig {
        VvoConfig::new()
            .with_base_url(&self.base_url)
            .with_timeout(self.timeout)
    }
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Run the parsed command, writing its result to `out`.
pub async fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), QueryError> {
    let output = cli.output();
    let command = cli
        .command
        .clone()
        .unwrap_or_else(|| Command::Route(RouteArgs::default()));

    if let Some(path) = &cli.mock {
        debug!(path = %path.display(), "using recorded responses");
        let mock = MockVvoClient::from_file(path)?;

        return match command {
            Command::Route(args) => run_route_query(&mock, &args.query(), output, out).await,
            other => Err(VvoError::NotConfigured(format!(
                "`{}` is not available with --mock",
                other.name()
            ))
            .into()),
        };
    }

    let client = VvoClient::new(cli.config())?;

    match command {
        Command::Route(args) => run_route_query(&client, &args.query(), output, out).await,

        Command::Find { query, limit, all } => {
            let mut params = if all {
                point::Params::all(&query)
            } else {
                point::Params::stops(&query)
            };
            if let Some(limit) = limit {
                params = params.with_limit(limit);
            }
            let found = client.find_points(&params).await?;
            emit(&*found, output, out)
        }

        Command::Departures { stop, limit } => {
            let mut params = monitor::Params::new(&stop);
            if let Some(limit) = limit {
                params = params.with_limit(limit);
            }
            let monitor = client.departure_monitor(&params).await?;
            emit(&*monitor, output, out)
        }

        Command::Trip {
            trip_id,
            stop,
            time,
        } => {
            let params = trip::Params::new(&trip_id, &stop, time.unwrap_or_else(DvbTime::now));
            let trip = client.trip_details(&params).await?;
            emit(&*trip, output, out)
        }

        Command::Lines { stop } => {
            let lines = client.lines(&stop).await?;
            emit(&*lines, output, out)
        }

        Command::Changes { lines: true, .. } => {
            let params = changes::LinesParams {
                format: Some("json"),
                ..Default::default()
            };
            let lines = client.route_change_lines(&params).await?;
            emit(&*lines, output, out)
        }

        Command::Changes { short_term, .. } => {
            let params = changes::Params {
                shortterm: short_term.then_some(true),
                provider: None,
            };
            let changes = client.route_changes(&params).await?;
            emit(&*changes, output, out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/mock/trips.json");

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dvb-route").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn no_args_is_default_route() {
        let cli = parse(&[]);

        assert!(cli.command.is_none());
        assert_eq!(cli.depth, 7);
        assert_eq!(cli.max_array_length, 2);
        assert!(!cli.json);
        assert_eq!(
            cli.output(),
            Output::Inspect(DumpOptions::new(Some(7), Some(2)))
        );
    }

    #[test]
    fn route_defaults_to_fixed_stops() {
        let cli = parse(&["route"]);
        let Some(Command::Route(args)) = cli.command else {
            panic!("expected route command");
        };

        assert_eq!(args, RouteArgs::default());
        let query = args.query();
        assert_eq!(query.origin.as_str(), "33000742");
        assert_eq!(query.destination.as_str(), "33000037");
        assert!(!query.is_arrival_time);
    }

    #[test]
    fn route_overrides() {
        let cli = parse(&[
            "route",
            "33000028",
            "33000037",
            "--arrival",
            "--time",
            "2021-01-01T00:00:00+01:00",
            "--json",
        ]);
        let Some(Command::Route(args)) = &cli.command else {
            panic!("expected route command");
        };

        let query = args.query();
        assert_eq!(query.origin.as_str(), "33000028");
        assert!(query.is_arrival_time);
        assert_eq!(query.time.timestamp_millis(), 1_609_455_600_000);
        assert_eq!(cli.output(), Output::Json);
    }

    #[test]
    fn rejects_blank_stop() {
        let result = Cli::try_parse_from(["dvb-route", "route", " ", "33000037"]);
        assert!(result.is_err());
    }

    #[test]
    fn find_and_departures() {
        let cli = parse(&["find", "Post", "--limit", "3", "--all"]);
        assert!(matches!(
            cli.command,
            Some(Command::Find { ref query, limit: Some(3), all: true }) if query == "Post"
        ));

        let cli = parse(&["-vv", "departures", "33000037", "-l", "5"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Some(Command::Departures { limit: Some(5), .. })
        ));
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(9), "trace");
    }

    #[tokio::test]
    async fn mock_serves_default_route() {
        let cli = parse(&["--mock", FIXTURE]);
        let mut out = Vec::new();

        run(&cli, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('{'));
        assert!(text.contains("Routes:"));
    }

    #[test]
    fn route_via_reaches_query() {
        let cli = parse(&["route", "--via", "33000028"]);
        let Some(Command::Route(args)) = &cli.command else {
            panic!("expected route command");
        };

        let query = args.query();
        assert_eq!(query.via.as_ref().map(StopId::as_str), Some("33000028"));
        assert_eq!(query.origin.as_str(), "33000742");
    }

    #[test]
    fn changes_lines_flag() {
        let cli = parse(&["changes", "--lines"]);
        assert!(matches!(
            cli.command,
            Some(Command::Changes { lines: true, short_term: false })
        ));

        assert!(Cli::try_parse_from(["dvb-route", "changes", "--lines", "--short-term"]).is_err());
    }

    #[tokio::test]
    async fn mock_rejects_via() {
        let cli = parse(&["--mock", FIXTURE, "route", "--via", "33000028"]);
        let mut out = Vec::new();

        let err = run(&cli, &mut out).await.unwrap_err();

        assert!(matches!(err, QueryError::Vvo(VvoError::NotConfigured(_))));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn mock_rejects_other_commands() {
        let cli = parse(&["--mock", FIXTURE, "lines", "33000037"]);
        let mut out = Vec::new();

        let err = run(&cli, &mut out).await.unwrap_err();

        assert!(matches!(err, QueryError::Vvo(VvoError::NotConfigured(_))));
        assert!(out.is_empty());
    }
}
