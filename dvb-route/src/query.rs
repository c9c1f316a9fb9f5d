//! The route query itself: one lookup between two stops, printed once.

use std::io::{self, Write};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::domain::{DvbTime, StopId};
use crate::dump::{DumpOptions, dump};
use crate::vvo::VvoError;

/// Helmholtzstraße, Dresden.
pub const DEFAULT_ORIGIN: &str = "33000742";

/// Postplatz, Dresden.
pub const DEFAULT_DESTINATION: &str = "33000037";

/// Errors from running a query and printing its result.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Vvo(#[from] VvoError),

    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write result: {0}")]
    Io(#[from] io::Error),
}

/// Something that can answer a route query.
///
/// Results are the routing payload as received, without the response
/// envelope.
#[async_trait]
pub trait RouteSource: Send + Sync {
    async fn route(
        &self,
        origin: &StopId,
        destination: &StopId,
        time: DvbTime,
        is_arrival_time: bool,
    ) -> Result<Value, VvoError>;

    /// Route through an intermediate stop.
    async fn route_via(
        &self,
        _origin: &StopId,
        _destination: &StopId,
        via: &StopId,
        _time: DvbTime,
        _is_arrival_time: bool,
    ) -> Result<Value, VvoError> {
        Err(VvoError::NotConfigured(format!(
            "this source cannot route via {via}"
        )))
    }
}

/// The inputs of a single route lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub origin: StopId,
    pub destination: StopId,
    pub time: DvbTime,
    pub is_arrival_time: bool,
    pub via: Option<StopId>,
}

impl RouteQuery {
    /// A query departing at `time`.
    pub fn new(origin: StopId, destination: StopId, time: DvbTime) -> Self {
        Self {
            origin,
            destination,
            time,
            is_arrival_time: false,
            via: None,
        }
    }

    /// Helmholtzstraße to Postplatz, departing at `time`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dvb_route::domain::DvbTime;
    /// use dvb_route::query::RouteQuery;
    ///
    /// let query = RouteQuery::default_at(DvbTime::now());
    /// assert_eq!(query.origin.as_str(), "33000742");
    /// assert_eq!(query.destination.as_str(), "33000037");
    /// assert!(!query.is_arrival_time);
    /// ```
    pub fn default_at(time: DvbTime) -> Self {
        Self::new(
            StopId::from_static(DEFAULT_ORIGIN),
            StopId::from_static(DEFAULT_DESTINATION),
            time,
        )
    }

    /// Treat `time` as the desired arrival.
    pub fn arriving(self) -> Self {
        self.with_arrival(true)
    }

    pub fn with_arrival(mut self, is_arrival_time: bool) -> Self {
        self.is_arrival_time = is_arrival_time;
        self
    }

    /// Route through `via`.
    pub fn with_via(mut self, via: Option<StopId>) -> Self {
        self.via = via;
        self
    }
}

/// How a result is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Bounded structured dump.
    Inspect(DumpOptions),
    /// Pretty-printed JSON.
    Json,
}

impl Default for Output {
    fn default() -> Self {
        Output::Inspect(DumpOptions::default())
    }
}

/// Render a typed result and write it to `out` in a single write.
///
/// Fields the API left out serialize as `null` in the typed structs;
/// those are dropped again.
pub fn emit<T, W>(value: &T, output: Output, out: &mut W) -> Result<(), QueryError>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let mut value = serde_json::to_value(value)?;
    prune_nulls(&mut value);
    write_value(&value, output, out)
}

/// Render `value` unchanged and write it to `out` in a single write.
pub fn write_value<W: Write>(value: &Value, output: Output, out: &mut W) -> Result<(), QueryError> {
    let rendered = match output {
        Output::Inspect(options) => dump(value, &options),
        Output::Json => serde_json::to_string_pretty(value)?,
    };

    writeln!(out, "{rendered}")?;
    Ok(())
}

/// Run `query` against `source` and write the routes to `out`.
///
/// The source is called exactly once. Nothing is written if it fails.
pub async fn run_route_query<S, W>(
    source: &S,
    query: &RouteQuery,
    output: Output,
    out: &mut W,
) -> Result<(), QueryError>
where
    S: RouteSource + ?Sized,
    W: Write,
{
    info!(
        origin = %query.origin,
        destination = %query.destination,
        time = %query.time,
        is_arrival_time = query.is_arrival_time,
        via = query.via.as_ref().map(StopId::as_str),
        "querying route"
    );

    let routes = match &query.via {
        None => {
            source
                .route(
                    &query.origin,
                    &query.destination,
                    query.time,
                    query.is_arrival_time,
                )
                .await?
        }
        Some(via) => {
            source
                .route_via(
                    &query.origin,
                    &query.destination,
                    via,
                    query.time,
                    query.is_arrival_time,
                )
                .await?
        }
    };

    let count = routes
        .get("Routes")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    info!(count, "received routes");

    write_value(&routes, output, out)
}

fn prune_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(prune_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(prune_nulls),
        _ => {}
    }
}
