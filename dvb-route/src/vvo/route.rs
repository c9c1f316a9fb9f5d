//! Trip planning: `POST /tr/trips`.
//!
//! These types map directly to the WebAPI JSON. They use `Option`
//! liberally because the API omits fields rather than sending null values.

use serde::{Deserialize, Serialize};

use crate::domain::{ArrivalState, DvbTime, Mot, StopId};

/// Endpoint path, relative to the base URL.
pub(crate) const PATH: &str = "/tr/trips";

/// Request body for a route query.
#[derive(Debug, Clone, Serialize)]
pub struct Params<'a> {
    /// Origin stop.
    pub origin: &'a StopId,
    /// Destination stop.
    pub destination: &'a StopId,
    /// Departure time, or arrival time when `isarrivaltime` is set.
    pub time: DvbTime,
    /// Interpret `time` as the desired arrival.
    pub isarrivaltime: bool,
    /// Include short-term changes (disruptions, diversions).
    pub shorttermchanges: bool,
    /// Response format; the API only speaks `"json"`.
    pub format: &'static str,
    /// Intermediate stop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<&'a StopId>,
    /// Accessibility preferences.
    #[serde(rename = "mobilitySettings", skip_serializing_if = "Option::is_none")]
    pub mobility_settings: Option<MobilitySettings>,
    /// Journey preferences.
    #[serde(rename = "standardSettings", skip_serializing_if = "Option::is_none")]
    pub standard_settings: Option<StandardSettings>,
}

impl<'a> Params<'a> {
    /// A plain query between two stops.
    pub fn new(
        origin: &'a StopId,
        destination: &'a StopId,
        time: DvbTime,
        isarrivaltime: bool,
    ) -> Self {
        Self {
            origin,
            destination,
            time,
            isarrivaltime,
            shorttermchanges: true,
            format: "json",
            via: None,
            mobility_settings: None,
            standard_settings: None,
        }
    }

    /// Route via an intermediate stop.
    pub fn with_via(mut self, via: &'a StopId) -> Self {
        self.via = Some(via);
        self
    }

    /// Set accessibility preferences.
    pub fn with_mobility(mut self, settings: MobilitySettings) -> Self {
        self.mobility_settings = Some(settings);
        self
    }

    /// Set journey preferences.
    pub fn with_standard(mut self, settings: StandardSettings) -> Self {
        self.standard_settings = Some(settings);
        self
    }
}

/// Accessibility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MobilityRestriction {
    None,
    Medium,
    High,
    Individual,
}

/// Entrance requirement for vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entrance {
    Any,
    SmallStep,
    NoStep,
}

/// Accessibility preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobilitySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobility_restriction: Option<MobilityRestriction>,
    /// Only honoured with [`MobilityRestriction::Individual`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solid_stairs: Option<bool>,
    /// Only honoured with [`MobilityRestriction::Individual`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalators: Option<bool>,
    /// Only honoured with [`MobilityRestriction::Individual`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub least_change: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrance: Option<Entrance>,
}

/// Maximum number of changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxChanges {
    Unlimited,
    Two,
    One,
    None,
}

/// Walking speed assumed for footpaths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkingSpeed {
    VerySlow,
    Slow,
    Normal,
    Fast,
    VeryFast,
}

/// Which supplement-priced services may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtraCharge {
    /// No restriction.
    #[serde(rename = "")]
    Any,
    /// Only services without a supplement.
    None,
    /// Only local services.
    LocalTraffic,
}

/// Journey preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardSettings {
    /// Modes of transport to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mot: Option<Vec<Mot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_changes: Option<MaxChanges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walking_speed: Option<WalkingSpeed>,
    /// Maximum walk to the first stop, in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footpath_to_stop: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_alternative_stops: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_charge: Option<ExtraCharge>,
}

/// Payload of a route response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Routes {
    #[serde(default)]
    pub routes: Vec<Route>,
    pub session_id: Option<String>,
}

/// One suggested connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    /// Total travel time in minutes.
    pub duration: Option<u32>,
    pub interchanges: Option<u32>,
    pub price: Option<String>,
    pub price_day_ticket: Option<String>,
    pub price_level: Option<u32>,
    pub fare_zone_origin: Option<u32>,
    pub fare_zone_destination: Option<u32>,
    pub fare_zone_names: Option<String>,
    pub fare_zone_names_day_ticket: Option<String>,
    pub number_of_fare_zones: Option<String>,
    pub number_of_fare_zones_day_ticket: Option<String>,
    pub net: Option<String>,
    pub route_id: Option<u32>,
    pub route_cancelled: Option<bool>,
    pub map_pdf_id: Option<String>,
    #[serde(default)]
    pub map_data: Vec<String>,
    #[serde(default)]
    pub mot_chain: Vec<MotChainLink>,
    #[serde(default)]
    pub partial_routes: Vec<PartialRoute>,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

/// Line network identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Diva {
    pub network: Option<String>,
    pub number: Option<String>,
}

/// A vehicle used somewhere along a route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MotChainLink {
    pub name: Option<String>,
    pub direction: Option<String>,
    pub r#type: Option<Mot>,
    pub product_name: Option<String>,
    pub diva: Option<Diva>,
    pub dl_id: Option<String>,
    /// Identifier for `dm/trip` lookups.
    pub stateless_id: Option<String>,
    pub train_number: Option<String>,
    pub operator_code: Option<String>,
    pub transportation_company: Option<String>,
    #[serde(default)]
    pub changes: Vec<String>,
}

/// One leg of a route: a ride or a footpath.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartialRoute {
    pub partial_route_id: Option<u32>,
    pub duration: Option<u32>,
    pub mot: Option<MotChainLink>,
    pub map_data_index: Option<i32>,
    pub shift: Option<String>,
    pub trip_cancelled: Option<bool>,
    pub changeover_endangered: Option<bool>,
    pub booking_link: Option<String>,
    #[serde(default)]
    pub infos: Vec<String>,
    #[serde(default)]
    pub regular_stops: Vec<RegularStop>,
    #[serde(default)]
    pub previous_departure_times: Vec<DvbTime>,
    #[serde(default)]
    pub next_departure_times: Vec<DvbTime>,
}

/// A stop served on a leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegularStop {
    pub name: Option<String>,
    pub place: Option<String>,
    pub r#type: Option<String>,
    pub data_id: Option<String>,
    pub dh_id: Option<String>,
    pub arrival_time: Option<DvbTime>,
    pub arrival_real_time: Option<DvbTime>,
    pub arrival_state: Option<ArrivalState>,
    pub departure_time: Option<DvbTime>,
    pub departure_real_time: Option<DvbTime>,
    pub departure_state: Option<ArrivalState>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub platform: Option<Platform>,
    pub occupancy: Option<String>,
    pub map_pdf_id: Option<String>,
    #[serde(default)]
    pub cancel_reasons: Vec<String>,
    #[serde(default)]
    pub park_and_rail: Vec<ParkAndRail>,
}

/// Platform or track.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Platform {
    pub name: Option<String>,
    /// Either `"Platform"` or `"Railtrack"`.
    pub r#type: Option<String>,
}

/// A ticket offer for a route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ticket {
    pub name: Option<String>,
    pub price: Option<String>,
    pub price_level: Option<u32>,
    pub fare_zone_names: Option<String>,
    pub number_of_fare_zones: Option<String>,
}

/// A park-and-ride site near a stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParkAndRail {
    pub name: Option<String>,
    pub coordinates: Option<Coordinate>,
    pub free_spaces: Option<u32>,
    pub total_spaces: Option<u32>,
    pub disabled_persons_only: Option<bool>,
    #[serde(default)]
    pub parking_lots: Vec<ParkingLot>,
}

/// WGS84 position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Coordinate {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// A single parking space.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParkingLot {
    pub coordinates: Option<Coordinate>,
    #[serde(default)]
    pub occupied: bool,
    #[serde(default)]
    pub disabled_persons_only: bool,
}
