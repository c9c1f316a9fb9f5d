//! Modes of transport and real-time states.

use serde::{Deserialize, Serialize};

/// Mode of transport as reported by the WebAPI.
///
/// Unknown values deserialize to [`Mot::Other`] so that a new mode on the
/// server does not break every response that mentions it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mot {
    Tram,
    CityBus,
    IntercityBus,
    SuburbanRailway,
    Train,
    Cableway,
    Ferry,
    HailedSharedTaxi,
    Footpath,
    #[serde(other)]
    Other,
}

/// Whether a departure or arrival runs to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrivalState {
    InTime,
    Delayed,
    Cancelled,
    #[serde(other)]
    Unknown,
}
