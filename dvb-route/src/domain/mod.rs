//! Domain types shared by the WebAPI DTOs.
//!
//! Identifiers and timestamps are validated at construction time, so code
//! that receives these types can trust their shape.

mod mot;
mod stop;
mod time;

pub use mot::{ArrivalState, Mot};
pub use stop::{InvalidStopId, PoiKind, StopId};
pub use time::{DvbTime, TimeError};
