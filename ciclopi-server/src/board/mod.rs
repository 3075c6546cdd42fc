//! Board assembly: ranking, filtering and the external interface that
//! the (out-of-crate) messaging transport renders from.

mod rank;
mod service;

pub use rank::{FIXED_REFERENCE, rank_stations};
pub use service::{
    Availability, Board, BoardError, BoardFilter, BoardRow, BoardService, SettingOutcome,
};
