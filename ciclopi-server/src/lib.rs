//! CicloPi station board engine.
//!
//! Maintains a live, per-chat view over the CicloPi bike-sharing fleet:
//! the public station feed is fetched behind a short time-windowed cache,
//! parsed into station records, and ranked/filtered according to each
//! chat's stored preferences and favorite-station order.
//!
//! The messaging transport that renders boards to users is a separate
//! concern; this crate exposes [`board::BoardService`] to it.

pub mod board;
pub mod domain;
pub mod feed;
pub mod store;
