//! CicloPi feed pipeline: fetch, parse, cache.
//!
//! The public station page is a third-party feed with no compatibility
//! guarantee, so the parser is best-effort and the fetch sits behind a
//! short time-windowed cache that also memoizes failures.

mod cache;
mod client;
mod error;
mod parser;

pub use cache::{CacheConfig, FeedCache, Snapshot};
pub use client::{FeedClient, FeedConfig, FetchPage};
pub use error::FeedError;
pub use parser::parse_stations;
