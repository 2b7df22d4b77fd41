//! # region-table
//!
//! Retrieval and parsing of the REAPER region list.
//!
//! The DAW's web interface exposes its regions at `/_/REGION` as a
//! tab-separated text dump. This crate turns that dump into a
//! name-keyed [`RegionsData`] map and converts region colors for display.
//!
//! ```rust
//! use region_table::{parse, color};
//!
//! let body = "REGION_LIST\nREGION\tVerse\t1\t0\t48\t16711680\nREGION_LIST_END";
//! let regions = parse(body);
//!
//! let verse = regions.get("Verse").unwrap();
//! assert_eq!(color::hex_from_literal(&verse.color).as_deref(), Some("FF0000"));
//! ```

pub mod color;
pub mod error;
pub mod fetch;
pub mod parser;

pub use error::{FetchError, FetchResult};
pub use fetch::{FetchConfig, RegionFetcher, REGION_PATH};
pub use parser::{parse, Region, RegionEntry, RegionsData, UNNAMED_REGION};
