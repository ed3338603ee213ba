//! Core types and pipeline for the quermesse guide.
//!
//! This crate turns a public festival calendar into map-ready events:
//! - `calendar` fetches raw entries for a date window
//! - `geocoder` resolves each entry's address into a coordinate
//! - `enrich` joins the two, dropping entries that can't be placed
//! - `filter` derives the displayed subset from a `SelectionState`
//! - `pipeline` wires everything together from a `Config`

pub mod calendar;
pub mod config;
pub mod constants;
pub mod date_window;
pub mod enrich;
pub mod error;
pub mod event;
pub mod filter;
pub mod geocoder;
pub mod links;
pub mod pipeline;
pub mod selection;

pub use config::Config;
pub use date_window::DateWindow;
pub use error::{QuermesseError, QuermesseResult};
pub use event::{EnrichedEvent, GeoCoordinate, RawCalendarEntry};
pub use selection::{DateFilter, SelectionState};
