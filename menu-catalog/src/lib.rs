//! Drink catalog model for the home bar menu.
//!
//! This crate is headless and transport-agnostic. It covers:
//!
//! - the canonical [`Drink`] record and its enumerated attributes
//! - the field mapper that turns backend records into drinks (and drafts back into request bodies)
//! - category classification with a fixed priority order and alphabetical fallback
//! - an optional display policy and a small built-in fallback menu
//!
//! For fetching and mutating records, see the `menu-client` crate. For scroll-to-category
//! animation, see `menu-scroll`.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod category;
mod display;
mod error;
mod fallback;
mod mapper;
mod types;


pub use category::{Catalog, Category, PriorityList};
pub use display::{DisplayPolicy, format_abv};
pub use error::MappingError;
pub use fallback::builtin_catalog;
pub use mapper::{ack_id, map_record, map_records, to_raw, validate_draft};
pub use types::{BaseLiquor, Drink, DrinkDraft, DrinkId, Glass, Ice, Ingredient, MixingMethod};
