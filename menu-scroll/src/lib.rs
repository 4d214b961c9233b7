//! Headless scroll-to-section engine.
//!
//! Maps a section selection (e.g. a menu category) to a smooth, eased viewport scroll while the
//! page's scrollable height is still changing as content mounts. The crate provides:
//!
//! - an anchor registry (section key → document-relative top)
//! - tweens with ease-in-out curves
//! - an explicit Idle / Measuring / Animating state machine with restart-on-reselect
//! - `ScrollSurface` / `FrameScheduler` seams so adapters (DOM, TUI, GUI) and tests can drive it
//!
//! This crate is intentionally framework-agnostic and has no clock of its own: every call takes
//! `now_ms` from the adapter.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod engine;
mod key;
mod surface;
mod tween;


pub use anchor::{AnchorMap, SectionAnchor};
pub use engine::{Frame, LayoutMetrics, Phase, ScrollEngine, ScrollOptions};
pub use key::AnchorKey;
pub use surface::{FrameScheduler, ScrollSurface};
pub use tween::{Easing, Tween};
