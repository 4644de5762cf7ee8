//! The leader-detection core: a single watch-loop task plus the public
//! facade that forwards `detect()` calls into it.
//!
//! ## Key Responsibilities
//! - Owns all mutable detection state inside one spawned task
//! - Serializes `detect()` calls and watch completions in arrival order
//! - Fulfills pending waiters in bulk, exactly once, on each leader change

mod core;
mod event;
mod leader_detector;
mod waiters;

pub use leader_detector::*;

pub(crate) use self::core::*;
pub(crate) use event::*;
pub(crate) use waiters::*;

#[cfg(test)]
mod waiters_test;
