mod config;
mod detector;
mod election;
mod errors;
mod membership;

pub use config::*;
pub use detector::*;
pub use election::*;
pub use errors::*;
pub use membership::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub(crate) mod test_utils;
