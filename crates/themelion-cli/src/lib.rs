//! Library side of the `themelion` binary.
//!
//! [`pipeline`] holds the build and check passes so they can be driven
//! without going through argument parsing; [`reload`] holds the output
//! sink used while watching.

pub mod logging;
pub mod pipeline;
pub mod reload;
pub mod types;
