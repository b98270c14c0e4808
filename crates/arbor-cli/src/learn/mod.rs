//! Train/evaluate pipeline orchestration for the `arbor` binary.
pub mod evaluate;
pub mod input;
pub mod output;
pub mod train;
pub mod util;
