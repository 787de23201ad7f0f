//! CLI command implementations.

mod check;
mod inspect;
mod load;
mod signatures;

pub use check::{run_check, CheckArgs};
pub use inspect::{run_inspect, InspectArgs};
pub use signatures::{run_signatures, SignaturesArgs};
