//! shared pieces for the snowdrift crates
//!
//! [`traits`] holds the seams that generators and ids implement and
//! [`clock`] holds the time sources a generator can read from.

pub mod clock;
pub mod traits;
