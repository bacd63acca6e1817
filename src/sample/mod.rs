//! Configuration sampling
//!
//! # Toyota Way: Muda Elimination
//!
//! Every emitted configuration is distinct, so no training run is spent
//! repeating one that has already been scheduled.

mod configuration;
mod sampler;


pub use configuration::{Configuration, Pool};
pub use sampler::Sampler;
