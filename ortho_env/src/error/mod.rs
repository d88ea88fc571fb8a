//! Error types produced while reading the environment source.

mod conversions;
mod types;

pub use types::{EnvError, EnvResult};

#[cfg(test)]
mod tests;
