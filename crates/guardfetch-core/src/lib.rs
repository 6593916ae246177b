pub mod config;
pub mod logging;

pub mod admission;
pub mod fetch;
pub mod span;
pub mod transport;
