#![forbid(unsafe_code)]

pub mod model;
pub mod templates;
pub mod time;
pub mod wire;

pub use time::Clock;
