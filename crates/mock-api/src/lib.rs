#![forbid(unsafe_code)]

pub mod server;

pub use server::{MockApiConfig, ScenarioQuery, create_router, scenario_response};
