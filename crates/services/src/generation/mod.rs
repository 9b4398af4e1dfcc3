mod remote;
mod service;

pub use remote::RemoteConfig;
pub use service::ScenarioGenerationService;
