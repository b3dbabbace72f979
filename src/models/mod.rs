//! Request and domain types for script generation

pub mod request;
pub mod scenario;
pub mod tool;

pub use request::{CommonFields, DurationSpec, LoadRequest, LoadScenario, RunConfig, ScenarioRequest};
pub use scenario::{ApiRef, ApiSelection, Executor, ScenarioSpec, Stage, TimeValue};
pub use tool::{K6Language, Mode, Tool};
