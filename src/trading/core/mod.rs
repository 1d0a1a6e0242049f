pub mod descriptor;
pub mod orchestrator;
pub mod params;
pub mod timer;
pub mod traits;
