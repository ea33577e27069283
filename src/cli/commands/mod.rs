//! CLI command implementations.

mod classify;
mod config;
mod doctor;
mod recommend;
mod serve;
mod train;

pub use classify::run_classify;
pub use config::run_config;
pub use doctor::run_doctor;
pub use recommend::run_recommend;
pub use serve::run_serve;
pub use train::run_train;
