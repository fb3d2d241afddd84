//! Synthetic status provider used by integration setups and `jobpoll serve`.

pub mod models;
pub mod server;

pub use models::{DelayModel, ErrorModel};
pub use server::{Simulator, SimulatorConfig, router, serve};
