mod instance;
mod secret;
mod service;

pub use instance::{run_create, run_describe, run_list, run_logs, run_ports, run_remove};
pub use secret::run_secret;
pub use service::{run_activate, run_service, run_token};
