//! Application-level orchestration.
//!
//! This module owns the fetch lifecycle: it turns UI commands into gateway
//! calls on the runtime and streams the outcomes back as events. UI/CLI
//! layers call into this module to keep responsibilities separated.

mod controller;

pub use controller::{run_controller, UiCommand};
