//! Core clock logic
//!
//! Time state, drag handling, quiz generation and the display phases.
//! NO rendering imports; frontends translate input into `FrontendEvent`s,
//! read `AppCore` and render.

pub mod app_core;
pub mod clock;
pub mod drag;
pub mod input_result;
pub mod input_router;
pub mod quiz;
pub mod state;

pub use app_core::AppCore;
pub use input_result::InputResult;
pub use state::{ClockAction, ClockWidget, Phase, Variant};
