//! Guided-tour engine: renders flow slides into a host page, navigates
//! between them and keeps float slides attached to their targets.

pub mod config;
pub mod controller;
mod diagnostics;
pub mod hooks;
pub mod host;
pub mod lint;
pub mod loader;
pub mod position;
pub mod render;

pub use config::{load_config, load_config_with_flow, ButtonHtml, ConfigError, TourConfig};
pub use controller::TourController;
pub use hooks::{HookContext, HookRegistry};
pub use host::{LoadContinuation, TourEvent, TourHost};
pub use lint::lint_flow;
pub use loader::{AutoFlowLoader, FileFlowLoader, FlowLoader, HttpFlowLoader};
pub use position::{FloatPositioner, Horizontal, Placement, FLOATING_SLIDE_WIDTH, TARGET_ATTRIBUTE};
pub use render::{render_slide, SLIDE_KEY};
