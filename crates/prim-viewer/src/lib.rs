//! PrimLab viewer: builds one of the tutorial scenes from a [`ViewerConfig`],
//! routes parameter edits through the panel and drives the frame loop.

pub mod app;
pub mod config;
pub mod tutorials;

pub use app::App;
pub use config::{Tutorial, ViewerConfig};
pub use tutorials::Setup;
