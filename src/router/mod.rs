//! Routing and the capability seam between routes and their side effects.

pub mod capabilities;
pub mod dispatcher;

pub use capabilities::{Capabilities, LocalCapabilities};
pub use dispatcher::Dispatcher;
