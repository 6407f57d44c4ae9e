//! REST API controllers.

pub mod admin_controller;
pub mod health_controller;
pub mod movie_controller;

pub use health_controller::*;
