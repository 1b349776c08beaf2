//! Webserver library for the creature catalog
//!
//! A thin JSON surface that forwards user actions into a `CatalogSession`
//! and returns its snapshots.

pub mod error;
pub mod state;
pub mod webserver_impl;

pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use webserver_impl::WebServer;
