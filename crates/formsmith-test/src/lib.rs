//! # formsmith-test
//!
//! Testing utilities for formsmith. Provides a live HTTP server on a random
//! port, an in-process mock of the view API that records every `PATCH`, and
//! schema fixtures shared by the integration suites.
//!
//! ## Modules
//!
//! - [`live_server`] - Axum server bound to `127.0.0.1:0`
//! - [`mock_api`] - Mock `GET`/`PATCH` view endpoints
//! - [`fixtures`] - Sample objects and views

pub mod fixtures;
pub mod live_server;
pub mod mock_api;

pub use live_server::LiveServer;
pub use mock_api::MockViewApi;
