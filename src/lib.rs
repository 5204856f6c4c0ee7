//! Local tooling for the ChessSim web app.
//!
//! - [`fetch`] downloads the Stockfish.js engine next to the app so it loads
//!   same-origin.
//! - [`server`] serves the app over HTTP with the CORS and cross-origin
//!   isolation headers threaded engines need for `SharedArrayBuffer`.

pub mod config;
pub mod fetch;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
