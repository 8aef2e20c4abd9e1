//! # cookielab API
//!
//! The HTTP boundary of the service: REST endpoints for the interactive
//! table ([`RestApi`]) and the proxy client for the external prediction
//! collaborator ([`PredictClient`]).

pub mod predict;
pub mod rest;

pub use predict::{PredictClient, PredictError};
pub use rest::{AppState, RestApi, TableState};
