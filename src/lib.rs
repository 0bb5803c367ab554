//! Client and command-line front end for the reqres.in demo user API.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod queue;
pub mod responses;
pub mod service;
pub mod transport;
pub mod types;

pub use error::{Outcome, ReqresError, ServiceError, TransportError};
pub use service::UserService;
pub use transport::{HttpRequest, RawResponse, ReqwestTransport, Transport};
