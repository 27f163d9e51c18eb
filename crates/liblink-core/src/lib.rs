pub mod config;
pub mod error;
pub mod io;
pub mod policy;
pub mod resolve;
pub mod runner;
pub mod sanitize;

pub use error::{LinkError, Result};
