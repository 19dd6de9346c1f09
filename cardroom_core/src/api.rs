/// Things that can go wrong in the API
pub mod error;
pub use error::Error;

/// Sign in to the server
pub mod login;

/// Client for the API
pub mod client;
pub use client::Client;
