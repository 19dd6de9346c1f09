//! Common code shared by the cardroom clients and server: the wire
//! contract for the login API and the HTTP client that speaks it.

/// Talk to the cardroom server.
pub mod api;
