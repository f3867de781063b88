//! # Blog Shared
//!
//! Wire types shared between the API server and its clients.
//! Kept free of server dependencies so it can be compiled for clients as well.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
