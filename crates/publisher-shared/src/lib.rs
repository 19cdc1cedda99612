//! # Publisher Shared
//!
//! Wire types shared by the HTTP layer and its clients.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
