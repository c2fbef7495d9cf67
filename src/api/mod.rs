pub mod client;
pub mod error;

pub use client::{HttpInboxApi, InboxApi};
pub use error::ApiError;
