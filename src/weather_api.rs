pub mod client;
pub mod error;
mod response;
