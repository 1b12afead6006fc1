pub mod error;
pub mod icon;
pub mod layout;
pub mod writer;
