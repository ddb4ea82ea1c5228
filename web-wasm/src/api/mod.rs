//! Data access for the list screens

pub mod backend;
pub mod leave;
pub mod source;
