//! Page-level behaviour, independent of HTTP. Routes render what these
//! functions return.

pub mod about;
pub mod community;
pub mod explore;
pub mod help;
pub mod login;
