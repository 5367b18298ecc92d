pub mod actor;
pub mod gate;
pub mod jwt;
