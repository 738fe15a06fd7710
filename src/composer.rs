pub mod client;
pub mod enums;
pub mod errors;
pub mod models;
pub mod structs;
