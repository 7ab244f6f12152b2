pub mod errors;
pub mod routes;
pub mod startup;

pub use startup::{run, start, MockServer};
