pub mod errors;
pub mod pokemon;
pub mod store;

pub use errors::ServiceError;
pub use store::PokemonStore;
