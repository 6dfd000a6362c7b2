pub mod registry;
pub mod traits;

// Source implementations
pub mod mock;
pub mod nessie;
