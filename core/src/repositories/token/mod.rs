mod memory;
mod store;

pub use memory::InMemoryTokenStore;
pub use store::{RotateOutcome, TokenStore};
