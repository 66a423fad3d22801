pub mod token;

pub use token::{InMemoryTokenStore, RotateOutcome, TokenStore};
