//! MySQL implementations of core persistence contracts

mod token_store;


pub use token_store::MySqlTokenStore;
