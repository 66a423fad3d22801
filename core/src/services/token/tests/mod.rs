
mod cleanup_tests;
mod key_tests;
