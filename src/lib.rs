// Library root: exposes internals for integration tests.
// The binary entry point is src/main.rs.

pub mod config;
pub mod contact;
pub mod error;
pub mod hero;
pub mod logger;
pub mod page;
pub mod relay;
pub mod typewriter;
