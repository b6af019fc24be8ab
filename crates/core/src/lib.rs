pub mod config;
pub mod docs;
pub mod error;
pub mod lexer;
pub mod logging;
pub mod outline;
pub mod semantic;
pub mod store;

pub use error::Result;
