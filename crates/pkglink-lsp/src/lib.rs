pub mod config;
pub mod document;
pub mod handlers;
pub mod server;

// Re-export commonly used types
pub use config::LinksConfig;
pub use server::Backend;
