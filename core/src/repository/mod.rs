pub mod loader;

// Re-export
pub use loader::Loader;
