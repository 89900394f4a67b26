//! Browser runtime for the word counter widget.
//!
//! Bridges the platform-independent core (metrics, presenter, commands) to
//! the DOM, timers, clipboard and `localStorage`.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod notify;
#[cfg(target_arch = "wasm32")]
pub mod sink;

// Cross-platform modules
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use app::WordCounterApp;
#[cfg(target_arch = "wasm32")]
pub use sink::DomSink;
pub use storage::{DraftStore, Storage, StorageError};
