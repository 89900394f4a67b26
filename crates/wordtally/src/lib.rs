//! Wordtally: live word and character counts for a text editor, as a WASM widget.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { WordCounterApp } from './wordtally.js';
//!
//! async function main() {
//!     await init();
//!     // expects #textInput, #clearBtn, #copyBtn and the six statistic elements
//!     const app = new WordCounterApp();
//!     console.log(app.metrics_json());
//! }
//! ```
//!
//! Counting and animation logic lives in [`wordtally_core`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod browser;

pub use wordtally_core;
