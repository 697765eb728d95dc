//! Presentation Layer
//!
//! Turns panel state into something a terminal or a script can read.
//!
//! ## Structure
//!
//! - `output` - Text and JSON rendering of trees, listings and hierarchy rows
//!
//! ## Usage
//!
//! ```ignore
//! use arbor::presentation::output::TreeRenderer;
//!
//! let text = TreeRenderer::default().render_root(browser.tree(), 0);
//! print!("{}", text);
//! ```

pub mod output;

pub use output::{OutputFormat, TreeRenderer};
