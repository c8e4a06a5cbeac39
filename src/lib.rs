//! Procedurally grown ASCII bonsai trees.
//!
//! [`bonsai::generate`] grows a tree onto a character grid; the
//! [`colors::ColorTable`] maps every glyph it can emit to a colour.

pub mod bonsai;
pub mod canvas;
pub mod colors;
pub mod config;
pub mod error;
pub mod export;
pub mod grow;
pub mod help;
pub mod settings;
pub mod terminal;

pub use bonsai::{generate, generate_with_timeout, Bonsai, Generator};
pub use canvas::Canvas;
pub use colors::{color_table, ColorTable, Rgb};
pub use config::Style;
pub use error::{Error, Result};
