//! Helper functions for page code
//!
//! Date formatting and post URL helpers that templates call on normalized
//! posts.

mod date;
mod html;
mod post;

pub use date::*;
pub use html::*;
pub use post::*;
