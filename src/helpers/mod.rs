//! Helper functions for templates
//!
//! Date formatting and URL generation shared by the generator and the
//! post list view.

mod date;
mod url;

pub use date::*;
pub use url::*;
