//! Content module - post models and the content API client

mod client;
mod error;
mod post;

pub use client::{ContentSource, PrismicClient};
pub use error::{ContentError, Result};
pub use post::{PostPage, PostSummary, RawDocument, RawPostData, SearchResponse};

#[cfg(test)]
pub(crate) mod testing;
