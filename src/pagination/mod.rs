//! Post list page - paginated post state and the load-more flow
//!
//! State changes go through [`PaginationState::merge`], a pure function of
//! the old state and a fetched page. [`PostListPage`] wraps it with the
//! content source, a single-flight guard, and a liveness check.

mod page;
mod state;
mod view;

pub use page::{LoadOutcome, PageError, PostListPage};
pub use state::PaginationState;
pub use view::{ListView, PostView, Presenter};
