//! Pure types shared between the ample core library and its frontends.

mod page;
mod repeat_state;

pub use page::{Page, DEFAULT_PAGE_LIMIT};
pub use repeat_state::RepeatState;
