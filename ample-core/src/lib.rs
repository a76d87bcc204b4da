pub mod ampache;
pub mod artists;
pub mod config;
pub mod reactive;
pub mod session;
pub mod settings;

pub use ample_common::{Page, RepeatState, DEFAULT_PAGE_LIMIT};

/// Version reported by the client
pub const AMPLE_VERSION: &str = env!("CARGO_PKG_VERSION");
