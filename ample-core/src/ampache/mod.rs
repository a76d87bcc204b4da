//! Ampache API access: the `AmpacheApi` seam, its HTTP implementation, the
//! records it returns and the query descriptors it accepts.

pub mod api;
pub mod client;
pub mod models;
pub mod query;

pub use api::{AmpacheApi, ApiError};
pub use client::{AmpacheClient, Credentials, API_VERSION};
pub use models::{Album, Artist, Preference};
pub use query::{operator, Combine, Rule, RuleInput, SearchQuery, StatsFilter, StatsQuery};
