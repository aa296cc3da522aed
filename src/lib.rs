//! Client core for the back-office console: typed records, the list
//! filter → paginate → aggregate pipeline, session handling and the REST boundary.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod ids;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod pagination;
pub mod prospects;
pub mod session;
pub mod stats;
pub mod validation;
pub mod view;

pub use api::{ApiClient, CollectionSource, ListQuery, Page, ReqwestTransport, Transport};
pub use config::Config;
pub use error::ApiError;
pub use filter::{Choice, Filterable, ListFilter, SearchTerm};
pub use pagination::{InvalidPageSize, PageSlice, Pager};
pub use session::{MemorySessionStore, Session, SessionKey, SessionStore, SqliteSessionStore};
pub use stats::{percentage, Aggregate, Breakdown};
pub use view::{ListView, ViewSnapshot};
