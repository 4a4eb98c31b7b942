//! Shopgraph Core Library
//!
//! Record models and the store-independent pieces of the migration:
//! event kinds, canonical date formatting, schema script parsing and
//! the readiness policy used while waiting for the stores.

pub mod error;
pub mod event;
pub mod model;
pub mod readiness;
pub mod schema_script;
pub mod timefmt;

pub use error::{ShopgraphError, ShopgraphResult};
pub use event::EventKind;
pub use readiness::{ReadinessPolicy, wait_until_ready};
