//! roulette-core - Weighted item list storage and selection.
//!
//! This library holds the domain logic for the roulette service: the
//! `(label, weight)` item model, the cumulative-weight selector, and the
//! `SQLite`-backed item store with its transactional replace-all
//! operation. It has no HTTP dependencies; the server crate wires these
//! pieces to the network.
//!
//! # Modules
//!
//! - [`item`]: `Item` wire type and list validation
//! - [`selector`]: weighted random selection over an ordered item list
//! - [`store`]: durable item list with atomic wholesale replacement
//! - [`config`]: TOML service configuration

pub mod config;
pub mod item;
pub mod selector;
pub mod store;

pub use config::{ConfigError, ServiceConfig};
pub use item::{Item, ValidationError, validate_items};
pub use selector::{SelectorError, choose, spin};
pub use store::{SqliteItemStore, StoreError};
