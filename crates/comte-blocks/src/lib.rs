//! Block catalog, packed state maps, and schema migration.
#![forbid(unsafe_code)]

pub mod catalog;
mod error;
mod legacy;
mod migrate;
pub mod statemap;
pub mod types;

pub use catalog::{BlockManifest, Catalog, PaletteEntry};
pub use error::CatalogError;
pub use statemap::StateMap;
pub use types::{Nid, RenderLayer, Statemaskval, Stateval, AIR};
