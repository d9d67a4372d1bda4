//! Local persistence for reference directories.

pub mod cache;

pub use cache::DirectoryCache;

/// Logical names of the persisted directories.
pub mod names {
    pub const STAFF: &str = "staff";
    pub const SERVICES: &str = "services";
}
