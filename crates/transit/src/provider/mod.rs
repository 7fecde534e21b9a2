//! Catalogue storage.

pub mod catalogue;

pub use catalogue::TransportCatalogue;
