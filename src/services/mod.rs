pub mod discover;
pub mod enrichment;
pub mod providers;

pub use discover::DiscoverService;
