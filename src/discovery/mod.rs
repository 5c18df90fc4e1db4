//! Package discovery: walking the dependency tree and dropping duplicates

pub mod filter;
pub mod walker;

pub use filter::filter_seeds;
pub use walker::PackageWalker;
