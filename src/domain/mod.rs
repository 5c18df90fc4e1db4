//! Domain models for the bundle locator
//!
//! Pure data: seeds found by the walker, located bundles and their
//! classified resources. Nothing here touches the filesystem except
//! [`BundleSeed::nested`], which reads an optional manifest.

pub mod bundle;
pub mod resource;
pub mod seed;

pub use bundle::{Bundle, BundleId};
pub use resource::{
    DEFAULT_AFFINITY, Resource, ResourceFilter, ResourceNode, ResourceTree, TypeIndex,
    WILDCARD_SELECTOR,
};
pub use seed::BundleSeed;
