//! In-process dictionary caches
//!
//! Two policies, one per kind of source:
//!
//! | Cache | Key | Invalidation |
//! |-------|-----|--------------|
//! | [`ResourceCache`] | logical resource path | never |
//! | [`FileCache`] | canonical file path | modification time changed |
//!
//! Both guarantee at most one in-flight load per key. The key maps are
//! [`DashMap`](dashmap::DashMap)s holding one `Arc` slot per key, so the map
//! itself is only touched to find or create a slot and loads for different
//! keys never wait on each other. Nothing is persisted across process
//! restarts.

pub mod file;
pub mod resource;

pub use file::{modified_time, FileCache};
pub use resource::ResourceCache;

