pub mod context;
pub mod counters;
pub mod registry_client;
pub mod ttl_cache;

pub use context::ResolverContext;
pub use counters::ResolutionCounters;
pub use registry_client::RegistryClient;
pub use ttl_cache::{CacheEntry, TtlCache};
