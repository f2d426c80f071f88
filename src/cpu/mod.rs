pub mod cache;
pub mod core;
pub mod pool;

pub use cache::{AccessKind, AccessOutcome, CacheHierarchy, CacheStats, CacheTiming, Symbol};
pub use self::core::{Core, CoreId};
pub use pool::CorePool;
