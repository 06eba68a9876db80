//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use actor_client::*;
pub use order_client::*;
pub use product_client::*;
pub use user_client::*;

/// Page size used when a listing asks for size 0 and nothing else was configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;
