//! Domain data: the entities the actors own, their ids and payloads, and the
//! result shapes handed back to callers.

pub mod identity;
pub mod order;
pub mod page;
pub mod product;
pub mod stats;
pub mod user;

pub use identity::*;
pub use order::*;
pub use page::*;
pub use product::*;
pub use stats::*;
pub use user::*;
