//! # System Lifecycle & Orchestration
//!
//! This module manages the runtime lifecycle of the actors, handling the
//! coordination of starting, wiring, and shutting them down.
//!
//! **Key Responsibilities:**
//! 1. **Actor Creation** - Instantiate all actors and their clients
//! 2. **Dependency Injection** - Wire actors together via context injection
//! 3. **Configuration** - [`SystemConfig`] read from the environment
//! 4. **Graceful Shutdown** - Coordinate clean termination of all actors
//! 5. **Observability Setup** - Initialize tracing and logging infrastructure
//!
//! ## Dependency Injection via Context
//!
//! The framework uses **late binding** to avoid construction-order problems:
//!
//! - **Construction time**: Create actors without dependencies
//! - **Runtime**: Inject dependencies via `run(context)`
//!
//! ```rust,ignore
//! // No dependencies
//! impl ActorEntity for User {
//!     type Context = ();
//! }
//!
//! // Depends on User and Product clients
//! impl ActorEntity for Order {
//!     type Context = OrderContext;
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Actors clean up** - Log final state
//! 4. **Await completion** - Wait for all actor tasks to finish

pub mod config;
pub mod error;
pub mod order_system;
pub mod tracing;

pub use self::config::*;
pub use self::error::*;
pub use self::order_system::*;
pub use self::tracing::*;
