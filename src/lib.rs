//! # Pedidos
//!
//! > **Order management core with order/stock reconciliation.**
//!
//! Users authenticate, browse a product catalog, and place and edit orders;
//! administrators view aggregate statistics. The heart of the crate is the
//! reconciliation performed when orders are reserved, revised or released: every
//! change to an order's line item moves product stock by exactly the matching amount,
//! and either everything commits or nothing does.
//!
//! ## Core Concepts
//!
//! ### Resource actors
//! Each store (users, products, orders) is a [`ResourceActor`](framework::ResourceActor):
//! one Tokio task that owns a `HashMap` and processes requests one at a time.
//! Each request is therefore an isolated unit of work: two clients racing for the
//! last unit of stock are served one after the other and only one of them wins.
//!
//! ### Staged hooks
//! Entity hooks run against a clone of the stored entity that is written back only
//! when the hook succeeds. A revision that cannot get its new stock leaves the
//! order untouched; the catalog side gets the same guarantee from batch requests.
//!
//! ### Roles are parameters
//! Nothing reads an ambient "current user". Operations that check permissions take a
//! [`Requester`](model::Requester) (user id and role) explicitly.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Separates the *business logic* (your entity) from the *plumbing* (channels, message loops, error handling).
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`ResourceActor`](framework::ResourceActor), [`mock`](framework::mock).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: Spins up actors, wires them together, reads configuration, shuts down.
//! - **Key items**: [`OrderSystem`](lifecycle::OrderSystem), [`SystemConfig`](lifecycle::SystemConfig).
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: Wraps the generic `ResourceClient` in domain-specific clients and turns framework errors into domain errors.
//! - **Key items**: [`UserClient`](clients::UserClient), [`ProductClient`](clients::ProductClient), [`OrderClient`](clients::OrderClient).
//!
//! ### 4. The Implementation ([`user_actor`], [`product_actor`], [`order_actor`])
//! - **Role**: Concrete implementations of the `ActorEntity` trait. The reconciliation
//!   engine lives in the Order actor's hooks.
//!
//! ### 5. The Data ([`model`])
//! - **Role**: Entities, ids, payloads and result shapes.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod user_actor;
