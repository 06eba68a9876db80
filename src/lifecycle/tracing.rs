//! # Observability & Tracing
//!
//! This module provides the tracing infrastructure for the whole system.
//!
//! ## Overview
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! The actor loop logs every request with an `entity_type` field and the entity id;
//! the typed clients open a span per call with `#[instrument]`.
//!
//! The compact format hides the crate/module prefix (`with_target(false)`), so log
//! lines stay short while still carrying the structured fields.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle events, commits and failures
//! RUST_LOG=info cargo run
//!
//! # Every request with its payload
//! RUST_LOG=debug cargo run
//!
//! # Only the actor loop
//! RUST_LOG=pedidos::framework=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! Placing an order with `RUST_LOG=info`:
//!
//! ```text
//! INFO Created entity_type="User" id=user_2 size=2
//! INFO Created entity_type="Product" id=product_1 size=1
//! INFO place_order: Action ok entity_type="Product" id=product_1
//! INFO place_order: Stock reserved order_id=order_1 product_id=product_1 quantity=3 remaining=2
//! INFO place_order: Created entity_type="Order" id=order_1 size=1
//! INFO place_order: Order placed order_id=order_1 owner_id=user_2 total=7.50
//! ```
//!
//! A failing revision shows the rollback instead of a commit:
//!
//! ```text
//! WARN revise: Batch rolled back entity_type="Product" error=Entity error: Insufficient stock: requested 9, available 5
//! WARN revise: Update failed entity_type="Order" id=order_1 error=Insufficient stock: requested 9, available 5
//! ```
//!
//! ## Credentials
//!
//! Request payloads are logged with their `Debug` representation at debug level.
//! [`UserCreate`](crate::model::UserCreate) and [`User`](crate::model::User) redact
//! the password and its hash there, so neither ever reaches the logs.

/// Install the global subscriber. Call once, at program start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "place_order: Order placed")
        .init();
}
