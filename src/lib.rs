//! CarbonCalc marketplace client
//!
//! Typed client for the CarbonCalc backend: catalog browsing, cart, wishlist,
//! order history, the lifestyle survey and eco-challenge goals. The backend
//! owns all business logic (pricing, persistence, transactions); this crate
//! fetches over HTTP, normalizes the wire shapes, and keeps the two pieces of
//! state the product persists client-side (bearer token, wishlist) in a
//! sled-backed local store.
//!
//! The `carboncalc-cli` binary drives every operation from the command line.

pub mod api;
pub mod catalog;
pub mod cart;
pub mod config;
pub mod error;
pub mod models;
pub mod orders;
pub mod storage;
pub mod survey;
pub mod wishlist;
