//! # Splitswap Router - Split-Routing Optimizer
//!
//! Given a venue-state snapshot, an input token, an output token and an
//! amount, finds the split of the amount across venues that maximizes total
//! output, and chains that optimization along multi-token paths.
//!
//! ## Architecture
//!
//! - [`registry::VenueRegistry`] — canonical venue ordering + flag decoding
//! - [`optimizer`] — marginal-return tables and the exact allocation DP
//! - [`multihop`] — sequential hop chaining
//! - [`facade::Aggregator`] — the validated external query surface
//!
//! All state is an immutable snapshot supplied at construction; queries are
//! pure, deterministic and safe to run concurrently.

pub mod facade;
pub mod multihop;
pub mod optimizer;
pub mod registry;

pub use facade::Aggregator;
pub use registry::VenueRegistry;
