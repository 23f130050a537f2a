//! # Splitswap Unified Types Library
//!
//! Shared type definitions for the splitswap routing engine: tokens, venue
//! state snapshots, flag bitmasks, quote results and the request-error
//! taxonomy.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: All amounts are raw integer units of their token;
//!   decimal formatting is an external concern
//! - **Immutable Snapshots**: Venue state is captured once per query and never
//!   mutated inside the engine
//! - **Type Safety**: Distinct types prevent mixing flags, parts and amounts
//! - **Total Pricing**: Per-venue failures price as zero liquidity instead of
//!   surfacing errors; only caller-contract violations are errors

pub mod errors;
pub mod flags;
pub mod quote;
pub mod token;
pub mod venue;

pub use errors::RequestError;
pub use flags::VenueFlags;
pub use quote::{MultiSwapQuote, SwapQuote};
pub use token::Token;
pub use venue::{VenueKind, VenueState};
