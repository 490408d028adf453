//! Read-only board projections for frontends.
//!
//! # Responsibility
//! - Project the ticket collection into display-ready view models.
//! - Build outbound notification deep links.
//!
//! # Invariants
//! - Projection never mutates board state; frontends re-project the whole
//!   board after every mutation instead of diffing.

pub mod board;
pub mod notify;
