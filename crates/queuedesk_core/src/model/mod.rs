//! Domain model for the reception queue board.
//!
//! # Responsibility
//! - Define the canonical ticket record and whole-board state shape.
//! - Keep one storage shape shared by the preparing/ready projections.
//!
//! # Invariants
//! - Every ticket is identified by a stable `TicketId`.
//! - `current_number` is the single issuance counter; the ticket list is
//!   append-only and never reordered.

pub mod ticket;
