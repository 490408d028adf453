//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the single-slot board persistence contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Saves always overwrite the whole slot; there is no partial write.
//! - Loads fail soft on corrupt payloads and hard on storage transport
//!   errors.

pub mod state_repo;
