//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate board mutations and slot persistence into use-case APIs.
//! - Keep frontend layers decoupled from storage details.

pub mod ticket_service;
