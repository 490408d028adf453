//! Core domain logic for the queuedesk reception board.
//! This crate is the single source of truth for ticket lifecycle
//! invariants; frontends only wire events and print projections.

pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::ticket::{
    BoardState, NotificationType, Ticket, TicketEdit, TicketId, TicketStatus,
};
pub use render::board::{BoardView, NotificationBadge, TicketCard};
pub use repo::state_repo::{
    RepoError, RepoResult, SqliteStateRepository, StateRepository, STATE_KEY,
};
pub use service::ticket_service::TicketService;
