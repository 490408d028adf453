//! Ticket domain model.
//!
//! # Responsibility
//! - Define the canonical ticket record and its two-stage lifecycle.
//! - Define the whole-board state persisted as a single slot.
//!
//! # Invariants
//! - `number` values are strictly increasing in issuance order and never
//!   reused while the board lives; a reset restarts the counter at 0.
//! - `id` doubles as the creation timestamp (epoch milliseconds) and stays
//!   unique across the board lifetime.
//! - `completed_at` is `Some` exactly when `status == Ready`.

use serde::{Deserialize, Serialize};

/// Stable ticket identifier: epoch milliseconds at issuance.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TicketId = i64;

/// Two-stage ticket lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Order received, still being prepared behind the counter.
    Preparing,
    /// Prepared and waiting for pickup.
    Ready,
}

/// Channel used to alert the customer that their ticket is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// No notification configured.
    #[default]
    None,
    /// `url` holds an email address; the board offers a mail-compose link.
    Email,
    /// `url` holds a messaging deep link opened as-is.
    Messaging,
}

/// One queue entry: a customer's place in line.
///
/// Serialized camelCase so the persisted blob matches the documented
/// `{currentNumber, tickets: [...]}` encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Primary key; equals the issuance timestamp in epoch milliseconds.
    pub id: TicketId,
    /// Sequential queue number drawn from the board counter.
    pub number: u32,
    pub status: TicketStatus,
    /// Customer display name; empty when not set.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub notification_type: NotificationType,
    /// Email address or messaging deep link, depending on
    /// `notification_type`; empty when not set.
    #[serde(default)]
    pub url: String,
    /// Issuance time in epoch milliseconds. Historical records may lack
    /// this field; the load shim backfills it from `id`.
    #[serde(default)]
    pub created_at: i64,
    /// Set exactly once when the ticket transitions to `Ready`.
    #[serde(default)]
    pub completed_at: Option<i64>,
}

impl Ticket {
    /// Creates a freshly issued ticket in `Preparing` state.
    ///
    /// # Invariants
    /// - `created_at` equals `id`.
    /// - Name/url start empty, notification starts `None`.
    pub fn issue(id: TicketId, number: u32) -> Self {
        Self {
            id,
            number,
            status: TicketStatus::Preparing,
            name: String::new(),
            notification_type: NotificationType::None,
            url: String::new(),
            created_at: id,
            completed_at: None,
        }
    }

    /// Moves the ticket to `Ready`, stamping `completed_at`.
    ///
    /// Returns `false` without mutating when the ticket already left
    /// `Preparing`; the transition is one-way.
    pub fn advance(&mut self, completed_at_ms: i64) -> bool {
        if self.status != TicketStatus::Preparing {
            return false;
        }
        self.status = TicketStatus::Ready;
        self.completed_at = Some(completed_at_ms);
        true
    }

    /// Overwrites the customer-facing notification settings.
    pub fn apply_edit(&mut self, edit: &TicketEdit) {
        self.name = edit.name.clone();
        self.notification_type = edit.notification_type;
        self.url = edit.url.clone();
    }

    /// Returns the current settings as an edit draft for prefilling forms.
    pub fn edit_draft(&self) -> TicketEdit {
        TicketEdit {
            name: self.name.clone(),
            notification_type: self.notification_type,
            url: self.url.clone(),
        }
    }

    pub fn is_preparing(&self) -> bool {
        self.status == TicketStatus::Preparing
    }
}

/// Candidate name/notification values staged before a confirmed commit.
///
/// Transient by design: never serialized, discarded on cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketEdit {
    pub name: String,
    pub notification_type: NotificationType,
    pub url: String,
}

/// Whole-board state: the issuance counter plus every ticket in order.
///
/// This is the unit of persistence; it is always saved and loaded as one
/// blob, full overwrite per mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardState {
    /// Last issued queue number; 0 means nothing issued yet.
    pub current_number: u32,
    /// Issuance-ordered, append-only.
    pub tickets: Vec<Ticket>,
}

impl BoardState {
    /// Backfills fields that older persisted records predate.
    ///
    /// - missing `createdAt` (deserialized as 0) becomes the ticket `id`,
    ///   which historically carried the issuance timestamp;
    /// - missing `completedAt` already deserializes to `None`.
    ///
    /// Applied on every load, not versioned in storage.
    pub fn normalize_loaded(&mut self) {
        for ticket in &mut self.tickets {
            if ticket.created_at == 0 {
                ticket.created_at = ticket.id;
            }
        }
    }

    /// Finds a ticket by stable id.
    pub fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.id == id)
    }

    pub fn ticket_mut(&mut self, id: TicketId) -> Option<&mut Ticket> {
        self.tickets.iter_mut().find(|ticket| ticket.id == id)
    }
}
