//! Board view model: two grouped, newest-first ticket lists.
//!
//! # Responsibility
//! - Split tickets into preparing/ready groups in reverse issuance order.
//! - Format display times and resolve each ticket's notification
//!   affordance.
//!
//! # Invariants
//! - Group counts equal group lengths; no ticket appears in both groups.
//! - Times render `HH:MM`, 24-hour, zero-padded, local timezone.

use crate::model::ticket::{BoardState, NotificationType, Ticket, TicketId, TicketStatus};
use crate::render::notify;
use chrono::{Local, TimeZone};

/// Placeholder shown when a timestamp cannot be represented.
const INVALID_TIME: &str = "--:--";

/// Clickable or inert notification hint rendered on a ticket card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationBadge {
    /// No notification configured; render nothing.
    None,
    /// A channel is chosen but no address/link is set; render an inert
    /// channel label.
    Label(&'static str),
    /// Channel and target are both set; render a clickable link.
    Link { label: &'static str, href: String },
}

/// Display-ready projection of one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCard {
    pub id: TicketId,
    pub number: u32,
    /// Customer name when set; `None` renders no name line.
    pub name: Option<String>,
    /// Reception time, `HH:MM`.
    pub received_at: String,
    /// Completion time, `HH:MM`; present only for ready tickets.
    pub completed_at: Option<String>,
    pub notification: NotificationBadge,
    /// Advance-to-ready control is offered only while preparing.
    pub can_advance: bool,
}

/// Full-board view: latest number plus both grouped lists, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// `None` while nothing has been issued; frontends render `--`.
    pub latest_number: Option<u32>,
    pub preparing: Vec<TicketCard>,
    pub ready: Vec<TicketCard>,
}

impl BoardView {
    /// Projects the whole board. Pure; never mutates state.
    pub fn project(state: &BoardState) -> Self {
        let mut preparing = Vec::new();
        let mut ready = Vec::new();

        // Newest tickets float to the top of their group.
        for ticket in state.tickets.iter().rev() {
            let card = TicketCard::project(ticket);
            match ticket.status {
                TicketStatus::Preparing => preparing.push(card),
                TicketStatus::Ready => ready.push(card),
            }
        }

        Self {
            latest_number: (state.current_number > 0).then_some(state.current_number),
            preparing,
            ready,
        }
    }

    pub fn preparing_count(&self) -> usize {
        self.preparing.len()
    }

    pub fn ready_count(&self) -> usize {
        self.ready.len()
    }
}

impl TicketCard {
    fn project(ticket: &Ticket) -> Self {
        let received_at = format_clock_time(ticket.created_at);
        Self {
            id: ticket.id,
            number: ticket.number,
            name: (!ticket.name.is_empty()).then(|| ticket.name.clone()),
            notification: notification_badge(ticket, &received_at),
            completed_at: ticket.completed_at.map(format_clock_time),
            received_at,
            can_advance: ticket.is_preparing(),
        }
    }
}

/// Resolves the notification affordance for one ticket.
///
/// Link when channel and target are both set, inert label when only the
/// channel is set, nothing when the channel is `None`.
fn notification_badge(ticket: &Ticket, received_at: &str) -> NotificationBadge {
    match ticket.notification_type {
        NotificationType::None => NotificationBadge::None,
        NotificationType::Email if ticket.url.is_empty() => NotificationBadge::Label("Mail"),
        NotificationType::Email => NotificationBadge::Link {
            label: "Mail",
            href: notify::mail_compose_url(&ticket.url, &ticket.name, ticket.number, received_at),
        },
        NotificationType::Messaging if ticket.url.is_empty() => NotificationBadge::Label("Chat"),
        NotificationType::Messaging => NotificationBadge::Link {
            label: "Chat",
            href: ticket.url.clone(),
        },
    }
}

/// Formats an epoch-millisecond timestamp as local `HH:MM`.
pub fn format_clock_time(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(at) => at.format("%H:%M").to_string(),
        None => INVALID_TIME.to_string(),
    }
}
