//! Ticket lifecycle use-case service.
//!
//! # Responsibility
//! - Own the in-memory board state; be the only mutation path over it.
//! - Persist the whole state through the repository after every mutation.
//! - Hold the two-phase edit session (target + staged pending values).
//!
//! # Invariants
//! - `current_number` increments by exactly 1 per issued ticket.
//! - Ticket ids stay unique and strictly increasing even when issuance
//!   happens within one clock millisecond.
//! - Edit state is transient: it never reaches the repository.

use crate::model::ticket::{BoardState, Ticket, TicketEdit, TicketId};
use crate::repo::state_repo::{RepoResult, StateRepository};
use chrono::Utc;
use log::info;

/// Use-case service owning the board and its persistence.
///
/// Constructed explicitly and passed by reference; there is no process-wide
/// instance. Single-threaded by construction: all mutations run
/// synchronously on the caller's thread.
pub struct TicketService<R: StateRepository> {
    repo: R,
    state: BoardState,
    editing_ticket: Option<TicketId>,
    pending_edit: Option<TicketEdit>,
}

impl<R: StateRepository> TicketService<R> {
    /// Opens the service over previously persisted state.
    ///
    /// Missing or corrupt slots yield an empty board (fail-soft contract
    /// of the repository); storage transport errors propagate.
    pub fn open(repo: R) -> RepoResult<Self> {
        let state = repo.load()?;
        Ok(Self {
            repo,
            state,
            editing_ticket: None,
            pending_edit: None,
        })
    }

    /// Read-only view of the whole board.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Read-only view of the ticket list in issuance order.
    pub fn tickets(&self) -> &[Ticket] {
        &self.state.tickets
    }

    /// Issues the next sequential ticket and persists the board.
    ///
    /// # Contract
    /// - `number = current_number + 1`, counter advances with it.
    /// - `id`/`created_at` come from the wall clock, nudged forward when
    ///   the previous ticket was issued in the same millisecond so ids
    ///   stay unique and strictly increasing.
    /// - Returns a copy of the issued ticket.
    pub fn issue_ticket(&mut self) -> RepoResult<Ticket> {
        let mut id = now_epoch_ms();
        if let Some(last) = self.state.tickets.last() {
            if id <= last.id {
                id = last.id + 1;
            }
        }

        self.state.current_number += 1;
        let ticket = Ticket::issue(id, self.state.current_number);
        self.state.tickets.push(ticket.clone());
        self.persist()?;

        info!(
            "event=ticket_issue module=service status=ok number={} id={}",
            ticket.number, ticket.id
        );
        Ok(ticket)
    }

    /// Moves a ticket from `Preparing` to `Ready` and persists the board.
    ///
    /// Unknown ids and already-Ready tickets are silently ignored and
    /// reported as `Ok(false)`: duplicate triggers from the frontend must
    /// not double-stamp `completed_at`.
    pub fn advance_ticket(&mut self, id: TicketId) -> RepoResult<bool> {
        let now = now_epoch_ms();
        let Some(ticket) = self.state.ticket_mut(id) else {
            return Ok(false);
        };
        if !ticket.advance(now) {
            return Ok(false);
        }
        let number = ticket.number;
        self.persist()?;

        info!("event=ticket_advance module=service status=ok number={number} id={id}");
        Ok(true)
    }

    /// Starts an edit session for a ticket.
    ///
    /// Sets the edit target and returns the ticket's current values as the
    /// draft to prefill the form. Mutates no ticket. Unknown ids leave any
    /// existing session untouched and return `None`.
    pub fn open_editor(&mut self, id: TicketId) -> Option<TicketEdit> {
        let draft = self.state.ticket(id)?.edit_draft();
        self.editing_ticket = Some(id);
        self.pending_edit = None;
        Some(draft)
    }

    /// Stages candidate values for the current edit session.
    ///
    /// Staging alone changes nothing; the values only land on the ticket
    /// through [`commit_edit`](Self::commit_edit). This is the first half
    /// of the stage/confirm flow that guards against accidental
    /// overwrites of a previously configured notification.
    pub fn stage_edit(&mut self, edit: TicketEdit) {
        self.pending_edit = Some(edit);
    }

    /// Applies the staged values to the edit target and persists.
    ///
    /// Requires both an edit target and staged values; with either absent
    /// no ticket changes. The session is closed in every case, mirroring
    /// the frontend dismissing its dialog. Returns whether an apply
    /// happened.
    pub fn commit_edit(&mut self) -> RepoResult<bool> {
        let target = self.editing_ticket.take();
        let pending = self.pending_edit.take();

        let (Some(id), Some(edit)) = (target, pending) else {
            return Ok(false);
        };
        let Some(ticket) = self.state.ticket_mut(id) else {
            return Ok(false);
        };

        ticket.apply_edit(&edit);
        let number = ticket.number;
        self.persist()?;

        info!(
            "event=edit_commit module=service status=ok number={number} id={id} notification={:?}",
            edit.notification_type
        );
        Ok(true)
    }

    /// Discards the edit session without touching any ticket.
    pub fn cancel_edit(&mut self) {
        self.editing_ticket = None;
        self.pending_edit = None;
    }

    /// Returns the id currently being edited, if a session is open.
    pub fn editing_ticket(&self) -> Option<TicketId> {
        self.editing_ticket
    }

    /// Clears the persisted slot and reinitializes the zero-value board.
    ///
    /// The counter restarts at 0; previously issued numbers are gone with
    /// the tickets that carried them. Callers own the explicit user
    /// confirmation gate in front of this.
    pub fn reset_all(&mut self) -> RepoResult<()> {
        self.repo.clear()?;
        self.state = BoardState::default();
        self.cancel_edit();

        info!("event=board_reset module=service status=ok");
        Ok(())
    }

    fn persist(&self) -> RepoResult<()> {
        self.repo.save(&self.state)
    }
}

fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
