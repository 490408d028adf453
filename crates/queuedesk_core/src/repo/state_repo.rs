//! Board state persistence over a fixed key-value slot.
//!
//! # Responsibility
//! - Serialize/deserialize the whole [`BoardState`] to one storage row.
//! - Apply the backward-compatibility shim on every load.
//!
//! # Invariants
//! - The slot key never changes while a database lives.
//! - A corrupt payload yields the zero-value state, never an error; the
//!   next save overwrites the corrupt row.

use crate::db::DbError;
use crate::model::ticket::BoardState;
use log::{error, info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed slot key for the serialized board state.
pub const STATE_KEY: &str = "reception_board_state";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for board state save/load operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The in-memory state could not be serialized; nothing was written.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode board state: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Single-slot persistence contract for the board.
pub trait StateRepository {
    /// Serializes and overwrites the whole slot.
    fn save(&self, state: &BoardState) -> RepoResult<()>;

    /// Loads the slot, or the zero-value state when the slot is empty or
    /// its payload fails to parse.
    fn load(&self) -> RepoResult<BoardState>;

    /// Deletes the slot entirely.
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed slot repository.
pub struct SqliteStateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StateRepository for SqliteStateRepository<'_> {
    fn save(&self, state: &BoardState) -> RepoResult<()> {
        let payload = serde_json::to_string(state).map_err(RepoError::Encode)?;

        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![STATE_KEY, payload],
        )?;

        info!(
            "event=state_save module=repo status=ok tickets={} current_number={}",
            state.tickets.len(),
            state.current_number
        );
        Ok(())
    }

    fn load(&self) -> RepoResult<BoardState> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                params![STATE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            info!("event=state_load module=repo status=ok source=empty");
            return Ok(BoardState::default());
        };

        match serde_json::from_str::<BoardState>(&payload) {
            Ok(mut state) => {
                state.normalize_loaded();
                info!(
                    "event=state_load module=repo status=ok source=slot tickets={} current_number={}",
                    state.tickets.len(),
                    state.current_number
                );
                Ok(state)
            }
            Err(err) => {
                // Corrupt slot: fall back to an empty board instead of
                // refusing to start. The next save replaces the row.
                error!(
                    "event=state_load module=repo status=error error_code=state_decode_failed error={err}"
                );
                Ok(BoardState::default())
            }
        }
    }

    fn clear(&self) -> RepoResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", params![STATE_KEY])?;

        if removed == 0 {
            warn!("event=state_clear module=repo status=ok note=slot_already_empty");
        } else {
            info!("event=state_clear module=repo status=ok");
        }
        Ok(())
    }
}
