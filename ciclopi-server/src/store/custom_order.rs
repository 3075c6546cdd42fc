//! Per-chat favorite-station order.
//!
//! Each chat has entries keyed (chat_id, station_id) with a rank. At rest
//! the ranks of one chat are exactly 1..=N, no duplicates and no gaps;
//! every operation here preserves that invariant at each observable point
//! by running its writes inside one transaction.

use sqlx::{Sqlite, Transaction};

use crate::domain::{ChatId, StationId};

use super::{Store, StoreError};

/// Parking rank used mid-swap. Larger than any legitimate rank (the
/// fleet has a few dozen stations), so ordering by rank stays unambiguous
/// even if the intermediate state were observed.
const SWAP_SENTINEL: i64 = 500;

/// Direction for moving a favorite within the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The station was appended at this rank.
    Added { rank: i64 },
    /// The station was removed and the ranks above it closed the gap.
    Removed,
}

/// What a move did.
///
/// `NoRecord` covers both "not a favorite" and "already at the boundary";
/// callers are expected to disable the affordance at boundaries, so a
/// silent no-op is the right answer rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    NoRecord,
}

impl Store {
    /// Toggle a station in the chat's favorites.
    ///
    /// Present entries are removed (closing the rank gap); absent ones
    /// are appended at rank N+1.
    pub async fn toggle_favorite(
        &self,
        chat: ChatId,
        station: StationId,
    ) -> Result<ToggleOutcome, StoreError> {
        let mut tx = self.pool().begin().await?;

        let outcome = match rank_of(&mut tx, chat, station).await? {
            Some(rank) => {
                sqlx::query("DELETE FROM custom_order WHERE chat_id = ? AND station_id = ?")
                    .bind(chat.get())
                    .bind(i64::from(station.get()))
                    .execute(&mut *tx)
                    .await?;

                sqlx::query("UPDATE custom_order SET rank = rank - 1 WHERE chat_id = ? AND rank > ?")
                    .bind(chat.get())
                    .bind(rank)
                    .execute(&mut *tx)
                    .await?;

                ToggleOutcome::Removed
            }
            None => {
                let count: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM custom_order WHERE chat_id = ?")
                        .bind(chat.get())
                        .fetch_one(&mut *tx)
                        .await?;

                let rank = count + 1;
                sqlx::query(
                    "INSERT INTO custom_order (chat_id, station_id, rank) VALUES (?, ?, ?)",
                )
                .bind(chat.get())
                .bind(i64::from(station.get()))
                .bind(rank)
                .execute(&mut *tx)
                .await?;

                ToggleOutcome::Added { rank }
            }
        };

        tx.commit().await?;
        tracing::debug!(chat = %chat, station = %station, ?outcome, "favorite toggled");
        Ok(outcome)
    }

    /// Move a favorite one step up or down by swapping ranks with its
    /// neighbor.
    ///
    /// The swap parks the neighbor on [`SWAP_SENTINEL`] so no two entries
    /// of the chat ever hold the same rank, then runs both remaining
    /// writes in the same transaction; a failure anywhere rolls the whole
    /// sequence back, so a sentinel rank can never persist.
    pub async fn move_favorite(
        &self,
        chat: ChatId,
        station: StationId,
        direction: Direction,
    ) -> Result<MoveOutcome, StoreError> {
        let mut tx = self.pool().begin().await?;

        let Some(rank) = rank_of(&mut tx, chat, station).await? else {
            return Ok(MoveOutcome::NoRecord);
        };

        let neighbor_rank = match direction {
            Direction::Up => rank - 1,
            Direction::Down => rank + 1,
        };
        if neighbor_rank < 1 {
            return Ok(MoveOutcome::NoRecord);
        }

        // Park the neighbor out of range. Zero rows means the station is
        // already at the boundary in this direction.
        let parked = sqlx::query("UPDATE custom_order SET rank = ? WHERE chat_id = ? AND rank = ?")
            .bind(SWAP_SENTINEL)
            .bind(chat.get())
            .bind(neighbor_rank)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if parked == 0 {
            return Ok(MoveOutcome::NoRecord);
        }

        sqlx::query("UPDATE custom_order SET rank = ? WHERE chat_id = ? AND station_id = ?")
            .bind(neighbor_rank)
            .bind(chat.get())
            .bind(i64::from(station.get()))
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE custom_order SET rank = ? WHERE chat_id = ? AND rank = ?")
            .bind(rank)
            .bind(chat.get())
            .bind(SWAP_SENTINEL)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(chat = %chat, station = %station, ?direction, "favorite moved");
        Ok(MoveOutcome::Moved)
    }

    /// The chat's favorite stations, ascending by rank.
    pub async fn list_favorites(&self, chat: ChatId) -> Result<Vec<StationId>, StoreError> {
        Ok(self
            .favorite_ranks(chat)
            .await?
            .into_iter()
            .map(|(station, _)| station)
            .collect())
    }

    /// The chat's (station, rank) pairs, ascending by rank.
    pub async fn favorite_ranks(
        &self,
        chat: ChatId,
    ) -> Result<Vec<(StationId, i64)>, StoreError> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT station_id, rank FROM custom_order WHERE chat_id = ? ORDER BY rank",
        )
        .bind(chat.get())
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(station, rank)| (StationId::new(station as u16), rank))
            .collect())
    }
}

async fn rank_of(
    tx: &mut Transaction<'_, Sqlite>,
    chat: ChatId,
    station: StationId,
) -> Result<Option<i64>, StoreError> {
    Ok(sqlx::query_scalar(
        "SELECT rank FROM custom_order WHERE chat_id = ? AND station_id = ?",
    )
    .bind(chat.get())
    .bind(i64::from(station.get()))
    .fetch_optional(&mut **tx)
    .await?)
}
