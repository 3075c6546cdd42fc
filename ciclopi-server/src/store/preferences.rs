//! Chat preference rows.

use sqlx::Row;

use crate::domain::{ChatId, ChatPreference, Sorting, StationsToShow};

use super::{Store, StoreError};

impl Store {
    /// The chat's stored preferences, or the defaults if it has none.
    ///
    /// A row written by an older version may hold a code we no longer
    /// recognize; those fields decode to their defaults rather than
    /// failing the read.
    pub async fn preference(&self, chat: ChatId) -> Result<ChatPreference, StoreError> {
        let row = sqlx::query(
            "SELECT sorting, latitude, longitude, stations_to_show \
             FROM chat_preference WHERE chat_id = ?",
        )
        .bind(chat.get())
        .fetch_optional(self.pool())
        .await?;

        let Some(row) = row else {
            return Ok(ChatPreference::defaults(chat));
        };

        Ok(ChatPreference {
            chat_id: chat,
            sorting: Sorting::from_code(row.get::<i64, _>("sorting")).unwrap_or_default(),
            latitude: row.get::<Option<f64>, _>("latitude"),
            longitude: row.get::<Option<f64>, _>("longitude"),
            stations_to_show: StationsToShow::from_code(row.get::<i64, _>("stations_to_show"))
                .unwrap_or_default(),
        })
    }

    /// Persist a new sort mode for the chat.
    pub async fn set_sorting(&self, chat: ChatId, sorting: Sorting) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO chat_preference (chat_id, sorting) VALUES (?, ?) \
             ON CONFLICT(chat_id) DO UPDATE SET sorting = excluded.sorting",
        )
        .bind(chat.get())
        .bind(sorting.code())
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Persist a new stations-to-show choice for the chat.
    pub async fn set_stations_to_show(
        &self,
        chat: ChatId,
        choice: StationsToShow,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO chat_preference (chat_id, stations_to_show) VALUES (?, ?) \
             ON CONFLICT(chat_id) DO UPDATE SET stations_to_show = excluded.stations_to_show",
        )
        .bind(chat.get())
        .bind(choice.code())
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Persist the chat's position reference for "position" sorting.
    pub async fn set_reference_location(
        &self,
        chat: ChatId,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO chat_preference (chat_id, latitude, longitude) VALUES (?, ?, ?) \
             ON CONFLICT(chat_id) DO UPDATE \
             SET latitude = excluded.latitude, longitude = excluded.longitude",
        )
        .bind(chat.get())
        .bind(latitude)
        .bind(longitude)
        .execute(self.pool())
        .await?;
        Ok(())
    }
}
