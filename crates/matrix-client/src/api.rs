//! Endpoint operations
//!
//! Each operation is one request through the bound [`Client`], a JSON parse,
//! and a pass through the schema gate. Failures propagate to the caller
//! unchanged; there are no retries and no partial results.

use serde_json::Value;

use crate::client::Client;
use crate::combinators::first_ok;
use crate::types::{
    Event, PublicRoom, PublicRoomsPage, RoomAlias, UserProfile, EVENT_SCHEMA,
    PUBLIC_ROOMS_SCHEMA, ROOM_ALIAS_SCHEMA, USER_PROFILE_SCHEMA,
};
use crate::{Error, Result};

impl Client {
    /// Fetch a user's public profile
    pub async fn user_profile(&self, user_id: &str) -> Result<UserProfile> {
        let body = self
            .get_json(&format!("/_matrix/client/r0/profile/{user_id}"))
            .await?;
        USER_PROFILE_SCHEMA.cast(body)
    }

    /// Resolve a room alias to its room id
    pub async fn room_id_from_alias(&self, room_alias: &str) -> Result<RoomAlias> {
        let encoded = urlencoding::encode(room_alias);
        let body = self
            .get_json(&format!("/_matrix/client/r0/directory/room/{encoded}"))
            .await?;
        ROOM_ALIAS_SCHEMA.cast(body)
    }

    /// Fetch the homeserver's public room directory, validated
    pub async fn public_rooms(&self) -> Result<PublicRoomsPage> {
        PUBLIC_ROOMS_SCHEMA.cast(self.public_rooms_raw().await?)
    }

    /// Fetch the public room directory without the schema gate
    ///
    /// Room directories can be huge and running the validator over every
    /// entry is slow; this trusts the server and goes straight to the typed
    /// parse.
    pub async fn public_rooms_unchecked(&self) -> Result<PublicRoomsPage> {
        Ok(serde_json::from_value(self.public_rooms_raw().await?)?)
    }

    async fn public_rooms_raw(&self) -> Result<Value> {
        // TODO: page through next_batch instead of assuming one response
        self.get_json("/_matrix/client/r0/publicRooms").await
    }

    /// Look a room up in this server's public directory by id
    ///
    /// Scans the unchecked listing; the first match wins. Fails with
    /// [`Error::RoomNotFound`] when the directory has no such room.
    pub async fn search_public_rooms(&self, room_id: &str) -> Result<PublicRoom> {
        let page = self.public_rooms_unchecked().await?;
        page.chunk
            .into_iter()
            .find(|room| room.room_id == room_id)
            .ok_or_else(|| Error::RoomNotFound(room_id.to_string()))
    }

    /// Fetch a single event from a room
    pub async fn event(&self, room_id_or_alias: &str, event_id: &str) -> Result<Event> {
        let body = self
            .get_json(&format!(
                "/_matrix/client/r0/rooms/{room_id_or_alias}/event/{event_id}"
            ))
            .await?;
        EVENT_SCHEMA.cast(body)
    }
}

/// Look a public room up across several homeservers at once
///
/// Races [`Client::search_public_rooms`] on every client and resolves with
/// the first directory that knows the room, however many others have already
/// come back empty. Fails with [`Error::AllFailed`] only when every server
/// has failed, carrying the individual errors.
pub async fn room_details_from_any(clients: &[Client], room_id: &str) -> Result<PublicRoom> {
    first_ok(
        clients
            .iter()
            .map(|client| client.search_public_rooms(room_id)),
    )
    .await
    .map_err(Error::AllFailed)
}
