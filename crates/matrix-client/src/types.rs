//! Validated response types
//!
//! Each type here mirrors one response body of the client-server API and
//! carries a static [`Schema`] describing the shape a homeserver must send.
//! Values are produced fresh per call by [`Schema::cast`] and have no
//! identity beyond structural equality.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schema::{Field, FieldKind, Schema};

/// `GET /_matrix/client/versions` response
///
/// Only used to confirm that a resolved host is a live, spec-compliant
/// homeserver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Supported specification versions
    pub versions: Vec<String>,
    /// Experimental feature flags advertised by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unstable_features: Option<HashMap<String, bool>>,
}

/// Schema for [`VersionInfo`]
pub static VERSION_SCHEMA: Schema = Schema {
    name: "versions",
    fields: &[Field::required(
        "versions",
        FieldKind::Array(&FieldKind::String),
    )],
};

/// One server entry inside a well-known document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ServerInfo {
    /// Base URL clients should talk to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// `.well-known/matrix/client` discovery document
///
/// Every field is optional; an empty object is a valid document and means
/// "keep the host you already have".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WellKnown {
    /// Homeserver clients should switch to
    #[serde(rename = "m.homeserver", skip_serializing_if = "Option::is_none")]
    pub homeserver: Option<ServerInfo>,
    /// Identity server, carried along but unused here
    #[serde(rename = "m.identity_server", skip_serializing_if = "Option::is_none")]
    pub identity_server: Option<ServerInfo>,
}

const SERVER_INFO_FIELDS: &[Field] = &[Field::optional("base_url", FieldKind::String)];

/// Schema for [`WellKnown`]
pub static WELL_KNOWN_SCHEMA: Schema = Schema {
    name: "well-known",
    fields: &[
        Field::optional("m.homeserver", FieldKind::Object(SERVER_INFO_FIELDS)),
        Field::optional("m.identity_server", FieldKind::Object(SERVER_INFO_FIELDS)),
    ],
};

/// A user's public profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Avatar content URI (`mxc://...`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Human-readable display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayname: Option<String>,
}

/// Schema for [`UserProfile`]
pub static USER_PROFILE_SCHEMA: Schema = Schema {
    name: "user profile",
    fields: &[
        Field::optional("avatar_url", FieldKind::String),
        Field::optional("displayname", FieldKind::String),
    ],
};

/// Result of resolving a room alias to its room id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomAlias {
    /// The room the alias points at
    pub room_id: String,
    /// Servers that know about the room
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<String>>,
}

/// Schema for [`RoomAlias`]
pub static ROOM_ALIAS_SCHEMA: Schema = Schema {
    name: "room alias",
    fields: &[
        Field::required("room_id", FieldKind::String),
        Field::optional("servers", FieldKind::Array(&FieldKind::String)),
    ],
};

/// One entry of a public room directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicRoom {
    /// Aliases of the room
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    /// The canonical alias, if one is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_alias: Option<String>,
    /// Room name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number of joined members
    pub num_joined_members: u64,
    /// Room id
    pub room_id: String,
    /// Room topic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Whether history is readable without joining
    pub world_readable: bool,
    /// Whether guest accounts may join
    pub guest_can_join: bool,
    /// Avatar content URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

const PUBLIC_ROOM_FIELDS: &[Field] = &[
    Field::optional("aliases", FieldKind::Array(&FieldKind::String)),
    Field::optional("canonical_alias", FieldKind::String),
    Field::optional("name", FieldKind::String),
    Field::required("num_joined_members", FieldKind::Integer),
    Field::required("room_id", FieldKind::String),
    Field::optional("topic", FieldKind::String),
    Field::required("world_readable", FieldKind::Boolean),
    Field::required("guest_can_join", FieldKind::Boolean),
    Field::optional("avatar_url", FieldKind::String),
];

const PUBLIC_ROOM_KIND: FieldKind = FieldKind::Object(PUBLIC_ROOM_FIELDS);

/// Schema for [`PublicRoom`]
pub static PUBLIC_ROOM_SCHEMA: Schema = Schema {
    name: "room",
    fields: PUBLIC_ROOM_FIELDS,
};

/// One page of a homeserver's public room directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicRoomsPage {
    /// Rooms in this page
    pub chunk: Vec<PublicRoom>,
    /// Pagination token for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_batch: Option<String>,
    /// Pagination token for the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_batch: Option<String>,
    /// Server's estimate of the directory size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_room_count_estimate: Option<u64>,
}

/// Schema for [`PublicRoomsPage`]
pub static PUBLIC_ROOMS_SCHEMA: Schema = Schema {
    name: "public rooms",
    fields: &[
        Field::required("chunk", FieldKind::Array(&PUBLIC_ROOM_KIND)),
        Field::optional("next_batch", FieldKind::String),
        Field::optional("prev_batch", FieldKind::String),
        Field::optional("total_room_count_estimate", FieldKind::Integer),
    ],
};

/// A single room event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event payload, shape depends on the event type
    pub content: serde_json::Value,
    /// Event type (e.g. `m.room.message`)
    #[serde(rename = "type")]
    pub event_type: String,
}

/// Schema for [`Event`]
pub static EVENT_SCHEMA: Schema = Schema {
    name: "event",
    fields: &[
        Field::required("content", FieldKind::AnyObject),
        Field::required("type", FieldKind::String),
    ],
};
