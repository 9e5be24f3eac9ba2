//! Wire protocol: outbound commands, inbound board events, socket frames.
//!
//! Every message shape is explicitly tagged (`op` for board events, `frame`
//! for socket frames); nothing is dispatched on the presence or absence of
//! fields.

use serde::{Deserialize, Serialize};

use crate::items::{Geometry, Item, ItemData, ItemKind, ItemStyle, Position};

/// Destination prefix for client-to-server commands.
pub const APP_PREFIX: &str = "/app";
/// Destination prefix for server broadcast topics.
pub const TOPIC_PREFIX: &str = "/topic";

/// Broadcast topic carrying one board's item events.
pub fn board_topic(board_id: &str) -> String {
    format!("{TOPIC_PREFIX}/board/{board_id}")
}

/// Payload of a create command. The server assigns the item id and echoes
/// the created item back on the board topic; nothing is inserted locally
/// until that echo arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayload {
    pub board_id: String,
    pub parent_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Center of the new item's bounding box.
    pub position: Position,
    pub geometry: Geometry,
    pub data: ItemData,
    pub style: ItemStyle,
}

/// Body of a delete command. The server contract names the field `nodeId`,
/// not `id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBody {
    node_id: String,
}

/// An outbound command for the server.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create(CreatePayload),
    /// Full-item update; the body is the complete wire envelope.
    Update(Item),
    Delete {
        board_id: String,
        node_id: String,
    },
    /// Request a full snapshot of a board.
    Load {
        board_id: String,
    },
}

impl Command {
    /// Destination the command is published to.
    pub fn destination(&self) -> String {
        match self {
            Command::Create(payload) => format!("{APP_PREFIX}/board/{}/items", payload.board_id),
            Command::Update(item) => format!("{APP_PREFIX}/board/{}/items/update", item.board_id),
            Command::Delete { board_id, .. } => {
                format!("{APP_PREFIX}/board/{board_id}/items/delete")
            }
            Command::Load { board_id } => format!("{APP_PREFIX}/board/{board_id}/load"),
        }
    }

    /// JSON body of the command.
    pub fn body(&self) -> serde_json::Result<String> {
        match self {
            Command::Create(payload) => serde_json::to_string(payload),
            Command::Update(item) => serde_json::to_string(item),
            Command::Delete { node_id, .. } => serde_json::to_string(&DeleteBody {
                node_id: node_id.clone(),
            }),
            Command::Load { board_id } => serde_json::to_string(board_id),
        }
    }
}

/// An inbound broadcast on a board topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BoardEvent {
    /// A single item was created or updated.
    Upsert {
        #[serde(flatten)]
        item: Item,
    },
    /// A single item was removed.
    Delete { id: String },
    /// Full board contents, the response to a load command.
    Snapshot { items: Vec<Item> },
}

/// Frames sent to the server over the socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Start receiving broadcasts from a destination.
    Subscribe { id: String, destination: String },
    /// Stop a subscription by id.
    Unsubscribe { id: String },
    /// Publish a body to a destination.
    Send { destination: String, body: String },
}

/// Frames received from the server over the socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum ServerFrame {
    /// A broadcast delivered on a subscribed destination.
    Message { destination: String, body: String },
    /// Server-side failure report.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::defaults_for;
    use serde_json::{Value, json};

    #[test]
    fn test_command_destinations() {
        let load = Command::Load {
            board_id: "b-7".to_string(),
        };
        assert_eq!(load.destination(), "/app/board/b-7/load");

        let delete = Command::Delete {
            board_id: "b-7".to_string(),
            node_id: "n-1".to_string(),
        };
        assert_eq!(delete.destination(), "/app/board/b-7/items/delete");
    }

    #[test]
    fn test_delete_body_uses_node_id_field() {
        let delete = Command::Delete {
            board_id: "b-7".to_string(),
            node_id: "n-1".to_string(),
        };
        let body: Value = serde_json::from_str(&delete.body().unwrap()).unwrap();
        assert_eq!(body, json!({"nodeId": "n-1"}));
    }

    #[test]
    fn test_load_body_is_bare_board_id() {
        let load = Command::Load {
            board_id: "b-7".to_string(),
        };
        assert_eq!(load.body().unwrap(), "\"b-7\"");
    }

    #[test]
    fn test_board_topic() {
        assert_eq!(board_topic("b-7"), "/topic/board/b-7");
    }

    #[test]
    fn test_upsert_event_flattens_item() {
        let defaults = defaults_for(ItemKind::Text);
        let item = Item {
            id: "it-1".to_string(),
            board_id: "b-1".to_string(),
            parent_id: None,
            kind: ItemKind::Text,
            position: Position::new(1.0, 2.0),
            geometry: Geometry::new(100.0, 100.0),
            data: defaults.data,
            style: defaults.style,
        };
        let json = serde_json::to_value(BoardEvent::Upsert { item: item.clone() }).unwrap();
        assert_eq!(json.get("op"), Some(&json!("upsert")));
        assert_eq!(json.get("id"), Some(&json!("it-1")));

        let parsed: BoardEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, BoardEvent::Upsert { item });
    }

    #[test]
    fn test_delete_event_parses() {
        let parsed: BoardEvent =
            serde_json::from_str(r#"{"op":"delete","id":"it-9"}"#).unwrap();
        assert_eq!(
            parsed,
            BoardEvent::Delete {
                id: "it-9".to_string()
            }
        );
    }

    #[test]
    fn test_client_frame_wire_shape() {
        let frame = ClientFrame::Send {
            destination: "/app/board/b-1/load".to_string(),
            body: "\"b-1\"".to_string(),
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json.get("frame"), Some(&json!("send")));
        assert_eq!(json.get("destination"), Some(&json!("/app/board/b-1/load")));
    }
}
