//! Bidirectional mapping between the wire [`Item`] envelope and the local
//! [`GraphNode`] representation.
//!
//! Pure and stateless. Two transforms are applied, and both are exact
//! inverses of each other, so mapping an item to a node and back reproduces
//! the original:
//!
//! - position: the wire carries the bounding-box *center*, the local graph
//!   the *top-left* corner, offset by half the geometry;
//! - label: frame/image/card/app_card alias `title`, shape/sticky_note/text
//!   alias `content`; the source field is cleared in the residual data and
//!   re-injected on the way out.
//!
//! Discriminator consistency between the envelope `type` and the data/style
//! tags is not enforced here; on a mismatch the node simply gets no label.

use std::mem;

use kurbo::Point;

use crate::graph::GraphNode;
use crate::items::{Item, ItemData, ItemKind, Position};

/// Map a wire item into its local editable form.
pub fn node_from_item(item: Item) -> GraphNode {
    let Item {
        id,
        board_id,
        parent_id,
        kind,
        position,
        geometry,
        mut data,
        style,
    } = item;
    let label = take_label(kind, &mut data);
    let top_left = position.to_point() - geometry.half();
    GraphNode {
        id,
        kind,
        board_id,
        parent_id,
        position: top_left,
        geometry,
        label,
        data,
        style,
        selected: false,
    }
}

/// Map a local node back into its wire form.
pub fn item_from_node(node: &GraphNode) -> Item {
    let mut data = node.data.clone();
    restore_label(node.kind, &mut data, node.label.clone());
    let center: Point = node.position + node.geometry.half();
    Item {
        id: node.id.clone(),
        board_id: node.board_id.clone(),
        parent_id: node.parent_id.clone(),
        kind: node.kind,
        position: Position::from(center),
        geometry: node.geometry,
        data,
        style: node.style.clone(),
    }
}

/// Pull the label out of the kind's aliased field, leaving it empty.
fn take_label(kind: ItemKind, data: &mut ItemData) -> Option<String> {
    match (kind, data) {
        (ItemKind::Frame, ItemData::Frame(d)) => Some(mem::take(&mut d.title)),
        (ItemKind::Image, ItemData::Image(d)) => Some(mem::take(&mut d.title)),
        (ItemKind::Card, ItemData::Card(d)) | (ItemKind::AppCard, ItemData::AppCard(d)) => {
            Some(mem::take(&mut d.title))
        }
        (ItemKind::Shape, ItemData::Shape(d)) => Some(mem::take(&mut d.content)),
        (ItemKind::StickyNote, ItemData::StickyNote(d)) => Some(mem::take(&mut d.content)),
        (ItemKind::Text, ItemData::Text(d)) => Some(mem::take(&mut d.content)),
        _ => None,
    }
}

/// Put a label back into the kind's aliased field.
fn restore_label(kind: ItemKind, data: &mut ItemData, label: Option<String>) {
    let Some(label) = label else { return };
    match (kind, data) {
        (ItemKind::Frame, ItemData::Frame(d)) => d.title = label,
        (ItemKind::Image, ItemData::Image(d)) => d.title = label,
        (ItemKind::Card, ItemData::Card(d)) | (ItemKind::AppCard, ItemData::AppCard(d)) => {
            d.title = label
        }
        (ItemKind::Shape, ItemData::Shape(d)) => d.content = label,
        (ItemKind::StickyNote, ItemData::StickyNote(d)) => d.content = label,
        (ItemKind::Text, ItemData::Text(d)) => d.content = label,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{CardData, FrameData, Geometry, StickyNoteData, TextData, defaults_for};
    use serde_json::Map;

    fn item(kind: ItemKind, data: ItemData) -> Item {
        let defaults = defaults_for(kind);
        Item {
            id: "it-1".to_string(),
            board_id: "b-1".to_string(),
            parent_id: Some("frame-9".to_string()),
            kind,
            position: Position::new(150.0, 90.0),
            geometry: Geometry {
                width: 200.0,
                height: 100.0,
                rotation: 45.0,
            },
            data,
            style: defaults.style,
        }
    }

    #[test]
    fn test_position_is_center_on_wire_top_left_locally() {
        let item = item(
            ItemKind::Text,
            ItemData::Text(TextData {
                content: "hello".to_string(),
            }),
        );
        let node = node_from_item(item);
        // 200x100 box centered at (150, 90) has its corner at (50, 40).
        assert_eq!(node.position, Point::new(50.0, 40.0));

        let back = item_from_node(&node);
        assert_eq!(back.position, Position::new(150.0, 90.0));
    }

    #[test]
    fn test_rotation_carried_opaquely() {
        let item = item(
            ItemKind::Text,
            ItemData::Text(TextData {
                content: String::new(),
            }),
        );
        let node = node_from_item(item);
        assert_eq!(node.geometry.rotation, 45.0);
        assert_eq!(item_from_node(&node).geometry.rotation, 45.0);
    }

    #[test]
    fn test_title_kinds_alias_label_and_clear_source() {
        let item = item(
            ItemKind::Frame,
            ItemData::Frame(FrameData {
                title: "Sprint 12".to_string(),
                ..FrameData::default()
            }),
        );
        let node = node_from_item(item);
        assert_eq!(node.label.as_deref(), Some("Sprint 12"));
        match &node.data {
            ItemData::Frame(frame) => assert!(frame.title.is_empty()),
            other => panic!("expected frame data, got {other:?}"),
        }
    }

    #[test]
    fn test_content_kinds_alias_label_and_clear_source() {
        let item = item(
            ItemKind::StickyNote,
            ItemData::StickyNote(StickyNoteData {
                content: "buy milk".to_string(),
                ..StickyNoteData::default()
            }),
        );
        let node = node_from_item(item);
        assert_eq!(node.label.as_deref(), Some("buy milk"));
        match &node.data {
            ItemData::StickyNote(sticky) => assert!(sticky.content.is_empty()),
            other => panic!("expected sticky note data, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_has_no_label() {
        let item = item(ItemKind::Unknown, ItemData::Unknown(Map::new()));
        let node = node_from_item(item);
        assert!(node.label.is_none());
    }

    #[test]
    fn test_mismatched_discriminator_yields_no_label() {
        // Envelope says frame, data says card: not enforced here, no alias.
        let card = ItemData::Card(CardData {
            title: "stray".to_string(),
            ..CardData::default()
        });
        let node = node_from_item(item(ItemKind::Frame, card.clone()));
        assert!(node.label.is_none());
        assert_eq!(node.data, card);
    }

    #[test]
    fn test_round_trip_identity_for_every_kind() {
        for &kind in ItemKind::all() {
            let defaults = defaults_for(kind);
            let original = Item {
                id: format!("it-{}", kind.as_tag()),
                board_id: "b-1".to_string(),
                parent_id: Some("p-1".to_string()),
                kind,
                position: Position::new(37.5, -12.0),
                geometry: Geometry {
                    width: 64.0,
                    height: 32.0,
                    rotation: 15.0,
                },
                data: defaults.data,
                style: defaults.style,
            };
            let round_tripped = item_from_node(&node_from_item(original.clone()));
            assert_eq!(round_tripped, original, "round trip failed for {kind:?}");
        }
    }

    #[test]
    fn test_node_round_trip_identity() {
        let item = item(
            ItemKind::Card,
            ItemData::Card(CardData {
                title: "Review PR".to_string(),
                description: "small one".to_string(),
                ..CardData::default()
            }),
        );
        let node = node_from_item(item);
        let round_tripped = node_from_item(item_from_node(&node));
        assert_eq!(round_tripped, node);
    }
}
