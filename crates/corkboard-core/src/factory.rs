//! Builders for item creation commands.

use std::sync::atomic::{AtomicU32, Ordering};

use kurbo::{Point, Vec2};

use crate::items::{Geometry, ItemKind, Position, defaults_for};
use crate::protocol::{Command, CreatePayload};

/// Area new items are scattered over when no position is supplied.
const SCATTER_WIDTH: u32 = 640;
const SCATTER_HEIGHT: u32 = 480;

/// Build a create command for a new item of `kind`.
///
/// `position` is the desired top-left corner; when absent a pseudo-random
/// spot is picked so repeated creations do not stack on one point. The wire
/// carries the bounding-box center, so half the default geometry is added
/// before the payload is assembled. Pure: no I/O happens here.
pub fn create_command(
    kind: ItemKind,
    board_id: &str,
    parent_id: Option<&str>,
    position: Option<Point>,
) -> Command {
    let defaults = defaults_for(kind);
    let top_left = position.unwrap_or_else(scatter_position);
    let center = top_left + Vec2::new(defaults.width / 2.0, defaults.height / 2.0);
    Command::Create(CreatePayload {
        board_id: board_id.to_string(),
        parent_id: parent_id.map(str::to_string),
        kind,
        position: Position::from(center),
        geometry: Geometry::new(defaults.width, defaults.height),
        data: defaults.data,
        style: defaults.style,
    })
}

/// Pseudo-random fallback position.
///
/// Uses a counter + hash approach (splitmix-style finalizer) that works on
/// all platforms without a time or entropy source.
fn scatter_position() -> Point {
    static COUNTER: AtomicU32 = AtomicU32::new(1);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;

    Point::new(
        (x % SCATTER_WIDTH) as f64,
        ((x >> 16) % SCATTER_HEIGHT) as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemData, ItemStyle};

    #[test]
    fn test_create_uses_kind_defaults() {
        let command = create_command(ItemKind::Frame, "b-1", None, Some(Point::new(0.0, 0.0)));
        let Command::Create(payload) = command else {
            panic!("expected a create command");
        };
        assert_eq!(payload.geometry.width, 300.0);
        assert_eq!(payload.geometry.height, 300.0);
        assert!(matches!(payload.data, ItemData::Frame(_)));
        assert!(matches!(payload.style, ItemStyle::Frame(_)));
    }

    #[test]
    fn test_override_position_becomes_wire_center() {
        let command =
            create_command(ItemKind::Frame, "b-1", None, Some(Point::new(20.0, 40.0)));
        let Command::Create(payload) = command else {
            panic!("expected a create command");
        };
        // 300x300 frame with its corner at (20, 40) is centered at (170, 190).
        assert_eq!(payload.position, Position::new(170.0, 190.0));
    }

    #[test]
    fn test_parent_and_board_carried_through() {
        let command = create_command(
            ItemKind::StickyNote,
            "b-9",
            Some("frame-1"),
            Some(Point::new(0.0, 0.0)),
        );
        let Command::Create(payload) = command else {
            panic!("expected a create command");
        };
        assert_eq!(payload.board_id, "b-9");
        assert_eq!(payload.parent_id.as_deref(), Some("frame-1"));
    }

    #[test]
    fn test_fallback_position_stays_in_scatter_area() {
        for _ in 0..32 {
            let command = create_command(ItemKind::Text, "b-1", None, None);
            let Command::Create(payload) = command else {
                panic!("expected a create command");
            };
            // Text defaults to 100x100, so the corner is center - 50.
            let corner_x = payload.position.x - 50.0;
            let corner_y = payload.position.y - 50.0;
            assert!((0.0..SCATTER_WIDTH as f64).contains(&corner_x));
            assert!((0.0..SCATTER_HEIGHT as f64).contains(&corner_y));
        }
    }

    #[test]
    fn test_fallback_positions_vary() {
        let a = scatter_position();
        let b = scatter_position();
        assert_ne!(a, b);
    }
}
