//! Item definitions for the whiteboard.
//!
//! An [`Item`] is the server-authoritative wire representation of one board
//! element. Its `data` and `style` sections are tagged unions keyed by
//! `dataType`/`styleType`; each kind defines its own record with defaults,
//! so a partial or malformed payload never fails to construct.

mod card;
mod enums;
mod frame;
mod image;
mod shape;
mod sticky_note;
mod text;

pub use card::{AppCardStyle, CardData, CardStyle};
pub use enums::{
    BorderStyle, CardStatus, FontFamily, FrameFormat, ShapeForm, StickyShape, TextAlign,
    VerticalAlign,
};
pub use frame::{FrameData, FrameStyle};
pub use image::{ImageData, ImageStyle};
pub use shape::{ShapeData, ShapeStyle};
pub use sticky_note::{StickyNoteData, StickyNoteStyle};
pub use text::{TextData, TextStyle};

use kurbo::{Point, Vec2};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Discriminator field of the data union.
const DATA_TAG: &str = "dataType";
/// Discriminator field of the style union.
const STYLE_TAG: &str = "styleType";

/// The closed set of item categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Text,
    Frame,
    Image,
    Shape,
    Card,
    AppCard,
    StickyNote,
    /// Kinds this client does not know about yet. Carried through so newer
    /// servers degrade gracefully instead of failing the board load.
    Unknown,
}

impl<'de> Deserialize<'de> for ItemKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(ItemKind::from_tag(&tag).unwrap_or(ItemKind::Unknown))
    }
}

impl ItemKind {
    /// Wire name of this kind, as used in `type`/`dataType`/`styleType`.
    pub fn as_tag(&self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Frame => "frame",
            ItemKind::Image => "image",
            ItemKind::Shape => "shape",
            ItemKind::Card => "card",
            ItemKind::AppCard => "app_card",
            ItemKind::StickyNote => "sticky_note",
            ItemKind::Unknown => "unknown",
        }
    }

    /// Parse a wire name into a known kind.
    pub fn from_tag(tag: &str) -> Option<ItemKind> {
        match tag {
            "text" => Some(ItemKind::Text),
            "frame" => Some(ItemKind::Frame),
            "image" => Some(ItemKind::Image),
            "shape" => Some(ItemKind::Shape),
            "card" => Some(ItemKind::Card),
            "app_card" => Some(ItemKind::AppCard),
            "sticky_note" => Some(ItemKind::StickyNote),
            _ => None,
        }
    }

    /// All known kinds, excluding the `Unknown` fallback.
    pub fn all() -> &'static [ItemKind] {
        &[
            ItemKind::Text,
            ItemKind::Frame,
            ItemKind::Image,
            ItemKind::Shape,
            ItemKind::Card,
            ItemKind::AppCard,
            ItemKind::StickyNote,
        ]
    }
}

/// A point on the board.
///
/// On the wire this is the *center* of an item's bounding box; the local
/// graph works with top-left corners. The mapper applies the half-geometry
/// offset in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

/// Bounding-box dimensions plus rotation.
///
/// Rotation is carried opaquely: the core stores it and reattaches it on the
/// way back to the wire, but never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Geometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Half-extent vector, the offset between a center and a top-left corner.
    pub fn half(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(100.0, 100.0)
    }
}

/// Server-authoritative wire representation of one board item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub board_id: String,
    /// Containment: id of the frame (or other parent) this item sits in.
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Center of the bounding box.
    pub position: Position,
    #[serde(default)]
    pub geometry: Geometry,
    #[serde(default)]
    pub data: ItemData,
    #[serde(default)]
    pub style: ItemStyle,
}

/// Typed per-kind data union, keyed by `dataType` on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemData {
    Text(TextData),
    Frame(FrameData),
    Image(ImageData),
    Shape(ShapeData),
    Card(CardData),
    AppCard(CardData),
    StickyNote(StickyNoteData),
    /// Raw payload of an unrecognized or untyped data section.
    Unknown(Map<String, Value>),
}

impl ItemData {
    /// The kind this record belongs to.
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemData::Text(_) => ItemKind::Text,
            ItemData::Frame(_) => ItemKind::Frame,
            ItemData::Image(_) => ItemKind::Image,
            ItemData::Shape(_) => ItemKind::Shape,
            ItemData::Card(_) => ItemKind::Card,
            ItemData::AppCard(_) => ItemKind::AppCard,
            ItemData::StickyNote(_) => ItemKind::StickyNote,
            ItemData::Unknown(_) => ItemKind::Unknown,
        }
    }

    /// Build a fully-populated record for `kind` from a partial object.
    ///
    /// Supplied fields override the kind's defaults. The discriminator is
    /// chosen by `kind` alone; a stale `dataType` inside the partial is
    /// ignored.
    pub fn build(kind: ItemKind, partial: &Map<String, Value>) -> ItemData {
        match kind {
            ItemKind::Text => ItemData::Text(merged(partial)),
            ItemKind::Frame => ItemData::Frame(merged(partial)),
            ItemKind::Image => ItemData::Image(merged(partial)),
            ItemKind::Shape => ItemData::Shape(merged(partial)),
            ItemKind::Card => ItemData::Card(merged(partial)),
            ItemKind::AppCard => ItemData::AppCard(merged(partial)),
            ItemKind::StickyNote => ItemData::StickyNote(merged(partial)),
            ItemKind::Unknown => ItemData::Unknown(partial.clone()),
        }
    }

    /// Type a raw wire value. Accepts an object or a JSON-encoded string;
    /// a decode failure degrades to an empty record instead of an error.
    pub fn from_value(value: Value) -> ItemData {
        let map = decode_section(value, "data");
        let kind = match map.get(DATA_TAG).and_then(Value::as_str) {
            Some(tag) => match ItemKind::from_tag(tag) {
                Some(kind) => kind,
                None => {
                    log::debug!("unrecognized dataType {tag:?}, keeping raw payload");
                    return ItemData::Unknown(map);
                }
            },
            None => return ItemData::Unknown(map),
        };
        ItemData::build(kind, &map)
    }

    /// Wire value of this record, with the `dataType` discriminator set.
    pub fn to_value(&self) -> Value {
        match self {
            ItemData::Text(d) => tagged(d, DATA_TAG, "text"),
            ItemData::Frame(d) => tagged(d, DATA_TAG, "frame"),
            ItemData::Image(d) => tagged(d, DATA_TAG, "image"),
            ItemData::Shape(d) => tagged(d, DATA_TAG, "shape"),
            ItemData::Card(d) => tagged(d, DATA_TAG, "card"),
            ItemData::AppCard(d) => tagged(d, DATA_TAG, "app_card"),
            ItemData::StickyNote(d) => tagged(d, DATA_TAG, "sticky_note"),
            ItemData::Unknown(map) => Value::Object(map.clone()),
        }
    }
}

impl Default for ItemData {
    fn default() -> Self {
        ItemData::Unknown(Map::new())
    }
}

impl Serialize for ItemData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ItemData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(ItemData::from_value(Value::deserialize(deserializer)?))
    }
}

/// Typed per-kind style union, keyed by `styleType` on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemStyle {
    Text(TextStyle),
    Frame(FrameStyle),
    Image(ImageStyle),
    Shape(ShapeStyle),
    Card(CardStyle),
    AppCard(AppCardStyle),
    StickyNote(StickyNoteStyle),
    /// Raw payload of an unrecognized or untyped style section.
    Unknown(Map<String, Value>),
}

impl ItemStyle {
    /// The kind this record belongs to.
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemStyle::Text(_) => ItemKind::Text,
            ItemStyle::Frame(_) => ItemKind::Frame,
            ItemStyle::Image(_) => ItemKind::Image,
            ItemStyle::Shape(_) => ItemKind::Shape,
            ItemStyle::Card(_) => ItemKind::Card,
            ItemStyle::AppCard(_) => ItemKind::AppCard,
            ItemStyle::StickyNote(_) => ItemKind::StickyNote,
            ItemStyle::Unknown(_) => ItemKind::Unknown,
        }
    }

    /// Build a fully-populated record for `kind` from a partial object.
    ///
    /// Supplied fields override the kind's defaults; a stale `styleType`
    /// inside the partial is ignored.
    pub fn build(kind: ItemKind, partial: &Map<String, Value>) -> ItemStyle {
        match kind {
            ItemKind::Text => ItemStyle::Text(merged(partial)),
            ItemKind::Frame => ItemStyle::Frame(merged(partial)),
            ItemKind::Image => ItemStyle::Image(merged(partial)),
            ItemKind::Shape => ItemStyle::Shape(merged(partial)),
            ItemKind::Card => ItemStyle::Card(merged(partial)),
            ItemKind::AppCard => ItemStyle::AppCard(merged(partial)),
            ItemKind::StickyNote => ItemStyle::StickyNote(merged(partial)),
            ItemKind::Unknown => ItemStyle::Unknown(partial.clone()),
        }
    }

    /// Type a raw wire value. Accepts an object or a JSON-encoded string;
    /// a decode failure degrades to an empty record instead of an error.
    pub fn from_value(value: Value) -> ItemStyle {
        let map = decode_section(value, "style");
        let kind = match map.get(STYLE_TAG).and_then(Value::as_str) {
            Some(tag) => match ItemKind::from_tag(tag) {
                Some(kind) => kind,
                None => {
                    log::debug!("unrecognized styleType {tag:?}, keeping raw payload");
                    return ItemStyle::Unknown(map);
                }
            },
            None => return ItemStyle::Unknown(map),
        };
        ItemStyle::build(kind, &map)
    }

    /// Wire value of this record, with the `styleType` discriminator set.
    pub fn to_value(&self) -> Value {
        match self {
            ItemStyle::Text(s) => tagged(s, STYLE_TAG, "text"),
            ItemStyle::Frame(s) => tagged(s, STYLE_TAG, "frame"),
            ItemStyle::Image(s) => tagged(s, STYLE_TAG, "image"),
            ItemStyle::Shape(s) => tagged(s, STYLE_TAG, "shape"),
            ItemStyle::Card(s) => tagged(s, STYLE_TAG, "card"),
            ItemStyle::AppCard(s) => tagged(s, STYLE_TAG, "app_card"),
            ItemStyle::StickyNote(s) => tagged(s, STYLE_TAG, "sticky_note"),
            ItemStyle::Unknown(map) => Value::Object(map.clone()),
        }
    }
}

impl Default for ItemStyle {
    fn default() -> Self {
        ItemStyle::Unknown(Map::new())
    }
}

impl Serialize for ItemStyle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ItemStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(ItemStyle::from_value(Value::deserialize(deserializer)?))
    }
}

/// Per-kind creation defaults: fully-populated data and style records plus
/// the default bounding-box dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDefaults {
    pub data: ItemData,
    pub style: ItemStyle,
    pub width: f64,
    pub height: f64,
}

/// Creation defaults for every member of the closed kind set.
///
/// Total: every kind yields a fully-populated record; `Unknown` falls back
/// to empty untyped data and style.
pub fn defaults_for(kind: ItemKind) -> ItemDefaults {
    match kind {
        ItemKind::Text => ItemDefaults {
            data: ItemData::Text(TextData::default()),
            style: ItemStyle::Text(TextStyle::default()),
            width: 100.0,
            height: 100.0,
        },
        ItemKind::Frame => ItemDefaults {
            data: ItemData::Frame(FrameData::default()),
            style: ItemStyle::Frame(FrameStyle::default()),
            width: 300.0,
            height: 300.0,
        },
        ItemKind::Image => ItemDefaults {
            data: ItemData::Image(ImageData::default()),
            style: ItemStyle::Image(ImageStyle::default()),
            width: 240.0,
            height: 180.0,
        },
        ItemKind::Shape => ItemDefaults {
            data: ItemData::Shape(ShapeData::default()),
            style: ItemStyle::Shape(ShapeStyle::default()),
            width: 200.0,
            height: 150.0,
        },
        ItemKind::Card => ItemDefaults {
            data: ItemData::Card(CardData::default()),
            style: ItemStyle::Card(CardStyle::default()),
            width: 280.0,
            height: 120.0,
        },
        ItemKind::AppCard => ItemDefaults {
            data: ItemData::AppCard(CardData::default()),
            style: ItemStyle::AppCard(AppCardStyle::default()),
            width: 280.0,
            height: 120.0,
        },
        ItemKind::StickyNote => ItemDefaults {
            data: ItemData::StickyNote(StickyNoteData::default()),
            style: ItemStyle::StickyNote(StickyNoteStyle::default()),
            width: 220.0,
            height: 220.0,
        },
        ItemKind::Unknown => ItemDefaults {
            data: ItemData::Unknown(Map::new()),
            style: ItemStyle::Unknown(Map::new()),
            width: 100.0,
            height: 100.0,
        },
    }
}

/// Defaults-then-override construction of one typed record.
fn merged<T>(partial: &Map<String, Value>) -> T
where
    T: Default + Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(T::default()).unwrap_or_else(|_| Value::Object(Map::new()));
    if let Value::Object(map) = &mut value {
        for (key, val) in partial {
            map.insert(key.clone(), val.clone());
        }
    }
    match serde_json::from_value(value) {
        Ok(record) => record,
        Err(err) => {
            log::warn!("ill-typed item fields, falling back to defaults: {err}");
            T::default()
        }
    }
}

/// Serialize a record and stamp the discriminator field onto it.
fn tagged<T: Serialize>(record: &T, tag_field: &str, tag: &str) -> Value {
    let mut value = serde_json::to_value(record).unwrap_or_else(|_| Value::Object(Map::new()));
    if let Value::Object(map) = &mut value {
        map.insert(tag_field.to_string(), Value::String(tag.to_string()));
    }
    value
}

/// Normalize a wire `data`/`style` section into an object, decoding an
/// embedded JSON string first if needed. Failures degrade to empty.
fn decode_section(value: Value, section: &str) -> Map<String, Value> {
    let value = match value {
        Value::String(text) => match serde_json::from_str(&text) {
            Ok(decoded) => decoded,
            Err(err) => {
                log::warn!("failed to decode embedded {section} payload: {err}");
                Value::Object(Map::new())
            }
        },
        other => other,
    };
    match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            log::warn!("expected a {section} object, got {other}");
            Map::new()
        }
    }
}
