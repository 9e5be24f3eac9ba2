//! State synchronization between the local graph and the server.
//!
//! [`BoardSync`] owns the local graph for one board and brokers every
//! mutation between the presentation layer and the server: local edits
//! become outgoing commands, inbound broadcasts are applied to the graph.
//! Both paths converge on the same upsert-by-id routine.
//!
//! All operations run to completion on the calling thread; the only
//! suspension point is the transport. Broadcasts are applied in receipt
//! order with no version tracking, so concurrent edits resolve as
//! last-applied-wins.

use std::collections::HashMap;

use kurbo::Point;
use serde_json::{Map, Value};

use crate::factory;
use crate::graph::{BoardGraph, GraphNode};
use crate::items::{Item, ItemKind, ItemStyle};
use crate::mapper::{item_from_node, node_from_item};
use crate::protocol::{BoardEvent, Command, board_topic};
use crate::transport::{Transport, TransportEvent, safe_publish};

/// Axis movement below this many board units is treated as click jitter,
/// not a real move, and produces no update command.
pub const DRAG_EPSILON: f64 = 1.0;

/// Synchronizer for one board.
pub struct BoardSync<T: Transport> {
    board_id: String,
    transport: T,
    graph: BoardGraph,
    /// Last state of each node as received from (or acknowledged to) the
    /// server; the baseline for drag-suppression comparisons.
    last_known: HashMap<String, GraphNode>,
    drag_epsilon: f64,
}

impl<T: Transport> BoardSync<T> {
    pub fn new(board_id: impl Into<String>, transport: T) -> Self {
        Self {
            board_id: board_id.into(),
            transport,
            graph: BoardGraph::new(),
            last_known: HashMap::new(),
            drag_epsilon: DRAG_EPSILON,
        }
    }

    /// Override the drag-suppression threshold.
    pub fn with_drag_epsilon(mut self, epsilon: f64) -> Self {
        self.drag_epsilon = epsilon;
        self
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    /// Read-only view of the local graph. Mutation goes through the
    /// operations below, never through the graph directly.
    pub fn graph(&self) -> &BoardGraph {
        &self.graph
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Subscribe to the board topic and request a full snapshot.
    pub fn open(&self) {
        if let Err(err) = self.transport.subscribe(&board_topic(&self.board_id)) {
            log::warn!("subscribing to board {} failed: {err}", self.board_id);
        }
        self.push(Command::Load {
            board_id: self.board_id.clone(),
        });
    }

    // --- Inbound ---

    /// React to a transport lifecycle or message event.
    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected => {
                log::info!("transport connected, reloading board {}", self.board_id);
                self.open();
            }
            TransportEvent::Disconnected => {
                log::info!("transport disconnected");
            }
            TransportEvent::Message { destination, body } => {
                if destination == board_topic(&self.board_id) {
                    self.handle_message(&body);
                } else {
                    log::debug!("ignoring message for {destination}");
                }
            }
            TransportEvent::Error { message } => log::warn!("transport error: {message}"),
        }
    }

    /// Parse and apply one broadcast body from the board topic. An
    /// unparseable body is logged and dropped; it affects nothing else.
    pub fn handle_message(&mut self, body: &str) {
        match serde_json::from_str::<BoardEvent>(body) {
            Ok(event) => self.handle_event(event),
            Err(err) => log::warn!("ignoring unparseable board event: {err}"),
        }
    }

    /// Apply one board event.
    pub fn handle_event(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::Upsert { item } => self.apply_remote_item(item),
            BoardEvent::Delete { id } => self.apply_remote_delete(&id),
            BoardEvent::Snapshot { items } => self.apply_board_snapshot(items),
        }
    }

    /// Apply one item broadcast by the server: upsert it into the graph
    /// and record it as the last known server state. This is the only path
    /// by which a created node becomes visible locally.
    ///
    /// The node's edge is re-derived from its parent pointer on every
    /// apply, so re-parenting an existing item moves its edge without a
    /// full reload.
    pub fn apply_remote_item(&mut self, item: Item) {
        let node = node_from_item(item);
        self.last_known.insert(node.id.clone(), node.clone());
        self.graph.upsert(node);
    }

    /// Apply a deletion broadcast by the server.
    pub fn apply_remote_delete(&mut self, id: &str) {
        self.last_known.remove(id);
        if self.graph.remove(id).is_none() {
            log::debug!("remote delete for unknown node {id}");
        }
    }

    /// Replace the local graph with a full board snapshot, re-deriving the
    /// entire edge set from parent pointers.
    pub fn apply_board_snapshot(&mut self, items: Vec<Item>) {
        let nodes: Vec<GraphNode> = items.into_iter().map(node_from_item).collect();
        self.last_known = nodes
            .iter()
            .map(|node| (node.id.clone(), node.clone()))
            .collect();
        self.graph.replace_with(nodes);
    }

    // --- Outbound ---

    /// Ask the server to create a new item. Nothing is inserted locally:
    /// the node appears when the server's broadcast echoes it back.
    pub fn create_node(&self, kind: ItemKind, position: Option<Point>, parent_id: Option<&str>) {
        self.push(factory::create_command(
            kind,
            &self.board_id,
            parent_id,
            position,
        ));
    }

    /// Rename a node and push the full updated item. Label edits are never
    /// suppressed.
    ///
    /// Panics if `id` is not present.
    pub fn set_label(&mut self, id: &str, label: &str) {
        let node = expect_node_mut(&mut self.graph, id, "set_label");
        node.label = Some(label.to_string());
        let item = item_from_node(node);
        self.push(Command::Update(item));
    }

    /// Finish a drag: move the node locally, clear its selection, and push
    /// the update unless the move is sub-threshold jitter against the last
    /// known server state.
    ///
    /// Panics if `id` is not present.
    pub fn drag_stop(&mut self, id: &str, position: Point) {
        let node = {
            let node = expect_node_mut(&mut self.graph, id, "drag_stop");
            node.position = position;
            node.clone()
        };
        self.graph.deselect(id);

        let moved = match self.last_known.get(id) {
            Some(prev) => {
                (position.x - prev.position.x).abs() >= self.drag_epsilon
                    || (position.y - prev.position.y).abs() >= self.drag_epsilon
            }
            None => true,
        };
        if !moved {
            log::debug!("suppressing sub-threshold drag of {id}");
            return;
        }

        let mut acknowledged = node;
        acknowledged.selected = false;
        self.push(Command::Update(item_from_node(&acknowledged)));
        self.last_known.insert(id.to_string(), acknowledged);
    }

    /// Merge a partial style object into the node's current style and push
    /// the full updated item. Style edits are never suppressed.
    ///
    /// Panics if `id` is not present.
    pub fn set_style(&mut self, id: &str, patch: &Map<String, Value>) {
        let node = expect_node_mut(&mut self.graph, id, "set_style");
        let mut merged = match node.style.to_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in patch {
            merged.insert(key.clone(), value.clone());
        }
        node.style = ItemStyle::build(node.kind, &merged);
        let item = item_from_node(node);
        self.push(Command::Update(item));
    }

    /// Remove a node and every incident edge locally, then tell the server.
    ///
    /// Local removal is immediate and is not rolled back if the delete
    /// command cannot be sent.
    ///
    /// Panics if `id` is not present.
    pub fn remove_node(&mut self, id: &str) {
        if self.graph.remove(id).is_none() {
            panic!("remove_node: unknown node id {id}");
        }
        self.last_known.remove(id);
        self.push(Command::Delete {
            board_id: self.board_id.clone(),
            node_id: id.to_string(),
        });
    }

    /// Add a local edge between two nodes, returning its id.
    ///
    /// Edges are never persisted on their own; a caller that wants the
    /// relationship to survive a reload must separately update the child's
    /// `parent_id`.
    pub fn connect(&mut self, source: &str, target: &str) -> String {
        self.graph.add_edge(source, target)
    }

    /// Remove the currently selected edges from the local edge set.
    ///
    /// Local-only, like [`connect`](Self::connect): edge existence is
    /// implied by node parent pointers, so nothing is sent to the server.
    pub fn delete_selection(&mut self) {
        for edge_id in self.graph.selected_edges() {
            self.graph.remove_edge(&edge_id);
        }
    }

    // --- Selection ---

    pub fn select(&mut self, id: &str) {
        self.graph.select(id);
    }

    pub fn deselect(&mut self, id: &str) {
        self.graph.deselect(id);
    }

    pub fn clear_selection(&mut self) {
        self.graph.clear_selection();
    }

    /// Encode and publish a command through the guarded transport.
    fn push(&self, command: Command) {
        match command.body() {
            Ok(body) => safe_publish(&self.transport, &command.destination(), &body),
            Err(err) => log::warn!(
                "failed to encode command for {}: {err}",
                command.destination()
            ),
        }
    }
}

fn expect_node_mut<'a>(graph: &'a mut BoardGraph, id: &str, operation: &str) -> &'a mut GraphNode {
    graph
        .node_mut(id)
        .unwrap_or_else(|| panic!("{operation}: unknown node id {id}"))
}
