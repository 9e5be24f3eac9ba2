//! Local board graph: nodes, derived edges, and selection state.

use std::collections::{HashMap, HashSet};

use kurbo::{Point, Rect};

use crate::items::{Geometry, ItemData, ItemKind, ItemStyle};

/// Local, editable representation of one board item.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub kind: ItemKind,
    pub board_id: String,
    /// Containment: id of the parent node, if any.
    pub parent_id: Option<String>,
    /// Top-left corner of the bounding box (the wire carries the center).
    pub position: Point,
    pub geometry: Geometry,
    /// Human-facing label, aliased from the kind's title/content field.
    pub label: Option<String>,
    /// Residual typed data, with the label's source field cleared.
    pub data: ItemData,
    pub style: ItemStyle,
    pub selected: bool,
}

impl GraphNode {
    /// Bounding box in board coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.geometry.width,
            self.position.y + self.geometry.height,
        )
    }
}

/// Derived parent/child relationship between two nodes.
///
/// Never persisted on its own: an edge exists exactly because the child's
/// `parent_id` points at the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    /// Edge id for a parent/child pair.
    pub fn id_for(parent: &str, child: &str) -> String {
        format!("{parent}-{child}")
    }

    fn between(parent: &str, child: &str) -> Self {
        Self {
            id: Self::id_for(parent, child),
            source: parent.to_string(),
            target: child.to_string(),
        }
    }
}

/// The local graph store: nodes keyed by id, edges derived from parent
/// pointers, and the current selection (node and edge ids).
#[derive(Debug, Clone, Default)]
pub struct BoardGraph {
    nodes: HashMap<String, GraphNode>,
    edges: HashMap<String, GraphEdge>,
    selection: HashSet<String>,
}

impl BoardGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.get(id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert or replace a node by id, then re-derive its incoming edge.
    pub fn upsert(&mut self, mut node: GraphNode) {
        node.selected = self.selection.contains(&node.id);
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        self.rederive_edge(&id);
    }

    /// Recompute the edge implied by a node's parent pointer: drop any edge
    /// targeting the node, then add one back if the node has a parent.
    pub fn rederive_edge(&mut self, id: &str) {
        self.edges.retain(|_, edge| edge.target != id);
        if let Some(parent) = self.nodes.get(id).and_then(|node| node.parent_id.clone()) {
            let edge = GraphEdge::between(&parent, id);
            self.edges.insert(edge.id.clone(), edge);
        }
    }

    /// Remove a node and every edge it participates in, as source or target.
    pub fn remove(&mut self, id: &str) -> Option<GraphNode> {
        let node = self.nodes.remove(id)?;
        let dropped: Vec<String> = self
            .edges
            .values()
            .filter(|edge| edge.source == id || edge.target == id)
            .map(|edge| edge.id.clone())
            .collect();
        for edge_id in &dropped {
            self.edges.remove(edge_id);
            self.selection.remove(edge_id);
        }
        self.selection.remove(id);
        Some(node)
    }

    /// Add a single edge between two nodes, returning its id.
    pub fn add_edge(&mut self, source: &str, target: &str) -> String {
        let edge = GraphEdge::between(source, target);
        let id = edge.id.clone();
        self.edges.insert(id.clone(), edge);
        id
    }

    /// Remove a single edge by id, leaving its endpoints alone.
    pub fn remove_edge(&mut self, edge_id: &str) -> Option<GraphEdge> {
        self.selection.remove(edge_id);
        self.edges.remove(edge_id)
    }

    /// Replace the whole graph with a fresh node set, re-deriving every edge
    /// from parent pointers. Selection is cleared: its ids are stale.
    pub fn replace_with(&mut self, nodes: Vec<GraphNode>) {
        self.nodes = nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();
        self.edges.clear();
        self.selection.clear();
        let ids: Vec<String> = self.nodes.keys().cloned().collect();
        for id in ids {
            self.rederive_edge(&id);
        }
    }

    // --- Selection ---

    pub fn select(&mut self, id: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.selected = true;
        }
        self.selection.insert(id.to_string());
    }

    pub fn deselect(&mut self, id: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.selected = false;
        }
        self.selection.remove(id);
    }

    pub fn clear_selection(&mut self) {
        for node in self.nodes.values_mut() {
            node.selected = false;
        }
        self.selection.clear();
    }

    pub fn select_all(&mut self) {
        for node in self.nodes.values_mut() {
            node.selected = true;
        }
        self.selection = self.nodes.keys().cloned().collect();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn selection(&self) -> &HashSet<String> {
        &self.selection
    }

    /// Ids of selected edges (selection can also hold node ids).
    pub fn selected_edges(&self) -> Vec<String> {
        self.selection
            .iter()
            .filter(|id| self.edges.contains_key(*id))
            .cloned()
            .collect()
    }

    // --- Hit queries ---

    /// Ids of nodes whose bounds contain the point.
    pub fn nodes_at_point(&self, point: Point) -> Vec<String> {
        self.nodes
            .values()
            .filter(|node| node.bounds().contains(point))
            .map(|node| node.id.clone())
            .collect()
    }

    /// Ids of nodes whose bounds intersect the rectangle.
    pub fn nodes_in_rect(&self, rect: Rect) -> Vec<String> {
        self.nodes
            .values()
            .filter(|node| rect.intersect(node.bounds()).area() > 0.0)
            .map(|node| node.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parent: Option<&str>) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            kind: ItemKind::StickyNote,
            board_id: "b-1".to_string(),
            parent_id: parent.map(str::to_string),
            position: Point::new(0.0, 0.0),
            geometry: Geometry::new(100.0, 100.0),
            label: None,
            data: ItemData::default(),
            style: ItemStyle::default(),
            selected: false,
        }
    }

    #[test]
    fn test_upsert_derives_edge_from_parent() {
        let mut graph = BoardGraph::new();
        graph.upsert(node("a", None));
        graph.upsert(node("b", Some("a")));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let edge = graph.edge("a-b").unwrap();
        assert_eq!(edge.source, "a");
        assert_eq!(edge.target, "b");
    }

    #[test]
    fn test_upsert_rederives_edge_on_reparent() {
        let mut graph = BoardGraph::new();
        graph.upsert(node("a", None));
        graph.upsert(node("c", None));
        graph.upsert(node("b", Some("a")));
        assert!(graph.edge("a-b").is_some());

        // Same node comes back pointing at a different parent.
        graph.upsert(node("b", Some("c")));
        assert!(graph.edge("a-b").is_none());
        assert!(graph.edge("c-b").is_some());
        assert_eq!(graph.edge_count(), 1);

        // And back to no parent at all.
        graph.upsert(node("b", None));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_remove_cascades_incident_edges() {
        let mut graph = BoardGraph::new();
        graph.upsert(node("a", None));
        graph.upsert(node("b", Some("a")));
        graph.upsert(node("c", Some("b")));
        assert_eq!(graph.edge_count(), 2);

        // b is target of a-b and source of b-c; both must go.
        graph.remove("b");
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_remove_without_edges_leaves_edge_set_alone() {
        let mut graph = BoardGraph::new();
        graph.upsert(node("a", None));
        graph.upsert(node("b", Some("a")));
        graph.upsert(node("lone", None));

        graph.remove("lone");
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_replace_with_rebuilds_graph_and_clears_selection() {
        let mut graph = BoardGraph::new();
        graph.upsert(node("old", None));
        graph.select("old");

        graph.replace_with(vec![node("a", None), node("b", Some("a"))]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.selection().is_empty());
        assert!(!graph.contains("old"));
    }

    #[test]
    fn test_upsert_preserves_selection_membership() {
        let mut graph = BoardGraph::new();
        graph.upsert(node("a", None));
        graph.select("a");

        // A remote replacement of a selected node keeps it selected.
        graph.upsert(node("a", None));
        assert!(graph.node("a").unwrap().selected);
        assert!(graph.is_selected("a"));
    }

    #[test]
    fn test_selected_edges_filters_node_ids() {
        let mut graph = BoardGraph::new();
        graph.upsert(node("a", None));
        graph.upsert(node("b", Some("a")));
        graph.select("a");
        graph.select("a-b");

        assert_eq!(graph.selected_edges(), vec!["a-b".to_string()]);
    }

    #[test]
    fn test_hit_queries() {
        let mut graph = BoardGraph::new();
        let mut near = node("near", None);
        near.position = Point::new(0.0, 0.0);
        let mut far = node("far", None);
        far.position = Point::new(500.0, 500.0);
        graph.upsert(near);
        graph.upsert(far);

        assert_eq!(graph.nodes_at_point(Point::new(50.0, 50.0)), vec!["near"]);
        let hits = graph.nodes_in_rect(Rect::new(-10.0, -10.0, 600.0, 600.0));
        assert_eq!(hits.len(), 2);
    }
}
