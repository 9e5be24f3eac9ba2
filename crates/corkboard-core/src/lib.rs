//! Corkboard Client Core
//!
//! Platform-agnostic synchronization core for the Corkboard collaborative
//! whiteboard client: the typed item model, the bidirectional wire/local
//! mapper, the guarded publish/subscribe transport, and the per-board state
//! synchronizer.

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod factory;
pub mod graph;
pub mod items;
pub mod mapper;
pub mod protocol;
pub mod sync;
pub mod transport;

#[cfg(not(target_arch = "wasm32"))]
pub use config::ClientConfig;
pub use graph::{BoardGraph, GraphEdge, GraphNode};
pub use items::{Item, ItemData, ItemKind, ItemStyle, defaults_for};
pub use protocol::{BoardEvent, Command};
pub use sync::BoardSync;
#[cfg(not(target_arch = "wasm32"))]
pub use transport::WsTransport;
pub use transport::{ConnectionState, Transport, TransportEvent};
