//! Collaborative canvas synchronization engine.
//!
//! This crate models drawing operations as discrete, replayable actions,
//! applies a user's own action to the local canvas immediately (optimistic
//! update), reconciles it with the authoritative broadcast echo without
//! double-drawing, tracks derived undo/redo availability, and replays an
//! ordered action list onto any 2D surface at any resolution. The
//! surrounding application supplies the transport and persistence
//! collaborators and pumps inbound envelopes into the session controller.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`payload`] | Drawable action primitives in normalized coordinates |
//! | [`envelope`] | Wire envelope, action types, JSON codec |
//! | [`render`] | [`render::Surface`] abstraction and deterministic replay |
//! | [`session`] | Per-load session identity and echo classification |
//! | [`oplog`] | Canonical action list and optimistic status machine |
//! | [`undo`] | Undo/redo availability counters |
//! | [`controller`] | Board session controller wiring it all together |
//! | [`transport`] | Publish/subscribe collaborator seam |
//! | [`persistence`] | Durable history and undo/redo collaborator seam |
//! | [`consts`] | Shared numeric constants |

pub mod consts;
pub mod controller;
pub mod envelope;
pub mod oplog;
pub mod payload;
pub mod persistence;
pub mod render;
pub mod session;
pub mod transport;
pub mod undo;
