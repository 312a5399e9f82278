//! Renderer interface.
//!
//! The simulation never touches a drawing surface; it reports entity
//! creations, updates, and removals through this trait once per tick,
//! after all state mutation for the tick has completed. Backends own
//! every visual decision, including the palette the color indices
//! select from.

use serde::{Deserialize, Serialize};

/// Entity kind, for renderers that draw each kind differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Turret,
    Projectile,
    Target,
}

/// Drawable attributes of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteAttrs {
    pub x: f64,
    pub y: f64,
    /// Turret width, target edge length, or projectile radius.
    pub size: f64,
    /// Palette slot; the renderer owns the palette itself.
    pub color: u8,
}

/// Receiver for per-tick entity diffs.
pub trait Renderer {
    fn entity_created(&mut self, kind: SpriteKind, id: u32, attrs: SpriteAttrs);
    fn entity_updated(&mut self, kind: SpriteKind, id: u32, attrs: SpriteAttrs);
    fn entity_removed(&mut self, kind: SpriteKind, id: u32);
}

/// Renderer that discards every notification, for headless runs.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn entity_created(&mut self, _kind: SpriteKind, _id: u32, _attrs: SpriteAttrs) {}
    fn entity_updated(&mut self, _kind: SpriteKind, _id: u32, _attrs: SpriteAttrs) {}
    fn entity_removed(&mut self, _kind: SpriteKind, _id: u32) {}
}
