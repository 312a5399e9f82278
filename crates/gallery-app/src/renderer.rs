//! Tracing-backed renderer.
//!
//! Every entity notification becomes a structured log event; stands in
//! for a real drawing backend and doubles as a live-entity counter.

use tracing::trace;

use gallery_core::render::{Renderer, SpriteAttrs, SpriteKind};

#[derive(Debug, Default)]
pub struct TracingRenderer {
    live: usize,
}

impl TracingRenderer {
    /// Number of entities currently on "screen".
    pub fn live(&self) -> usize {
        self.live
    }
}

impl Renderer for TracingRenderer {
    fn entity_created(&mut self, kind: SpriteKind, id: u32, attrs: SpriteAttrs) {
        self.live += 1;
        trace!(
            ?kind,
            id,
            x = attrs.x,
            y = attrs.y,
            size = attrs.size,
            color = attrs.color,
            "sprite created"
        );
    }

    fn entity_updated(&mut self, kind: SpriteKind, id: u32, attrs: SpriteAttrs) {
        trace!(?kind, id, x = attrs.x, y = attrs.y, "sprite updated");
    }

    fn entity_removed(&mut self, kind: SpriteKind, id: u32) {
        self.live = self.live.saturating_sub(1);
        trace!(?kind, id, live = self.live, "sprite removed");
    }
}
