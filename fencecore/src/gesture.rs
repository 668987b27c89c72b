//! Pointer gestures on fences and icons.
//!
//! A fence gesture remembers the box it started from and the total pointer
//! travel, so the proposed box is rebuilt from scratch on every move and the
//! snapped box of the previous frame never feeds back into the next one.

use crate::fences::{MIN_FENCE_HEIGHT, MIN_FENCE_WIDTH};
use crate::geometry::{BoundingBox, ResizeEdges, Viewport};
use crate::snap::{BoxSet, SnapEngine, SnapOutcome};

/// Pointer travel before a pressed icon turns into a drag
pub const FILE_DRAG_ACTIVATION: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize(ResizeEdges),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FenceGesture {
    pub fence_id: String,
    pub kind: GestureKind,
    start: BoundingBox,
    dx: f32,
    dy: f32,
}

impl FenceGesture {
    pub fn begin(fence_id: impl Into<String>, kind: GestureKind, start: BoundingBox) -> Self {
        Self {
            fence_id: fence_id.into(),
            kind,
            start,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn start(&self) -> BoundingBox {
        self.start
    }

    /// Unsnapped box for the pointer travel so far, kept on screen and
    /// never smaller than a fence may be.
    pub fn proposed(&self, viewport: Viewport) -> BoundingBox {
        match self.kind {
            GestureKind::Move => self.start.translated(self.dx, self.dy).kept_within(viewport),
            GestureKind::Resize(edges) => self.start.resized(
                edges,
                self.dx,
                self.dy,
                (MIN_FENCE_WIDTH, MIN_FENCE_HEIGHT),
                viewport,
            ),
        }
    }

    /// Add pointer travel and snap the resulting box against the others.
    pub fn drag_by(
        &mut self,
        dx: f32,
        dy: f32,
        engine: &SnapEngine,
        boxes: &BoxSet<String>,
        viewport: Viewport,
    ) -> SnapOutcome {
        self.dx += dx;
        self.dy += dy;
        engine.snap(&self.fence_id, self.proposed(viewport), boxes, viewport)
    }
}

/// An icon press that becomes a drag once the pointer has travelled far enough.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDrag {
    pub fence_id: String,
    pub index: usize,
    origin: egui::Pos2,
    pointer: egui::Pos2,
    active: bool,
}

impl FileDrag {
    pub fn press(fence_id: impl Into<String>, index: usize, at: egui::Pos2) -> Self {
        Self {
            fence_id: fence_id.into(),
            index,
            origin: at,
            pointer: at,
            active: false,
        }
    }

    /// Track the pointer. Returns whether the drag is active.
    pub fn move_to(&mut self, at: egui::Pos2) -> bool {
        self.pointer = at;
        if !self.active && self.origin.distance(at) >= FILE_DRAG_ACTIVATION {
            self.active = true;
        }
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pointer(&self) -> egui::Pos2 {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Viewport = Viewport { width: 1000.0, height: 700.0 };

    fn boxes() -> BoxSet<String> {
        [
            ("a".to_string(), BoundingBox::new(100.0, 100.0, 300.0, 200.0)),
            ("b".to_string(), BoundingBox::new(600.0, 100.0, 300.0, 200.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_move_snaps_without_drift() {
        let engine = SnapEngine::default();
        let set = boxes();
        let mut g = FenceGesture::begin("b", GestureKind::Move, set.get(&"b".to_string()).unwrap());

        // 600 -> 402: within 4px of a's right edge at 400
        let out = g.drag_by(-198.0, 0.0, &engine, &set, SCREEN);
        assert_eq!(out.bounds.x, 400.0);

        // one more pixel left is 401, still snapped to 400
        let out = g.drag_by(-1.0, 0.0, &engine, &set, SCREEN);
        assert_eq!(out.bounds.x, 400.0);

        // 20px further the box moves freely, measured from the unsnapped origin
        let out = g.drag_by(-20.0, 0.0, &engine, &set, SCREEN);
        assert_eq!(out.bounds.x, 381.0);
    }

    #[test]
    fn test_start_survives_dragging() {
        let engine = SnapEngine::default();
        let set = boxes();
        let origin = set.get(&"b".to_string()).unwrap();
        let mut g = FenceGesture::begin("b", GestureKind::Move, origin);
        g.drag_by(-150.0, 40.0, &engine, &set, SCREEN);
        g.drag_by(-48.0, 0.0, &engine, &set, SCREEN);
        assert_eq!(g.start(), origin);
    }

    #[test]
    fn test_move_is_kept_on_screen() {
        let engine = SnapEngine::default();
        let set = boxes();
        let mut g = FenceGesture::begin("b", GestureKind::Move, set.get(&"b".to_string()).unwrap());
        let out = g.drag_by(500.0, 900.0, &engine, &set, SCREEN);
        assert_eq!(out.bounds.right(), 1000.0);
        assert_eq!(out.bounds.bottom(), 700.0);
    }

    #[test]
    fn test_resize_respects_minimum() {
        let engine = SnapEngine::default();
        let set = boxes();
        let mut g = FenceGesture::begin(
            "a",
            GestureKind::Resize(ResizeEdges::BOTTOM_RIGHT),
            set.get(&"a".to_string()).unwrap(),
        );
        let out = g.drag_by(-500.0, -500.0, &engine, &set, SCREEN);
        assert_eq!(out.bounds.width, MIN_FENCE_WIDTH);
        assert_eq!(out.bounds.height, MIN_FENCE_HEIGHT);
    }

    #[test]
    fn test_resize_shows_guides() {
        let engine = SnapEngine::default();
        let set = boxes();
        let mut g = FenceGesture::begin(
            "a",
            GestureKind::Resize(ResizeEdges::BOTTOM),
            set.get(&"a".to_string()).unwrap(),
        );
        // a's bottom goes 300 -> 301, b's bottom is at 300
        let out = g.drag_by(0.0, 1.0, &engine, &set, SCREEN);
        assert!(out
            .guides
            .iter()
            .any(|l| l.orientation == crate::snap::Orientation::Horizontal && l.offset == 300.0));
    }

    #[test]
    fn test_file_drag_activation() {
        let mut drag = FileDrag::press("programs", 2, egui::pos2(10.0, 10.0));
        assert!(!drag.move_to(egui::pos2(15.0, 10.0)));
        assert!(drag.move_to(egui::pos2(18.0, 10.0)));
        // stays active when coming back
        assert!(drag.move_to(egui::pos2(10.0, 10.0)));
        assert_eq!(drag.pointer(), egui::pos2(10.0, 10.0));
    }
}
