//! Viewport geometry shared by the snap engine and the fence layout.
//!
//! All coordinates are viewport pixels with the origin at the top-left
//! corner. Conversions to and from `egui::Rect` live here so the rest of
//! the crate never has to think about `Pos2`/`Vec2`.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    /// Build a box, clamping negative (or NaN) sizes to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Left and right edges, in that order.
    pub fn vertical_edges(&self) -> [f32; 2] {
        [self.left(), self.right()]
    }

    /// Top and bottom edges, in that order.
    pub fn horizontal_edges(&self) -> [f32; 2] {
        [self.top(), self.bottom()]
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Shift the box so that it lies inside the viewport.
    /// A box larger than the viewport is pinned to the top-left corner.
    pub fn kept_within(&self, viewport: Viewport) -> Self {
        let max_x = (viewport.width - self.width).max(0.0);
        let max_y = (viewport.height - self.height).max(0.0);
        Self {
            x: self.x.min(max_x).max(0.0),
            y: self.y.min(max_y).max(0.0),
            ..*self
        }
    }

    /// Box produced by dragging the given edges of `self` by `(dx, dy)`.
    ///
    /// Moving edges stop at the viewport bounds and never bring the box
    /// below `min_size`; fixed edges stay where they are.
    pub fn resized(
        &self,
        edges: ResizeEdges,
        dx: f32,
        dy: f32,
        min_size: (f32, f32),
        viewport: Viewport,
    ) -> Self {
        let (min_w, min_h) = min_size;
        let mut left = self.left();
        let mut right = self.right();
        let mut top = self.top();
        let mut bottom = self.bottom();

        if edges.left {
            left = (left + dx).max(0.0).min(right - min_w);
        } else if edges.right {
            right = (right + dx).min(viewport.width).max(left + min_w);
        }
        if edges.top {
            top = (top + dy).max(0.0).min(bottom - min_h);
        } else if edges.bottom {
            bottom = (bottom + dy).min(viewport.height).max(top + min_h);
        }

        Self::new(left, top, right - left, bottom - top)
    }

    pub fn to_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.x, self.y),
            egui::vec2(self.width, self.height),
        )
    }

    pub fn from_rect(rect: egui::Rect) -> Self {
        Self::new(rect.min.x, rect.min.y, rect.width(), rect.height())
    }
}

/// Size of the area boxes are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_rect(rect: egui::Rect) -> Self {
        Self::new(rect.width(), rect.height())
    }
}

/// Which edges a resize handle moves. Corners set two flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeEdges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl ResizeEdges {
    pub const LEFT: Self = Self { left: true, right: false, top: false, bottom: false };
    pub const RIGHT: Self = Self { left: false, right: true, top: false, bottom: false };
    pub const TOP: Self = Self { left: false, right: false, top: true, bottom: false };
    pub const BOTTOM: Self = Self { left: false, right: false, top: false, bottom: true };
    pub const TOP_LEFT: Self = Self { left: true, right: false, top: true, bottom: false };
    pub const TOP_RIGHT: Self = Self { left: false, right: true, top: true, bottom: false };
    pub const BOTTOM_LEFT: Self = Self { left: true, right: false, top: false, bottom: true };
    pub const BOTTOM_RIGHT: Self = Self { left: false, right: true, top: false, bottom: true };

    /// All eight handles, edges first then corners.
    pub const ALL: [Self; 8] = [
        Self::TOP,
        Self::RIGHT,
        Self::BOTTOM,
        Self::LEFT,
        Self::TOP_RIGHT,
        Self::BOTTOM_RIGHT,
        Self::BOTTOM_LEFT,
        Self::TOP_LEFT,
    ];

    pub fn cursor_icon(&self) -> egui::CursorIcon {
        match (self.left, self.right, self.top, self.bottom) {
            (true, _, true, _) => egui::CursorIcon::ResizeNorthWest,
            (_, true, true, _) => egui::CursorIcon::ResizeNorthEast,
            (true, _, _, true) => egui::CursorIcon::ResizeSouthWest,
            (_, true, _, true) => egui::CursorIcon::ResizeSouthEast,
            (true, _, _, _) | (_, true, _, _) => egui::CursorIcon::ResizeHorizontal,
            _ => egui::CursorIcon::ResizeVertical,
        }
    }

    /// Hit area of this handle along the border of `rect`.
    pub fn handle_rect(&self, rect: egui::Rect, grip: f32) -> egui::Rect {
        let x = if self.left {
            rect.min.x - grip / 2.0..=rect.min.x + grip / 2.0
        } else if self.right {
            rect.max.x - grip / 2.0..=rect.max.x + grip / 2.0
        } else {
            rect.min.x + grip / 2.0..=rect.max.x - grip / 2.0
        };
        let y = if self.top {
            rect.min.y - grip / 2.0..=rect.min.y + grip / 2.0
        } else if self.bottom {
            rect.max.y - grip / 2.0..=rect.max.y + grip / 2.0
        } else {
            rect.min.y + grip / 2.0..=rect.max.y - grip / 2.0
        };
        egui::Rect::from_x_y_ranges(x, y)
    }
}
