//! Edge snapping for fences being dragged or resized.
//!
//! On every pointer move the caller hands in the *proposed* (unsnapped) box,
//! a snapshot of every fence's box and the viewport size. The engine answers
//! with the guide lines to paint and the snapped box. Nothing is cached
//! between calls, so feeding the same proposed box twice gives the same
//! answer and snapping never drifts.
//!
//! Only edges take part: left/right against left/right, top/bottom against
//! top/bottom. Centres are ignored.

use crate::geometry::{BoundingBox, Viewport};

/// Maximum distance, in pixels, at which an edge is pulled into alignment.
pub const SNAP_THRESHOLD: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A line painted while an edge is aligned with a sibling's edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub orientation: Orientation,
    /// x for vertical lines, y for horizontal ones
    pub offset: f32,
}

/// Read-only snapshot of every box on screen, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct BoxSet<Id> {
    entries: Vec<(Id, BoundingBox)>,
}

impl<Id: PartialEq> BoxSet<Id> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn push(&mut self, id: Id, bounds: BoundingBox) {
        self.entries.push((id, bounds));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &Id) -> Option<BoundingBox> {
        self.entries.iter().find(|(i, _)| i == id).map(|(_, b)| *b)
    }

    /// Every box except the one identified by `id`, in insertion order.
    pub fn siblings<'a>(&'a self, id: &'a Id) -> impl Iterator<Item = &'a BoundingBox> + 'a {
        self.entries
            .iter()
            .filter(move |(i, _)| i != id)
            .map(|(_, b)| b)
    }
}

impl<Id> FromIterator<(Id, BoundingBox)> for BoxSet<Id> {
    fn from_iter<T: IntoIterator<Item = (Id, BoundingBox)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// One candidate alignment: which edge of the active box moves, and where to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSnap {
    /// `target - current`, zero when the edge already sits on the target
    pub offset: f32,
    pub target: f32,
    /// the right (or bottom) edge is the one being aligned
    pub far_edge: bool,
}

impl EdgeSnap {
    /// New position of the box's leading coordinate once this edge lands on
    /// its target. Landing is exact: `start + extent == target` for far edges.
    fn land(&self, start: f32, extent: f32) -> f32 {
        if self.offset == 0.0 {
            start
        } else if self.far_edge {
            start_for_end(self.target, extent)
        } else {
            self.target
        }
    }
}

/// Best candidate found on each axis, `None` when nothing was close enough.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisOffsets {
    pub x: Option<EdgeSnap>,
    pub y: Option<EdgeSnap>,
}

/// Result of one snap computation.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapOutcome {
    pub guides: Vec<GuideLine>,
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapEngine {
    threshold: f32,
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self::new(SNAP_THRESHOLD)
    }
}

impl SnapEngine {
    pub fn new(threshold: f32) -> Self {
        Self { threshold: threshold.max(0.0) }
    }

    /// Guide lines for every active edge lying within half the threshold of
    /// a sibling edge on the same axis. Lines sit on the sibling's edge.
    pub fn guides<Id: PartialEq>(
        &self,
        active: &Id,
        proposed: BoundingBox,
        boxes: &BoxSet<Id>,
    ) -> Vec<GuideLine> {
        let reach = self.threshold / 2.0;
        let mut lines = Vec::new();

        for other in boxes.siblings(active) {
            for current in proposed.vertical_edges() {
                for edge in other.vertical_edges() {
                    if (current - edge).abs() < reach {
                        lines.push(GuideLine { orientation: Orientation::Vertical, offset: edge });
                    }
                }
            }
            for current in proposed.horizontal_edges() {
                for edge in other.horizontal_edges() {
                    if (current - edge).abs() < reach {
                        lines.push(GuideLine { orientation: Orientation::Horizontal, offset: edge });
                    }
                }
            }
        }

        lines
    }

    /// Smallest edge-to-edge offsets towards any sibling box.
    pub fn box_offsets<Id: PartialEq>(
        &self,
        active: &Id,
        proposed: BoundingBox,
        boxes: &BoxSet<Id>,
    ) -> AxisOffsets {
        let mut best = AxisOffsets::default();
        for other in boxes.siblings(active) {
            self.closest(&mut best.x, proposed.vertical_edges(), other.vertical_edges());
            self.closest(&mut best.y, proposed.horizontal_edges(), other.horizontal_edges());
        }
        best
    }

    /// Smallest edge-to-edge offsets towards the viewport borders.
    pub fn screen_offsets(&self, proposed: BoundingBox, viewport: Viewport) -> AxisOffsets {
        let mut best = AxisOffsets::default();
        self.closest(&mut best.x, proposed.vertical_edges(), [0.0, viewport.width]);
        self.closest(&mut best.y, proposed.horizontal_edges(), [0.0, viewport.height]);
        best
    }

    /// Move `proposed` by the winning offset on each axis. Box candidates win
    /// ties against screen candidates. Size is left untouched.
    pub fn apply(
        &self,
        proposed: BoundingBox,
        boxes: AxisOffsets,
        screen: AxisOffsets,
    ) -> BoundingBox {
        let within = |c: &EdgeSnap| c.offset.abs() <= self.threshold;
        let mut out = proposed;
        if let Some(c) = pick(boxes.x, screen.x).filter(within) {
            out.x = c.land(proposed.x, proposed.width);
        }
        if let Some(c) = pick(boxes.y, screen.y).filter(within) {
            out.y = c.land(proposed.y, proposed.height);
        }
        out
    }

    /// Guides plus snapped box for one pointer move.
    pub fn snap<Id: PartialEq>(
        &self,
        active: &Id,
        proposed: BoundingBox,
        boxes: &BoxSet<Id>,
        viewport: Viewport,
    ) -> SnapOutcome {
        let guides = self.guides(active, proposed, boxes);
        let box_snap = self.box_offsets(active, proposed, boxes);
        let screen_snap = self.screen_offsets(proposed, viewport);
        SnapOutcome {
            guides,
            bounds: self.apply(proposed, box_snap, screen_snap),
        }
    }

    /// Keep the first candidate of smallest magnitude strictly inside the threshold.
    /// A difference within rounding error of the coordinates counts as zero.
    fn closest(&self, best: &mut Option<EdgeSnap>, current: [f32; 2], targets: [f32; 2]) {
        for (i, cur) in current.into_iter().enumerate() {
            for target in targets {
                let mut diff = target - cur;
                if diff.abs() <= f32::EPSILON * cur.abs().max(target.abs()).max(1.0) {
                    diff = 0.0;
                }
                let within = diff.abs() < self.threshold;
                let better = best.map_or(true, |b| diff.abs() < b.offset.abs());
                if within && better {
                    *best = Some(EdgeSnap { offset: diff, target, far_edge: i == 1 });
                }
            }
        }
    }
}

fn pick(boxes: Option<EdgeSnap>, screen: Option<EdgeSnap>) -> Option<EdgeSnap> {
    match (boxes, screen) {
        (Some(b), Some(s)) if b.offset.abs() <= s.offset.abs() => Some(b),
        (Some(_), Some(s)) => Some(s),
        (b, s) => b.or(s),
    }
}

/// Start such that `start + extent` rounds to exactly `end`. `end - extent`
/// can be an ulp off, so its neighbours are tried too.
fn start_for_end(end: f32, extent: f32) -> f32 {
    let guess = end - extent;
    if guess + extent == end || !guess.is_finite() {
        return guess;
    }
    let mut down = guess;
    let mut up = guess;
    for _ in 0..4 {
        down = step(down, false);
        up = step(up, true);
        for candidate in [down, up] {
            if candidate + extent == end {
                return candidate;
            }
        }
    }
    guess
}

/// Adjacent representable value above or below `v`.
fn step(v: f32, upward: bool) -> f32 {
    if v == 0.0 {
        let tiny = f32::from_bits(1);
        return if upward { tiny } else { -tiny };
    }
    let bits = v.to_bits();
    let away_from_zero = upward == (v > 0.0);
    f32::from_bits(if away_from_zero { bits + 1 } else { bits - 1 })
}
