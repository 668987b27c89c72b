//! Property-based invariant tests for the snap engine.
//!
//! 1. Snapping keeps width and height.
//! 2. Snapping never moves a box by more than the threshold on either axis.
//! 3. Snapping an already snapped box changes nothing.
//! 4. A moved axis ends with an edge exactly on a sibling or screen edge.
//! 5. Guides only ever sit on sibling edges, never on the active box's own.
//! 6. Boxes far from everything pass through unchanged.

use fencecore::geometry::{BoundingBox, Viewport};
use fencecore::snap::{BoxSet, Orientation, SnapEngine, SNAP_THRESHOLD};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const SCREEN: Viewport = Viewport { width: 1920.0, height: 1080.0 };

// Fractional coordinates, as pointer deltas on scaled displays produce.
fn any_box() -> impl Strategy<Value = BoundingBox> {
    (0.0f32..1700.0, 0.0f32..900.0, 200.0f32..600.0, 120.0f32..400.0)
        .prop_map(|(x, y, w, h)| BoundingBox::new(x, y, w, h))
}

/// A sibling plus a box whose right edge sits just short of the sibling's left.
fn right_edge_near_sibling() -> impl Strategy<Value = (BoundingBox, BoundingBox)> {
    (any_box(), 200.0f32..600.0, -3.0f32..3.0, 0.0f32..900.0).prop_map(|(sibling, w, gap, y)| {
        let x = sibling.left() - w - gap;
        (sibling, BoundingBox::new(x, y, w, 50.0))
    })
}

fn siblings(max: usize) -> impl Strategy<Value = Vec<BoundingBox>> {
    proptest::collection::vec(any_box(), 0..=max)
}

fn box_set(active: BoundingBox, others: &[BoundingBox]) -> BoxSet<usize> {
    std::iter::once((0, active))
        .chain(others.iter().copied().enumerate().map(|(i, b)| (i + 1, b)))
        .collect()
}

fn x_targets(others: &[BoundingBox]) -> Vec<f32> {
    let mut edges = vec![0.0, SCREEN.width];
    edges.extend(others.iter().flat_map(|b| b.vertical_edges()));
    edges
}

fn y_targets(others: &[BoundingBox]) -> Vec<f32> {
    let mut edges = vec![0.0, SCREEN.height];
    edges.extend(others.iter().flat_map(|b| b.horizontal_edges()));
    edges
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Size is kept and movement is bounded
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn snap_keeps_size_and_bounds_movement(active in any_box(), proposed in any_box(), others in siblings(6)) {
        let engine = SnapEngine::default();
        let set = box_set(active, &others);
        let out = engine.snap(&0, proposed, &set, SCREEN);

        prop_assert_eq!(out.bounds.width, proposed.width);
        prop_assert_eq!(out.bounds.height, proposed.height);
        // landing exactly on an edge may add an ulp of the coordinate
        let slack = SNAP_THRESHOLD + 1e-3;
        prop_assert!((out.bounds.x - proposed.x).abs() < slack);
        prop_assert!((out.bounds.y - proposed.y).abs() < slack);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn snap_is_idempotent(proposed in any_box(), others in siblings(6)) {
        let engine = SnapEngine::default();
        let set = box_set(proposed, &others);
        let once = engine.snap(&0, proposed, &set, SCREEN).bounds;
        let twice = engine.snap(&0, once, &set, SCREEN).bounds;
        prop_assert_eq!(once, twice);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Moved axes land exactly on a target edge
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn moved_axis_lands_on_edge(proposed in any_box(), others in siblings(6)) {
        let engine = SnapEngine::default();
        let set = box_set(proposed, &others);
        let out = engine.snap(&0, proposed, &set, SCREEN).bounds;

        if out.x != proposed.x {
            let xs = x_targets(&others);
            prop_assert!(out.vertical_edges().iter().any(|e| xs.contains(e)));
        }
        if out.y != proposed.y {
            let ys = y_targets(&others);
            prop_assert!(out.horizontal_edges().iter().any(|e| ys.contains(e)));
        }
    }
}

proptest! {
    #[test]
    fn right_edge_lands_on_sibling_and_stays(pair in right_edge_near_sibling()) {
        let (sibling, proposed) = pair;
        let engine = SnapEngine::default();
        let set = box_set(proposed, &[sibling]);
        let once = engine.snap(&0, proposed, &set, SCREEN).bounds;
        let twice = engine.snap(&0, once, &set, SCREEN).bounds;

        if once.x != proposed.x {
            let xs = x_targets(&[sibling]);
            prop_assert!(once.vertical_edges().iter().any(|e| xs.contains(e)));
        }
        prop_assert_eq!(once, twice);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Guides sit on sibling edges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn guides_sit_on_sibling_edges(active in any_box(), proposed in any_box(), others in siblings(6)) {
        let engine = SnapEngine::default();
        let set = box_set(active, &others);
        let guides = engine.guides(&0, proposed, &set);

        for line in guides {
            let on_sibling = others.iter().any(|b| match line.orientation {
                Orientation::Vertical => b.vertical_edges().contains(&line.offset),
                Orientation::Horizontal => b.horizontal_edges().contains(&line.offset),
            });
            prop_assert!(on_sibling, "guide {:?} not on a sibling edge", line);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Nothing nearby means no change
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lone_box_away_from_screen_edges_is_unchanged(x in 10.0f32..1400.0, y in 10.0f32..600.0) {
        let engine = SnapEngine::default();
        let proposed = BoundingBox::new(x, y, 300.0, 200.0);
        let set = box_set(proposed, &[]);
        let out = engine.snap(&0, proposed, &set, SCREEN);

        prop_assert!(out.guides.is_empty());
        prop_assert_eq!(out.bounds, proposed);
    }
}
