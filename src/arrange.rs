//! The arrangement engine: reposition rectangles into a single row or column.
//!
//! Pure in-memory mutation; sizes never change, only positions. Writing the
//! new positions back to a host document (and tolerating per-rectangle write
//! failures there) is the orchestrator's job.

use crate::config::{Alignment, Orientation};
use crate::geometry::Rect;

/// Reposition `rects` according to the given orientation, alignment and
/// spacing, starting at `(origin_x, origin_y)`.
///
/// Rectangles keep their relative order along the layout axis (stable sort on
/// the current position). `Maintain` is a named no-op so container
/// padding/resize logic runs uniformly regardless of orientation. An
/// alignment that is off-axis for the orientation behaves like the default
/// edge alignment (top/left).
pub fn arrange(
    rects: &mut [Rect],
    orientation: Orientation,
    alignment: Alignment,
    spacing: f64,
    origin_x: f64,
    origin_y: f64,
) {
    match orientation {
        Orientation::Horizontal => {
            arrange_horizontal(rects, alignment, spacing, origin_x, origin_y)
        }
        Orientation::Vertical => arrange_vertical(rects, alignment, spacing, origin_x, origin_y),
        Orientation::Maintain => {}
    }
}

fn arrange_horizontal(
    rects: &mut [Rect],
    alignment: Alignment,
    spacing: f64,
    origin_x: f64,
    origin_y: f64,
) {
    let order = sorted_indices(rects, |r| r.x);
    let max_h = rects.iter().map(|r| r.h).fold(0.0, f64::max);
    // One shared cross-axis baseline for the whole row.
    let baseline = match alignment {
        Alignment::Center => origin_y + max_h / 2.0,
        Alignment::Bottom => origin_y + max_h,
        _ => origin_y,
    };

    let mut cursor = origin_x;
    for i in order {
        rects[i].x = cursor;
        rects[i].y = match alignment {
            Alignment::Center => baseline - rects[i].h / 2.0,
            Alignment::Bottom => baseline - rects[i].h,
            _ => baseline,
        };
        cursor += rects[i].w + spacing;
    }
}

fn arrange_vertical(
    rects: &mut [Rect],
    alignment: Alignment,
    spacing: f64,
    origin_x: f64,
    origin_y: f64,
) {
    let order = sorted_indices(rects, |r| r.y);
    let max_w = rects.iter().map(|r| r.w).fold(0.0, f64::max);
    let baseline = match alignment {
        Alignment::Center => origin_x + max_w / 2.0,
        Alignment::Right => origin_x + max_w,
        _ => origin_x,
    };

    let mut cursor = origin_y;
    for i in order {
        rects[i].y = cursor;
        rects[i].x = match alignment {
            Alignment::Center => baseline - rects[i].w / 2.0,
            Alignment::Right => baseline - rects[i].w,
            _ => baseline,
        };
        cursor += rects[i].h + spacing;
    }
}

/// Indices of `rects` sorted stably by the given key, so callers holding
/// parallel id arrays keep a valid mapping.
fn sorted_indices(rects: &[Rect], key: impl Fn(&Rect) -> f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rects.len()).collect();
    order.sort_by(|&a, &b| {
        key(&rects[a])
            .partial_cmp(&key(&rects[b]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_gaps_are_exact() {
        let mut rects = vec![
            Rect::new(300.0, 7.0, 50.0, 100.0),
            Rect::new(0.0, 0.0, 100.0, 80.0),
            Rect::new(90.0, 3.0, 70.0, 60.0),
        ];
        arrange(
            &mut rects,
            Orientation::Horizontal,
            Alignment::Top,
            12.0,
            10.0,
            20.0,
        );
        // Order by original x: index 1 (x=0), index 2 (x=90), index 0 (x=300).
        assert_eq!(rects[1].x, 10.0);
        assert_eq!(rects[2].x, 10.0 + 100.0 + 12.0);
        assert_eq!(rects[0].x, 10.0 + 100.0 + 12.0 + 70.0 + 12.0);
        for r in &rects {
            assert_eq!(r.y, 20.0);
        }
        // Post-arrangement gaps are exact, not heuristic.
        assert_eq!(rects[2].x - rects[1].right(), 12.0);
        assert_eq!(rects[0].x - rects[2].right(), 12.0);
    }

    #[test]
    fn test_horizontal_center_alignment() {
        let mut rects = vec![
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(200.0, 30.0, 100.0, 40.0),
        ];
        arrange(
            &mut rects,
            Orientation::Horizontal,
            Alignment::Center,
            0.0,
            0.0,
            0.0,
        );
        // Shared baseline is max_h / 2 = 50; both centers land on it.
        assert_eq!(rects[0].center_y(), 50.0);
        assert_eq!(rects[1].center_y(), 50.0);
    }

    #[test]
    fn test_horizontal_bottom_alignment() {
        let mut rects = vec![
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(200.0, 0.0, 100.0, 40.0),
        ];
        arrange(
            &mut rects,
            Orientation::Horizontal,
            Alignment::Bottom,
            0.0,
            0.0,
            10.0,
        );
        assert_eq!(rects[0].bottom(), 110.0);
        assert_eq!(rects[1].bottom(), 110.0);
    }

    #[test]
    fn test_vertical_right_alignment() {
        let mut rects = vec![
            Rect::new(0.0, 500.0, 60.0, 50.0),
            Rect::new(0.0, 0.0, 100.0, 50.0),
        ];
        arrange(
            &mut rects,
            Orientation::Vertical,
            Alignment::Right,
            5.0,
            0.0,
            0.0,
        );
        // Order by original y: index 1 first, then index 0.
        assert_eq!(rects[1].y, 0.0);
        assert_eq!(rects[0].y, 55.0);
        assert_eq!(rects[1].right(), 100.0);
        assert_eq!(rects[0].right(), 100.0);
    }

    #[test]
    fn test_maintain_changes_nothing() {
        let mut rects = vec![
            Rect::new(13.0, 17.0, 100.0, 100.0),
            Rect::new(400.0, -3.0, 50.0, 60.0),
        ];
        let before = rects.clone();
        arrange(
            &mut rects,
            Orientation::Maintain,
            Alignment::Top,
            10.0,
            0.0,
            0.0,
        );
        assert_eq!(rects, before);
    }

    #[test]
    fn test_size_never_changes() {
        let mut rects = vec![
            Rect::new(0.0, 0.0, 100.0, 80.0),
            Rect::new(300.0, 10.0, 70.0, 60.0),
        ];
        arrange(
            &mut rects,
            Orientation::Vertical,
            Alignment::Center,
            4.0,
            0.0,
            0.0,
        );
        assert_eq!((rects[0].w, rects[0].h), (100.0, 80.0));
        assert_eq!((rects[1].w, rects[1].h), (70.0, 60.0));
    }
}
