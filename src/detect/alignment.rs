//! Layout classification: infer orientation and cross-axis alignment from
//! rectangle positions.

use serde::Serialize;

use crate::config::{Alignment, Orientation};
use crate::geometry::{Rect, bounding_box};

/// Edges/centers within this distance count as aligned.
const ALIGN_TOLERANCE: f64 = 2.0;
/// How elongated the bounding box must be before a direction is confident.
const ASPECT_RATIO: f64 = 1.2;

/// The classifier's verdict. When `layout` is `Maintain` the alignment is a
/// placeholder and not meaningful downstream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Detected {
    pub layout: Orientation,
    pub alignment: Alignment,
}

/// Classify the layout of a rectangle set. Never fails; with fewer than two
/// rectangles there is no signal and the horizontal/top default is returned.
pub fn classify(rects: &[Rect]) -> Detected {
    let fallback = Detected {
        layout: Orientation::Horizontal,
        alignment: Alignment::Top,
    };
    if rects.len() < 2 {
        return fallback;
    }
    let Ok(bounds) = bounding_box(rects) else {
        return fallback;
    };

    if bounds.width() > ASPECT_RATIO * bounds.height() {
        Detected {
            layout: Orientation::Horizontal,
            alignment: horizontal_alignment(rects),
        }
    } else if bounds.height() > ASPECT_RATIO * bounds.width() {
        Detected {
            layout: Orientation::Vertical,
            alignment: vertical_alignment(rects),
        }
    } else {
        // Ambiguous aspect ratio: no confident direction.
        Detected {
            layout: Orientation::Maintain,
            alignment: Alignment::Top,
        }
    }
}

/// First match of top / bottom / center, defaulting to top.
fn horizontal_alignment(rects: &[Rect]) -> Alignment {
    let first = rects[0];
    if rects.iter().all(|r| (r.y - first.y).abs() <= ALIGN_TOLERANCE) {
        return Alignment::Top;
    }
    if rects
        .iter()
        .all(|r| (r.bottom() - first.bottom()).abs() <= ALIGN_TOLERANCE)
    {
        return Alignment::Bottom;
    }
    let mean = rects.iter().map(Rect::center_y).sum::<f64>() / rects.len() as f64;
    if rects
        .iter()
        .all(|r| (r.center_y() - mean).abs() <= ALIGN_TOLERANCE)
    {
        return Alignment::Center;
    }
    Alignment::Top
}

/// First match of left / right / center, defaulting to left.
fn vertical_alignment(rects: &[Rect]) -> Alignment {
    let first = rects[0];
    if rects.iter().all(|r| (r.x - first.x).abs() <= ALIGN_TOLERANCE) {
        return Alignment::Left;
    }
    if rects
        .iter()
        .all(|r| (r.right() - first.right()).abs() <= ALIGN_TOLERANCE)
    {
        return Alignment::Right;
    }
    let mean = rects.iter().map(Rect::center_x).sum::<f64>() / rects.len() as f64;
    if rects
        .iter()
        .all(|r| (r.center_x() - mean).abs() <= ALIGN_TOLERANCE)
    {
        return Alignment::Center;
    }
    Alignment::Left
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_rects_default() {
        let d = classify(&[Rect::new(5.0, 5.0, 10.0, 10.0)]);
        assert_eq!(d.layout, Orientation::Horizontal);
        assert_eq!(d.alignment, Alignment::Top);
    }

    #[test]
    fn test_horizontal_top() {
        let rects = vec![
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(120.0, 0.0, 100.0, 100.0),
        ];
        let d = classify(&rects);
        assert_eq!(d.layout, Orientation::Horizontal);
        assert_eq!(d.alignment, Alignment::Top);
    }

    #[test]
    fn test_horizontal_bottom() {
        // Tops differ by 50 but bottoms coincide.
        let rects = vec![
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(120.0, 50.0, 100.0, 50.0),
            Rect::new(240.0, 20.0, 100.0, 80.0),
        ];
        let d = classify(&rects);
        assert_eq!(d.layout, Orientation::Horizontal);
        assert_eq!(d.alignment, Alignment::Bottom);
    }

    #[test]
    fn test_horizontal_center() {
        // Neither tops nor bottoms coincide; vertical centers all sit at 50.
        let rects = vec![
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(120.0, 25.0, 100.0, 50.0),
            Rect::new(240.0, 10.0, 100.0, 80.0),
        ];
        let d = classify(&rects);
        assert_eq!(d.layout, Orientation::Horizontal);
        assert_eq!(d.alignment, Alignment::Center);
    }

    #[test]
    fn test_vertical_left() {
        let rects = vec![
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(0.0, 120.0, 100.0, 100.0),
        ];
        let d = classify(&rects);
        assert_eq!(d.layout, Orientation::Vertical);
        assert_eq!(d.alignment, Alignment::Left);
    }

    #[test]
    fn test_vertical_right() {
        let rects = vec![
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(50.0, 120.0, 50.0, 100.0),
            Rect::new(20.0, 240.0, 80.0, 100.0),
        ];
        let d = classify(&rects);
        assert_eq!(d.layout, Orientation::Vertical);
        assert_eq!(d.alignment, Alignment::Right);
    }

    #[test]
    fn test_ambiguous_aspect_is_maintain() {
        // Bounding box is square-ish: neither direction wins.
        let rects = vec![
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(120.0, 120.0, 100.0, 100.0),
        ];
        let d = classify(&rects);
        assert_eq!(d.layout, Orientation::Maintain);
    }
}
