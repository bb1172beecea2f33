//! Spacing detection: infer the one gap value a designer intended from a set
//! of positioned rectangles.
//!
//! This is a heuristic, not an exact inference. It tolerates sub-pixel jitter
//! and prefers a single representative value. The tolerances and thresholds
//! below are tuned constants; changing them changes detection outcomes on
//! borderline inputs, so they are load-bearing.

use std::cmp::Ordering;

use crate::geometry::Rect;

/// Rectangles within this distance of a row's reference y belong to the row.
const ROW_TOLERANCE: f64 = 10.0;
/// Gaps within this distance of each other count as the same gap.
const UNIFORM_TOLERANCE: f64 = 2.0;
/// Minimum share of all gaps the most common bucket needs to win outright.
const WINNER_SHARE: f64 = 0.2;
/// Minimum share a nonzero bucket needs to displace a zero winner.
const NONZERO_SHARE: f64 = 0.05;

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Infer the representative gap between rectangles, or `None` when fewer than
/// two rectangles are given or no non-negative gap exists.
pub fn detect_spacing(rects: &[Rect]) -> Option<f64> {
    if rects.len() < 2 {
        return None;
    }

    let gaps = collect_gaps(rects);
    if gaps.is_empty() {
        return None;
    }

    // Uniform case: everything agrees with the first gap (zero included).
    let first = gaps[0];
    if gaps.iter().all(|g| (g - first).abs() <= UNIFORM_TOLERANCE) {
        return Some(first.round());
    }

    mode_seek(&gaps)
}

/// Cluster rectangles into rows, then collect horizontal gaps within each row
/// and vertical gaps between consecutive rows. Negative gaps (overlaps) are
/// discarded.
///
/// Row membership is decided in a single pass over the `(y, x)`-sorted list:
/// a rectangle joins the current row if its y is within [`ROW_TOLERANCE`] of
/// the row's first member. Order-dependent on purpose.
fn collect_gaps(rects: &[Rect]) -> Vec<f64> {
    let mut sorted: Vec<Rect> = rects.to_vec();
    sorted.sort_by(|a, b| cmp_f64(a.y, b.y).then(cmp_f64(a.x, b.x)));

    let mut rows: Vec<Vec<Rect>> = Vec::new();
    for r in sorted {
        match rows.last_mut() {
            Some(row) if (r.y - row[0].y).abs() <= ROW_TOLERANCE => row.push(r),
            _ => rows.push(vec![r]),
        }
    }

    let mut gaps = Vec::new();
    for row in &mut rows {
        row.sort_by(|a, b| cmp_f64(a.x, b.x));
        for pair in row.windows(2) {
            let gap = pair[1].x - pair[0].right();
            if gap >= 0.0 {
                gaps.push(gap);
            }
        }
    }
    for pair in rows.windows(2) {
        let prev_bottom = pair[0].iter().map(Rect::bottom).fold(f64::NEG_INFINITY, f64::max);
        let next_top = pair[1].iter().map(|r| r.y).fold(f64::INFINITY, f64::min);
        let gap = next_top - prev_bottom;
        if gap >= 0.0 {
            gaps.push(gap);
        }
    }
    gaps
}

/// Bucket gaps by rounded value and pick the most plausible bucket.
///
/// Buckets live in a Vec keyed in first-seen order so that "first found"
/// tie-breaks are deterministic. A zero winner is only a hint that elements
/// touch; a sufficiently common nonzero bucket is preferred over it, and this
/// path never returns 0.
fn mode_seek(gaps: &[f64]) -> Option<f64> {
    let mut buckets: Vec<(i64, usize)> = Vec::new();
    for g in gaps {
        let key = g.round() as i64;
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => buckets.push((key, 1)),
        }
    }

    let total = gaps.len() as f64;
    let mut winner = buckets[0];
    for &b in &buckets[1..] {
        if b.1 > winner.1 {
            winner = b;
        }
    }

    if winner.1 as f64 >= WINNER_SHARE * total {
        if winner.0 != 0 {
            return Some(winner.0 as f64);
        }
        // Zero won: prefer the biggest nonzero bucket that is common enough.
        let mut best: Option<(i64, usize)> = None;
        for &(key, count) in &buckets {
            if key != 0
                && count >= 2
                && count as f64 >= NONZERO_SHARE * total
                && best.is_none_or(|(_, n)| count > n)
            {
                best = Some((key, count));
            }
        }
        if let Some((key, _)) = best {
            return Some(key as f64);
        }
    }

    // No confident winner: fall back to the biggest repeated nonzero bucket.
    let mut best: Option<(i64, usize)> = None;
    for &(key, count) in &buckets {
        if key != 0 && count >= 2 && best.is_none_or(|(_, n)| count > n) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(xs: &[f64], w: f64) -> Vec<Rect> {
        xs.iter().map(|&x| Rect::new(x, 0.0, w, 100.0)).collect()
    }

    #[test]
    fn test_too_few_rects() {
        assert_eq!(detect_spacing(&[]), None);
        assert_eq!(detect_spacing(&[Rect::new(0.0, 0.0, 10.0, 10.0)]), None);
    }

    #[test]
    fn test_uniform_gap() {
        let rects = row(&[0.0, 110.0, 220.0], 100.0);
        assert_eq!(detect_spacing(&rects), Some(10.0));
    }

    #[test]
    fn test_uniform_gap_with_jitter() {
        // 10, 10.5, 9.2 all within 2.0 of the first gap.
        let rects = row(&[0.0, 110.0, 220.5, 329.7], 100.0);
        assert_eq!(detect_spacing(&rects), Some(10.0));
    }

    #[test]
    fn test_uniform_zero_gap() {
        let rects = row(&[0.0, 100.0, 200.0], 100.0);
        assert_eq!(detect_spacing(&rects), Some(0.0));
    }

    #[test]
    fn test_overlapping_rects_have_no_gap() {
        // Every adjacent pair overlaps, so all gaps are negative and dropped.
        let rects = row(&[0.0, 50.0, 100.0], 100.0);
        assert_eq!(detect_spacing(&rects), None);
    }

    #[test]
    fn test_mode_wins_over_outliers() {
        // Gaps: 10, 10, 10, 40, 90 -> bucket 10 has 3 of 5 members.
        let rects = row(&[0.0, 110.0, 220.0, 330.0, 470.0, 660.0], 100.0);
        assert_eq!(detect_spacing(&rects), Some(10.0));
    }

    #[test]
    fn test_zero_winner_prefers_common_nonzero() {
        // Gaps: 0, 0, 0, 20, 20 -> zero wins the count but the repeated
        // nonzero bucket is what the designer meant.
        let rects = row(&[0.0, 100.0, 200.0, 300.0, 420.0, 540.0], 100.0);
        assert_eq!(detect_spacing(&rects), Some(20.0));
    }

    #[test]
    fn test_all_distinct_gaps_detect_nothing() {
        // Gaps: 5, 15, 30, 45, 60, 75 -> six singleton buckets, none wins.
        let rects = row(&[0.0, 105.0, 220.0, 350.0, 495.0, 655.0, 830.0], 100.0);
        assert_eq!(detect_spacing(&rects), None);
    }

    #[test]
    fn test_vertical_gap_between_rows() {
        // Two rows of one rect each: vertical gap 10.
        let rects = vec![
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Rect::new(0.0, 60.0, 100.0, 50.0),
        ];
        assert_eq!(detect_spacing(&rects), Some(10.0));
    }

    #[test]
    fn test_row_clustering_tolerates_y_jitter() {
        // y values 0 and 8 stay in one row (within 10 of the reference).
        let rects = vec![
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(110.0, 8.0, 100.0, 100.0),
            Rect::new(220.0, 0.0, 100.0, 100.0),
        ];
        assert_eq!(detect_spacing(&rects), Some(10.0));
    }
}
