use std::cmp::Ordering;

use super::bounding_box::Detection;

pub const NMS_OVERLAP_THRESHOLD: f32 = 0.4;
pub const MAX_DETECTIONS_PER_IMAGE: usize = 20;

/// Greedy non-maximum suppression.
///
/// Candidates scoring at or below `score_threshold` are dropped. The rest are
/// visited by descending score (ties keep input order) and accepted when their
/// IoU with every already accepted box is at most `overlap_threshold`.
///
/// Returns the indices of the accepted detections, best first, truncated to
/// `max_detections`.
pub fn non_max_suppression(
    detections: &[Detection],
    score_threshold: f32,
    overlap_threshold: f32,
    max_detections: usize,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..detections.len())
        .filter(|&i| detections[i].score > score_threshold)
        .collect();
    order.sort_by(|&a, &b| {
        detections[b]
            .score
            .partial_cmp(&detections[a].score)
            .unwrap_or(Ordering::Equal)
    });

    let mut kept: Vec<usize> = Vec::new();
    for idx in order {
        if kept.len() == max_detections {
            break;
        }
        let candidate = &detections[idx].bbox;
        let suppressed = kept
            .iter()
            .any(|&k| detections[k].bbox.iou(candidate) > overlap_threshold);
        if !suppressed {
            kept.push(idx);
        }
    }

    kept
}
