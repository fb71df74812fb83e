use std::cmp::Ordering;

use crate::detection::bounding_box::{BoundingBox, Detection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCounts {
    pub true_positives: usize,
    pub false_positives: usize,
}

/// Counts true and false positives of one image.
///
/// Detections are matched greedily, best score first. Each one takes the
/// still unmatched ground truth box it overlaps most; the match counts as a
/// true positive when that IoU reaches `iou_threshold`. A ground truth box is
/// matched at most once, so duplicated detections become false positives.
pub fn compute_tp_fp(ground_truth: &[BoundingBox], detections: &[Detection], iou_threshold: f32) -> MatchCounts {
    let mut order: Vec<&Detection> = detections.iter().collect();
    order.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut matched = vec![false; ground_truth.len()];
    let mut counts = MatchCounts::default();

    for det in order {
        let best = ground_truth
            .iter()
            .enumerate()
            .filter(|(i, _)| !matched[*i])
            .map(|(i, gt)| (i, gt.iou(&det.bbox)))
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        match best {
            Some((i, iou)) if iou >= iou_threshold => {
                matched[i] = true;
                counts.true_positives += 1;
            }
            _ => counts.false_positives += 1,
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(b: BoundingBox, score: f32) -> Detection {
        Detection::new(b, score)
    }

    #[test]
    fn exact_match_is_true_positive() {
        let gt = BoundingBox::new(10, 10, 64, 128);
        let counts = compute_tp_fp(&[gt], &[det(gt, 1.0)], 0.5);
        assert_eq!(counts, MatchCounts { true_positives: 1, false_positives: 0 });
    }

    #[test]
    fn weak_overlap_is_false_positive() {
        let gt = BoundingBox::new(0, 0, 100, 100);
        // 100 x 10 strip inside the box.
        let strip = BoundingBox::new(0, 0, 100, 10);
        assert!((gt.iou(&strip) - 0.1).abs() < 1e-6);

        let counts = compute_tp_fp(&[gt], &[det(strip, 1.0)], 0.5);
        assert_eq!(counts, MatchCounts { true_positives: 0, false_positives: 1 });
    }

    #[test]
    fn duplicate_detections_count_once() {
        let gt = BoundingBox::new(0, 0, 64, 128);
        let dets = [det(gt, 0.9), det(BoundingBox::new(2, 2, 64, 128), 0.8)];
        let counts = compute_tp_fp(&[gt], &dets, 0.5);
        assert_eq!(counts, MatchCounts { true_positives: 1, false_positives: 1 });
    }

    #[test]
    fn best_scoring_detection_claims_the_box() {
        let gt = [BoundingBox::new(0, 0, 100, 100), BoundingBox::new(60, 0, 100, 100)];
        // The strong detection overlaps both boxes, but more the second one.
        let strong = det(BoundingBox::new(50, 0, 100, 100), 0.9);
        let weak = det(BoundingBox::new(0, 0, 100, 100), 0.1);

        let counts = compute_tp_fp(&gt, &[weak, strong], 0.5);
        assert_eq!(counts, MatchCounts { true_positives: 2, false_positives: 0 });
    }

    #[test]
    fn no_ground_truth_means_all_false_positives() {
        let dets = [det(BoundingBox::new(0, 0, 5, 5), 1.0), det(BoundingBox::new(9, 9, 5, 5), 0.5)];
        let counts = compute_tp_fp(&[], &dets, 0.5);
        assert_eq!(counts, MatchCounts { true_positives: 0, false_positives: 2 });
    }

    #[test]
    fn no_detections_means_nothing_counted() {
        let counts = compute_tp_fp(&[BoundingBox::new(0, 0, 5, 5)], &[], 0.5);
        assert_eq!(counts, MatchCounts::default());
    }
}
