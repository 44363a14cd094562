use crate::{common::*, Detection};
use bbox::prelude::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonMaxSuppressionInit {
    pub iou_threshold: R64,
}

impl Default for NonMaxSuppressionInit {
    fn default() -> Self {
        Self {
            iou_threshold: r64(0.7),
        }
    }
}

impl NonMaxSuppressionInit {
    pub fn build(self) -> Result<NonMaxSuppression> {
        let Self { iou_threshold } = self;

        ensure!(
            iou_threshold >= 0.0 && iou_threshold <= 1.0,
            "iou_threshold must be in [0, 1]"
        );

        Ok(NonMaxSuppression { iou_threshold })
    }
}

/// Greedy class-agnostic non-maximum suppression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonMaxSuppression {
    iou_threshold: R64,
}

impl NonMaxSuppression {
    /// Removes candidates whose overlap with a higher-confidence survivor is
    /// strictly greater than the threshold.
    ///
    /// Suppression is class-agnostic: a high-confidence box of one class can
    /// suppress an overlapping box of another class. Ties in confidence break
    /// in favor of the candidate that appears earlier in the input.
    pub fn forward(&self, candidates: Vec<Detection>) -> Vec<Detection> {
        let Self { iou_threshold } = *self;

        // stable sort keeps input order among equal confidences
        let mut order: Vec<_> = (0..candidates.len()).collect();
        order.sort_by_key(|&index| -candidates[index].confidence);

        let mut suppressed = vec![false; candidates.len()];
        let mut keep = vec![];

        for (position, &index) in order.iter().enumerate() {
            if suppressed[index] {
                continue;
            }
            keep.push(index);

            let kept = &candidates[index];
            for &other in &order[position + 1..] {
                if suppressed[other] {
                    continue;
                }
                let iou = kept.rect.iou_with(&candidates[other].rect);
                if iou > iou_threshold {
                    suppressed[other] = true;
                }
            }
        }

        keep.into_iter()
            .map(|index| candidates[index].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbox::TLBR;

    fn detection(tlbr: [f64; 4], confidence: f64, class: usize) -> Detection {
        let [t, l, b, r] = tlbr;
        Detection {
            rect: TLBR::from_tlbr([r64(t), r64(l), r64(b), r64(r)]),
            confidence: r64(confidence),
            class,
        }
    }

    fn suppression(iou_threshold: f64) -> NonMaxSuppression {
        NonMaxSuppressionInit {
            iou_threshold: r64(iou_threshold),
        }
        .build()
        .unwrap()
    }

    #[test]
    fn init_rejects_out_of_range_threshold() {
        assert!(NonMaxSuppressionInit {
            iou_threshold: r64(1.5)
        }
        .build()
        .is_err());
        assert!(NonMaxSuppressionInit {
            iou_threshold: r64(-0.1)
        }
        .build()
        .is_err());
    }

    #[test]
    fn empty_candidates_yield_empty_output() {
        assert!(suppression(0.5).forward(vec![]).is_empty());
    }

    #[test]
    fn single_candidate_is_kept_unchanged() {
        let candidate = detection([0.0, 0.0, 10.0, 10.0], 0.9, 0);
        let kept = suppression(0.5).forward(vec![candidate.clone()]);
        assert_eq!(kept, vec![candidate]);
    }

    #[test]
    fn overlap_equal_to_threshold_is_not_suppressed() {
        // intersection 100, union 200, iou exactly 0.5
        let kept = suppression(0.5).forward(vec![
            detection([0.0, 0.0, 10.0, 10.0], 0.9, 0),
            detection([0.0, 0.0, 10.0, 20.0], 0.8, 0),
        ]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn overlap_above_threshold_is_suppressed() {
        // intersection 100, union 190, iou > 0.5
        let kept = suppression(0.5).forward(vec![
            detection([0.0, 0.0, 10.0, 10.0], 0.9, 0),
            detection([0.0, 0.0, 10.0, 19.0], 0.8, 0),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].confidence, 0.9);
    }

    #[test]
    fn suppression_is_class_agnostic() {
        let kept = suppression(0.5).forward(vec![
            detection([0.0, 0.0, 10.0, 10.0], 0.9, 0),
            detection([1.0, 1.0, 11.0, 11.0], 0.8, 1),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].class, 0);
    }

    #[test]
    fn confidence_ties_break_first_seen_wins() {
        let first = detection([0.0, 0.0, 10.0, 10.0], 0.8, 0);
        let second = detection([0.0, 0.0, 10.0, 10.0], 0.8, 1);
        let kept = suppression(0.5).forward(vec![first.clone(), second]);
        assert_eq!(kept, vec![first]);
    }

    #[test]
    fn survivor_does_not_chain_suppression() {
        // the middle box overlaps both neighbors, the outer two do not
        // overlap each other; once the middle box is suppressed it must not
        // suppress anything itself
        let kept = suppression(0.3).forward(vec![
            detection([0.0, 0.0, 10.0, 10.0], 0.9, 0),
            detection([0.0, 4.0, 10.0, 14.0], 0.8, 0),
            detection([0.0, 8.0, 10.0, 18.0], 0.7, 0),
        ]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].confidence, 0.9);
        assert_eq!(kept[1].confidence, 0.7);
    }
}
