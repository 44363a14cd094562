use super::{CyCxHW, Rect};
use crate::common::*;

/// Bounding box in TLBR format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TLBR<T> {
    pub(crate) t: T,
    pub(crate) l: T,
    pub(crate) b: T,
    pub(crate) r: T,
}

impl<T> TLBR<T> {
    pub fn try_cast<V>(self) -> Option<TLBR<V>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(TLBR {
            t: V::from(self.t)?,
            l: V::from(self.l)?,
            b: V::from(self.b)?,
            r: V::from(self.r)?,
        })
    }

    pub fn cast<V>(self) -> TLBR<V>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T> Rect for TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    type Type = T;

    fn t(&self) -> Self::Type {
        self.t
    }

    fn l(&self) -> Self::Type {
        self.l
    }

    fn b(&self) -> Self::Type {
        self.b
    }

    fn r(&self) -> Self::Type {
        self.r
    }

    fn cy(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.t + self.h() / two
    }

    fn cx(&self) -> Self::Type {
        let two = T::one() + T::one();
        self.l + self.w() / two
    }

    fn h(&self) -> Self::Type {
        self.b - self.t
    }

    fn w(&self) -> Self::Type {
        self.r - self.l
    }

    fn try_from_tlbr(tlbr: [Self::Type; 4]) -> Result<Self> {
        let [t, l, b, r] = tlbr;
        ensure!(b >= t && r >= l, "b >= t and r >= l must hold");

        Ok(Self { t, l, b, r })
    }

    fn try_from_cycxhw(cycxhw: [Self::Type; 4]) -> Result<Self> {
        let [cy, cx, h, w] = cycxhw;
        let zero = T::zero();
        ensure!(h >= zero && w >= zero, "h and w must be non-negative");

        let two = T::one() + T::one();
        let t = cy - h / two;
        let b = cy + h / two;
        let l = cx - w / two;
        let r = cx + w / two;

        Ok(Self { t, l, b, r })
    }
}

impl<T> From<CyCxHW<T>> for TLBR<T>
where
    T: Copy + Num,
{
    fn from(from: CyCxHW<T>) -> Self {
        Self::from(&from)
    }
}

impl<T> From<&CyCxHW<T>> for TLBR<T>
where
    T: Copy + Num,
{
    fn from(from: &CyCxHW<T>) -> Self {
        let two = T::one() + T::one();
        let CyCxHW { cy, cx, h, w } = *from;
        let t = cy - h / two;
        let l = cx - w / two;
        let b = cy + h / two;
        let r = cx + w / two;
        Self { t, l, b, r }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RectExt;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tlbr_rejects_inverted_corners() {
        assert!(TLBR::try_from_tlbr([10.0, 0.0, 0.0, 10.0]).is_err());
        assert!(TLBR::try_from_tlbr([0.0, 10.0, 10.0, 0.0]).is_err());
    }

    #[test]
    fn tlbr_cycxhw_round_trip() {
        let tlbr = TLBR::from_tlbr([2.0, 4.0, 10.0, 16.0]);
        let cycxhw = CyCxHW::from(&tlbr);
        let back = TLBR::from(&cycxhw);
        assert_eq!(tlbr, back);
        assert_abs_diff_eq!(cycxhw.cy(), 6.0);
        assert_abs_diff_eq!(cycxhw.cx(), 10.0);
        assert_abs_diff_eq!(cycxhw.h(), 8.0);
        assert_abs_diff_eq!(cycxhw.w(), 12.0);
    }

    #[test]
    fn iou_of_disjoint_boxes_is_zero() {
        let lhs = TLBR::from_tlbr([0.0, 0.0, 10.0, 10.0]);
        let rhs = TLBR::from_tlbr([50.0, 50.0, 60.0, 60.0]);
        assert_eq!(lhs.iou_with(&rhs), 0.0);
        assert!(lhs.intersect_with(&rhs).is_none());
    }

    #[test]
    fn iou_of_identical_boxes_is_one() {
        let lhs = TLBR::from_tlbr([1.0, 2.0, 3.0, 4.0]);
        assert_abs_diff_eq!(lhs.iou_with(&lhs.clone()), 1.0);
    }

    #[test]
    fn iou_of_shifted_unit_boxes() {
        // 9x9 intersection over 100 + 100 - 81 union
        let lhs = TLBR::from_tlbr([0.0, 0.0, 10.0, 10.0]);
        let rhs = TLBR::from_tlbr([1.0, 1.0, 11.0, 11.0]);
        assert_abs_diff_eq!(lhs.iou_with(&rhs), 81.0 / 119.0);
    }

    #[test]
    fn iou_half_overlap_is_exact() {
        // intersection 100, union 200
        let lhs = TLBR::from_tlbr([0.0, 0.0, 10.0, 10.0]);
        let rhs = TLBR::from_tlbr([0.0, 0.0, 10.0, 20.0]);
        assert_eq!(lhs.iou_with(&rhs), 0.5);
    }

    #[test]
    fn iou_of_degenerate_boxes_is_zero() {
        let lhs = TLBR::from_tlbr([3.0, 3.0, 3.0, 3.0]);
        let rhs = TLBR::from_tlbr([3.0, 3.0, 3.0, 3.0]);
        assert_eq!(lhs.iou_with(&rhs), 0.0);
    }
}
