// range.rs - bounded numeric ranges, linear transforms between them, and drag-window mapping

use crate::error::RangeError;

/// A numeric domain `[min, max]` with a clamped or wrapped current value.
///
/// Non-circular ranges clamp out-of-range assignments to the nearest bound.
/// Circular ranges wrap them around to the opposite bound, exactly once per
/// assignment: a value overshooting by more than one span stays outside after
/// a single wrap is applied, and is not reduced modulo the span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedRange {
    min: f64,
    max: f64,
    circular: bool,
    current: f64,
}

impl BoundedRange {
    /// Builds a range. `current` defaults to `min`; an explicit value must lie inside the bounds.
    pub fn new(min: f64, max: f64, circular: bool, current: Option<f64>) -> Result<Self, RangeError> {
        // written negated so NaN bounds are rejected as well
        if !(min < max) {
            return Err(RangeError::InvertedBounds { min, max });
        }
        if let Some(current) = current {
            if !(min..=max).contains(&current) {
                return Err(RangeError::CurrentOutOfRange { current, min, max });
            }
        }

        let mut range = Self {
            min,
            max,
            circular,
            current: min,
        };
        range.set_current(current.unwrap_or(min));
        Ok(range)
    }

    pub fn clamped(min: f64, max: f64, current: f64) -> Result<Self, RangeError> {
        Self::new(min, max, false, Some(current))
    }

    pub fn wrapping(min: f64, max: f64, current: f64) -> Result<Self, RangeError> {
        Self::new(min, max, true, Some(current))
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_circular(&self) -> bool {
        self.circular
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Assigns `value`, clamping or wrapping it according to the range policy.
    pub fn set_current(&mut self, value: f64) {
        self.current = if self.circular {
            if value < self.min {
                self.max - (self.min - value)
            } else if value > self.max {
                self.min + (value - self.max)
            } else {
                value
            }
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        };
    }

    /// Returns a copy with `value` assigned, leaving `self` untouched.
    pub fn with_current(mut self, value: f64) -> Self {
        self.set_current(value);
        self
    }

    /// Proportional position of `current` within the bounds, `0.0` at `min` and `1.0` at `max`.
    pub fn proportion(&self) -> f64 {
        (self.current - self.min) / self.span()
    }
}

/// Linear map from proportional positions in one range to values in another.
///
/// Bounds are captured when the transform is built. Output is neither clamped
/// nor wrapped; feed it through [`BoundedRange::set_current`] for that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeTransform {
    from_min: f64,
    from_span: f64,
    to_min: f64,
    to_span: f64,
}

impl RangeTransform {
    pub fn new(from: &BoundedRange, to: &BoundedRange) -> Self {
        Self {
            from_min: from.min,
            from_span: from.span(),
            to_min: to.min,
            to_span: to.span(),
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        ((value - self.from_min) / self.from_span) * self.to_span + self.to_min
    }
}

/// Derives a range over raw pointer coordinates for one axis of a drag.
///
/// The result is `width` wide, has `position` as its current value, and puts
/// `position` at the same proportional spot that `anchor.current()` occupies in
/// `anchor`. It inherits `anchor`'s circular policy. Fails when `width` is not
/// positive.
pub fn map_position_and_width(
    anchor: &BoundedRange,
    position: f64,
    width: f64,
) -> Result<BoundedRange, RangeError> {
    let min = position - width * anchor.proportion();
    // rounding can leave `position` a hair outside when the anchor sits on a bound
    let max = (min + width).max(position);
    let min = min.min(position);

    BoundedRange::new(min, max, anchor.circular, Some(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rejects_inverted_or_empty_bounds() {
        assert_eq!(
            BoundedRange::new(1.0, 0.0, false, None),
            Err(RangeError::InvertedBounds { min: 1.0, max: 0.0 })
        );
        assert!(BoundedRange::new(3.0, 3.0, true, None).is_err());
        assert!(BoundedRange::new(f64::NAN, 3.0, false, None).is_err());
    }

    #[test]
    fn rejects_initial_current_outside_bounds() {
        for circular in [false, true] {
            assert!(BoundedRange::new(1.0, 10.0, circular, Some(11.0)).is_err());
            assert!(BoundedRange::new(1.0, 10.0, circular, Some(0.0)).is_err());
        }
    }

    #[test]
    fn current_defaults_to_min() {
        for circular in [false, true] {
            let range = BoundedRange::new(22.0, 500.0, circular, None).unwrap();
            assert_eq!(range.current(), 22.0);
        }
    }

    #[test]
    fn accepts_initial_current_on_the_bounds() {
        let range = BoundedRange::new(22.0, 500.0, false, Some(500.0)).unwrap();
        assert_eq!(range.current(), 500.0);
        let range = BoundedRange::new(0.0, 360.0, true, Some(33.0)).unwrap();
        assert_eq!(range.current(), 33.0);
    }

    #[test]
    fn clamps_non_circular_assignments() {
        let mut range = BoundedRange::clamped(22.0, 500.0, 33.0).unwrap();

        range.set_current(440.0);
        assert_eq!(range.current(), 440.0);

        range.set_current(501.0);
        assert_eq!(range.current(), 500.0);

        range.set_current(21.0);
        assert_eq!(range.current(), 22.0);

        range.set_current(-1.0e12);
        assert_eq!(range.current(), 22.0);
    }

    #[test]
    fn wraps_circular_assignments_once() {
        let mut range = BoundedRange::wrapping(0.0, 360.0, 33.0).unwrap();

        range.set_current(44.0);
        assert_eq!(range.current(), 44.0);

        range.set_current(-90.0);
        assert_eq!(range.current(), 270.0);

        range.set_current(361.0);
        assert_eq!(range.current(), 1.0);

        // one full span over lands on max, not min
        range.set_current(720.0);
        assert_eq!(range.current(), 360.0);

        // more than a span over is wrapped a single time only
        range.set_current(800.0);
        assert_eq!(range.current(), 440.0);
    }

    #[test]
    fn wrap_offsets_mirror_the_overshoot() {
        let mut range = BoundedRange::wrapping(-200.0, -100.0, -150.0).unwrap();
        for k in [0.5, 10.0, 99.0, 100.0] {
            range.set_current(range.min() - k);
            assert!(approx_eq(range.current(), range.max() - k));
            range.set_current(range.max() + k);
            assert!(approx_eq(range.current(), range.min() + k));
        }
    }

    #[test]
    fn with_current_returns_a_moved_copy() {
        let range = BoundedRange::clamped(-90.0, 90.0, 0.0).unwrap();
        let moved = range.with_current(120.0);
        assert_eq!(range.current(), 0.0);
        assert_eq!(moved.current(), 90.0);
    }

    #[test]
    fn transform_maps_between_ranges() {
        let transform = RangeTransform::new(
            &BoundedRange::new(0.0, 100.0, false, None).unwrap(),
            &BoundedRange::new(0.0, 10.0, false, None).unwrap(),
        );
        assert_eq!(transform.apply(0.0), 0.0);
        assert_eq!(transform.apply(50.0), 5.0);
        assert_eq!(transform.apply(100.0), 10.0);

        let transform = RangeTransform::new(
            &BoundedRange::new(0.0, 360.0, false, None).unwrap(),
            &BoundedRange::new(-180.0, 180.0, false, None).unwrap(),
        );
        assert_eq!(transform.apply(0.0), -180.0);
        assert_eq!(transform.apply(180.0), 0.0);
        assert_eq!(transform.apply(360.0), 180.0);
    }

    #[test]
    fn transform_does_not_clamp() {
        let transform = RangeTransform::new(
            &BoundedRange::new(0.0, 10.0, false, None).unwrap(),
            &BoundedRange::new(0.0, 100.0, false, None).unwrap(),
        );
        assert!(approx_eq(transform.apply(12.0), 120.0));
        assert!(approx_eq(transform.apply(-1.0), -10.0));
    }

    #[test]
    fn transform_endpoints_land_on_target_endpoints() {
        let pairs = [
            ((-3.5, 17.25), (0.0, 360.0)),
            ((400.0, 1200.0), (-90.0, 90.0)),
            ((-1.0e-3, 1.0e-3), (5.0, 6.0)),
        ];
        for ((a_min, a_max), (b_min, b_max)) in pairs {
            let a = BoundedRange::new(a_min, a_max, false, None).unwrap();
            let b = BoundedRange::new(b_min, b_max, true, None).unwrap();
            let transform = RangeTransform::new(&a, &b);
            assert!(approx_eq(transform.apply(a.min()), b.min()));
            assert!(approx_eq(transform.apply(a.max()), b.max()));
        }
    }

    #[test]
    fn maps_position_and_width_around_the_anchor() {
        let cases = [
            (BoundedRange::new(0.0, 100.0, false, Some(20.0)), 80.0, 8.0, 368.0),
            (BoundedRange::new(0.0, 100.0, true, Some(20.0)), 50.0, -22.0, 338.0),
            (BoundedRange::new(-100.0, 100.0, false, Some(-20.0)), -10.0, -154.0, 206.0),
            (BoundedRange::new(-200.0, -100.0, true, Some(-150.0)), 20.0, -160.0, 200.0),
        ];

        for (anchor, position, expected_min, expected_max) in cases {
            let anchor = anchor.unwrap();
            let mapped = map_position_and_width(&anchor, position, 360.0).unwrap();

            assert_eq!(mapped.current(), position);
            assert_eq!(mapped.is_circular(), anchor.is_circular());
            assert!(approx_eq(mapped.min(), expected_min), "{mapped:?}");
            assert!(approx_eq(mapped.max(), expected_max), "{mapped:?}");
        }
    }

    #[test]
    fn mapped_range_transforms_back_onto_the_anchor() {
        let anchor = BoundedRange::wrapping(0.0, 360.0, 90.0).unwrap();
        let mapped = map_position_and_width(&anchor, 512.0, 400.0).unwrap();
        let back = RangeTransform::new(&mapped, &anchor).apply(mapped.current());
        assert!(approx_eq(back, anchor.current()));
    }

    #[test]
    fn mapping_from_an_anchor_on_its_max_keeps_the_position() {
        let anchor = BoundedRange::wrapping(0.0, 360.0, 360.0).unwrap();
        for position in [403.3, 0.1, 1234.567, -17.9] {
            let mapped = map_position_and_width(&anchor, position, 400.0).unwrap();
            assert_eq!(mapped.current(), position);
            assert!(approx_eq(mapped.max(), position));
        }
    }

    #[test]
    fn mapping_with_zero_width_fails() {
        let anchor = BoundedRange::clamped(-90.0, 90.0, 0.0).unwrap();
        assert!(map_position_and_width(&anchor, 10.0, 0.0).is_err());
    }
}
