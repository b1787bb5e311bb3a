use std::fmt;

/// Closed interval of allowed axis values (degrees for rotational axes,
/// millimeters for prismatic ones). Both bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisLimit {
    pub min: f64,
    pub max: f64,
}

/// Which bound of the axis limit has been exceeded, and by which value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LimitViolation {
    BelowMinimum { value: f64, min: f64 },
    AboveMaximum { value: f64, max: f64 },
}

impl AxisLimit {
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            AxisLimit { min, max }
        } else {
            AxisLimit { min: max, max: min }
        }
    }

    /// Limit that accepts any finite value
    pub fn unlimited() -> Self {
        AxisLimit { min: f64::MIN, max: f64::MAX }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Reports the exceeded bound. NaN is reported as below minimum.
    pub fn violation(&self, value: f64) -> Option<LimitViolation> {
        if value > self.max {
            Some(LimitViolation::AboveMaximum { value, max: self.max })
        } else if self.contains(value) {
            None
        } else {
            Some(LimitViolation::BelowMinimum { value, min: self.min })
        }
    }
}

impl LimitViolation {
    pub fn value(&self) -> f64 {
        match *self {
            LimitViolation::BelowMinimum { value, .. } => value,
            LimitViolation::AboveMaximum { value, .. } => value,
        }
    }

    /// The bound that was exceeded
    pub fn bound(&self) -> f64 {
        match *self {
            LimitViolation::BelowMinimum { min, .. } => min,
            LimitViolation::AboveMaximum { max, .. } => max,
        }
    }
}

impl fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LimitViolation::BelowMinimum { value, min } =>
                write!(f, "value {:.2} is below the minimum {:.2}", value, min),
            LimitViolation::AboveMaximum { value, max } =>
                write!(f, "value {:.2} exceeds the maximum {:.2}", value, max),
        }
    }
}

/// Limits of the ordered set of axes (robot axes or external axes).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Constraints {
    pub limits: Vec<AxisLimit>,
}

impl Constraints {
    pub fn new(limits: Vec<AxisLimit>) -> Self {
        Constraints { limits }
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    /// Checks every supplied value against the limit of the axis with the same index.
    /// Values without a matching limit are not checked.
    pub fn compliant(&self, values: &[f64]) -> bool {
        self.limits.iter().zip(values).all(|(limit, &value)| limit.contains(value))
    }

    /// All violations, as pairs of axis index and the violation.
    pub fn violations(&self, values: &[f64]) -> Vec<(usize, LimitViolation)> {
        self.limits
            .iter()
            .zip(values)
            .enumerate()
            .filter_map(|(i, (limit, &value))| limit.violation(value).map(|v| (i, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let limit = AxisLimit::new(-180.0, 180.0);
        assert!(limit.contains(-180.0));
        assert!(limit.contains(180.0));
        assert!(limit.contains(0.0));
        assert!(!limit.contains(180.0001));
        assert!(!limit.contains(-180.0001));
    }

    #[test]
    fn test_swapped_bounds() {
        let limit = AxisLimit::new(10.0, -10.0);
        assert_eq!(limit.min, -10.0);
        assert_eq!(limit.max, 10.0);
    }

    #[test]
    fn test_violation_reports_bound() {
        let limit = AxisLimit::new(-180.0, 180.0);
        assert_eq!(limit.violation(90.0), None);
        assert_eq!(limit.violation(200.0),
                   Some(LimitViolation::AboveMaximum { value: 200.0, max: 180.0 }));
        let below = limit.violation(-190.0).expect("Must be out of limits");
        assert_eq!(below.bound(), -180.0);
        assert_eq!(below.value(), -190.0);
        assert!(limit.violation(f64::NAN).is_some());
    }

    #[test]
    fn test_constraints_violations() {
        let constraints = Constraints::new(vec![
            AxisLimit::new(-170.0, 170.0),
            AxisLimit::new(-100.0, 135.0),
            AxisLimit::new(-210.0, 70.0),
        ]);
        assert!(constraints.compliant(&[0.0, 0.0, 0.0]));
        assert!(constraints.compliant(&[0.0])); // Unchecked extra limits
        let violations = constraints.violations(&[171.0, 0.0, -211.0]);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].0, 0);
        assert_eq!(violations[1].0, 2);
        assert!(!constraints.compliant(&[171.0, 0.0, 0.0]));
    }
}
