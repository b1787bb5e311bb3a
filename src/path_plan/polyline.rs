use nalgebra::Point3;

/// Piecewise linear curve through the TCP positions of one path segment.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point3<f64>>,
}

impl Polyline {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Polyline { points }
    }

    /// Total length, mm
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).norm())
            .sum()
    }

    pub fn start(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    pub fn end(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }

    /// Largest distance of any point from the straight line between the start and the end.
    /// Zero for the straight polyline.
    pub fn max_deviation_from_chord(&self) -> f64 {
        let (Some(start), Some(end)) = (self.start(), self.end()) else {
            return 0.0;
        };
        let chord = end - start;
        let chord_length = chord.norm();
        self.points
            .iter()
            .map(|p| {
                let v = p - start;
                if chord_length == 0.0 {
                    v.norm()
                } else {
                    v.cross(&chord).norm() / chord_length
                }
            })
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length() {
        let polyline = Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
            Point3::new(3.0, 4.0, 10.0),
        ]);
        assert_eq!(polyline.length(), 15.0);
        assert_eq!(polyline.start(), Some(&Point3::new(0.0, 0.0, 0.0)));
        assert_eq!(polyline.end(), Some(&Point3::new(3.0, 4.0, 10.0)));
        assert_eq!(Polyline::default().length(), 0.0);
    }

    #[test]
    fn test_deviation_from_chord() {
        let straight = Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
        ]);
        assert!(straight.max_deviation_from_chord() < 1E-12);

        let bent = Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(5.0, 2.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
        ]);
        assert!((bent.max_deviation_from_chord() - 2.0).abs() < 1E-12);
    }
}
