use std::hash::{Hash, Hasher};

/// One (time, value) observation of a recording channel
///
/// `time` is the offset from the start of the recording in seconds.
/// Samples are immutable once created.
///
/// # Examples
///
/// ```rust
/// use ecgset::Sample;
///
/// let sample = Sample::new(0.004, -0.12);
/// assert_eq!(sample.time(), 0.004);
/// assert_eq!(sample.value(), -0.12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    time: f64,
    value: f64,
}

impl Sample {
    pub fn new(time: f64, value: f64) -> Self {
        Sample { time, value }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// 保留时间戳，替换数值（用于写回滤波结果）
    pub(crate) fn with_value(self, value: f64) -> Self {
        Sample { time: self.time, value }
    }
}

/// A point event marker on the recording timeline
///
/// An annotation is identified by its `category` (for example a beat type or
/// an operator-defined marker code) and its `location` in seconds. Two
/// annotations are equal exactly when both fields match, and hashing covers
/// the same pair, so a `HashSet<Annotation>` deduplicates on (category, location).
///
/// `0.0` and `-0.0` are treated as the same location.
///
/// # Examples
///
/// ```rust
/// use ecgset::Annotation;
/// use std::collections::HashSet;
///
/// let mut set = HashSet::new();
/// set.insert(Annotation::new(1, 2.5));
/// set.insert(Annotation::new(1, 2.5));
/// set.insert(Annotation::new(2, 2.5));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Annotation {
    category: i32,
    location: f64,
}

impl Annotation {
    pub fn new(category: i32, location: f64) -> Self {
        Annotation { category, location }
    }

    pub fn category(&self) -> i32 {
        self.category
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    fn location_key(&self) -> u64 {
        if self.location == 0.0 {
            0.0f64.to_bits()
        } else {
            self.location.to_bits()
        }
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.location_key() == other.location_key()
    }
}

impl Eq for Annotation {}

impl Hash for Annotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.category.hash(state);
        self.location_key().hash(state);
    }
}

/// Two-row export of a series: row 0 holds the sample times, row 1 the values
///
/// This is the buffer handed to a [`SignalFilter`](crate::SignalFilter).
/// Both rows always have the same length when produced by
/// [`TimeSeries::to_matrix`](crate::TimeSeries::to_matrix).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleMatrix {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}

impl SampleMatrix {
    /// Number of columns (samples) in the value row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns row 0 (times) or row 1 (values)
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        match index {
            0 => Some(&self.times),
            1 => Some(&self.values),
            _ => None,
        }
    }

    pub fn into_rows(self) -> [Vec<f64>; 2] {
        [self.times, self.values]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_annotation_equality_covers_both_fields() {
        assert_eq!(Annotation::new(1, 3.0), Annotation::new(1, 3.0));
        assert_ne!(Annotation::new(1, 3.0), Annotation::new(2, 3.0));
        assert_ne!(Annotation::new(1, 3.0), Annotation::new(1, 3.0000001));
    }

    #[test]
    fn test_annotation_signed_zero_is_one_location() {
        let mut set = HashSet::new();
        set.insert(Annotation::new(4, 0.0));
        set.insert(Annotation::new(4, -0.0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_matrix_rows() {
        let matrix = SampleMatrix {
            times: vec![0.0, 1.0],
            values: vec![5.0, 6.0],
        };
        assert_eq!(matrix.row(0), Some(&[0.0, 1.0][..]));
        assert_eq!(matrix.row(1), Some(&[5.0, 6.0][..]));
        assert!(matrix.row(2).is_none());
        assert_eq!(matrix.len(), 2);

        let [times, values] = matrix.into_rows();
        assert_eq!(times, vec![0.0, 1.0]);
        assert_eq!(values, vec![5.0, 6.0]);
    }
}
