//! Time-range windowing and annotation-bounded trimming

use std::ops::Range;

use log::{debug, trace};

use crate::error::{Result, SeriesError};
use crate::series::TimeSeries;
use crate::utils::insertion_index;

/// Outcome of a [`TimeSeries::trim`] call
#[derive(Debug, Clone, PartialEq)]
pub struct TrimWindow {
    /// Lower time bound (inclusive)
    pub lower_bound: f64,
    /// Upper time bound (exclusive)
    pub upper_bound: f64,
    /// Sample indices kept, relative to the series before trimming
    pub range: Range<usize>,
}

impl TimeSeries {
    /// Returns a new series with every sample whose time is in `[start, end)`
    ///
    /// Samples are copied; the result shares nothing with `self` and is not
    /// affected by later changes to it. Annotations, the bad-lead flag and all
    /// other metadata start at their defaults in the result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ecgset::TimeSeries;
    ///
    /// let mut lead = TimeSeries::new();
    /// for i in 0..10 {
    ///     lead.append(i as f64, 0.0);
    /// }
    ///
    /// let window = lead.subset(2.0, 5.0);
    /// assert_eq!(window.times(), vec![2.0, 3.0, 4.0]);
    /// ```
    pub fn subset(&self, start: f64, end: f64) -> TimeSeries {
        let mut window = TimeSeries::new();
        window.samples = self
            .samples
            .iter()
            .filter(|s| s.time() >= start && s.time() < end)
            .copied()
            .collect();
        trace!(
            "subset [{}, {}) kept {} of {} samples",
            start,
            end,
            window.samples.len(),
            self.samples.len()
        );
        window
    }

    /// Finds the annotation-delimited time bounds around `pivot`
    ///
    /// The lower bound is the greatest location of a `category` annotation
    /// strictly before `pivot`, or `0.0` when there is none. The upper bound is
    /// the least location strictly after `pivot`, or the time of the last
    /// sample when there is none. Annotations exactly at `pivot` are ignored.
    ///
    /// # Errors
    ///
    /// * `SeriesError::EmptySeries` - the series holds no samples
    pub fn annotation_bounds(&self, pivot: f64, category: i32) -> Result<(f64, f64)> {
        let last = self.last().ok_or(SeriesError::EmptySeries)?;

        let mut lower: Option<f64> = None;
        let mut upper: Option<f64> = None;
        for annotation in self.annotations.iter().filter(|a| a.category() == category) {
            let location = annotation.location();
            if location < pivot && lower.map_or(true, |l| location > l) {
                lower = Some(location);
            }
            if location > pivot && upper.map_or(true, |u| location < u) {
                upper = Some(location);
            }
        }

        Ok((lower.unwrap_or(0.0), upper.unwrap_or_else(|| last.time())))
    }

    /// Crops the series to the annotations of `category` that straddle `pivot`
    ///
    /// The bounds come from [`annotation_bounds`](Self::annotation_bounds).
    /// Each bound is located in the sample times by binary search: an exact
    /// match gives the index of the first sample at that time, otherwise the
    /// insertion point is used as the nearest boundary. The samples in the half-open index range
    /// `[lower, upper)` are kept; annotations and metadata are untouched.
    ///
    /// # Errors
    ///
    /// * `SeriesError::EmptySeries` - the series holds no samples
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ecgset::TimeSeries;
    ///
    /// let mut lead = TimeSeries::new();
    /// for i in 0..=10 {
    ///     lead.append(i as f64, 0.0);
    /// }
    /// lead.add_annotation(1, 3.0);
    /// lead.add_annotation(1, 7.0);
    /// lead.add_annotation(2, 4.0);
    ///
    /// let window = lead.trim(5.0, 1)?;
    /// assert_eq!(window.range, 3..7);
    /// assert_eq!(lead.times(), vec![3.0, 4.0, 5.0, 6.0]);
    /// # Ok::<(), ecgset::SeriesError>(())
    /// ```
    pub fn trim(&mut self, pivot: f64, category: i32) -> Result<TrimWindow> {
        let (lower_bound, upper_bound) = self.annotation_bounds(pivot, category)?;
        let range = self.index_range(lower_bound, upper_bound);

        debug!(
            "trim around {} (category {}): bounds [{}, {}) -> samples {:?} of {}",
            pivot,
            category,
            lower_bound,
            upper_bound,
            range,
            self.samples.len()
        );

        self.samples.truncate(range.end);
        self.samples.drain(..range.start);

        Ok(TrimWindow {
            lower_bound,
            upper_bound,
            range,
        })
    }

    /// Like [`trim`](Self::trim) but leaves `self` untouched and returns the cropped copy
    pub fn trimmed(&self, pivot: f64, category: i32) -> Result<TimeSeries> {
        let mut copy = self.clone();
        copy.trim(pivot, category)?;
        Ok(copy)
    }

    fn index_range(&self, lower_bound: f64, upper_bound: f64) -> Range<usize> {
        let times = self.times();
        let start = insertion_index(&times, lower_bound);
        // 边界反转时返回空区间
        let end = insertion_index(&times, upper_bound).max(start);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_0_to_10() -> TimeSeries {
        let mut series = TimeSeries::new();
        for i in 0..=10 {
            series.append(i as f64, i as f64 * 2.0);
        }
        series
    }

    #[test]
    fn test_subset_half_open() {
        let series = series_0_to_10();
        let window = series.subset(3.0, 6.0);
        assert_eq!(window.times(), vec![3.0, 4.0, 5.0]);
        assert_eq!(window.values(), vec![6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_subset_empty_and_inverted_ranges() {
        let series = series_0_to_10();
        assert!(series.subset(4.0, 4.0).is_empty());
        assert!(series.subset(8.0, 2.0).is_empty());
        assert!(series.subset(20.0, 30.0).is_empty());
    }

    #[test]
    fn test_subset_resets_metadata() {
        let mut series = series_0_to_10();
        series.add_annotation(1, 4.0);
        series.set_bad_lead(true);
        series.set_sample_frequency(1.0);

        let window = series.subset(0.0, 11.0);
        assert_eq!(window.size(), 11);
        assert!(window.annotations().is_empty());
        assert!(!window.is_bad_lead());
        assert_eq!(window.sample_frequency(), 0.0);
    }

    #[test]
    fn test_subset_is_detached_from_source() {
        let mut series = series_0_to_10();
        let window = series.subset(2.0, 8.0);
        series.add_annotation(1, 5.0);
        series.trim(1.0, 1).unwrap();
        series.append(11.0, 0.0);

        assert_eq!(window.times(), vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_trim_between_annotations() {
        let mut series = series_0_to_10();
        series.add_annotation(1, 3.0);
        series.add_annotation(1, 7.0);

        let window = series.trim(5.0, 1).unwrap();
        assert_eq!(window.lower_bound, 3.0);
        assert_eq!(window.upper_bound, 7.0);
        assert_eq!(window.range, 3..7);
        assert_eq!(series.times(), vec![3.0, 4.0, 5.0, 6.0]);
        assert_eq!(series.annotations().len(), 2);
    }

    #[test]
    fn test_trim_picks_nearest_annotations() {
        let mut series = series_0_to_10();
        for location in [1.0, 3.0, 7.0, 9.0] {
            series.add_annotation(1, location);
        }
        series.trim(5.0, 1).unwrap();
        assert_eq!(series.times(), vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_trim_ignores_other_categories() {
        let mut series = series_0_to_10();
        series.add_annotation(1, 2.0);
        series.add_annotation(1, 8.0);
        series.add_annotation(2, 4.0);
        series.add_annotation(2, 6.0);

        series.trim(5.0, 1).unwrap();
        assert_eq!(series.times(), vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_trim_annotation_at_pivot_is_not_a_bound() {
        let mut series = series_0_to_10();
        series.add_annotation(1, 2.0);
        series.add_annotation(1, 5.0);
        series.add_annotation(1, 8.0);

        series.trim(5.0, 1).unwrap();
        assert_eq!(series.times(), vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_trim_defaults_without_annotations() {
        let mut series = series_0_to_10();
        let window = series.trim(5.0, 1).unwrap();
        assert_eq!(window.lower_bound, 0.0);
        assert_eq!(window.upper_bound, 10.0);
        // 上界为最后一个采样点本身，半开区间将其排除
        assert_eq!(series.size(), 10);
        assert_eq!(series.last().unwrap().time(), 9.0);
    }

    #[test]
    fn test_trim_missing_lower_defaults_to_zero() {
        let mut series = series_0_to_10();
        series.add_annotation(1, 6.0);
        let window = series.trim(5.0, 1).unwrap();
        assert_eq!(window.lower_bound, 0.0);
        assert_eq!(series.times(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_trim_missing_upper_defaults_to_last_sample() {
        let mut series = series_0_to_10();
        series.add_annotation(1, 4.0);
        let window = series.trim(5.0, 1).unwrap();
        assert_eq!(window.upper_bound, 10.0);
        assert_eq!(series.times(), vec![4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_trim_bounds_between_samples_use_insertion_point() {
        let mut series = series_0_to_10();
        series.add_annotation(1, 2.5);
        series.add_annotation(1, 6.5);

        let window = series.trim(4.0, 1).unwrap();
        assert_eq!(window.range, 3..7);
        assert_eq!(series.times(), vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_trim_upper_annotation_past_end_keeps_tail() {
        let mut series = series_0_to_10();
        series.add_annotation(1, 8.0);
        series.add_annotation(1, 42.0);

        series.trim(9.0, 1).unwrap();
        assert_eq!(series.times(), vec![8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_trim_inverted_bounds_collapse_to_empty() {
        let mut series = series_0_to_10();
        series.add_annotation(1, 12.0);

        let window = series.trim(20.0, 1).unwrap();
        assert_eq!(window.range, 11..11);
        assert!(series.is_empty());
    }

    #[test]
    fn test_trim_keeps_every_sample_on_lower_bound() {
        let mut series = TimeSeries::new();
        for time in [0.0, 1.0, 1.0, 1.0, 1.0, 2.0, 3.0, 4.0] {
            series.append(time, 0.0);
        }
        series.add_annotation(1, 1.0);
        series.add_annotation(1, 4.0);

        let window = series.trim(2.5, 1).unwrap();
        assert_eq!(window.range, 1..7);
        assert_eq!(series.times(), vec![1.0, 1.0, 1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_trim_drops_every_sample_on_upper_bound() {
        let mut series = TimeSeries::new();
        for time in [0.0, 1.0, 2.0, 3.0, 3.0, 3.0, 4.0] {
            series.append(time, 0.0);
        }
        series.add_annotation(1, 1.0);
        series.add_annotation(1, 3.0);

        series.trim(2.0, 1).unwrap();
        assert_eq!(series.times(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_trim_negative_annotation_is_lower_bound() {
        let mut series = TimeSeries::new();
        for i in -5..=5 {
            series.append(i as f64, 0.0);
        }
        series.add_annotation(1, -2.0);
        series.add_annotation(1, 3.0);

        let window = series.trim(0.0, 1).unwrap();
        // 负位置的注释同样可以作为下界，而不是回退到 0
        assert_eq!(window.lower_bound, -2.0);
        assert_eq!(window.range, 3..8);
        assert_eq!(series.times(), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_trim_empty_series_fails() {
        let mut series = TimeSeries::new();
        series.add_annotation(1, 1.0);
        series.add_annotation(1, 3.0);
        assert_eq!(series.trim(2.0, 1), Err(SeriesError::EmptySeries));
    }

    #[test]
    fn test_trimmed_leaves_source_untouched() {
        let mut series = series_0_to_10();
        series.add_annotation(1, 3.0);
        series.add_annotation(1, 7.0);

        let cropped = series.trimmed(5.0, 1).unwrap();
        assert_eq!(cropped.size(), 4);
        assert_eq!(series.size(), 11);
    }
}
