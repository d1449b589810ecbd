use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::error::{Result, SeriesError};
use crate::types::{Annotation, Sample, SampleMatrix};
use crate::utils::seconds_to_duration;

/// Samples and annotations recorded from a single channel (lead)
///
/// A `TimeSeries` owns an ordered sequence of [`Sample`]s and a deduplicated
/// set of [`Annotation`]s, plus per-channel metadata: the bad-lead flag, the
/// nominal sampling frequency and an optional wall-clock start time.
///
/// Samples must be appended in increasing time order. The container does not
/// sort or validate; windowing and trimming rely on the order.
///
/// # Examples
///
/// ```rust
/// use ecgset::TimeSeries;
///
/// let mut lead = TimeSeries::new();
/// lead.set_sample_frequency(250.0);
///
/// for i in 0..250 {
///     let t = i as f64 / 250.0;
///     lead.append(t, (2.0 * std::f64::consts::PI * t).sin());
/// }
///
/// // Mark two R-peaks (category 1)
/// lead.add_annotation(1, 0.2);
/// lead.add_annotation(1, 0.2);
/// lead.add_annotation(1, 0.9);
///
/// assert_eq!(lead.size(), 250);
/// assert_eq!(lead.annotations().len(), 2);
/// assert!(lead.has_annotation_at(0.9));
/// # Ok::<(), ecgset::SeriesError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    /// 按时间升序排列的采样点（由调用方保证顺序）
    pub(crate) samples: Vec<Sample>,
    /// 按 (category, location) 去重的注释集合
    pub(crate) annotations: HashSet<Annotation>,
    /// 整个导联不可用标记
    bad_lead: bool,
    /// 采样频率（Hz），仅作为元数据
    sample_frequency: f64,
    /// 记录开始的墙钟时间
    start_time: Option<NaiveDateTime>,
}

impl TimeSeries {
    /// Creates an empty series with default metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample at the end of the series
    ///
    /// `time` must not be earlier than the time of the previously appended
    /// sample; this is not checked.
    pub fn append(&mut self, time: f64, value: f64) {
        self.samples.push(Sample::new(time, value));
    }

    /// Returns the sample at `index`
    ///
    /// # Errors
    ///
    /// * `SeriesError::IndexOutOfRange` - `index` is not in `[0, size)`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ecgset::{TimeSeries, SeriesError};
    ///
    /// let mut lead = TimeSeries::new();
    /// lead.append(0.0, 1.5);
    ///
    /// assert_eq!(lead.sample_at(0)?.value(), 1.5);
    /// assert_eq!(
    ///     lead.sample_at(1),
    ///     Err(SeriesError::IndexOutOfRange { index: 1, len: 1 })
    /// );
    /// # Ok::<(), ecgset::SeriesError>(())
    /// ```
    pub fn sample_at(&self, index: usize) -> Result<Sample> {
        self.samples
            .get(index)
            .copied()
            .ok_or(SeriesError::IndexOutOfRange {
                index,
                len: self.samples.len(),
            })
    }

    /// Number of samples in the series
    pub fn size(&self) -> usize {
        self.samples.len()
    }

    /// Same as [`size`](Self::size), for the usual `len`/`is_empty` pairing
    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn first(&self) -> Option<Sample> {
        self.samples.first().copied()
    }

    pub fn last(&self) -> Option<Sample> {
        self.samples.last().copied()
    }

    /// All sample times in stored order
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::time).collect()
    }

    /// All sample values in stored order
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::value).collect()
    }

    /// Time between the first and the last sample, 0 with fewer than two samples
    pub fn duration(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.time() - first.time(),
            _ => 0.0,
        }
    }

    pub fn set_bad_lead(&mut self, bad: bool) {
        self.bad_lead = bad;
    }

    pub fn is_bad_lead(&self) -> bool {
        self.bad_lead
    }

    pub fn set_sample_frequency(&mut self, frequency: f64) {
        self.sample_frequency = frequency;
    }

    pub fn sample_frequency(&self) -> f64 {
        self.sample_frequency
    }

    pub fn set_start_time(&mut self, start: NaiveDateTime) {
        self.start_time = Some(start);
    }

    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.start_time
    }

    /// Maps the sample at `index` onto wall-clock time
    ///
    /// Returns `Ok(None)` when no start time is set or the offset falls outside
    /// the representable calendar range.
    ///
    /// # Errors
    ///
    /// * `SeriesError::IndexOutOfRange` - `index` is not in `[0, size)`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ecgset::TimeSeries;
    /// use chrono::NaiveDate;
    ///
    /// let mut lead = TimeSeries::new();
    /// lead.append(0.0, 0.0);
    /// lead.append(1.5, 0.0);
    ///
    /// assert_eq!(lead.wall_clock_at(1)?, None);
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    ///     .and_hms_opt(8, 30, 0).unwrap();
    /// lead.set_start_time(start);
    ///
    /// let at = lead.wall_clock_at(1)?.unwrap();
    /// assert_eq!(at, start + chrono::Duration::milliseconds(1500));
    /// # Ok::<(), ecgset::SeriesError>(())
    /// ```
    pub fn wall_clock_at(&self, index: usize) -> Result<Option<NaiveDateTime>> {
        let sample = self.sample_at(index)?;
        Ok(self
            .start_time
            .and_then(|start| start.checked_add_signed(seconds_to_duration(sample.time()))))
    }

    /// Adds an annotation; adding an existing (category, location) pair is a no-op
    pub fn add_annotation(&mut self, category: i32, location: f64) {
        self.annotations.insert(Annotation::new(category, location));
    }

    /// Snapshot of all annotations, in no particular order
    ///
    /// The returned vector is owned; changing it does not affect the series.
    pub fn annotations(&self) -> Vec<Annotation> {
        self.annotations.iter().copied().collect()
    }

    /// Annotations of one category, sorted by location
    pub fn annotations_of(&self, category: i32) -> Vec<Annotation> {
        let mut selected: Vec<Annotation> = self
            .annotations
            .iter()
            .filter(|a| a.category() == category)
            .copied()
            .collect();
        selected.sort_by(|a, b| a.location().total_cmp(&b.location()));
        selected
    }

    /// Discards all annotations and stores `annotations`, deduplicated
    pub fn replace_annotations<I>(&mut self, annotations: I)
    where
        I: IntoIterator<Item = Annotation>,
    {
        self.annotations = annotations.into_iter().collect();
    }

    pub fn clear_annotations(&mut self) {
        self.annotations.clear();
    }

    /// Whether an annotation of any category sits exactly at `time`
    ///
    /// Use [`has_annotation`](Self::has_annotation) to match a specific category.
    pub fn has_annotation_at(&self, time: f64) -> bool {
        self.annotations.iter().any(|a| a.location() == time)
    }

    /// Whether the exact (category, location) annotation is present
    pub fn has_annotation(&self, category: i32, location: f64) -> bool {
        self.annotations.contains(&Annotation::new(category, location))
    }

    /// Overwrites this series with a copy of `source`
    ///
    /// Samples are copied element-wise, annotations are replaced by a copy of
    /// the source's set, and all metadata is copied. Nothing is shared with
    /// `source` afterwards.
    pub fn copy_from(&mut self, source: &TimeSeries) {
        self.samples.clear();
        self.samples.extend_from_slice(&source.samples);
        self.annotations = source.annotations.clone();
        self.bad_lead = source.bad_lead;
        self.sample_frequency = source.sample_frequency;
        self.start_time = source.start_time;
    }

    /// Exports the series as a two-row matrix of times and values
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ecgset::TimeSeries;
    ///
    /// let mut lead = TimeSeries::new();
    /// lead.append(0.0, 10.0);
    /// lead.append(0.5, 20.0);
    ///
    /// let matrix = lead.to_matrix();
    /// assert_eq!(matrix.times, vec![0.0, 0.5]);
    /// assert_eq!(matrix.values, vec![10.0, 20.0]);
    /// ```
    pub fn to_matrix(&self) -> SampleMatrix {
        let (times, values) = self
            .samples
            .iter()
            .map(|s| (s.time(), s.value()))
            .unzip();
        SampleMatrix { times, values }
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
