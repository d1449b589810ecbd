//! Hand-off of a series' sample buffer to an external signal filter
//!
//! The numeric filter algorithms live outside this crate. A filter module
//! implements [`SignalFilter`]; a [`TimeSeries`] exports its samples as a
//! [`SampleMatrix`], lets the filter rewrite the value row in place, checks
//! that the buffer kept its shape and writes the new values back. Sample
//! times are never taken from the filter.

use std::fmt;

use log::{debug, warn};

use crate::error::{Result, SeriesError};
use crate::series::TimeSeries;
use crate::types::SampleMatrix;

/// External filter collaborator
///
/// Every method receives the full two-row buffer and must leave the value
/// row (row 1) with the same number of entries it had on entry. Returning an
/// error aborts the operation without touching the series.
///
/// # Examples
///
/// ```rust
/// use ecgset::{SampleMatrix, SignalFilter, TimeSeries, Result};
///
/// /// Removes the mean instead of a fitted polynomial
/// struct MeanDetrend;
///
/// impl SignalFilter for MeanDetrend {
///     fn detrend(&self, buffer: &mut SampleMatrix, _degree: usize) -> Result<()> {
///         let mean = buffer.values.iter().sum::<f64>() / buffer.values.len() as f64;
///         buffer.values.iter_mut().for_each(|v| *v -= mean);
///         Ok(())
///     }
///     fn smooth(&self, _: &mut SampleMatrix, _: usize, _: usize, _: usize) -> Result<()> {
///         Ok(())
///     }
///     fn low_pass(&self, _: &mut SampleMatrix, _: f64) -> Result<()> { Ok(()) }
///     fn high_pass(&self, _: &mut SampleMatrix, _: f64) -> Result<()> { Ok(()) }
///     fn band_filter(&self, _: &mut SampleMatrix, _: f64, _: f64) -> Result<()> { Ok(()) }
/// }
///
/// let mut lead = TimeSeries::new();
/// lead.append(0.0, 1.0);
/// lead.append(1.0, 3.0);
///
/// lead.detrend(&MeanDetrend, 1)?;
/// assert_eq!(lead.values(), vec![-1.0, 1.0]);
/// assert_eq!(lead.times(), vec![0.0, 1.0]);
/// # Ok::<(), ecgset::SeriesError>(())
/// ```
pub trait SignalFilter {
    /// Polynomial baseline removal of the given degree
    fn detrend(&self, buffer: &mut SampleMatrix, degree: usize) -> Result<()>;

    /// Savitzky-Golay smoothing with `left`/`right` half-widths
    fn smooth(
        &self,
        buffer: &mut SampleMatrix,
        left: usize,
        right: usize,
        degree: usize,
    ) -> Result<()>;

    fn low_pass(&self, buffer: &mut SampleMatrix, cutoff: f64) -> Result<()>;

    fn high_pass(&self, buffer: &mut SampleMatrix, cutoff: f64) -> Result<()>;

    /// Keeps the band between `low` and `high`
    fn band_filter(&self, buffer: &mut SampleMatrix, low: f64, high: f64) -> Result<()>;
}

/// A single filter request with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    Detrend { degree: usize },
    Smooth { left: usize, right: usize, degree: usize },
    LowPass { cutoff: f64 },
    HighPass { cutoff: f64 },
    BandPass { low: f64, high: f64 },
}

impl FilterOp {
    /// Checks the parameters against each other and the sampling frequency
    ///
    /// This is an opt-in pre-flight check for callers that treat cutoffs as
    /// Hz; [`TimeSeries::apply_filter`] does not call it and hands every
    /// request to the filter as given. A `sample_frequency` of zero or less
    /// means "unknown" and skips the Nyquist check.
    ///
    /// # Errors
    ///
    /// * `SeriesError::InvalidFilterParams` - a cutoff is not finite and positive,
    ///   a band is empty, a cutoff reaches the Nyquist frequency, or the
    ///   smoothing window is too narrow for its polynomial degree
    pub fn validate(&self, sample_frequency: f64) -> Result<()> {
        match *self {
            FilterOp::Detrend { .. } => Ok(()),
            FilterOp::Smooth { left, right, degree } => {
                if left.saturating_add(right) < degree {
                    return Err(SeriesError::InvalidFilterParams(format!(
                        "smoothing window {}+{} too narrow for degree {}",
                        left, right, degree
                    )));
                }
                Ok(())
            }
            FilterOp::LowPass { cutoff } | FilterOp::HighPass { cutoff } => {
                check_cutoff(cutoff, sample_frequency)
            }
            FilterOp::BandPass { low, high } => {
                check_cutoff(low, sample_frequency)?;
                check_cutoff(high, sample_frequency)?;
                if low >= high {
                    return Err(SeriesError::InvalidFilterParams(format!(
                        "band low cutoff {} must be below high cutoff {}",
                        low, high
                    )));
                }
                Ok(())
            }
        }
    }

    fn run<F: SignalFilter + ?Sized>(&self, filter: &F, buffer: &mut SampleMatrix) -> Result<()> {
        match *self {
            FilterOp::Detrend { degree } => filter.detrend(buffer, degree),
            FilterOp::Smooth { left, right, degree } => filter.smooth(buffer, left, right, degree),
            FilterOp::LowPass { cutoff } => filter.low_pass(buffer, cutoff),
            FilterOp::HighPass { cutoff } => filter.high_pass(buffer, cutoff),
            FilterOp::BandPass { low, high } => filter.band_filter(buffer, low, high),
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Detrend { degree } => write!(f, "detrend(degree={})", degree),
            FilterOp::Smooth { left, right, degree } => {
                write!(f, "smooth(left={}, right={}, degree={})", left, right, degree)
            }
            FilterOp::LowPass { cutoff } => write!(f, "low-pass({})", cutoff),
            FilterOp::HighPass { cutoff } => write!(f, "high-pass({})", cutoff),
            FilterOp::BandPass { low, high } => write!(f, "band-pass({}-{})", low, high),
        }
    }
}

fn check_cutoff(cutoff: f64, sample_frequency: f64) -> Result<()> {
    if !cutoff.is_finite() || cutoff <= 0.0 {
        return Err(SeriesError::InvalidFilterParams(format!(
            "cutoff {} must be a positive frequency",
            cutoff
        )));
    }
    if sample_frequency > 0.0 && cutoff >= sample_frequency / 2.0 {
        return Err(SeriesError::InvalidFilterParams(format!(
            "cutoff {} Hz is not below the Nyquist frequency {} Hz",
            cutoff,
            sample_frequency / 2.0
        )));
    }
    Ok(())
}

impl TimeSeries {
    /// Runs one filter operation over the series' values
    ///
    /// The filter gets the exported buffer and the parameters exactly as
    /// given; judging them is the filter's business (see
    /// [`FilterOp::validate`] for an optional check). When it returns, both
    /// rows must still hold exactly `size()` entries; the value row then
    /// replaces the sample values. Sample times are kept as they were. On any
    /// error the series is left unchanged.
    ///
    /// # Errors
    ///
    /// * `SeriesError::DimensionMismatch` - the filter changed the buffer length
    /// * any error returned by the filter itself
    pub fn apply_filter<F>(&mut self, filter: &F, op: FilterOp) -> Result<()>
    where
        F: SignalFilter + ?Sized,
    {
        let expected = self.samples.len();
        let mut buffer = self.to_matrix();
        debug!("applying {} to {} samples", op, expected);
        op.run(filter, &mut buffer)?;

        for actual in [buffer.values.len(), buffer.times.len()] {
            if actual != expected {
                warn!("{} returned {} samples, expected {}", op, actual, expected);
                return Err(SeriesError::DimensionMismatch { expected, actual });
            }
        }

        for (sample, value) in self.samples.iter_mut().zip(buffer.values) {
            *sample = sample.with_value(value);
        }
        Ok(())
    }

    /// Applies `ops` in order, stopping at the first failure
    ///
    /// Operations completed before the failing one stay applied.
    pub fn apply_filters<F>(&mut self, filter: &F, ops: &[FilterOp]) -> Result<()>
    where
        F: SignalFilter + ?Sized,
    {
        for op in ops {
            self.apply_filter(filter, *op)?;
        }
        Ok(())
    }

    pub fn detrend<F: SignalFilter + ?Sized>(&mut self, filter: &F, degree: usize) -> Result<()> {
        self.apply_filter(filter, FilterOp::Detrend { degree })
    }

    pub fn smooth<F: SignalFilter + ?Sized>(
        &mut self,
        filter: &F,
        left: usize,
        right: usize,
        degree: usize,
    ) -> Result<()> {
        self.apply_filter(filter, FilterOp::Smooth { left, right, degree })
    }

    pub fn low_pass<F: SignalFilter + ?Sized>(&mut self, filter: &F, cutoff: f64) -> Result<()> {
        self.apply_filter(filter, FilterOp::LowPass { cutoff })
    }

    pub fn high_pass<F: SignalFilter + ?Sized>(&mut self, filter: &F, cutoff: f64) -> Result<()> {
        self.apply_filter(filter, FilterOp::HighPass { cutoff })
    }

    pub fn band_filter<F>(&mut self, filter: &F, low: f64, high: f64) -> Result<()>
    where
        F: SignalFilter + ?Sized,
    {
        self.apply_filter(filter, FilterOp::BandPass { low, high })
    }
}
