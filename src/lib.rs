//! # ECG Data Set Library for Rust
//!
//! A container for a single physiological recording channel: an ordered
//! sequence of (time, value) samples, a deduplicated set of categorized point
//! annotations, and windowing operations that crop the channel between marked
//! events.
//!
//! ## Quick Start
//!
//! ### Building a lead
//!
//! ```rust
//! use ecgset::{TimeSeries, Result};
//!
//! fn main() -> Result<()> {
//!     let mut lead = TimeSeries::new();
//!     lead.set_sample_frequency(360.0);
//!
//!     // Samples must arrive in time order
//!     for i in 0..720 {
//!         let t = i as f64 / 360.0;
//!         lead.append(t, (2.0 * std::f64::consts::PI * 1.2 * t).sin());
//!     }
//!
//!     // Beat markers use category 1
//!     lead.add_annotation(1, 0.5);
//!     lead.add_annotation(1, 1.3);
//!
//!     println!("{} samples, {:.2} s", lead.size(), lead.duration());
//!     println!("first sample: {:?}", lead.sample_at(0)?);
//!     Ok(())
//! }
//! ```
//!
//! ### Cropping to one beat
//!
//! [`TimeSeries::trim`] keeps the samples between the two annotations of the
//! selected category that enclose a pivot time. The lower bound is inclusive,
//! the upper bound exclusive.
//!
//! ```rust
//! # use ecgset::Result;
//! # fn main() -> Result<()> {
//! let mut lead = ecgset::doctest_utils::create_annotated_lead();
//!
//! // Category 1 beats sit at 0.2 s, 0.6 s and 0.9 s
//! let window = lead.trim(0.4, 1)?;
//! assert_eq!(window.lower_bound, 0.2);
//! assert_eq!(window.upper_bound, 0.6);
//!
//! assert_eq!(lead.size(), 100);
//! assert_eq!(lead.first().unwrap().time(), 0.2);
//! # Ok(())
//! # }
//! ```
//!
//! **Boundary matching**
//!
//! Each bound is looked up in the sample times by binary search. When no
//! sample sits exactly on a bound, the insertion point is used instead, so a
//! bound between two samples snaps to the later one. This is a defined
//! approximation, not an error.
//!
//! ### Subsets
//!
//! [`TimeSeries::subset`] copies the samples in `[start, end)` into a fresh
//! series. Annotations and metadata are not carried over.
//!
//! ```rust
//! let lead = ecgset::doctest_utils::create_annotated_lead();
//! let first_tenth = lead.subset(0.0, 0.1);
//! assert_eq!(first_tenth.size(), 25);
//! assert!(first_tenth.annotations().is_empty());
//! ```
//!
//! ## Filtering
//!
//! The numeric filters live outside this crate behind the [`SignalFilter`]
//! trait. The series hands its two-row buffer to the filter and takes back the
//! value row; the length must not change. The container does not judge the
//! filter parameters.
//!
//! ```rust
//! use ecgset::{FilterOp, SeriesError};
//! use ecgset::doctest_utils::PassThroughFilter;
//!
//! let mut lead = ecgset::doctest_utils::create_annotated_lead();
//!
//! lead.apply_filters(&PassThroughFilter, &[
//!     FilterOp::Detrend { degree: 2 },
//!     FilterOp::Smooth { left: 4, right: 4, degree: 3 },
//!     FilterOp::BandPass { low: 0.5, high: 40.0 },
//! ])?;
//!
//! // Parameters go to the filter as given; `validate` is an optional check.
//! // 250 Hz sampling puts the Nyquist frequency at 125 Hz
//! let too_high = FilterOp::LowPass { cutoff: 150.0 };
//! let err = too_high.validate(lead.sample_frequency()).unwrap_err();
//! assert!(matches!(err, SeriesError::InvalidFilterParams(_)));
//! # Ok::<(), SeriesError>(())
//! ```

pub mod error;
pub mod types;
pub mod utils;
pub mod series;
pub mod window;
pub mod filter;

#[doc(hidden)]
pub mod doctest_utils; // For internal doctest support

// Re-export main types for convenience
pub use error::{SeriesError, Result};
pub use types::{Annotation, Sample, SampleMatrix};
pub use series::TimeSeries;
pub use window::TrimWindow;
pub use filter::{FilterOp, SignalFilter};

/// Library version
///
/// # Examples
///
/// ```rust
/// let version = ecgset::version();
/// assert!(version.contains('.'));
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
