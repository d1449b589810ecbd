// Internal utilities for documentation tests
// This file contains fixture builders shared by the doctests

use crate::{Result, SampleMatrix, SignalFilter, TimeSeries};

/// Creates one second of a synthetic 250 Hz lead with R-peak markers
///
/// Category 1 marks beats at 0.2 s, 0.6 s and 0.9 s; category 2 marks a
/// single artifact at 0.5 s.
pub fn create_annotated_lead() -> TimeSeries {
    let mut lead = TimeSeries::new();
    lead.set_sample_frequency(250.0);

    for i in 0..250 {
        let t = i as f64 / 250.0;
        // 1 Hz 基线漂移叠加 10 Hz 分量
        let value = 0.5 * (2.0 * std::f64::consts::PI * t).sin()
            + 0.1 * (2.0 * std::f64::consts::PI * 10.0 * t).sin();
        lead.append(t, value);
    }

    lead.add_annotation(1, 0.2);
    lead.add_annotation(1, 0.6);
    lead.add_annotation(1, 0.9);
    lead.add_annotation(2, 0.5);
    lead
}

/// Filter that leaves every buffer unchanged
pub struct PassThroughFilter;

impl SignalFilter for PassThroughFilter {
    fn detrend(&self, _buffer: &mut SampleMatrix, _degree: usize) -> Result<()> {
        Ok(())
    }

    fn smooth(
        &self,
        _buffer: &mut SampleMatrix,
        _left: usize,
        _right: usize,
        _degree: usize,
    ) -> Result<()> {
        Ok(())
    }

    fn low_pass(&self, _buffer: &mut SampleMatrix, _cutoff: f64) -> Result<()> {
        Ok(())
    }

    fn high_pass(&self, _buffer: &mut SampleMatrix, _cutoff: f64) -> Result<()> {
        Ok(())
    }

    fn band_filter(&self, _buffer: &mut SampleMatrix, _low: f64, _high: f64) -> Result<()> {
        Ok(())
    }
}
