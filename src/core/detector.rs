// src/core/detector.rs
//
// Trigger pipeline: waveform -> characteristic function -> picks, for one
// trace or many independent channels.

use rayon::prelude::*;

use super::analysis::CharacteristicFunction;
use super::trigger::{trigger_onset, TriggerParams};
use crate::config::TriggerProfile;
use crate::detection::{DetectionReport, TriggerEvent};
use crate::error::{Result, TriggerError};

/// A characteristic function paired with trigger thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerDetector {
    algorithm: CharacteristicFunction,
    params: TriggerParams,
    sampling_rate: f64,
}

impl TriggerDetector {
    pub fn new(
        algorithm: CharacteristicFunction,
        params: TriggerParams,
        sampling_rate: f64,
    ) -> Result<Self> {
        if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
            return Err(TriggerError::InvalidInput(format!(
                "Sampling rate must be positive, got {}",
                sampling_rate
            )));
        }
        Ok(Self {
            algorithm,
            params,
            sampling_rate,
        })
    }

    /// Build a detector from a profile for traces sampled at `sampling_rate`
    pub fn from_profile(profile: &TriggerProfile, sampling_rate: f64) -> Result<Self> {
        Self::new(
            profile.to_algorithm(sampling_rate)?,
            profile.to_trigger_params(sampling_rate)?,
            sampling_rate,
        )
    }

    pub fn algorithm(&self) -> &CharacteristicFunction {
        &self.algorithm
    }

    pub fn params(&self) -> &TriggerParams {
        &self.params
    }

    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Characteristic function of `waveform`
    pub fn characteristic(&self, waveform: &[f64]) -> Result<Vec<f64>> {
        self.algorithm.compute(waveform)
    }

    /// Run the full pipeline on one trace
    pub fn detect(&self, waveform: &[f64]) -> Result<DetectionReport> {
        let charfct = self.characteristic(waveform)?;
        let picks = trigger_onset(&charfct, &self.params)?;

        let events: Vec<TriggerEvent> = picks
            .into_iter()
            .map(|pick| TriggerEvent::from_pick(pick, &charfct, self.sampling_rate))
            .collect();

        log::debug!(
            "{}: {} events in {} samples",
            self.algorithm.name(),
            events.len(),
            waveform.len()
        );

        Ok(DetectionReport {
            algorithm: self.algorithm.name().to_string(),
            sampling_rate: self.sampling_rate,
            samples: waveform.len(),
            events,
        })
    }

    /// Run the pipeline on independent channels in parallel.
    ///
    /// Reports come back in channel order; the first failing channel fails the batch.
    pub fn detect_channels<C>(&self, channels: &[C]) -> Result<Vec<DetectionReport>>
    where
        C: AsRef<[f64]> + Sync,
    {
        channels
            .par_iter()
            .map(|channel| self.detect(channel.as_ref()))
            .collect()
    }
}
