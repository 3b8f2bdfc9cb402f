// src/config/profiles.rs
//
// Trigger profiles: algorithm choice, window lengths and thresholds in
// physical units, converted to samples for a given sampling rate.

use serde::{Deserialize, Serialize};

use crate::core::analysis::CharacteristicFunction;
use crate::core::trigger::TriggerParams;
use crate::error::{Result, TriggerError};

/// Characteristic function family used by a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    RecursiveStaLta,
    ClassicStaLta,
    DelayedStaLta,
    CarlStaTrig,
    ZDetect,
}

impl AlgorithmKind {
    pub fn all() -> Vec<Self> {
        vec![
            Self::RecursiveStaLta,
            Self::ClassicStaLta,
            Self::DelayedStaLta,
            Self::CarlStaTrig,
            Self::ZDetect,
        ]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace('-', "_").as_str() {
            "recursive" | "recursive_sta_lta" => Some(Self::RecursiveStaLta),
            "classic" | "classic_sta_lta" => Some(Self::ClassicStaLta),
            "delayed" | "delayed_sta_lta" => Some(Self::DelayedStaLta),
            "carl" | "carl_sta_trig" => Some(Self::CarlStaTrig),
            "z" | "zdetect" | "z_detect" => Some(Self::ZDetect),
            _ => None,
        }
    }
}

/// Preset profiles for common monitoring distances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfilePreset {
    /// Local events: short windows, impulsive onsets
    Local,
    /// Regional distances
    Regional,
    /// Teleseismic arrivals: long, emergent onsets
    Teleseismic,
    /// User-defined settings
    Custom,
}

impl ProfilePreset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "local" => Some(Self::Local),
            "regional" => Some(Self::Regional),
            "teleseismic" | "tele" => Some(Self::Teleseismic),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Complete trigger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerProfile {
    /// Profile name
    pub name: String,
    /// Profile description
    pub description: String,
    /// Base preset this was derived from
    pub base_preset: ProfilePreset,
    /// Characteristic function family
    pub algorithm: AlgorithmKind,
    /// Short window length in seconds
    pub sta_secs: f64,
    /// Long window length in seconds (unused by the Z-detector)
    pub lta_secs: f64,
    /// Carl-Johnson `ratio` knob
    pub ratio: f64,
    /// Carl-Johnson `quiet` knob
    pub quiet: f64,
    /// Arm threshold
    pub thres1: f64,
    /// Disarm threshold
    pub thres2: f64,
    /// Maximum event length in seconds, `None` for unbounded
    pub max_len_secs: Option<f64>,
    /// Drop over-long events instead of truncating them
    pub max_len_delete: bool,
}

impl Default for TriggerProfile {
    fn default() -> Self {
        Self::from_preset(ProfilePreset::Local)
    }
}

impl TriggerProfile {
    /// Create profile from preset
    pub fn from_preset(preset: ProfilePreset) -> Self {
        match preset {
            ProfilePreset::Local => Self::local(),
            ProfilePreset::Regional => Self::regional(),
            ProfilePreset::Teleseismic => Self::teleseismic(),
            ProfilePreset::Custom => Self::local(),
        }
    }

    fn local() -> Self {
        Self {
            name: "Local".to_string(),
            description: "Impulsive local events, short windows".to_string(),
            base_preset: ProfilePreset::Local,
            algorithm: AlgorithmKind::RecursiveStaLta,
            sta_secs: 0.5,
            lta_secs: 10.0,
            ratio: 0.8,
            quiet: 0.8,
            thres1: 3.5,
            thres2: 1.0,
            max_len_secs: Some(60.0),
            max_len_delete: false,
        }
    }

    fn regional() -> Self {
        Self {
            name: "Regional".to_string(),
            description: "Regional distances, moderate windows".to_string(),
            base_preset: ProfilePreset::Regional,
            algorithm: AlgorithmKind::ClassicStaLta,
            sta_secs: 2.0,
            lta_secs: 30.0,
            ratio: 0.8,
            quiet: 0.8,
            thres1: 3.0,
            thres2: 1.5,
            max_len_secs: Some(300.0),
            max_len_delete: false,
        }
    }

    fn teleseismic() -> Self {
        Self {
            name: "Teleseismic".to_string(),
            description: "Emergent teleseismic arrivals, long windows".to_string(),
            base_preset: ProfilePreset::Teleseismic,
            algorithm: AlgorithmKind::RecursiveStaLta,
            sta_secs: 5.0,
            lta_secs: 60.0,
            ratio: 0.8,
            quiet: 0.8,
            thres1: 2.0,
            thres2: 0.8,
            max_len_secs: None,
            max_len_delete: false,
        }
    }

    /// Convert the profile windows into a characteristic function for `sampling_rate`
    pub fn to_algorithm(&self, sampling_rate: f64) -> Result<CharacteristicFunction> {
        let nsta = seconds_to_samples(self.sta_secs, sampling_rate)?;

        if self.algorithm == AlgorithmKind::ZDetect {
            return Ok(CharacteristicFunction::ZDetect { nsta });
        }

        let nlta = seconds_to_samples(self.lta_secs, sampling_rate)?;
        Ok(match self.algorithm {
            AlgorithmKind::RecursiveStaLta => CharacteristicFunction::RecursiveStaLta { nsta, nlta },
            AlgorithmKind::ClassicStaLta => CharacteristicFunction::ClassicStaLta { nsta, nlta },
            AlgorithmKind::DelayedStaLta => CharacteristicFunction::DelayedStaLta { nsta, nlta },
            AlgorithmKind::CarlStaTrig => CharacteristicFunction::CarlStaTrig {
                nsta,
                nlta,
                ratio: self.ratio,
                quiet: self.quiet,
            },
            AlgorithmKind::ZDetect => CharacteristicFunction::ZDetect { nsta },
        })
    }

    /// Trigger thresholds with `max_len` converted to samples
    pub fn to_trigger_params(&self, sampling_rate: f64) -> Result<TriggerParams> {
        let max_len = self
            .max_len_secs
            .map(|secs| seconds_to_samples(secs, sampling_rate))
            .transpose()?;

        Ok(TriggerParams {
            thres1: self.thres1,
            thres2: self.thres2,
            max_len,
            max_len_delete: self.max_len_delete,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Convert a duration to a whole number of samples, at least one
pub fn seconds_to_samples(secs: f64, sampling_rate: f64) -> Result<usize> {
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        return Err(TriggerError::invalid(format!(
            "Sampling rate must be positive, got {}",
            sampling_rate
        )));
    }
    if !(secs.is_finite() && secs > 0.0) {
        return Err(TriggerError::Config(format!(
            "Window length must be positive, got {} s",
            secs
        )));
    }
    Ok(((secs * sampling_rate).round() as usize).max(1))
}

/// Builder for custom profiles
pub struct ProfileBuilder {
    config: TriggerProfile,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self {
            config: TriggerProfile::default(),
        }
    }

    pub fn from_preset(preset: ProfilePreset) -> Self {
        Self {
            config: TriggerProfile::from_preset(preset),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.config.description = desc.into();
        self
    }

    pub fn algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    pub fn windows(mut self, sta_secs: f64, lta_secs: f64) -> Self {
        self.config.sta_secs = sta_secs;
        self.config.lta_secs = lta_secs;
        self
    }

    pub fn thresholds(mut self, thres1: f64, thres2: f64) -> Self {
        self.config.thres1 = thres1;
        self.config.thres2 = thres2;
        self
    }

    pub fn carl_knobs(mut self, ratio: f64, quiet: f64) -> Self {
        self.config.ratio = ratio;
        self.config.quiet = quiet;
        self
    }

    pub fn max_len_secs(mut self, max_len: Option<f64>) -> Self {
        self.config.max_len_secs = max_len;
        self
    }

    pub fn max_len_delete(mut self, delete: bool) -> Self {
        self.config.max_len_delete = delete;
        self
    }

    pub fn build(mut self) -> TriggerProfile {
        self.config.base_preset = ProfilePreset::Custom;
        self.config
    }
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_to_algorithm() {
        let profile = TriggerProfile::from_preset(ProfilePreset::Regional);
        let algo = profile.to_algorithm(100.0).unwrap();
        assert_eq!(algo, CharacteristicFunction::ClassicStaLta { nsta: 200, nlta: 3000 });

        let params = profile.to_trigger_params(100.0).unwrap();
        assert_eq!(params.max_len, Some(30_000));
        assert_eq!(params.thres1, 3.0);
    }

    #[test]
    fn test_profile_builder() {
        let profile = ProfileBuilder::new()
            .name("Borehole")
            .algorithm(AlgorithmKind::CarlStaTrig)
            .windows(1.0, 8.0)
            .carl_knobs(0.5, 0.1)
            .thresholds(10.0, 8.0)
            .max_len_secs(None)
            .build();

        assert_eq!(profile.name, "Borehole");
        assert_eq!(profile.base_preset, ProfilePreset::Custom);
        let algo = profile.to_algorithm(50.0).unwrap();
        assert_eq!(
            algo,
            CharacteristicFunction::CarlStaTrig {
                nsta: 50,
                nlta: 400,
                ratio: 0.5,
                quiet: 0.1
            }
        );
        assert_eq!(profile.to_trigger_params(50.0).unwrap().max_len, None);
    }

    #[test]
    fn test_json_round_trip() {
        let profile = TriggerProfile::from_preset(ProfilePreset::Teleseismic);
        let json = profile.to_json().unwrap();
        assert!(json.contains("\"recursive_sta_lta\""));
        assert_eq!(TriggerProfile::from_json(&json).unwrap(), profile);
        assert!(matches!(
            TriggerProfile::from_json("{\"name\": 3}"),
            Err(TriggerError::Config(_))
        ));
    }

    #[test]
    fn test_seconds_to_samples() {
        assert_eq!(seconds_to_samples(0.001, 100.0).unwrap(), 1);
        assert_eq!(seconds_to_samples(2.5, 40.0).unwrap(), 100);
        assert!(seconds_to_samples(1.0, 0.0).is_err());
        assert!(seconds_to_samples(-1.0, 100.0).is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(ProfilePreset::from_name("Tele"), Some(ProfilePreset::Teleseismic));
        assert_eq!(AlgorithmKind::from_name("z-detect"), Some(AlgorithmKind::ZDetect));
        assert_eq!(AlgorithmKind::from_name("bogus"), None);
        assert_eq!(AlgorithmKind::all().len(), 5);
    }
}
