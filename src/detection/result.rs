//! Detection result types in sample and time units

use serde::{Deserialize, Serialize};

use crate::core::dsp::stats::max_value;
use crate::core::trigger::Pick;
use crate::error::Result;

/// One triggered event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Onset sample
    pub on: usize,
    /// Offset sample ([`Pick::OPEN_END`] if the event never closed)
    pub off: usize,
    /// Onset time relative to the first sample
    pub on_secs: f64,
    /// Offset time, `None` for an open event
    pub off_secs: Option<f64>,
    /// Largest characteristic function value inside the event
    pub peak: Option<f64>,
}

impl TriggerEvent {
    /// Build an event from a pick and the characteristic function it came from
    pub fn from_pick(pick: Pick, charfct: &[f64], sampling_rate: f64) -> Self {
        let last = charfct.len().saturating_sub(1);
        let end = pick.off.min(last);
        let peak = if pick.on <= end && pick.on < charfct.len() {
            max_value(&charfct[pick.on..=end])
        } else {
            None
        };

        Self {
            on: pick.on,
            off: pick.off,
            on_secs: pick.on as f64 / sampling_rate,
            off_secs: (!pick.is_open()).then(|| pick.off as f64 / sampling_rate),
            peak,
        }
    }

    pub fn pick(&self) -> Pick {
        Pick::new(self.on, self.off)
    }

    pub fn duration_secs(&self) -> Option<f64> {
        self.off_secs.map(|off| off - self.on_secs)
    }
}

/// Result of running one detector over one trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Characteristic function name
    pub algorithm: String,
    pub sampling_rate: f64,
    /// Trace length in samples
    pub samples: usize,
    pub events: Vec<TriggerEvent>,
}

impl DetectionReport {
    pub fn picks(&self) -> Vec<Pick> {
        self.events.iter().map(TriggerEvent::pick).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_pick() {
        let cf = vec![0.0, 1.0, 4.0, 2.5, 0.5, 0.0];
        let event = TriggerEvent::from_pick(Pick::new(1, 3), &cf, 10.0);
        assert_eq!(event.peak, Some(4.0));
        assert!((event.on_secs - 0.1).abs() < 1e-12);
        assert!((event.duration_secs().unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_open_event() {
        let cf = vec![0.0, 3.0, 5.0];
        let event = TriggerEvent::from_pick(Pick::new(1, Pick::OPEN_END), &cf, 1.0);
        assert_eq!(event.off_secs, None);
        assert_eq!(event.duration_secs(), None);
        assert_eq!(event.peak, Some(5.0));
        assert!(event.pick().is_open());
    }

    #[test]
    fn test_report_json() {
        let report = DetectionReport {
            algorithm: "classic_sta_lta".to_string(),
            sampling_rate: 100.0,
            samples: 3,
            events: vec![TriggerEvent::from_pick(Pick::new(0, 1), &[2.0, 3.0, 0.0], 100.0)],
        };
        let json = report.to_json().unwrap();
        assert!(json.contains("classic_sta_lta"));
        assert_eq!(report.picks(), vec![Pick::new(0, 1)]);
    }
}
