//! Trigger onset/offset extraction
//!
//! Turns a characteristic function and a pair of thresholds into
//! non-overlapping `(on, off)` sample intervals. An event arms where the
//! function exceeds `thres1` and disarms once it no longer exceeds `thres2`.
//! Events longer than `max_len` are either cut at `on + max_len` or dropped.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TriggerError};

/// Offset queue sentinel placed before the first real offset
const LEADING_OFFSET: i64 = -1;
/// Offset queue sentinel for an event still open at the end of the trace
const OPEN_OFFSET: i64 = i64::MAX;

/// A detected event as a pair of sample indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pick {
    /// First sample of the event
    pub on: usize,
    /// Last sample of the event, or [`Pick::OPEN_END`]
    pub off: usize,
}

impl Pick {
    /// Offset reported for an event that never closed before the trace ended.
    ///
    /// Only produced when `max_len_delete` is set and `max_len` is unbounded.
    pub const OPEN_END: usize = usize::MAX;

    pub fn new(on: usize, off: usize) -> Self {
        Self { on, off }
    }

    pub fn is_open(&self) -> bool {
        self.off == Self::OPEN_END
    }

    /// Number of samples between onset and offset
    pub fn duration(&self) -> usize {
        self.off.saturating_sub(self.on)
    }
}

/// Threshold configuration for [`trigger_onset`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerParams {
    /// Value above which an event is armed (higher threshold)
    pub thres1: f64,
    /// Value the function must stay above to keep an event open (lower threshold)
    pub thres2: f64,
    /// Maximum event length in samples, `None` for unbounded
    pub max_len: Option<usize>,
    /// Drop events longer than `max_len` instead of truncating them.
    /// Also drops an event still open at the end of the trace.
    pub max_len_delete: bool,
}

impl TriggerParams {
    pub fn new(thres1: f64, thres2: f64) -> Self {
        Self {
            thres1,
            thres2,
            max_len: None,
            max_len_delete: false,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn with_max_len_delete(mut self, delete: bool) -> Self {
        self.max_len_delete = delete;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.thres1.is_nan() || self.thres2.is_nan() {
            return Err(TriggerError::invalid(format!(
                "Trigger thresholds must not be NaN (thres1={}, thres2={})",
                self.thres1, self.thres2
            )));
        }
        if self.thres2 > self.thres1 {
            log::warn!(
                "thres2 ({}) is above thres1 ({}), events may close immediately",
                self.thres2,
                self.thres1
            );
        }
        Ok(())
    }
}

/// Compute trigger on and off times from a characteristic function.
///
/// Picks are ordered by ascending onset and never overlap, although one pick
/// may end on the sample the next one starts.
///
/// # Errors
///
/// Returns `TriggerError::InvalidInput` if a threshold is NaN
pub fn trigger_onset(charfct: &[f64], params: &TriggerParams) -> Result<Vec<Pick>> {
    params.validate()?;

    let above_on = indices_above(charfct, params.thres1);
    if above_on.is_empty() {
        log::debug!("trigger_onset: no sample above thres1={}", params.thres1);
        return Ok(Vec::new());
    }
    let above_off = indices_above(charfct, params.thres2);

    // Starts of runs above thres1
    let mut on: VecDeque<i64> = above_on
        .iter()
        .enumerate()
        .filter(|&(k, &idx)| k == 0 || above_on[k - 1] + 1 != idx)
        .map(|(_, &idx)| idx)
        .collect();

    // Ends of runs above thres2, except the last run
    let mut off: VecDeque<i64> = VecDeque::with_capacity(above_off.len() + 2);
    off.push_back(LEADING_OFFSET);
    off.extend(
        above_off
            .windows(2)
            .filter(|pair| pair[1] != pair[0] + 1)
            .map(|pair| pair[0]),
    );

    if params.max_len_delete {
        off.push_back(OPEN_OFFSET);
        if let Some(&last) = on.back() {
            on.push_back(last);
        }
    } else if let Some(&last) = above_off.last() {
        off.push_back(last);
    }

    let max_len = params
        .max_len
        .map(|len| i64::try_from(len).unwrap_or(i64::MAX));

    let mut picks = Vec::new();
    while let (Some(&last_on), Some(&first_off)) = (on.back(), off.front()) {
        if last_on <= first_off {
            break;
        }

        // Onsets swallowed by the event currently being closed
        while on.front().is_some_and(|&o| o <= first_off) {
            on.pop_front();
        }
        let Some(&onset) = on.front() else { break };

        // Offsets that closed before this event began
        while off.front().is_some_and(|&o| o < onset) {
            off.pop_front();
        }
        let Some(&offset) = off.front() else { break };

        if let Some(max_len) = max_len {
            if offset - onset > max_len {
                if params.max_len_delete {
                    on.pop_front();
                    continue;
                }
                off.push_front(onset.saturating_add(max_len));
            }
        }

        let offset = off.front().copied().unwrap_or(offset);
        picks.push(Pick::new(onset as usize, to_pick_offset(offset)));
    }

    log::debug!(
        "trigger_onset: {} picks from {} samples (thres1={}, thres2={})",
        picks.len(),
        charfct.len(),
        params.thres1,
        params.thres2
    );

    Ok(picks)
}

fn indices_above(charfct: &[f64], threshold: f64) -> Vec<i64> {
    charfct
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v > threshold)
        .map(|(i, _)| i as i64)
        .collect()
}

fn to_pick_offset(offset: i64) -> usize {
    if offset == OPEN_OFFSET {
        Pick::OPEN_END
    } else {
        usize::try_from(offset).unwrap_or(Pick::OPEN_END)
    }
}
