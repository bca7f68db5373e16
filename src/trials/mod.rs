//! Core observation types for one recording session: epochs, trials, and
//! rounds, along with the time-windowed spike-rate calculation.

use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use crate::channels::ChannelKey;


/// The time window (seconds) defining a trial's valid spike-collection interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epoch {
    /// Start of the window
    pub start: f64,
    /// End of the window
    pub stop: f64,
}

impl Epoch {
    /// Length of the window in seconds
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }
}

/// Calculates the firing rate (spikes per second) of the timestamps falling
/// within the epoch window, a window with non-positive duration yields `0.`
pub fn epoch_spike_rate(timestamps: &[f64], epoch: &Epoch) -> f64 {
    let duration = epoch.duration();

    if duration <= 0. {
        return 0.;
    }

    let spikes = timestamps.iter()
        .filter(|&&i| i >= epoch.start && i <= epoch.stop)
        .count();

    spikes as f64 / duration
}

/// One presentation of one stimulus (monkey photo) to the subject, an
/// immutable observation
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    /// Name of the monkey shown, `None` for trials without an identified stimulus
    pub stimulus: Option<String>,
    /// Valid spike-collection window for this trial
    pub epoch: Epoch,
    /// Spike timestamps recorded within this trial, keyed per channel or unit
    pub spike_times: HashMap<ChannelKey, Vec<f64>>,
}

/// Identifier of one recording session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoundId {
    /// Recording date (e.g. `2023-10-04`)
    pub date: String,
    /// Round number within the date
    pub round: u32,
}

impl Display for RoundId {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{} round {}", self.date, self.round)
    }
}

/// One recording session with its metadata-declared raw channels, compiled
/// trials, and optionally a manually sorted trial set
///
/// Sorted trials carry pre-extracted per-unit spike timestamps keyed by
/// [`ChannelKey::Unit`], produced by the external spike-sorting collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    /// Which session this is
    pub id: RoundId,
    /// Raw channels declared valid for this session
    pub valid_channels: Vec<ChannelKey>,
    /// Compiled raw trials
    pub trials: Vec<Trial>,
    /// Sorted single-unit trials if the session has been manually sorted
    pub sorted_trials: Option<Vec<Trial>>,
}
