//! The spike-rate aggregation pipeline: per-trial rate collection from raw
//! and sorted recordings, reconciliation of the two modalities within a
//! round, stimulus averaging, and population-level aggregation across all
//! rounds of a brain region.
//!
//! Missing data is never an error here. A valid channel with no timestamps
//! in a given trial contributes no data point (not a zero) and is reported
//! as a [`Diagnostic`] alongside the computed tables, and the mean of an
//! empty rate list resolves to exactly `0.` by policy so downstream
//! regression matrices need no additional null handling.

use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter, Result as FmtResult};
use crate::channels::ChannelKey;
use crate::error::SpikeAnalysisError;
use crate::metadata::{RegionMetadata, RoundSource};
use crate::trials::{epoch_spike_rate, Round, RoundId, Trial};


/// Per-trial spike rates, stimulus to channel to one rate per trial
/// exhibiting that stimulus
pub type RatesByStimulus = HashMap<String, HashMap<ChannelKey, Vec<f64>>>;

/// Averaged spike rates, stimulus to channel to the mean rate across trials
pub type AverageRatesByStimulus = HashMap<String, HashMap<ChannelKey, f64>>;

/// Recoverable conditions accumulated during aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A channel expected for a round had no spike data in one trial, the
    /// trial contributed nothing to that channel's average
    MissingChannelData {
        /// Round the trial belongs to
        round: RoundId,
        /// Stimulus shown during the trial
        stimulus: String,
        /// Channel or unit with no data
        channel: ChannelKey,
        /// Index of the trial within the round
        trial: usize,
    },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Diagnostic::MissingChannelData { round, stimulus, channel, trial } => {
                write!(
                    f,
                    "No data for {} in trial {} ({}, stimulus '{}')",
                    channel, trial, round, stimulus,
                )
            },
        }
    }
}

/// Collects one rate per trial for every given channel, grouped by stimulus,
/// trials without an identified stimulus are skipped
///
/// Every channel appears under every observed stimulus, possibly with an
/// empty rate list, missing per-trial data is reported through `diagnostics`
pub fn trial_rates(
    round: &RoundId,
    trials: &[Trial],
    channels: &HashSet<ChannelKey>,
    diagnostics: &mut Vec<Diagnostic>,
) -> RatesByStimulus {
    let mut table: RatesByStimulus = HashMap::new();

    for (index, trial) in trials.iter().enumerate() {
        let stimulus = match &trial.stimulus {
            Some(name) => name,
            None => continue,
        };

        let by_channel = table.entry(stimulus.clone())
            .or_insert_with(|| channels.iter().map(|&i| (i, Vec::new())).collect());

        for channel in channels.iter() {
            match trial.spike_times.get(channel) {
                Some(timestamps) => {
                    by_channel.entry(*channel)
                        .or_default()
                        .push(epoch_spike_rate(timestamps, &trial.epoch));
                },
                None => {
                    diagnostics.push(
                        Diagnostic::MissingChannelData {
                            round: round.clone(),
                            stimulus: stimulus.clone(),
                            channel: *channel,
                            trial: index,
                        }
                    );
                },
            }
        }
    }

    table
}

/// The set of unit keys appearing across a sorted trial set
pub fn sorted_channel_universe(trials: &[Trial]) -> HashSet<ChannelKey> {
    let mut universe = HashSet::new();

    for trial in trials.iter() {
        universe.extend(trial.spike_times.keys().copied());
    }

    universe
}

/// Computes the unified per-trial rate table for one round
///
/// Raw rates are collected over the metadata-declared valid channels and
/// sorted rates over the unit keys of the sorted dataset. Every channel
/// number present among the sorted units supersedes its raw rows, which are
/// removed entirely before the tables merge, raw data remains only as a
/// fallback for unsorted channels. A round without sorted data yields the
/// raw table unchanged.
pub fn round_trial_rates(round: &Round) -> (RatesByStimulus, Vec<Diagnostic>) {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let valid_channels: HashSet<ChannelKey> = round.valid_channels.iter().copied().collect();
    let mut table = trial_rates(&round.id, &round.trials, &valid_channels, &mut diagnostics);

    if let Some(sorted_trials) = &round.sorted_trials {
        let universe = sorted_channel_universe(sorted_trials);
        let superseded: HashSet<u16> = universe.iter()
            .map(|i| i.channel_number())
            .collect();

        for by_channel in table.values_mut() {
            by_channel.retain(|channel, _| !superseded.contains(&channel.channel_number()));
        }

        let sorted_table = trial_rates(&round.id, sorted_trials, &universe, &mut diagnostics);
        for (stimulus, by_channel) in sorted_table {
            table.entry(stimulus).or_default().extend(by_channel);
        }
    }

    (table, diagnostics)
}

/// Arithmetic mean of the given rates, exactly `0.` for an empty list by policy
pub fn mean_or_zero(rates: &[f64]) -> f64 {
    if rates.is_empty() {
        return 0.;
    }

    rates.iter().sum::<f64>() / rates.len() as f64
}

/// Reduces per-trial rate lists to one averaged rate per (stimulus, channel) pair
pub fn average_rates(trial_rates: &RatesByStimulus) -> AverageRatesByStimulus {
    trial_rates.iter()
        .map(|(stimulus, by_channel)| {
            let averaged = by_channel.iter()
                .map(|(&channel, rates)| (channel, mean_or_zero(rates)))
                .collect();

            (stimulus.clone(), averaged)
        })
        .collect()
}

/// Computes the reconciled and averaged rate table for one round
pub fn round_average_rates(round: &Round) -> (AverageRatesByStimulus, Vec<Diagnostic>) {
    let (table, diagnostics) = round_trial_rates(round);

    (average_rates(&table), diagnostics)
}

/// Reduces one round's averaged table column-wise to a mean rate per
/// stimulus across all of the round's channels
pub fn overall_average_rates(averages: &AverageRatesByStimulus) -> HashMap<String, f64> {
    averages.iter()
        .map(|(stimulus, by_channel)| {
            let rates: Vec<f64> = by_channel.values().copied().collect();

            (stimulus.clone(), mean_or_zero(&rates))
        })
        .collect()
}

/// Region-wide average response per stimulus with the diagnostics gathered
/// from every contributing round
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationAverage {
    /// Mean rate per stimulus across every channel row of every round in the region
    pub rates: HashMap<String, f64>,
    /// Recoverable missing-data reports from all rounds
    pub diagnostics: Vec<Diagnostic>,
}

/// Aggregates the averaged tables of every round recorded in the named brain
/// region into one population-level table
///
/// Per-round tables are concatenated row-wise, channel rows are never merged
/// across rounds, and each stimulus column is averaged over exactly the rows
/// that record it, so partial stimulus coverage across rounds is expected and
/// does not bias the mean. The result is invariant to the order rounds are
/// visited in.
pub fn population_average<M: RegionMetadata, S: RoundSource>(
    metadata: &M,
    source: &S,
    region: &str,
) -> Result<PopulationAverage, SpikeAnalysisError> {
    let mut columns: HashMap<String, Vec<f64>> = HashMap::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for round_id in metadata.rounds_in_region(region)? {
        let round = source.load_round(&round_id)?;
        let (averages, round_diagnostics) = round_average_rates(&round);

        for (stimulus, by_channel) in averages {
            columns.entry(stimulus)
                .or_default()
                .extend(by_channel.values());
        }

        diagnostics.extend(round_diagnostics);
    }

    let rates = columns.iter()
        .map(|(stimulus, rows)| (stimulus.clone(), mean_or_zero(rows)))
        .collect();

    Ok(PopulationAverage { rates, diagnostics })
}
