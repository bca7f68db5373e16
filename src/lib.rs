//! # Social Spike Rates
//!
//! `social_spike_rates` aggregates primate electrophysiology recordings into
//! average firing-rate tables and regresses them against social-behavior
//! features. The pipeline reconciles two divergent recording modalities,
//! raw multi-channel spike detection and manually sorted single-unit spike
//! trains, merges them per recording channel, and produces per-stimulus and
//! per-round rate tables suitable as regression targets.
//!
//! Data flows through the stages in order: recording metadata resolves each
//! round's valid channels and trial data, the trial-level and sorted-unit
//! aggregators collect one rate per trial per channel grouped by the
//! stimulus shown, the round reconciler drops raw channels superseded by
//! sorted units and merges the two tables, the averager reduces trial lists
//! to per-stimulus means, the population aggregator pools every round of a
//! brain region, and regression assembly joins the resulting rates with
//! social features into a design matrix for ordinary least squares.
//!
//! Missing data never aborts aggregation. A channel with no spikes recorded
//! in a trial contributes nothing to that average (not a zero) and is
//! reported as a diagnostic, while the mean of an empty rate list resolves
//! to exactly `0.` by policy. Malformed channel keys and invalid upstream
//! records are surfaced as errors naming the offending value instead.
//!
//! ## Averaging one round
//!
//! ```rust
//! use std::collections::HashMap;
//! use social_spike_rates::{
//!     aggregation::round_average_rates,
//!     channels::ChannelKey,
//!     error::SpikeAnalysisError,
//!     trials::{Epoch, Round, RoundId, Trial},
//! };
//!
//! fn main() -> Result<(), SpikeAnalysisError> {
//!     let channel = ChannelKey::parse_raw("C-001")?;
//!
//!     let mut spike_times = HashMap::new();
//!     spike_times.insert(channel, vec![0.1, 0.4, 0.9]);
//!
//!     let round = Round {
//!         id: RoundId { date: String::from("2023-10-04"), round: 4 },
//!         valid_channels: vec![channel],
//!         trials: vec![
//!             Trial {
//!                 stimulus: Some(String::from("81G")),
//!                 epoch: Epoch { start: 0., stop: 1. },
//!                 spike_times,
//!             },
//!         ],
//!         sorted_trials: None,
//!     };
//!
//!     let (averages, diagnostics) = round_average_rates(&round);
//!
//!     assert_eq!(averages["81G"][&channel], 3.);
//!     assert!(diagnostics.is_empty());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Reconciliation rule
//!
//! Within one round, a raw channel may not remain in the unified table if
//! its channel number appears among the sorted units for that round, sorted
//! data takes precedence and raw data is a fallback for unsorted channels
//! only. Channel numbers are compared numerically, so the raw token `C-003`
//! and a sorted key embedding `003` or `3` reference the same electrode.

pub mod aggregation;
pub mod channels;
pub mod error;
pub mod metadata;
pub mod regression;
pub mod trials;
