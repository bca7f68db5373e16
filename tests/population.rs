#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use social_spike_rates::aggregation::population_average;
    use social_spike_rates::channels::ChannelKey;
    use social_spike_rates::error::{MetadataError, SpikeAnalysisError};
    use social_spike_rates::metadata::{InMemoryRecordings, RegionMetadata};
    use social_spike_rates::trials::{Epoch, Round, RoundId, Trial};

    // one channel, one trial per stimulus, epoch of 1 second so the rate is
    // the number of timestamps
    fn round_with_rates(date: &str, round: u32, rates: &[(&str, usize)]) -> Round {
        let channel = ChannelKey::Raw(1);

        let trials = rates.iter()
            .map(|&(stimulus, spikes)| {
                let timestamps: Vec<f64> = (0..spikes)
                    .map(|i| (i as f64 + 0.5) / spikes as f64)
                    .collect();

                let mut spike_times = HashMap::new();
                spike_times.insert(channel, timestamps);

                Trial {
                    stimulus: Some(stimulus.to_string()),
                    epoch: Epoch { start: 0., stop: 1. },
                    spike_times,
                }
            })
            .collect();

        Round {
            id: RoundId { date: date.to_string(), round },
            valid_channels: vec![channel],
            trials,
            sorted_trials: None,
        }
    }

    #[test]
    fn test_partial_stimulus_coverage_averages_over_recording_rounds_only() -> Result<(), SpikeAnalysisError> {
        let mut recordings = InMemoryRecordings::new();
        recordings.insert_round("ER", round_with_rates("2023-09-29", 1, &[("81G", 2), ("7124", 1)]));
        recordings.insert_round("ER", round_with_rates("2023-10-04", 1, &[("81G", 4)]));
        recordings.insert_round("ER", round_with_rates("2023-10-27", 2, &[("64F", 6)]));

        let population = population_average(&recordings, &recordings, "ER")?;

        // 81G appears in two of three rounds, so its mean is over two rows
        assert_eq!(population.rates["81G"], 3.0);
        assert_eq!(population.rates["7124"], 1.0);
        assert_eq!(population.rates["64F"], 6.0);
        assert_eq!(population.rates.len(), 3);

        Ok(())
    }

    #[test]
    fn test_rows_from_different_rounds_are_not_merged() -> Result<(), SpikeAnalysisError> {
        // both rounds record the same raw channel number, the rows still
        // contribute independently to the stimulus mean
        let mut recordings = InMemoryRecordings::new();
        recordings.insert_round("ER", round_with_rates("2023-09-29", 1, &[("81G", 2)]));
        recordings.insert_round("ER", round_with_rates("2023-09-29", 2, &[("81G", 4)]));

        let population = population_average(&recordings, &recordings, "ER")?;

        assert_eq!(population.rates["81G"], 3.0);

        Ok(())
    }

    #[test]
    fn test_population_invariant_to_round_order() -> Result<(), SpikeAnalysisError> {
        let rounds = [
            round_with_rates("2023-09-29", 1, &[("81G", 1), ("7124", 2)]),
            round_with_rates("2023-10-04", 1, &[("81G", 2)]),
            round_with_rates("2023-10-27", 1, &[("81G", 4), ("7124", 8)]),
        ];

        let mut forward = InMemoryRecordings::new();
        for round in rounds.iter() {
            forward.insert_round("ER", round.clone());
        }

        let mut reversed = InMemoryRecordings::new();
        for round in rounds.iter().rev() {
            reversed.insert_round("ER", round.clone());
        }

        let population_forward = population_average(&forward, &forward, "ER")?;
        let population_reversed = population_average(&reversed, &reversed, "ER")?;

        assert_eq!(population_forward.rates, population_reversed.rates);

        Ok(())
    }

    #[test]
    fn test_unknown_region_is_a_metadata_error() {
        let recordings = InMemoryRecordings::new();

        let result = population_average(&recordings, &recordings, "AMG");

        assert_eq!(
            result.map(|i| i.rates),
            Err(
                SpikeAnalysisError::MetadataRelatedError(
                    MetadataError::UnknownRegion(String::from("AMG"))
                )
            ),
        );
    }

    #[test]
    fn test_unknown_round_lookup_is_a_metadata_error() {
        let recordings = InMemoryRecordings::new();
        let missing = RoundId { date: String::from("2023-11-08"), round: 1 };

        assert_eq!(
            recordings.valid_channels(&missing),
            Err(MetadataError::UnknownRound(missing.clone())),
        );
    }

    #[test]
    fn test_diagnostics_accumulate_across_rounds() -> Result<(), SpikeAnalysisError> {
        let mut incomplete = round_with_rates("2023-09-29", 1, &[("81G", 2)]);
        // second trial for the same stimulus records nothing on the channel
        incomplete.trials.push(
            Trial {
                stimulus: Some(String::from("81G")),
                epoch: Epoch { start: 0., stop: 1. },
                spike_times: HashMap::new(),
            }
        );

        let mut recordings = InMemoryRecordings::new();
        recordings.insert_round("ER", incomplete);
        recordings.insert_round("ER", round_with_rates("2023-10-04", 1, &[("81G", 4)]));

        let population = population_average(&recordings, &recordings, "ER")?;

        assert_eq!(population.diagnostics.len(), 1);
        // the incomplete trial is omitted from its round's mean, so the
        // population sees rows of 2.0 and 4.0
        assert_eq!(population.rates["81G"], 3.0);

        Ok(())
    }
}
