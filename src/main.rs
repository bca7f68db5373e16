use std::collections::HashMap;
use social_spike_rates::aggregation::{population_average, round_average_rates};
use social_spike_rates::channels::ChannelKey;
use social_spike_rates::error::SpikeAnalysisError;
use social_spike_rates::metadata::InMemoryRecordings;
use social_spike_rates::regression::{assemble_design, ols, SubjectFeatures};
use social_spike_rates::trials::{Epoch, Round, RoundId, Trial};


const SUBJECTS: [&str; 4] = ["81G", "7124", "64F", "P0E"];

fn spike_train(rate: f64, epoch: &Epoch) -> Vec<f64> {
    let spikes = (rate * epoch.duration()) as usize;
    let spacing = epoch.duration() / (spikes as f64 + 1.);

    (1..=spikes).map(|i| epoch.start + i as f64 * spacing)
        .collect()
}

fn raw_trial(stimulus: &str, channels: &[(ChannelKey, f64)]) -> Trial {
    let epoch = Epoch { start: 0.5, stop: 2.5 };
    let spike_times = channels.iter()
        .map(|(channel, rate)| (*channel, spike_train(*rate, &epoch)))
        .collect();

    Trial {
        stimulus: Some(stimulus.to_string()),
        epoch,
        spike_times,
    }
}

fn build_round(date: &str, round: u32, sorted: bool) -> Result<Round, SpikeAnalysisError> {
    let channel_1 = ChannelKey::parse_raw("C-001")?;
    let channel_2 = ChannelKey::parse_raw("C-002")?;

    let trials = SUBJECTS.iter()
        .enumerate()
        .flat_map(|(index, stimulus)| {
            let base = 4. + 2. * index as f64 + round as f64;

            (0..3).map(move |repeat| {
                raw_trial(
                    stimulus,
                    &[(channel_1, base + repeat as f64), (channel_2, base / 2.)],
                )
            })
        })
        .collect();

    let sorted_trials = if sorted {
        let unit = ChannelKey::parse_unit_key("elec_C001_unit1")?;

        let trials = SUBJECTS.iter()
            .enumerate()
            .map(|(index, stimulus)| {
                let epoch = Epoch { start: 0.5, stop: 2.5 };
                let mut spike_times = HashMap::new();
                spike_times.insert(unit, spike_train(6. + index as f64, &epoch));

                Trial {
                    stimulus: Some(stimulus.to_string()),
                    epoch,
                    spike_times,
                }
            })
            .collect();

        Some(trials)
    } else {
        None
    };

    Ok(
        Round {
            id: RoundId { date: date.to_string(), round },
            valid_channels: vec![channel_1, channel_2],
            trials,
            sorted_trials,
        }
    )
}

fn main() -> Result<(), SpikeAnalysisError> {
    let mut recordings = InMemoryRecordings::new();
    recordings.insert_round("ER", build_round("2023-10-04", 1, true)?);
    recordings.insert_round("ER", build_round("2023-10-04", 2, false)?);
    recordings.insert_round("ER", build_round("2023-10-27", 1, true)?);

    let example_round = build_round("2023-10-04", 1, true)?;
    let (averages, diagnostics) = round_average_rates(&example_round);

    println!("Average spike rates for {}:", example_round.id);
    let mut stimuli: Vec<&String> = averages.keys().collect();
    stimuli.sort();
    for stimulus in stimuli {
        let by_channel = &averages[stimulus];
        let mut channels: Vec<&ChannelKey> = by_channel.keys().collect();
        channels.sort();

        for channel in channels {
            println!("    {} x {}: {:.3} Hz", stimulus, channel, by_channel[channel]);
        }
    }

    for diagnostic in diagnostics.iter() {
        println!("{}", diagnostic);
    }

    let population = population_average(&recordings, &recordings, "ER")?;

    println!("ER population average spike rates:");
    let mut stimuli: Vec<&String> = population.rates.keys().collect();
    stimuli.sort();
    for stimulus in stimuli {
        println!("    {}: {:.3} Hz", stimulus, population.rates[stimulus]);
    }

    let mut features = SubjectFeatures::new(vec![
        String::from("general_submission"),
        String::from("general_attraction_to_submission"),
        String::from("agonism_received"),
    ]);
    features.insert_row("81G", vec![0.8, 0.3, 0.4])?;
    features.insert_row("7124", vec![0.1, 0.9, 0.2])?;
    features.insert_row("64F", vec![0.5, 0.5, 0.7])?;
    features.insert_row("P0E", vec![0.2, 0.6, 0.1])?;

    let subjects: Vec<String> = SUBJECTS.iter().map(|i| i.to_string()).collect();
    let (design, target) = assemble_design(&subjects, &features, &population.rates)?;
    let beta = ols(&design, &target)?;

    println!("Regression coefficients (social features + intercept):");
    for (name, coefficient) in features.feature_names().iter().zip(beta.iter()) {
        println!("    {}: {:.4}", name, coefficient);
    }
    println!("    intercept: {:.4}", beta[beta.len() - 1]);

    Ok(())
}
