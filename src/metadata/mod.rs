//! Interfaces to the recording-metadata and round-loading collaborators.
//!
//! Spreadsheet and pickle parsing are owned by external tooling, the pipeline
//! only needs to resolve which rounds belong to a brain region and to obtain
//! each round's trial data. [`InMemoryRecordings`] implements both lookups
//! over plain maps for tests and offline driver programs.

use std::collections::HashMap;
use crate::channels::ChannelKey;
use crate::error::{MetadataError, SpikeAnalysisError};
use crate::trials::{Round, RoundId};


/// Lookup of recording metadata by brain region and round
pub trait RegionMetadata {
    /// Every `(date, round)` pair recorded in the given brain region
    fn rounds_in_region(&self, region: &str) -> Result<Vec<RoundId>, MetadataError>;
    /// Raw channels declared valid for the given round
    fn valid_channels(&self, round: &RoundId) -> Result<Vec<ChannelKey>, MetadataError>;
}

/// Source of per-round compiled trial data
pub trait RoundSource {
    /// Constructs the full round, including sorted trials when the session
    /// has been manually sorted
    fn load_round(&self, round: &RoundId) -> Result<Round, SpikeAnalysisError>;
}

/// In-memory recording store used by tests and driver programs
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordings {
    rounds: HashMap<RoundId, Round>,
    regions: HashMap<String, Vec<RoundId>>,
}

impl InMemoryRecordings {
    pub fn new() -> Self {
        InMemoryRecordings {
            rounds: HashMap::new(),
            regions: HashMap::new(),
        }
    }

    /// Registers a round under the given brain region
    pub fn insert_round(&mut self, region: &str, round: Round) {
        self.regions.entry(region.to_string())
            .or_default()
            .push(round.id.clone());
        self.rounds.insert(round.id.clone(), round);
    }
}

impl RegionMetadata for InMemoryRecordings {
    fn rounds_in_region(&self, region: &str) -> Result<Vec<RoundId>, MetadataError> {
        match self.regions.get(region) {
            Some(rounds) => Ok(rounds.clone()),
            None => Err(MetadataError::UnknownRegion(region.to_string())),
        }
    }

    fn valid_channels(&self, round: &RoundId) -> Result<Vec<ChannelKey>, MetadataError> {
        match self.rounds.get(round) {
            Some(data) => Ok(data.valid_channels.clone()),
            None => Err(MetadataError::UnknownRound(round.clone())),
        }
    }
}

impl RoundSource for InMemoryRecordings {
    fn load_round(&self, round: &RoundId) -> Result<Round, SpikeAnalysisError> {
        match self.rounds.get(round) {
            Some(data) => Ok(data.clone()),
            None => Err(MetadataError::UnknownRound(round.clone()).into()),
        }
    }
}
