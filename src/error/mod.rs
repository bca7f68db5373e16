use std::fmt::{Display, Debug, Formatter, Result};
use crate::trials::RoundId;


/// Error set for channel and unit key parsing
#[derive(Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Raw channel token does not match the `<letters>-<digits>` pattern
    InvalidRawChannel(String),
    /// Sorted unit key does not match the `<prefix>_<letter><digits>_<suffix>` pattern
    InvalidUnitKey(String),
}

impl Display for ChannelError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ChannelError::InvalidRawChannel(token) => {
                write!(f, "Raw channel token could not be parsed: '{}'", token)
            },
            ChannelError::InvalidUnitKey(key) => {
                write!(f, "Sorted unit key could not be parsed: '{}'", key)
            },
        }
    }
}

impl Debug for ChannelError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for metadata lookups
#[derive(Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// No recording exists for the given round
    UnknownRound(RoundId),
    /// No rounds are recorded for the given brain region
    UnknownRegion(String),
}

impl Display for MetadataError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            MetadataError::UnknownRound(round) => {
                write!(f, "No recording metadata for round: {}", round)
            },
            MetadataError::UnknownRegion(region) => {
                write!(f, "No rounds recorded for brain region: '{}'", region)
            },
        }
    }
}

impl Debug for MetadataError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for upstream record validation
#[derive(Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A subject in the fixed label list has no feature row
    MissingSubjectFeatures(String),
    /// A subject's feature row length deviates from the declared feature names
    FeatureLengthMismatch {
        /// Subject whose row is malformed
        subject: String,
        /// Number of declared feature names
        expected: usize,
        /// Number of values found in the row
        found: usize,
    },
    /// No subjects were given to assemble a design matrix from
    EmptySubjectList,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ValidationError::MissingSubjectFeatures(subject) => {
                write!(f, "Subject '{}' has no feature row", subject)
            },
            ValidationError::FeatureLengthMismatch { subject, expected, found } => {
                write!(
                    f,
                    "Subject '{}' has {} feature values but {} feature names are declared",
                    subject, found, expected,
                )
            },
            ValidationError::EmptySubjectList => {
                write!(f, "Subject label list must not be empty")
            },
        }
    }
}

impl Debug for ValidationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for regression solving
#[derive(Clone, PartialEq, Eq)]
pub enum RegressionError {
    /// Design matrix and target vector row counts differ
    DimensionMismatch {
        /// Rows in the design matrix
        design_rows: usize,
        /// Entries in the target vector
        target_rows: usize,
    },
    /// Normal matrix is singular and cannot be inverted
    SingularNormalMatrix,
}

impl Display for RegressionError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            RegressionError::DimensionMismatch { design_rows, target_rows } => {
                write!(
                    f,
                    "Design matrix has {} rows but target vector has {} entries",
                    design_rows, target_rows,
                )
            },
            RegressionError::SingularNormalMatrix => {
                write!(f, "Normal matrix is singular, least squares has no unique solution")
            },
        }
    }
}

impl Debug for RegressionError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// A set of errors that may occur when using the library
#[derive(Clone, PartialEq, Eq)]
pub enum SpikeAnalysisError {
    /// Errors related to channel and unit key parsing
    ChannelRelatedError(ChannelError),
    /// Errors related to recording metadata lookups
    MetadataRelatedError(MetadataError),
    /// Errors related to upstream record validation
    ValidationRelatedError(ValidationError),
    /// Errors related to regression solving
    RegressionRelatedError(RegressionError),
}

impl Display for SpikeAnalysisError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            SpikeAnalysisError::ChannelRelatedError(err) => write!(f, "{}", err),
            SpikeAnalysisError::MetadataRelatedError(err) => write!(f, "{}", err),
            SpikeAnalysisError::ValidationRelatedError(err) => write!(f, "{}", err),
            SpikeAnalysisError::RegressionRelatedError(err) => write!(f, "{}", err),
        }
    }
}

impl Debug for SpikeAnalysisError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

impl From<ChannelError> for SpikeAnalysisError {
    fn from(err: ChannelError) -> SpikeAnalysisError {
        SpikeAnalysisError::ChannelRelatedError(err)
    }
}

impl From<MetadataError> for SpikeAnalysisError {
    fn from(err: MetadataError) -> SpikeAnalysisError {
        SpikeAnalysisError::MetadataRelatedError(err)
    }
}

impl From<ValidationError> for SpikeAnalysisError {
    fn from(err: ValidationError) -> SpikeAnalysisError {
        SpikeAnalysisError::ValidationRelatedError(err)
    }
}

impl From<RegressionError> for SpikeAnalysisError {
    fn from(err: RegressionError) -> SpikeAnalysisError {
        SpikeAnalysisError::RegressionRelatedError(err)
    }
}
