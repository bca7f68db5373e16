//! Assembly of regression design matrices from social-behavior features and
//! averaged spike rates, and an ordinary least squares solver.
//!
//! Subjects are addressed by name against a typed feature table rather than
//! by column position, and the feature schema is validated when rows are
//! ingested. The join between the fixed subject label list and the rate
//! table is a left join: a subject with no recorded neural data keeps its
//! row with a target of `0.` rather than being dropped.

use std::collections::HashMap;
use ndarray::{Array1, Array2};
use crate::error::{RegressionError, SpikeAnalysisError, ValidationError};


/// Named social-feature columns with one row of values per subject
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectFeatures {
    feature_names: Vec<String>,
    rows: HashMap<String, Vec<f64>>,
}

impl SubjectFeatures {
    /// Creates an empty table with the given feature schema
    pub fn new(feature_names: Vec<String>) -> Self {
        SubjectFeatures {
            feature_names,
            rows: HashMap::new(),
        }
    }

    /// Declared feature names, in column order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Adds one subject's feature row, validating its length against the
    /// declared schema
    pub fn insert_row(&mut self, subject: &str, values: Vec<f64>) -> Result<(), ValidationError> {
        if values.len() != self.feature_names.len() {
            return Err(
                ValidationError::FeatureLengthMismatch {
                    subject: subject.to_string(),
                    expected: self.feature_names.len(),
                    found: values.len(),
                }
            );
        }

        self.rows.insert(subject.to_string(), values);

        Ok(())
    }

    /// The feature row for the given subject if one was ingested
    pub fn row(&self, subject: &str) -> Option<&[f64]> {
        self.rows.get(subject).map(|i| i.as_slice())
    }

    /// Scales each feature column by its maximum value, columns whose
    /// maximum is not positive are left untouched
    pub fn normalize_columns(&mut self) {
        for column in 0..self.feature_names.len() {
            let maximum = self.rows.values()
                .map(|row| row[column])
                .fold(f64::NEG_INFINITY, f64::max);

            if maximum > 0. {
                for row in self.rows.values_mut() {
                    row[column] /= maximum;
                }
            }
        }
    }
}

fn design_row(
    subject: &str,
    features: &SubjectFeatures,
) -> Result<Vec<f64>, ValidationError> {
    let mut row = match features.row(subject) {
        Some(values) => values.to_vec(),
        None => return Err(ValidationError::MissingSubjectFeatures(subject.to_string())),
    };

    // trailing constant column for the regression intercept
    row.push(1.);

    Ok(row)
}

/// Assembles the design matrix and target vector for the fixed subject list
///
/// Each row holds the subject's feature values followed by an intercept
/// column of `1.`s, the target is the subject's averaged rate left joined on
/// the subject label with a fill of `0.` for subjects without recorded
/// neural data. A subject without a feature row is a validation error.
pub fn assemble_design(
    subjects: &[String],
    features: &SubjectFeatures,
    rates: &HashMap<String, f64>,
) -> Result<(Array2<f64>, Array1<f64>), SpikeAnalysisError> {
    if subjects.is_empty() {
        return Err(ValidationError::EmptySubjectList.into());
    }

    let width = features.feature_names().len() + 1;
    let mut design = Array2::<f64>::zeros((subjects.len(), width));
    let mut target = Array1::<f64>::zeros(subjects.len());

    for (index, subject) in subjects.iter().enumerate() {
        let row = design_row(subject, features)?;

        for (column, value) in row.iter().enumerate() {
            design[[index, column]] = *value;
        }

        target[index] = rates.get(subject).copied().unwrap_or(0.);
    }

    Ok((design, target))
}

/// Assembles a per-trial design matrix for one channel's rate lists
///
/// Each subject's design row is repeated once per rate recorded for that
/// subject so individual trials can be regressed directly, a subject without
/// a rate list contributes no rows
pub fn assemble_trial_design(
    subjects: &[String],
    features: &SubjectFeatures,
    channel_rates: &HashMap<String, Vec<f64>>,
) -> Result<(Array2<f64>, Array1<f64>), SpikeAnalysisError> {
    if subjects.is_empty() {
        return Err(ValidationError::EmptySubjectList.into());
    }

    let width = features.feature_names().len() + 1;
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut targets: Vec<f64> = Vec::new();

    for subject in subjects.iter() {
        let rates = match channel_rates.get(subject) {
            Some(rates) => rates,
            None => continue,
        };

        let row = design_row(subject, features)?;

        for rate in rates.iter() {
            rows.push(row.clone());
            targets.push(*rate);
        }
    }

    let mut design = Array2::<f64>::zeros((rows.len(), width));
    for (index, row) in rows.iter().enumerate() {
        for (column, value) in row.iter().enumerate() {
            design[[index, column]] = *value;
        }
    }

    Ok((design, Array1::from(targets)))
}

/// Solves ordinary least squares through the normal equations,
/// `beta = (X'X)^-1 X'y`
pub fn ols(design: &Array2<f64>, target: &Array1<f64>) -> Result<Array1<f64>, RegressionError> {
    if design.nrows() != target.len() {
        return Err(
            RegressionError::DimensionMismatch {
                design_rows: design.nrows(),
                target_rows: target.len(),
            }
        );
    }

    let normal = design.t().dot(design);
    let inverse = invert(&normal)?;
    let moment = design.t().dot(target);

    Ok(inverse.dot(&moment))
}

// Gauss-Jordan elimination with partial pivoting
fn invert(matrix: &Array2<f64>) -> Result<Array2<f64>, RegressionError> {
    let n = matrix.nrows();

    let mut augmented = Array2::<f64>::zeros((n, 2 * n));
    for row in 0..n {
        for column in 0..n {
            augmented[[row, column]] = matrix[[row, column]];
        }
        augmented[[row, n + row]] = 1.;
    }

    for pivot in 0..n {
        let mut best_row = pivot;
        for row in (pivot + 1)..n {
            if augmented[[row, pivot]].abs() > augmented[[best_row, pivot]].abs() {
                best_row = row;
            }
        }

        if augmented[[best_row, pivot]].abs() < 1e-12 {
            return Err(RegressionError::SingularNormalMatrix);
        }

        if best_row != pivot {
            for column in 0..(2 * n) {
                augmented.swap([pivot, column], [best_row, column]);
            }
        }

        let scale = augmented[[pivot, pivot]];
        for column in 0..(2 * n) {
            augmented[[pivot, column]] /= scale;
        }

        for row in 0..n {
            if row == pivot {
                continue;
            }

            let factor = augmented[[row, pivot]];
            for column in 0..(2 * n) {
                augmented[[row, column]] -= factor * augmented[[pivot, column]];
            }
        }
    }

    let mut inverse = Array2::<f64>::zeros((n, n));
    for row in 0..n {
        for column in 0..n {
            inverse[[row, column]] = augmented[[row, n + column]];
        }
    }

    Ok(inverse)
}
