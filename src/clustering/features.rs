//! Binary skill-presence features per posting

use std::collections::BTreeSet;

use ndarray::Array2;
use statrs::statistics::Statistics;

use crate::data::Posting;

/// Columns with a standard deviation at or below this are left at zero
const MIN_STD: f64 = 1e-12;

/// Posting-by-skill matrix with a fixed, sorted skill axis
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    /// Skill name of each column
    pub skills: Vec<String>,

    /// One row per posting, in input order
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    /// 1.0 where the posting has the column's skill, else 0.0
    pub fn binary(postings: &[Posting]) -> Self {
        let skills: Vec<String> = postings
            .iter()
            .flat_map(|posting| posting.skills.iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut values: Array2<f64> = Array2::zeros((postings.len(), skills.len()));
        for (row, posting) in postings.iter().enumerate() {
            for (col, skill) in skills.iter().enumerate() {
                if posting.skills.contains(skill) {
                    values[[row, col]] = 1.0;
                }
            }
        }

        Self { skills, values }
    }

    pub fn n_samples(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }

    /// Scale each column to zero mean and unit population variance.
    /// Constant columns become all zeros.
    pub fn standardized(&self) -> Array2<f64> {
        let mut scaled = self.values.clone();

        for mut column in scaled.columns_mut() {
            let mean = column.iter().mean();
            let std = column.iter().population_std_dev();

            if !std.is_finite() || std <= MIN_STD {
                column.fill(0.0);
            } else {
                column.mapv_inplace(|v| (v - mean) / std);
            }
        }

        scaled
    }
}
