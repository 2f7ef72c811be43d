// ============================================================
// Layer 5: Nearest Centroid Classifier
// ============================================================
// Averages the TF-IDF rows of each class and assigns a new
// message to the class whose centroid is closest in Euclidean
// distance. Ties go to ham.
//
// The model only produces a hard label: no probability and
// no decision score.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::domain::message::Label;
use crate::ml::sparse::SparseVector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestCentroid {
    pub ham_centroid:  Vec<f64>,
    pub spam_centroid: Vec<f64>,
}

impl NearestCentroid {
    pub fn fit(x: &[SparseVector], y: &[Label], n_features: usize) -> Result<Self> {
        let mut ham  = vec![0.0; n_features];
        let mut spam = vec![0.0; n_features];
        let (mut n_ham, mut n_spam) = (0usize, 0usize);

        for (xi, yi) in x.iter().zip(y) {
            match yi {
                Label::Ham  => { xi.add_scaled_to(&mut ham, 1.0);  n_ham  += 1; }
                Label::Spam => { xi.add_scaled_to(&mut spam, 1.0); n_spam += 1; }
            }
        }

        if n_ham == 0 || n_spam == 0 {
            bail!("nearest centroid needs both classes in the training set (ham={n_ham}, spam={n_spam})");
        }

        ham.iter_mut().for_each(|v| *v /= n_ham as f64);
        spam.iter_mut().for_each(|v| *v /= n_spam as f64);

        Ok(Self { ham_centroid: ham, spam_centroid: spam })
    }

    /// ‖x − c‖² without densifying x
    fn squared_distance(x: &SparseVector, centroid: &[f64]) -> f64 {
        let c_norm: f64 = centroid.iter().map(|v| v * v).sum();
        x.squared_norm() - 2.0 * x.dot(centroid) + c_norm
    }

    pub fn predict(&self, x: &SparseVector) -> Label {
        let to_ham  = Self::squared_distance(x, &self.ham_centroid);
        let to_spam = Self::squared_distance(x, &self.spam_centroid);
        if to_spam < to_ham { Label::Spam } else { Label::Ham }
    }
}
