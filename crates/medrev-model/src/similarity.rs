//! Look-Alike-Sound-Alike (LASA) similarity report shapes.
//!
//! The similarity computation runs in an external service; this crate
//! only consumes the resulting report. Scores are percentages in the
//! 0..=100 range.

use serde::{Deserialize, Serialize};

/// One candidate product that resembles the medicine under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    pub product_name: String,
    pub total_similarity: f64,
    pub visual_similarity: f64,
    pub text_similarity: f64,
    /// Package-size resemblance ("By Box" on the report card).
    pub size_similarity: f64,
    #[serde(default)]
    pub reference_images: Vec<String>,
}

impl SimilarityMatch {
    /// High-risk threshold used by the report surface.
    pub fn is_high_risk(&self) -> bool {
        self.total_similarity >= 90.0
    }
}

/// Full report for one analyzed medicine response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub response_id: String,
    #[serde(default)]
    pub matches: Vec<SimilarityMatch>,
}

impl SimilarityReport {
    /// Matches ordered by total similarity, most similar first.
    pub fn ranked(&self) -> Vec<&SimilarityMatch> {
        let mut ranked: Vec<&SimilarityMatch> = self.matches.iter().collect();
        ranked.sort_by(|a, b| {
            b.total_similarity
                .partial_cmp(&a.total_similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}
