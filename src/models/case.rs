use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Decision state of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pending,
    Decided,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parties {
    pub plaintiff: String,
    pub defendant: String,
}

/// Reference to a related case produced by analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarCase {
    pub id: String,
    pub title: String,
    /// Similarity score in [0, 1]
    pub similarity: f64,
}

impl SimilarCase {
    pub fn new(id: impl Into<String>, title: impl Into<String>, similarity: f64) -> Self {
        Self { id: id.into(), title: title.into(), similarity: similarity.clamp(0.0, 1.0) }
    }
}

/// AI-generated analysis attached to a case on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseAnalysis {
    pub summary: String,
    pub key_points: Vec<String>,
    pub legal_principles: Vec<String>,
    pub similar_cases: Vec<SimilarCase>,
    pub ai_insights: String,
}

/// Full case record as returned by the case repository
///
/// `analysis` stays `None` until generated. Saved cases hold value copies of
/// this struct, so later analysis on the live case never reaches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDetail {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub date: NaiveDate,
    pub court: String,
    pub jurisdiction: String,
    pub judges: Vec<String>,
    pub parties: Parties,
    pub citations: Vec<String>,
    pub full_text: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub status: CaseStatus,
    #[serde(default)]
    pub analysis: Option<CaseAnalysis>,
}

impl CaseDetail {
    pub fn has_analysis(&self) -> bool {
        self.analysis.is_some()
    }
}
