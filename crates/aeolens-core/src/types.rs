//! Report data model shared by analyzers and the presenter
//!
//! Field names serialize in camelCase so exported reports keep the JSON
//! shape the web front end consumes (`seoScore`, `contentAnalysis`, ...).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

const MAX_SCORE: u8 = 100;

/// What an analysis step found: a single description or an ordered list
/// (for example, the headings present on a page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Scalar(String),
    List(Vec<String>),
}

impl ItemValue {
    /// Lines to show for this value, one per list entry.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            ItemValue::Scalar(text) => vec![text.as_str()],
            ItemValue::List(entries) => entries.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for ItemValue {
    fn from(value: &str) -> Self {
        ItemValue::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for ItemValue {
    fn from(value: Vec<String>) -> Self {
        ItemValue::List(value)
    }
}

/// One evaluated factor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisItem {
    pub value: ItemValue,
    /// 0-100
    pub score: u8,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AnalysisItem {
    pub fn new(value: impl Into<ItemValue>, score: u8, recommendations: Vec<String>) -> Self {
        Self {
            value: value.into(),
            score,
            recommendations,
        }
    }
}

/// A report item together with its JSON key and display label
#[derive(Debug, Clone, Copy)]
pub struct Factor<'a> {
    pub key: &'static str,
    pub label: &'static str,
    pub item: &'a AnalysisItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub title: AnalysisItem,
    pub headings: AnalysisItem,
    pub structured_data: AnalysisItem,
    pub content_quality: AnalysisItem,
}

impl ContentAnalysis {
    pub fn items(&self) -> [Factor<'_>; 4] {
        [
            factor("title", "Title", &self.title),
            factor("headings", "Headings", &self.headings),
            factor("structuredData", "Structured Data", &self.structured_data),
            factor("contentQuality", "Content Quality", &self.content_quality),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerpOptimization {
    pub rich_snippet_potential: AnalysisItem,
    pub featured_snippet_optimization: AnalysisItem,
    pub question_based_content: AnalysisItem,
    pub ai_answer_source_potential: AnalysisItem,
}

impl SerpOptimization {
    pub fn items(&self) -> [Factor<'_>; 4] {
        [
            factor(
                "richSnippetPotential",
                "Rich Snippet Potential",
                &self.rich_snippet_potential,
            ),
            factor(
                "featuredSnippetOptimization",
                "Featured Snippet Potential",
                &self.featured_snippet_optimization,
            ),
            factor(
                "questionBasedContent",
                "Question-Based Content",
                &self.question_based_content,
            ),
            factor(
                "aiAnswerSourcePotential",
                "AI Answer Source Potential",
                &self.ai_answer_source_potential,
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSeo {
    pub meta_tags: AnalysisItem,
    pub page_speed: AnalysisItem,
    pub mobile_optimization: AnalysisItem,
    pub structured_data_validity: AnalysisItem,
}

impl TechnicalSeo {
    pub fn items(&self) -> [Factor<'_>; 4] {
        [
            factor("metaTags", "Meta Tags", &self.meta_tags),
            factor("pageSpeed", "Page Speed", &self.page_speed),
            factor(
                "mobileOptimization",
                "Mobile Optimization",
                &self.mobile_optimization,
            ),
            factor(
                "structuredDataValidity",
                "Structured Data Validity",
                &self.structured_data_validity,
            ),
        ]
    }
}

fn factor<'a>(key: &'static str, label: &'static str, item: &'a AnalysisItem) -> Factor<'a> {
    Factor { key, label, item }
}

/// Recommendation urgency, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort key: 0 for High through 2 for Low.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "SEO")]
    Seo,
    #[serde(rename = "AEO")]
    Aeo,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Seo => "SEO",
            Category::Aeo => "AEO",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seo" => Ok(Category::Seo),
            "aeo" => Ok(Category::Aeo),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// One prioritized action item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: Category,
    pub recommendation: String,
}

impl Recommendation {
    pub fn new(priority: Priority, category: Category, text: impl Into<String>) -> Self {
        Self {
            priority,
            category,
            recommendation: text.into(),
        }
    }
}

/// Full audit result for one URL at one point in time.
///
/// Built once by an analyzer and then only read; filtering and sorting in
/// [`crate::presenter`] always produce new vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub seo_score: u8,
    pub aeo_score: u8,
    pub content_analysis: ContentAnalysis,
    pub serp_optimization: SerpOptimization,
    pub technical_seo: TechnicalSeo,
    #[serde(default)]
    pub prioritized_recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    /// Parse an exported report, rejecting any score above 100.
    pub fn from_json(input: &str) -> Result<Self, ReportError> {
        let report: Self = serde_json::from_str(input)?;
        report.validate()?;
        Ok(report)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        let headline = [("seoScore", self.seo_score), ("aeoScore", self.aeo_score)];
        let factors = self.factors().map(|factor| (factor.key, factor.item.score));
        match headline
            .into_iter()
            .chain(factors)
            .find(|&(_, score)| score > MAX_SCORE)
        {
            Some((field, score)) => Err(ReportError::ScoreOutOfRange { field, score }),
            None => Ok(()),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// All twelve factors, grouped content, SERP, then technical.
    pub fn factors(&self) -> impl Iterator<Item = Factor<'_>> {
        self.content_analysis
            .items()
            .into_iter()
            .chain(self.serp_optimization.items())
            .chain(self.technical_seo.items())
    }
}
