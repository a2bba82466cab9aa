//! Analyzer contract and the two analyzers that ship with aeolens
//!
//! Real crawling and scoring live outside this crate. An [`Analyzer`] takes a
//! normalized URL and eventually yields one [`AnalysisReport`] or an
//! [`AnalysisFailure`]. [`FixtureAnalyzer`] replays a preset outcome and
//! [`SampleAnalyzer`] produces the demo report used by the CLI.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::AnalysisFailure;
use crate::types::{
    AnalysisItem, AnalysisReport, Category, ContentAnalysis, Priority, Recommendation,
    SerpOptimization, TechnicalSeo,
};
use crate::url_utils::NormalizedUrl;

/// Produces a report for a normalized URL
pub trait Analyzer: Send + Sync {
    fn analyze(
        &self,
        url: &NormalizedUrl,
    ) -> impl Future<Output = Result<AnalysisReport, AnalysisFailure>> + Send;
}

/// Replays a preset outcome, optionally after a delay.
///
/// Successful reports are returned with `url` set to the requested URL.
#[derive(Debug)]
pub struct FixtureAnalyzer {
    outcome: Result<AnalysisReport, AnalysisFailure>,
    latency: Duration,
    calls: AtomicUsize,
}

impl FixtureAnalyzer {
    pub fn report(report: AnalysisReport) -> Self {
        Self::new(Ok(report))
    }

    pub fn failing(failure: AnalysisFailure) -> Self {
        Self::new(Err(failure))
    }

    fn new(outcome: Result<AnalysisReport, AnalysisFailure>) -> Self {
        Self {
            outcome,
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of `analyze` calls started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Analyzer for FixtureAnalyzer {
    async fn analyze(&self, url: &NormalizedUrl) -> Result<AnalysisReport, AnalysisFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut report = self.outcome.clone()?;
        report.url = url.to_string();
        Ok(report)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SampleAnalyzerConfig {
    /// Simulated processing time before the report is returned
    pub latency: Duration,
    /// Fixed report timestamp; the current time when `None`
    pub timestamp: Option<DateTime<Utc>>,
}

/// Demo analyzer that fills the full report shape without fetching anything.
///
/// Scores are derived from a hash of the URL, so one URL always yields the
/// same scores while different URLs get different ones.
#[derive(Debug, Clone, Default)]
pub struct SampleAnalyzer {
    config: SampleAnalyzerConfig,
}

impl SampleAnalyzer {
    pub fn new(config: SampleAnalyzerConfig) -> Self {
        Self { config }
    }

    /// Build the report synchronously, without the configured latency.
    pub fn build_report(&self, url: &NormalizedUrl) -> AnalysisReport {
        let scores = ScoreSeed::new(url.as_str());
        let item = |field: &str, value: &str, advice: &str| {
            AnalysisItem::new(value, scores.item(field), vec![advice.to_string()])
        };

        AnalysisReport {
            url: url.to_string(),
            timestamp: self.config.timestamp.unwrap_or_else(Utc::now),
            seo_score: scores.headline("seoScore"),
            aeo_score: scores.headline("aeoScore"),
            content_analysis: ContentAnalysis {
                title: item(
                    "title",
                    "Sample Page Title",
                    "Consider adding a question-based title for better AEO",
                ),
                headings: AnalysisItem::new(
                    vec![
                        "H1: Main Heading".to_string(),
                        "H2: Subheading 1".to_string(),
                        "H2: Subheading 2".to_string(),
                    ],
                    scores.item("headings"),
                    vec!["Use more question-based H2 headings".to_string()],
                ),
                structured_data: item(
                    "structuredData",
                    "Found FAQ and Article schema",
                    "Add HowTo schema for better rich snippet opportunities",
                ),
                content_quality: item(
                    "contentQuality",
                    "Comprehensive with clear sections",
                    "Improve direct answers to common questions",
                ),
            },
            serp_optimization: SerpOptimization {
                rich_snippet_potential: item(
                    "richSnippetPotential",
                    "Medium",
                    "Add more structured data for rich snippet opportunities",
                ),
                featured_snippet_optimization: item(
                    "featuredSnippetOptimization",
                    "Low",
                    "Structure content with clear definitions and steps",
                ),
                question_based_content: item(
                    "questionBasedContent",
                    "3 question headings found",
                    "Add more question-based headings with direct answers",
                ),
                ai_answer_source_potential: item(
                    "aiAnswerSourcePotential",
                    "Medium",
                    "Provide more concise, factual information in short paragraphs",
                ),
            },
            technical_seo: TechnicalSeo {
                meta_tags: item(
                    "metaTags",
                    "Meta description present, title tag optimized",
                    "Add meta description with a question format",
                ),
                page_speed: item(
                    "pageSpeed",
                    "Estimated: Medium",
                    "Optimize image sizes, reduce JavaScript",
                ),
                mobile_optimization: item(
                    "mobileOptimization",
                    "Responsive design detected",
                    "Improve tap target spacing for mobile users",
                ),
                structured_data_validity: item(
                    "structuredDataValidity",
                    "Valid schema detected",
                    "Expand schema coverage to all major content sections",
                ),
            },
            prioritized_recommendations: sample_recommendations(),
        }
    }
}

impl Analyzer for SampleAnalyzer {
    async fn analyze(&self, url: &NormalizedUrl) -> Result<AnalysisReport, AnalysisFailure> {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
        Ok(self.build_report(url))
    }
}

fn sample_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            Priority::High,
            Category::Aeo,
            "Add more question-based H2 headings with direct answers below them",
        ),
        Recommendation::new(
            Priority::High,
            Category::Seo,
            "Implement FAQ schema markup for common questions",
        ),
        Recommendation::new(
            Priority::Medium,
            Category::Aeo,
            "Structure content as direct answers to likely queries",
        ),
        Recommendation::new(
            Priority::Medium,
            Category::Seo,
            "Improve meta description with a question format",
        ),
        Recommendation::new(Priority::Low, Category::Seo, "Add alt text to all images"),
    ]
}

struct ScoreSeed<'a> {
    url: &'a str,
}

impl<'a> ScoreSeed<'a> {
    fn new(url: &'a str) -> Self {
        Self { url }
    }

    // 60-99
    fn headline(&self, field: &str) -> u8 {
        self.pick(field, 60, 40)
    }

    // 70-99
    fn item(&self, field: &str) -> u8 {
        self.pick(field, 70, 30)
    }

    fn pick(&self, field: &str, base: u8, span: u8) -> u8 {
        let hash = xxh3_64(format!("{}#{}", self.url, field).as_bytes());
        base + (hash % u64::from(span)) as u8
    }
}
