//! Display-ready values derived from an [`AnalysisReport`]
//!
//! Everything here is a pure function of its arguments. Scores outside
//! 0-100 are clamped into range before banding or gauge math.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PresenterError;
use crate::types::{AnalysisReport, Category, Factor, Priority, Recommendation};

pub const GOOD_THRESHOLD: u8 = 80;
pub const WARNING_THRESHOLD: u8 = 60;

/// Dial layout of the score gauge in its 200x200 drawing box
pub const GAUGE_CENTER: Point = Point { x: 100.0, y: 100.0 };
pub const GAUGE_RADIUS: f64 = 80.0;
pub const NEEDLE_LENGTH: f64 = 70.0;
const GAUGE_SWEEP_DEGREES: f64 = 180.0;
/// Degrees of dial per score point, so a full score sweeps the half circle
const SWEEP_PER_POINT: f64 = 1.8;

/// Categorical bucket for a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Good,
    Warning,
    Poor,
}

impl Band {
    pub fn label(self) -> &'static str {
        match self {
            Band::Good => "Good",
            Band::Warning => "Needs work",
            Band::Poor => "Poor",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}

/// The single source of truth for score thresholds.
pub fn band_score(score: i32) -> Band {
    let score = clamp_score(score);
    if score >= GOOD_THRESHOLD {
        Band::Good
    } else if score >= WARNING_THRESHOLD {
        Band::Warning
    } else {
        Band::Poor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Angular parameters of the half-circle score dial
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeGeometry {
    pub sweep_angle_degrees: f64,
    pub needle_angle_degrees: f64,
    pub arc_large_flag: bool,
}

impl GaugeGeometry {
    /// Left end of the dial, where every arc begins.
    pub fn arc_start(&self) -> Point {
        polar_to_cartesian(GAUGE_CENTER, GAUGE_RADIUS, 0.0)
    }

    pub fn arc_end(&self) -> Point {
        polar_to_cartesian(GAUGE_CENTER, GAUGE_RADIUS, self.sweep_angle_degrees)
    }

    pub fn needle_tip(&self) -> Point {
        polar_to_cartesian(GAUGE_CENTER, NEEDLE_LENGTH, self.needle_angle_degrees)
    }
}

pub fn gauge_geometry(score: i32) -> GaugeGeometry {
    let sweep = f64::from(clamp_score(score)) * SWEEP_PER_POINT;
    GaugeGeometry {
        sweep_angle_degrees: sweep,
        needle_angle_degrees: sweep,
        arc_large_flag: sweep > GAUGE_SWEEP_DEGREES,
    }
}

/// Angles are measured clockwise from the dial's left end (9 o'clock).
pub fn polar_to_cartesian(center: Point, radius: f64, angle_degrees: f64) -> Point {
    let radians = (angle_degrees - 180.0).to_radians();
    Point {
        x: center.x + radius * radians.cos(),
        y: center.y + radius * radians.sin(),
    }
}

/// Either every value or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == value,
        }
    }
}

impl<T> FromStr for Filter<T>
where
    T: FromStr<Err = String>,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Only)
        }
    }
}

/// Recommendations matching both filters, in their original order.
pub fn filter_recommendations(
    list: &[Recommendation],
    category: Filter<Category>,
    priority: Filter<Priority>,
) -> Vec<Recommendation> {
    list.iter()
        .filter(|rec| category.matches(&rec.category) && priority.matches(&rec.priority))
        .cloned()
        .collect()
}

/// The first `n` recommendations of the report, without re-sorting.
///
/// Any integer type is accepted; a negative count is rejected with
/// [`PresenterError::InvalidCount`].
pub fn top_recommendations<N>(
    report: &AnalysisReport,
    n: N,
) -> Result<Vec<Recommendation>, PresenterError>
where
    N: TryInto<usize>,
{
    let n = n.try_into().map_err(|_| PresenterError::InvalidCount)?;
    Ok(report
        .prioritized_recommendations
        .iter()
        .take(n)
        .cloned()
        .collect())
}

/// Stable re-sort, High before Medium before Low.
pub fn sort_by_priority(list: &[Recommendation]) -> Vec<Recommendation> {
    let mut sorted = list.to_vec();
    sorted.sort_by_key(|rec| rec.priority.rank());
    sorted
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryGroups {
    pub seo: Vec<Recommendation>,
    pub aeo: Vec<Recommendation>,
}

pub fn group_by_category(list: &[Recommendation]) -> CategoryGroups {
    let mut groups = CategoryGroups::default();
    for rec in list {
        match rec.category {
            Category::Seo => groups.seo.push(rec.clone()),
            Category::Aeo => groups.aeo.push(rec.clone()),
        }
    }
    groups
}

/// A factor paired with its band
#[derive(Debug, Clone, Copy)]
pub struct BandedFactor<'a> {
    pub factor: Factor<'a>,
    pub band: Band,
}

impl<'a> From<Factor<'a>> for BandedFactor<'a> {
    fn from(factor: Factor<'a>) -> Self {
        Self {
            band: band_score(i32::from(factor.item.score)),
            factor,
        }
    }
}

/// A titled list of factors, as shown on a detail tab
#[derive(Debug, Clone)]
pub struct ScoreSection<'a> {
    pub title: &'static str,
    pub description: &'static str,
    pub items: Vec<BandedFactor<'a>>,
}

fn section<'a>(
    title: &'static str,
    description: &'static str,
    factors: [Factor<'a>; 4],
) -> ScoreSection<'a> {
    ScoreSection {
        title,
        description,
        items: factors.into_iter().map(BandedFactor::from).collect(),
    }
}

pub fn content_breakdown(report: &AnalysisReport) -> ScoreSection<'_> {
    section(
        "Content Analysis",
        "Detailed breakdown of on-page content factors",
        report.content_analysis.items(),
    )
}

pub fn serp_breakdown(report: &AnalysisReport) -> ScoreSection<'_> {
    section(
        "SERP Optimization",
        "Detailed breakdown of search result placement factors",
        report.serp_optimization.items(),
    )
}

pub fn seo_breakdown(report: &AnalysisReport) -> ScoreSection<'_> {
    section(
        "SEO Analysis",
        "Detailed breakdown of Search Engine Optimization factors",
        report.technical_seo.items(),
    )
}

pub fn aeo_breakdown(report: &AnalysisReport) -> ScoreSection<'_> {
    let [_, featured, questions, ai_source] = report.serp_optimization.items();
    let content_quality = report.content_analysis.items()[3];

    section(
        "AEO Analysis",
        "Detailed breakdown of Answer Engine Optimization factors",
        [content_quality, questions, featured, ai_source],
    )
}

/// Headline view of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub seo_band: Band,
    pub aeo_band: Band,
    pub seo_gauge: GaugeGeometry,
    pub aeo_gauge: GaugeGeometry,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub top: Vec<Recommendation>,
}

const SUMMARY_TOP_COUNT: usize = 3;

impl ReportSummary {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let count = |priority: Priority| {
            report
                .prioritized_recommendations
                .iter()
                .filter(|rec| rec.priority == priority)
                .count()
        };

        Self {
            seo_band: band_score(i32::from(report.seo_score)),
            aeo_band: band_score(i32::from(report.aeo_score)),
            seo_gauge: gauge_geometry(i32::from(report.seo_score)),
            aeo_gauge: gauge_geometry(i32::from(report.aeo_score)),
            high: count(Priority::High),
            medium: count(Priority::Medium),
            low: count(Priority::Low),
            top: top_recommendations(report, SUMMARY_TOP_COUNT).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{report, sample_recommendations};
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(band_score(100), Band::Good);
        assert_eq!(band_score(80), Band::Good);
        assert_eq!(band_score(79), Band::Warning);
        assert_eq!(band_score(60), Band::Warning);
        assert_eq!(band_score(59), Band::Poor);
        assert_eq!(band_score(0), Band::Poor);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        assert_eq!(band_score(-5), Band::Poor);
        assert_eq!(band_score(250), Band::Good);

        let over = gauge_geometry(150);
        assert_eq!(over.sweep_angle_degrees, 180.0);
        assert!(!over.arc_large_flag);
        assert_eq!(gauge_geometry(-20).sweep_angle_degrees, 0.0);
    }

    #[test]
    fn gauge_points_match_dial_layout() {
        let empty = gauge_geometry(0);
        let start = empty.arc_start();
        assert!(approx(start.x, 20.0) && approx(start.y, 100.0));

        let half = gauge_geometry(50);
        assert_eq!(half.sweep_angle_degrees, 90.0);
        let end = half.arc_end();
        assert!(approx(end.x, 100.0) && approx(end.y, 20.0));
        let tip = half.needle_tip();
        assert!(approx(tip.x, 100.0) && approx(tip.y, 30.0));

        let full = gauge_geometry(100).arc_end();
        assert!(approx(full.x, 180.0) && approx(full.y, 100.0));
    }

    #[test]
    fn filters_by_category_preserving_order() {
        let list = sample_recommendations();
        let seo = filter_recommendations(&list, Filter::Only(Category::Seo), Filter::All);
        assert_eq!(
            seo,
            vec![
                Recommendation::new(Priority::High, Category::Seo, "B"),
                Recommendation::new(Priority::Low, Category::Seo, "D"),
            ]
        );
    }

    #[test]
    fn filters_combine_with_and() {
        let list = sample_recommendations();
        let hits = filter_recommendations(
            &list,
            Filter::Only(Category::Aeo),
            Filter::Only(Priority::Medium),
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].recommendation, "C");

        let none = filter_recommendations(
            &list,
            Filter::Only(Category::Aeo),
            Filter::Only(Priority::Low),
        );
        assert!(none.is_empty());
    }

    #[test]
    fn unfiltered_list_is_identity() {
        let list = sample_recommendations();
        assert_eq!(filter_recommendations(&list, Filter::All, Filter::All), list);
    }

    #[test]
    fn filtering_is_idempotent() {
        let list = sample_recommendations();
        let once = filter_recommendations(&list, Filter::Only(Category::Seo), Filter::All);
        let twice = filter_recommendations(&once, Filter::Only(Category::Seo), Filter::All);
        assert_eq!(once, twice);
    }

    #[test]
    fn top_recommendations_keeps_existing_order() {
        let report = report(sample_recommendations());
        let top = top_recommendations(&report, 2).unwrap();
        assert_eq!(
            top,
            vec![
                Recommendation::new(Priority::High, Category::Aeo, "A"),
                Recommendation::new(Priority::High, Category::Seo, "B"),
            ]
        );
    }

    #[test]
    fn top_recommendations_edges() {
        let report = report(sample_recommendations());
        assert!(top_recommendations(&report, 0).unwrap().is_empty());
        assert_eq!(
            top_recommendations(&report, 10usize).unwrap(),
            report.prioritized_recommendations
        );
        assert_eq!(
            top_recommendations(&report, -1),
            Err(PresenterError::InvalidCount)
        );
    }

    #[test]
    fn sort_by_priority_is_stable() {
        let list = vec![
            Recommendation::new(Priority::Low, Category::Seo, "1"),
            Recommendation::new(Priority::High, Category::Aeo, "2"),
            Recommendation::new(Priority::Medium, Category::Seo, "3"),
            Recommendation::new(Priority::High, Category::Seo, "4"),
        ];
        let order: Vec<String> = sort_by_priority(&list)
            .into_iter()
            .map(|rec| rec.recommendation)
            .collect();
        assert_eq!(order, vec!["2", "4", "3", "1"]);
    }

    #[test]
    fn groups_split_by_category() {
        let groups = group_by_category(&sample_recommendations());
        let seo: Vec<&str> = groups.seo.iter().map(|r| r.recommendation.as_str()).collect();
        let aeo: Vec<&str> = groups.aeo.iter().map(|r| r.recommendation.as_str()).collect();
        assert_eq!(seo, vec!["B", "D"]);
        assert_eq!(aeo, vec!["A", "C"]);
    }

    #[test]
    fn breakdowns_follow_detail_tabs() {
        let report = report(vec![]);

        let seo = seo_breakdown(&report);
        let labels: Vec<&str> = seo.items.iter().map(|b| b.factor.label).collect();
        assert_eq!(
            labels,
            vec![
                "Meta Tags",
                "Page Speed",
                "Mobile Optimization",
                "Structured Data Validity"
            ]
        );
        let bands: Vec<Band> = seo.items.iter().map(|b| b.band).collect();
        assert_eq!(bands, vec![Band::Good, Band::Poor, Band::Warning, Band::Poor]);

        let aeo = aeo_breakdown(&report);
        let keys: Vec<&str> = aeo.items.iter().map(|b| b.factor.key).collect();
        assert_eq!(
            keys,
            vec![
                "contentQuality",
                "questionBasedContent",
                "featuredSnippetOptimization",
                "aiAnswerSourcePotential"
            ]
        );
    }

    #[test]
    fn content_and_serp_breakdowns_cover_their_groups() {
        let report = report(vec![]);

        let content = content_breakdown(&report);
        assert_eq!(content.title, "Content Analysis");
        let keys: Vec<&str> = content.items.iter().map(|b| b.factor.key).collect();
        assert_eq!(
            keys,
            vec!["title", "headings", "structuredData", "contentQuality"]
        );
        let bands: Vec<Band> = content.items.iter().map(|b| b.band).collect();
        assert_eq!(bands, vec![Band::Good, Band::Warning, Band::Poor, Band::Good]);

        let serp = serp_breakdown(&report);
        assert_eq!(serp.items.len(), 4);
        assert_eq!(serp.items[0].factor.label, "Rich Snippet Potential");
        assert_eq!(serp.items[1].band, Band::Poor);
    }

    #[test]
    fn summary_counts_priorities() {
        let report = report(sample_recommendations());
        let summary = ReportSummary::from_report(&report);
        assert_eq!(summary.seo_band, Band::Good);
        assert_eq!(summary.aeo_band, Band::Warning);
        assert_eq!((summary.high, summary.medium, summary.low), (2, 1, 1));
        assert_eq!(summary.top, top_recommendations(&report, 3).unwrap());
    }

    #[test]
    fn summary_top_is_short_for_small_reports() {
        let recs = vec![Recommendation::new(Priority::Low, Category::Seo, "only")];
        let summary = ReportSummary::from_report(&report(recs.clone()));
        assert_eq!(summary.top, recs);
    }

    #[test]
    fn parses_filters() {
        assert_eq!("all".parse::<Filter<Category>>().unwrap(), Filter::All);
        assert_eq!(
            "SEO".parse::<Filter<Category>>().unwrap(),
            Filter::Only(Category::Seo)
        );
        assert_eq!(
            "medium".parse::<Filter<Priority>>().unwrap(),
            Filter::Only(Priority::Medium)
        );
        assert!("nope".parse::<Filter<Priority>>().is_err());
    }

    proptest! {
        #[test]
        fn bands_partition_the_range(score in 0i32..=100) {
            let band = band_score(score);
            prop_assert_eq!(band == Band::Good, score >= 80);
            prop_assert_eq!(band == Band::Poor, score < 60);
            prop_assert_eq!(band == Band::Warning, (60..80).contains(&score));
        }

        #[test]
        fn sweep_is_linear_and_monotonic(score in 0i32..100) {
            let here = gauge_geometry(score);
            let next = gauge_geometry(score + 1);
            prop_assert_eq!(here.sweep_angle_degrees, f64::from(score) * 1.8);
            prop_assert_eq!(here.needle_angle_degrees, here.sweep_angle_degrees);
            prop_assert!(!here.arc_large_flag);
            prop_assert!(next.sweep_angle_degrees >= here.sweep_angle_degrees);
        }
    }
}
