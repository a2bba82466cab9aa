//! Markdown rendering of an audit report for the terminal

use std::fmt::Write as FmtWrite;

use aeolens_core::presenter::{
    Band, BandedFactor, Filter, ScoreSection, aeo_breakdown, band_score, content_breakdown,
    filter_recommendations, gauge_geometry, seo_breakdown, serp_breakdown, top_recommendations,
};
use aeolens_core::types::{AnalysisReport, Category, Priority, Recommendation};
use aeolens_core::{PresenterError, ReportSummary};

const DIVIDER: &str = "─────────────────────────────────────────────────────────────";
const LABEL_WIDTH: usize = 16;
const GAUGE_CELLS: usize = 20;

/// Which recommendations to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub category: Filter<Category>,
    pub priority: Filter<Priority>,
    pub top: Option<i64>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            category: Filter::All,
            priority: Filter::All,
            top: None,
        }
    }
}

/// Recommendations to show: the first `top` of the report when set, then
/// narrowed by the category and priority filters.
pub fn select_recommendations(
    report: &AnalysisReport,
    view: &ViewOptions,
) -> Result<Vec<Recommendation>, PresenterError> {
    let base = match view.top {
        Some(n) => top_recommendations(report, n)?,
        None => report.prioritized_recommendations.clone(),
    };
    Ok(filter_recommendations(&base, view.category, view.priority))
}

pub fn render_markdown(
    report: &AnalysisReport,
    view: &ViewOptions,
) -> Result<String, PresenterError> {
    let recommendations = select_recommendations(report, view)?;
    let summary = ReportSummary::from_report(report);
    let mut output = String::new();

    push_section_header(&mut output, "🔎", "AEO & SEO Analysis");
    push_key_value(&mut output, "URL", &report.url);
    push_key_value(
        &mut output,
        "Analyzed",
        &report.timestamp.format("%B %-d, %Y %H:%M UTC").to_string(),
    );
    push_key_value(&mut output, "SEO Score", &score_line(report.seo_score));
    push_key_value(&mut output, "AEO Score", &score_line(report.aeo_score));
    push_key_value(
        &mut output,
        "Actions",
        &format!(
            "{} high / {} medium / {} low",
            summary.high, summary.medium, summary.low
        ),
    );
    let _ = writeln!(output);

    render_top_priorities(&mut output, &summary.top);
    render_section(&mut output, "📝", &content_breakdown(report));
    render_section(&mut output, "🔍", &serp_breakdown(report));
    render_section(&mut output, "📈", &seo_breakdown(report));
    render_section(&mut output, "🤖", &aeo_breakdown(report));
    render_recommendations(&mut output, &recommendations);

    Ok(output)
}

fn push_section_header(buf: &mut String, icon: &str, title: &str) {
    let _ = writeln!(buf, "{DIVIDER}");
    let _ = writeln!(buf, "{icon} {title}");
    let _ = writeln!(buf, "{DIVIDER}");
}

fn push_key_value(buf: &mut String, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let _ = writeln!(buf, "• {:<width$} : {}", label, value, width = LABEL_WIDTH);
}

fn score_line(score: u8) -> String {
    let score = i32::from(score);
    format!(
        "{}/100 {} {}",
        score,
        gauge_bar(score),
        band_score(score).label()
    )
}

/// Text stand-in for the dial: filled cells proportional to the sweep.
pub fn gauge_bar(score: i32) -> String {
    let sweep = gauge_geometry(score).sweep_angle_degrees;
    let filled = ((sweep / 180.0) * GAUGE_CELLS as f64).round() as usize;
    let filled = filled.min(GAUGE_CELLS);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(GAUGE_CELLS - filled))
}

fn band_icon(band: Band) -> &'static str {
    match band {
        Band::Good => "✅",
        Band::Warning => "⚠️",
        Band::Poor => "❌",
    }
}

fn render_section(buf: &mut String, icon: &str, section: &ScoreSection<'_>) {
    push_section_header(buf, icon, section.title);
    let _ = writeln!(buf, "{}", section.description);
    let _ = writeln!(buf);
    for banded in &section.items {
        render_factor(buf, banded);
    }
}

fn render_factor(buf: &mut String, banded: &BandedFactor<'_>) {
    let item = banded.factor.item;
    let _ = writeln!(
        buf,
        "{} {} ({}/100)",
        band_icon(banded.band),
        banded.factor.label,
        item.score
    );
    for line in item.value.lines() {
        let _ = writeln!(buf, "    {line}");
    }
    for advice in &item.recommendations {
        let _ = writeln!(buf, "    ↳ {advice}");
    }
    let _ = writeln!(buf);
}

fn render_top_priorities(buf: &mut String, top: &[Recommendation]) {
    if top.is_empty() {
        return;
    }
    push_section_header(buf, "⭐", "Top Priorities");
    for rec in top {
        let _ = writeln!(buf, "→ [{}] {}", rec.category, rec.recommendation);
    }
    let _ = writeln!(buf);
}

fn render_recommendations(buf: &mut String, recommendations: &[Recommendation]) {
    push_section_header(buf, "🛠️", "Recommendations");
    if recommendations.is_empty() {
        let _ = writeln!(buf, "No recommendations match the selected filters.");
        return;
    }
    for (index, rec) in recommendations.iter().enumerate() {
        let _ = writeln!(
            buf,
            "{}. [{}] [{} Priority] {}",
            index + 1,
            rec.category,
            rec.priority,
            rec.recommendation
        );
    }
}
