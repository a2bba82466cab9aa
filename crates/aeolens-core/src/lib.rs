//! # aeolens-core
//!
//! Core library behind the aeolens SEO/AEO audit viewer.
//!
//! This library provides:
//! - URL normalization for user-entered addresses
//! - The audit report data model and its JSON shape
//! - Pure presentation rules: score bands, gauge geometry, recommendation
//!   filtering and ordering
//! - The analyzer contract plus a single-request session around it
//!
//! ## Example
//!
//! ```
//! use aeolens_core::presenter::{Band, Filter, band_score, filter_recommendations};
//! use aeolens_core::types::{Category, Priority, Recommendation};
//!
//! assert_eq!(band_score(85), Band::Good);
//!
//! let recs = vec![
//!     Recommendation::new(Priority::High, Category::Aeo, "Answer questions directly"),
//!     Recommendation::new(Priority::Low, Category::Seo, "Add alt text to all images"),
//! ];
//! let seo = filter_recommendations(&recs, Filter::Only(Category::Seo), Filter::All);
//! assert_eq!(seo.len(), 1);
//! ```

pub mod analyzer;
pub mod error;
pub mod presenter;
pub mod session;
pub mod types;
pub mod url_utils;

// Re-export commonly used types
pub use analyzer::{Analyzer, FixtureAnalyzer, SampleAnalyzer, SampleAnalyzerConfig};
pub use error::{AnalysisFailure, PresenterError, ReportError, SubmitError, ValidationError};
pub use presenter::{
    Band, Filter, GaugeGeometry, ReportSummary, band_score, filter_recommendations,
    gauge_geometry, top_recommendations,
};
pub use session::{AnalysisSession, SessionConfig, SessionState};
pub use types::{AnalysisItem, AnalysisReport, Category, ItemValue, Priority, Recommendation};
pub use url_utils::{NormalizedUrl, normalize};
