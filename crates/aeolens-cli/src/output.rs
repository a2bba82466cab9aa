//! Where exported reports are written

use std::fs;
use std::path::{Path, PathBuf};

use aeolens_core::AnalysisReport;
use anyhow::{Context, Result};
use url::Url;

/// Write the JSON export of `report` under `base` and return the file path.
pub fn save_report(base: &Path, report: &AnalysisReport) -> Result<PathBuf> {
    let output_path = build_output_path(base, &report.url);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }

    let json = report.to_json_pretty().context("failed to serialize report")?;
    fs::write(&output_path, json.as_bytes())
        .with_context(|| format!("failed to write report file {}", output_path.display()))?;

    tracing::info!(path = %output_path.display(), "report saved");
    Ok(output_path)
}

pub fn load_report(path: &Path) -> Result<AnalysisReport> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read report file {}", path.display()))?;
    AnalysisReport::from_json(&raw)
        .with_context(|| format!("{} is not a valid aeolens report", path.display()))
}

fn build_output_path(base: &Path, url: &str) -> PathBuf {
    let has_json_extension = base
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if has_json_extension {
        base.to_path_buf()
    } else {
        base.join(derive_output_filename(url))
    }
}

fn derive_output_filename(url: &str) -> String {
    let Ok(url) = Url::parse(url) else {
        return format!("{}.json", sanitize_for_filename(url));
    };

    let host = url.host_str().unwrap_or("page");
    let mut path_component = url.path().trim_matches('/').replace('/', "_");
    if path_component.is_empty() {
        path_component = "index".to_string();
    }

    let mut parts = vec![sanitize_for_filename(host), sanitize_for_filename(&path_component)];
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        parts.push(sanitize_for_filename(query));
    }

    format!("{}.json", parts.join("__"))
}

fn sanitize_for_filename(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
