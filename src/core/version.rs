//! Version handling and parsing of helm's tabular output
//!
//! Everything in here is pure; the release service feeds it the stdout of
//! `helm search` and `helm list`.

use crate::error::VersionError;
use semver::Version;

/// Returned when `helm search` has no row for the requested chart
pub const FALLBACK_CHART_VERSION: &str = "0.0.0";

/// One row of `helm search` output
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRow {
    pub chart_id: String,
    pub version: String,
    pub app_version: Option<String>,
}

/// One row of `helm list` output
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRow {
    pub name: String,
    pub version: String,
}

/// Parse `helm search` output. The header line is discarded and each
/// remaining line is split on whitespace.
pub fn parse_search_output(output: &str) -> Vec<SearchRow> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut columns = line.split_whitespace();
            let chart_id = columns.next()?;
            let version = columns.next()?;
            Some(SearchRow {
                chart_id: chart_id.to_string(),
                version: version.to_string(),
                app_version: columns.next().map(str::to_string),
            })
        })
        .collect()
}

/// Parse `helm list` output. The header line is discarded and each remaining
/// line is split on tabs; fields are trimmed.
pub fn parse_list_output(output: &str) -> Vec<ReleaseRow> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let name = fields.next()?.trim();
            let version = fields.next()?.trim();
            if name.is_empty() {
                return None;
            }
            Some(ReleaseRow {
                name: name.to_string(),
                version: version.to_string(),
            })
        })
        .collect()
}

/// Version of `repo/chart` in search output, or [`FALLBACK_CHART_VERSION`]
pub fn find_chart_version(output: &str, repo: &str, chart: &str) -> String {
    let chart_id = format!("{}/{}", repo, chart);
    parse_search_output(output)
        .into_iter()
        .find(|row| row.chart_id == chart_id)
        .map(|row| row.version)
        .unwrap_or_else(|| FALLBACK_CHART_VERSION.to_string())
}

/// Deployed version of `release` in list output
pub fn find_release_version(output: &str, release: &str) -> Option<String> {
    parse_list_output(output)
        .into_iter()
        .find(|row| row.name == release)
        .map(|row| row.version)
}

/// Bump the patch component of a `MAJOR.MINOR.PATCH` version.
///
/// Pre-release and build metadata are dropped from the result.
pub fn next_patch_version(version: &str) -> Result<String, VersionError> {
    let parsed = Version::parse(version.trim()).map_err(|e| VersionError::Invalid {
        version: version.to_string(),
        reason: e.to_string(),
    })?;

    let patch = parsed
        .patch
        .checked_add(1)
        .ok_or_else(|| VersionError::Invalid {
            version: version.to_string(),
            reason: "patch component cannot be incremented".to_string(),
        })?;
    Ok(Version::new(parsed.major, parsed.minor, patch).to_string())
}
