/// A chart addressed through a repository alias
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRef {
    pub repo: String,
    pub chart: String,
}

impl ChartRef {
    /// Build from a CLI argument. `repo/chart` overrides the given repo,
    /// a bare name uses it.
    pub fn parse(input: &str, repo: &str) -> Self {
        match input.split_once('/') {
            Some((repo, chart)) => Self {
                repo: repo.to_string(),
                chart: chart.to_string(),
            },
            None => Self {
                repo: repo.to_string(),
                chart: input.to_string(),
            },
        }
    }

    /// Identifier as it appears in `helm search` output
    pub fn id(&self) -> String {
        format!("{}/{}", self.repo, self.chart)
    }
}

/// Release name, defaulting to the chart name
pub fn release_name(release: Option<String>, chart: &ChartRef) -> String {
    release
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| chart.chart.clone())
}
