//! Chart and release version resolution
//!
//! Both lookups refresh the repository index first, every time. Answers are
//! never cached across calls.

use crate::api::helm::HelmClient;
use crate::api::runner::CommandRunner;
use crate::core::services::types::ChartRef;
use crate::core::version::{find_chart_version, find_release_version, next_patch_version};
use crate::error::{AppError, HelmError};

pub struct ReleaseService<'a, R: CommandRunner> {
    helm: &'a HelmClient<R>,
}

impl<'a, R: CommandRunner> ReleaseService<'a, R> {
    pub fn new(helm: &'a HelmClient<R>) -> Self {
        Self { helm }
    }

    /// Explicit version if given, else the latest published version of the
    /// chart, else `0.0.0`
    pub async fn resolve_chart_version(
        &self,
        chart: &ChartRef,
        explicit: Option<&str>,
    ) -> Result<String, HelmError> {
        if let Some(version) = explicit {
            return Ok(version.to_string());
        }

        self.helm.repo_update().await?;
        let output = self.helm.search(&chart.chart).await?;
        let version = find_chart_version(&output, &chart.repo, &chart.chart);
        log::debug!("Latest published version of {}: {}", chart.id(), version);
        Ok(version)
    }

    /// Currently deployed version of `release`, `None` when not deployed
    pub async fn resolve_release_version(&self, release: &str) -> Result<Option<String>, HelmError> {
        self.helm.repo_update().await?;
        let output = self.helm.list().await?;
        let version = find_release_version(&output, release);
        log::debug!("Deployed version of {}: {:?}", release, version);
        Ok(version)
    }

    /// Explicit version if given, else the next patch after the latest
    /// published version
    pub async fn next_package_version(
        &self,
        chart: &ChartRef,
        explicit: Option<&str>,
    ) -> Result<String, AppError> {
        if let Some(version) = explicit {
            return Ok(version.to_string());
        }
        let latest = self.resolve_chart_version(chart, None).await?;
        Ok(next_patch_version(&latest)?)
    }
}
