use crate::api::chart_repo::ChartRepoClient;
use crate::api::helm::{HelmClient, UpgradeParams};
use crate::api::models::UploadOutcome;
use crate::api::runner::CommandRunner;
use crate::core::prompt::Prompter;
use crate::core::services::config_service::ConfigService;
use crate::core::services::release_service::ReleaseService;
use crate::core::services::types::{ChartRef, release_name};
use crate::core::version::FALLBACK_CHART_VERSION;
use crate::display::{OperationStatus, display_field, display_status};
use crate::error::{ApiError, AppError, CliError};
use crate::storage::config::{Config, ConfigLocation};
use crate::utils::error_helpers::convert_file_error;
use crate::utils::logging::print_verbose;
use crate::utils::validation::{validate_name, validate_url};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct InitHandler;

impl InitHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, location: &ConfigLocation, verbose: bool) -> Result<(), AppError> {
        print_verbose(
            verbose,
            &format!("Initializing config at {}", location.path.display()),
        );

        let existing = Config::load_or_default(&location.path)?;
        let mut config_service = ConfigService::new(existing);
        let mut prompter = Prompter::stdio();
        config_service.run_init(&mut prompter, &location.path)?;

        display_status(
            &format!("Configuration saved to {}", location.path.display()),
            OperationStatus::Success,
        );
        Ok(())
    }
}

#[derive(Default)]
pub struct InfoHandler;

impl InfoHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, path: &Path, verbose: bool) -> Result<(), AppError> {
        print_verbose(verbose, "Attempting info command");
        let raw = Config::read_raw(path)?;
        display_field("Config file", &path.display().to_string());
        println!();
        print!("{}", raw);
        Ok(())
    }
}

/// Arguments of `asgard upgrade`
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeRequest {
    pub chart: String,
    pub release: Option<String>,
    pub version: Option<String>,
    pub repo: Option<String>,
    pub dry_run: bool,
    pub timeout: u64,
    pub force: bool,
    pub recreate_pods: bool,
    pub wait: bool,
}

#[derive(Default)]
pub struct ReleaseHandler;

impl ReleaseHandler {
    pub fn new() -> Self {
        Self
    }

    fn chart_ref<R: CommandRunner>(
        helm: &HelmClient<R>,
        chart: &str,
        repo: Option<&str>,
    ) -> ChartRef {
        ChartRef::parse(chart, repo.unwrap_or(helm.settings().repo()))
    }

    /// Explicit version, else the latest published one. `None` when search
    /// has no row for the chart, so helm picks the version itself.
    async fn target_version<R: CommandRunner>(
        service: &ReleaseService<'_, R>,
        chart_ref: &ChartRef,
        explicit: Option<&str>,
    ) -> Result<Option<String>, AppError> {
        let resolved = service.resolve_chart_version(chart_ref, explicit).await?;
        if explicit.is_none() && resolved == FALLBACK_CHART_VERSION {
            display_status(
                &format!(
                    "{} not found in search results, continuing without a version",
                    chart_ref.id()
                ),
                OperationStatus::Warning,
            );
            return Ok(None);
        }
        Ok(Some(resolved))
    }

    pub async fn list<R: CommandRunner>(
        &self,
        helm: &HelmClient<R>,
        verbose: bool,
    ) -> Result<(), AppError> {
        print_verbose(verbose, "Attempting list command");
        let output = helm.list().await?;
        print!("{}", output);
        Ok(())
    }

    pub async fn search<R: CommandRunner>(
        &self,
        keyword: &str,
        helm: &HelmClient<R>,
        verbose: bool,
    ) -> Result<(), AppError> {
        print_verbose(verbose, &format!("Searching charts for '{}'", keyword));
        helm.repo_update().await?;
        let output = helm.search(keyword).await?;
        print!("{}", output);
        Ok(())
    }

    pub async fn fetch<R: CommandRunner>(
        &self,
        chart: &str,
        version: Option<&str>,
        repo: Option<&str>,
        helm: &HelmClient<R>,
        verbose: bool,
    ) -> Result<(), AppError> {
        let chart_ref = Self::chart_ref(helm, chart, repo);
        print_verbose(
            verbose,
            &format!("Fetching {} version {:?}", chart_ref.id(), version),
        );
        helm.fetch(&chart_ref.id(), version).await?;
        Ok(())
    }

    pub async fn lint<R: CommandRunner>(
        &self,
        path: &Path,
        helm: &HelmClient<R>,
        verbose: bool,
    ) -> Result<(), AppError> {
        print_verbose(verbose, &format!("Linting {}", path.display()));
        helm.lint(path).await?;
        Ok(())
    }

    pub async fn delete<R: CommandRunner>(
        &self,
        release: &str,
        helm: &HelmClient<R>,
        verbose: bool,
    ) -> Result<(), AppError> {
        validate_name("Release", release)?;
        print_verbose(verbose, &format!("Deleting release {}", release));
        helm.delete(release).await?;
        display_status(
            &format!("Release {} deleted", release),
            OperationStatus::Success,
        );
        Ok(())
    }

    pub async fn install<R: CommandRunner>(
        &self,
        chart: &str,
        release: Option<String>,
        version: Option<&str>,
        repo: Option<&str>,
        helm: &HelmClient<R>,
        verbose: bool,
    ) -> Result<(), AppError> {
        let service = ReleaseService::new(helm);
        let chart_ref = Self::chart_ref(helm, chart, repo);
        let release = release_name(release, &chart_ref);
        print_verbose(
            verbose,
            &format!("Installing release {} from {}", release, chart_ref.id()),
        );

        if let Some(current) = service.resolve_release_version(&release).await? {
            display_status(
                &format!("Release {} already deployed at {}", release, current),
                OperationStatus::Warning,
            );
        }

        let version = Self::target_version(&service, &chart_ref, version).await?;
        display_status(
            &format!(
                "Installing {} {} as {}",
                chart_ref.id(),
                version.as_deref().unwrap_or("(unversioned)"),
                release
            ),
            OperationStatus::InProgress,
        );
        helm.install(&chart_ref.id(), &release, version.as_deref())
            .await?;
        Ok(())
    }

    pub async fn upgrade<R: CommandRunner>(
        &self,
        request: UpgradeRequest,
        helm: &HelmClient<R>,
        verbose: bool,
    ) -> Result<(), AppError> {
        let service = ReleaseService::new(helm);
        let chart_ref = Self::chart_ref(helm, &request.chart, request.repo.as_deref());
        let release = release_name(request.release, &chart_ref);
        print_verbose(
            verbose,
            &format!("Upgrading release {} from {}", release, chart_ref.id()),
        );

        match service.resolve_release_version(&release).await? {
            Some(current) => display_field("Current version", &current),
            None => display_status(
                &format!("Release {} not found", release),
                OperationStatus::Warning,
            ),
        }

        let target =
            Self::target_version(&service, &chart_ref, request.version.as_deref()).await?;
        if let Some(target) = &target {
            display_field("Target version", target);
        }

        if request.dry_run {
            display_status(
                &format!(
                    "Dry run: upgrading {} to {} {}",
                    release,
                    chart_ref.id(),
                    target.as_deref().unwrap_or("(unversioned)")
                ),
                OperationStatus::InProgress,
            );
        }

        let params = UpgradeParams {
            release,
            chart_ref: chart_ref.id(),
            version: target,
            timeout_secs: request.timeout,
            force: request.force,
            recreate_pods: request.recreate_pods,
            wait: request.wait,
            dry_run: request.dry_run,
        };
        helm.upgrade(&params).await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct PackageHandler;

impl PackageHandler {
    pub fn new() -> Self {
        Self
    }

    /// Lint, package into a temporary directory, upload, then remove the archive
    pub async fn package<R: CommandRunner>(
        &self,
        path: &Path,
        version: Option<&str>,
        repo: Option<&str>,
        helm: &HelmClient<R>,
        verbose: bool,
    ) -> Result<(), AppError> {
        let chart_repo = helm.settings().chart_repo().to_string();
        validate_url(&chart_repo)?;
        let client = ChartRepoClient::new(&chart_repo)?;

        helm.lint(path).await?;

        let chart_ref = ChartRef {
            repo: repo.unwrap_or(helm.settings().repo()).to_string(),
            chart: chart_name_from_path(path)?,
        };
        let version = ReleaseService::new(helm)
            .next_package_version(&chart_ref, version)
            .await?;
        print_verbose(
            verbose,
            &format!("Packaging {} as version {}", chart_ref.chart, version),
        );

        let staging = tempfile::tempdir().map_err(|e| convert_file_error(e, path))?;
        helm.package(path, &version, staging.path()).await?;
        let archive = find_archive(staging.path())?;

        let uploaded = client.upload(&archive).await;
        fs::remove_file(&archive).map_err(|e| convert_file_error(e, &archive))?;
        report_upload(&archive, uploaded?)
    }

    pub async fn upload(
        &self,
        archive: &Path,
        chart_repo: &str,
        verbose: bool,
    ) -> Result<(), AppError> {
        validate_url(chart_repo)?;
        print_verbose(
            verbose,
            &format!("Uploading {} to {}", archive.display(), chart_repo),
        );
        let client = ChartRepoClient::new(chart_repo)?;
        let outcome = client.upload(archive).await?;
        report_upload(archive, outcome)
    }
}

fn report_upload(archive: &Path, outcome: UploadOutcome) -> Result<(), AppError> {
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match outcome {
        UploadOutcome::Saved => {
            display_status(&format!("Uploaded {}", name), OperationStatus::Success);
            Ok(())
        }
        UploadOutcome::Rejected(message) => Err(ApiError::UploadRejected {
            archive: name,
            message: message.unwrap_or_else(|| "no reason given".to_string()),
        }
        .into()),
    }
}

/// Chart name from its directory; `.` and `..` resolve through the
/// canonical path
pub fn chart_name_from_path(path: &Path) -> Result<String, AppError> {
    let name = match path.file_name() {
        Some(name) => Some(name.to_owned()),
        None => path
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_owned())),
    };

    name.map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CliError::InvalidArguments(format!(
                "Cannot determine chart name from '{}'",
                path.display()
            ))
            .into()
        })
}

/// The single `.tgz` helm wrote into `dir`
fn find_archive(dir: &Path) -> Result<PathBuf, AppError> {
    let entries = fs::read_dir(dir).map_err(|e| convert_file_error(e, dir))?;
    entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .find(|p| p.extension().is_some_and(|ext| ext == "tgz"))
        .ok_or_else(|| {
            CliError::InvalidArguments(format!("helm produced no archive in {}", dir.display()))
                .into()
        })
}
