use crate::api::runner::{CommandOutput, CommandRunner, ProcessRunner, display_command, locate_binary};
use crate::error::HelmError;
use crate::storage::config::HelmSettings;
use std::path::{Path, PathBuf};

pub const DEFAULT_HELM_BIN: &str = "helm";

/// Resolved location of the helm binary
#[derive(Debug, Clone, PartialEq)]
pub enum HelmBinary {
    Available(PathBuf),
    /// Not found on PATH; every call fails with [`HelmError::BinaryMissing`]
    Missing(String),
}

impl HelmBinary {
    pub fn locate(name: &str) -> Self {
        match locate_binary(name) {
            Some(path) => HelmBinary::Available(path),
            None => HelmBinary::Missing(name.to_string()),
        }
    }
}

/// Options for `helm upgrade`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpgradeParams {
    pub release: String,
    pub chart_ref: String,
    /// `None` leaves the choice of version to helm
    pub version: Option<String>,
    pub timeout_secs: u64,
    pub force: bool,
    pub recreate_pods: bool,
    pub wait: bool,
    pub dry_run: bool,
}

/// Thin wrapper over the helm binary. Tiller-scoped commands get the
/// configured host and kube context appended.
pub struct HelmClient<R: CommandRunner = ProcessRunner> {
    runner: R,
    binary: HelmBinary,
    settings: HelmSettings,
}

impl<R: CommandRunner> HelmClient<R> {
    pub fn new(runner: R, binary: HelmBinary, settings: HelmSettings) -> Self {
        Self {
            runner,
            binary,
            settings,
        }
    }

    pub fn settings(&self) -> &HelmSettings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn program(&self) -> Result<&Path, HelmError> {
        match &self.binary {
            HelmBinary::Available(path) => Ok(path.as_path()),
            HelmBinary::Missing(name) => Err(HelmError::BinaryMissing {
                binary: name.clone(),
            }),
        }
    }

    fn tiller_args(&self) -> Vec<String> {
        vec![
            "--host".to_string(),
            self.settings.tiller_host().to_string(),
            "--kube-context".to_string(),
            self.settings.kube_context().to_string(),
        ]
    }

    async fn exec(&self, args: Vec<String>) -> Result<(String, CommandOutput), HelmError> {
        let program = self.program()?;
        let command = display_command(program, &args);
        let output = self.runner.run(program, &args).await?;
        Ok((command, output))
    }

    /// Run and echo stdout/stderr verbatim; non-zero exit becomes an error
    async fn passthrough(&self, args: Vec<String>) -> Result<CommandOutput, HelmError> {
        let (command, output) = self.exec(args).await?;
        print!("{}", output.stdout);
        eprint!("{}", output.stderr);
        if output.success() {
            Ok(output)
        } else {
            Err(HelmError::ProcessFailed {
                command,
                status: output.status,
            })
        }
    }

    /// Run quietly and return stdout; stderr is echoed only on failure
    async fn query(&self, args: Vec<String>) -> Result<String, HelmError> {
        let (command, output) = self.exec(args).await?;
        if output.success() {
            Ok(output.stdout)
        } else {
            eprint!("{}", output.stderr);
            Err(HelmError::ProcessFailed {
                command,
                status: output.status,
            })
        }
    }

    pub async fn repo_update(&self) -> Result<String, HelmError> {
        self.query(vec!["repo".to_string(), "update".to_string()])
            .await
    }

    pub async fn search(&self, keyword: &str) -> Result<String, HelmError> {
        self.query(vec!["search".to_string(), keyword.to_string()])
            .await
    }

    pub fn list_args(&self) -> Vec<String> {
        let mut args = vec!["list".to_string()];
        args.extend(self.tiller_args());
        args
    }

    pub async fn list(&self) -> Result<String, HelmError> {
        self.query(self.list_args()).await
    }

    pub fn fetch_args(&self, chart_ref: &str, version: Option<&str>) -> Vec<String> {
        let mut args = vec!["fetch".to_string(), chart_ref.to_string()];
        if let Some(version) = version {
            args.push("--version".to_string());
            args.push(version.to_string());
        }
        args
    }

    pub async fn fetch(
        &self,
        chart_ref: &str,
        version: Option<&str>,
    ) -> Result<CommandOutput, HelmError> {
        self.passthrough(self.fetch_args(chart_ref, version)).await
    }

    pub async fn lint(&self, path: &Path) -> Result<CommandOutput, HelmError> {
        self.passthrough(vec![
            "lint".to_string(),
            path.to_string_lossy().into_owned(),
        ])
        .await
    }

    pub fn package_args(&self, path: &Path, version: &str, destination: &Path) -> Vec<String> {
        vec![
            "package".to_string(),
            path.to_string_lossy().into_owned(),
            "--version".to_string(),
            version.to_string(),
            "--destination".to_string(),
            destination.to_string_lossy().into_owned(),
        ]
    }

    pub async fn package(
        &self,
        path: &Path,
        version: &str,
        destination: &Path,
    ) -> Result<CommandOutput, HelmError> {
        self.passthrough(self.package_args(path, version, destination))
            .await
    }

    pub fn install_args(&self, chart_ref: &str, release: &str, version: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "install".to_string(),
            chart_ref.to_string(),
            "--name".to_string(),
            release.to_string(),
            "--namespace".to_string(),
            self.settings.namespace().to_string(),
        ];
        if let Some(version) = version {
            args.push("--version".to_string());
            args.push(version.to_string());
        }
        args.extend(self.tiller_args());
        args
    }

    pub async fn install(
        &self,
        chart_ref: &str,
        release: &str,
        version: Option<&str>,
    ) -> Result<CommandOutput, HelmError> {
        self.passthrough(self.install_args(chart_ref, release, version))
            .await
    }

    pub fn delete_args(&self, release: &str) -> Vec<String> {
        let mut args = vec![
            "delete".to_string(),
            release.to_string(),
            "--purge".to_string(),
        ];
        args.extend(self.tiller_args());
        args
    }

    pub async fn delete(&self, release: &str) -> Result<CommandOutput, HelmError> {
        self.passthrough(self.delete_args(release)).await
    }

    pub fn upgrade_args(&self, params: &UpgradeParams) -> Vec<String> {
        let mut args = vec![
            "upgrade".to_string(),
            params.release.clone(),
            params.chart_ref.clone(),
        ];
        if let Some(version) = &params.version {
            args.push("--version".to_string());
            args.push(version.clone());
        }
        args.push("--timeout".to_string());
        args.push(params.timeout_secs.to_string());
        if params.force {
            args.push("--force".to_string());
        }
        if params.recreate_pods {
            args.push("--recreate-pods".to_string());
        }
        if params.wait {
            args.push("--wait".to_string());
        }
        if params.dry_run {
            args.push("--dry-run".to_string());
        }
        args.extend(self.tiller_args());
        args
    }

    pub async fn upgrade(&self, params: &UpgradeParams) -> Result<CommandOutput, HelmError> {
        self.passthrough(self.upgrade_args(params)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::runner::fake::RecordingRunner;

    fn settings() -> HelmSettings {
        HelmSettings {
            kube_context: Some("prod".to_string()),
            tiller_host: Some("10.0.0.1:44134".to_string()),
            namespace: Some("web".to_string()),
            repo: Some("myrepo".to_string()),
            chart_repo: Some("http://charts.example.test".to_string()),
        }
    }

    fn client(runner: RecordingRunner) -> HelmClient<RecordingRunner> {
        HelmClient::new(
            runner,
            HelmBinary::Available(PathBuf::from("/usr/bin/helm")),
            settings(),
        )
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_list_args() {
        let helm = client(RecordingRunner::new());
        assert_eq!(
            helm.list_args(),
            strings(&["list", "--host", "10.0.0.1:44134", "--kube-context", "prod"])
        );
    }

    #[test]
    fn test_missing_settings_become_empty_arguments() {
        let helm = HelmClient::new(
            RecordingRunner::new(),
            HelmBinary::Available(PathBuf::from("helm")),
            HelmSettings::default(),
        );
        assert_eq!(
            helm.delete_args("web"),
            strings(&["delete", "web", "--purge", "--host", "", "--kube-context", ""])
        );
    }

    #[test]
    fn test_install_args() {
        let helm = client(RecordingRunner::new());
        assert_eq!(
            helm.install_args("myrepo/web", "web-prod", Some("1.2.3")),
            strings(&[
                "install",
                "myrepo/web",
                "--name",
                "web-prod",
                "--namespace",
                "web",
                "--version",
                "1.2.3",
                "--host",
                "10.0.0.1:44134",
                "--kube-context",
                "prod",
            ])
        );
    }

    #[test]
    fn test_upgrade_args() {
        let helm = client(RecordingRunner::new());
        let params = UpgradeParams {
            release: "web".to_string(),
            chart_ref: "myrepo/web".to_string(),
            version: Some("2.0.0".to_string()),
            timeout_secs: 600,
            force: true,
            recreate_pods: false,
            wait: true,
            dry_run: false,
        };
        assert_eq!(
            helm.upgrade_args(&params),
            strings(&[
                "upgrade",
                "web",
                "myrepo/web",
                "--version",
                "2.0.0",
                "--timeout",
                "600",
                "--force",
                "--wait",
                "--host",
                "10.0.0.1:44134",
                "--kube-context",
                "prod",
            ])
        );
    }

    #[test]
    fn test_upgrade_args_without_version() {
        let helm = client(RecordingRunner::new());
        let params = UpgradeParams {
            release: "api".to_string(),
            chart_ref: "myrepo/api".to_string(),
            timeout_secs: 300,
            dry_run: true,
            ..Default::default()
        };
        assert_eq!(
            helm.upgrade_args(&params),
            strings(&[
                "upgrade",
                "api",
                "myrepo/api",
                "--timeout",
                "300",
                "--dry-run",
                "--host",
                "10.0.0.1:44134",
                "--kube-context",
                "prod",
            ])
        );
    }

    #[test]
    fn test_fetch_and_package_args() {
        let helm = client(RecordingRunner::new());
        assert_eq!(helm.fetch_args("myrepo/web", None), strings(&["fetch", "myrepo/web"]));
        assert_eq!(
            helm.fetch_args("myrepo/web", Some("0.1.0")),
            strings(&["fetch", "myrepo/web", "--version", "0.1.0"])
        );
        assert_eq!(
            helm.package_args(Path::new("charts/web"), "0.1.1", Path::new("/tmp/out")),
            strings(&[
                "package",
                "charts/web",
                "--version",
                "0.1.1",
                "--destination",
                "/tmp/out"
            ])
        );
    }

    #[tokio::test]
    async fn test_missing_binary_fails_without_running() {
        let helm = HelmClient::new(
            RecordingRunner::new(),
            HelmBinary::Missing("helm".to_string()),
            settings(),
        );
        let result = helm.list().await;
        assert!(matches!(result, Err(HelmError::BinaryMissing { .. })));
        assert!(helm.runner().calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_process_propagates_status() {
        let helm = client(RecordingRunner::new().fail("delete", 1, "Error: release: not found"));
        match helm.delete("ghost").await {
            Err(HelmError::ProcessFailed { command, status }) => {
                assert_eq!(status, 1);
                assert!(command.starts_with("helm delete ghost --purge"));
            }
            other => panic!("Expected ProcessFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_returns_stdout() {
        let helm = client(RecordingRunner::new().respond("list", "NAME\tREVISION\nweb\t3\n"));
        let output = helm.list().await.expect("list should succeed");
        assert_eq!(output, "NAME\tREVISION\nweb\t3\n");
        assert_eq!(helm.runner().calls(), vec![helm.list_args()]);
    }
}
