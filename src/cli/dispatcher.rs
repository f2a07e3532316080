use crate::api::helm::{HelmBinary, HelmClient};
use crate::api::runner::ProcessRunner;
use crate::cli::command_handlers::{
    InfoHandler, InitHandler, PackageHandler, ReleaseHandler, UpgradeRequest,
};
use crate::cli::main_types::Commands;
use crate::error::AppError;
use crate::storage::config::{Config, ConfigLocation};
use crate::utils::logging::{log_warning, print_verbose};

pub struct Dispatcher {
    location: ConfigLocation,
    verbose: bool,
    helm_bin: String,
    process_timeout: u64,
}

impl Dispatcher {
    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn new(
        location: ConfigLocation,
        verbose: bool,
        helm_bin: String,
        process_timeout: u64,
    ) -> Self {
        Self {
            location,
            verbose,
            helm_bin,
            process_timeout,
        }
    }

    fn load_config(&self) -> Result<Config, AppError> {
        let config = Config::load(&self.location.path)?;
        self.log_verbose(&format!(
            "Loaded config from {}",
            self.location.path.display()
        ));
        Ok(config)
    }

    /// Load the config, then locate helm. A missing binary is reported here
    /// and fails on first use.
    fn create_helm_client(&self) -> Result<HelmClient<ProcessRunner>, AppError> {
        let config = self.load_config()?;
        let binary = HelmBinary::locate(&self.helm_bin);
        match &binary {
            HelmBinary::Available(path) => {
                self.log_verbose(&format!("Using helm at {}", path.display()))
            }
            HelmBinary::Missing(name) => {
                log_warning(&format!("'{}' not found in PATH; helm commands will fail", name))
            }
        }
        Ok(HelmClient::new(
            ProcessRunner::new(self.process_timeout),
            binary,
            config.helm,
        ))
    }

    /// Every command except `init` loads the config before doing anything else
    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        let verbose = self.verbose;
        match command {
            Commands::Init => InitHandler::new().handle(&self.location, verbose),
            Commands::Info => {
                self.load_config()?;
                InfoHandler::new().handle(&self.location.path, verbose)
            }
            Commands::List => {
                let helm = self.create_helm_client()?;
                ReleaseHandler::new().list(&helm, verbose).await
            }
            Commands::Search { keyword } => {
                let helm = self.create_helm_client()?;
                ReleaseHandler::new().search(&keyword, &helm, verbose).await
            }
            Commands::Fetch {
                chart,
                version,
                repo,
            } => {
                let helm = self.create_helm_client()?;
                ReleaseHandler::new()
                    .fetch(&chart, version.as_deref(), repo.as_deref(), &helm, verbose)
                    .await
            }
            Commands::Lint { path } => {
                let helm = self.create_helm_client()?;
                ReleaseHandler::new().lint(&path, &helm, verbose).await
            }
            Commands::Delete { release } => {
                let helm = self.create_helm_client()?;
                ReleaseHandler::new().delete(&release, &helm, verbose).await
            }
            Commands::Install {
                chart,
                release,
                version,
                repo,
            } => {
                let helm = self.create_helm_client()?;
                ReleaseHandler::new()
                    .install(
                        &chart,
                        release,
                        version.as_deref(),
                        repo.as_deref(),
                        &helm,
                        verbose,
                    )
                    .await
            }
            Commands::Upgrade {
                chart,
                release,
                version,
                dry_run,
                timeout,
                force,
                recreate_pods,
                wait,
                repo,
            } => {
                let helm = self.create_helm_client()?;
                let request = UpgradeRequest {
                    chart,
                    release,
                    version,
                    repo,
                    dry_run,
                    timeout,
                    force,
                    recreate_pods,
                    wait,
                };
                ReleaseHandler::new().upgrade(request, &helm, verbose).await
            }
            Commands::Package {
                path,
                version,
                repo,
            } => {
                let helm = self.create_helm_client()?;
                PackageHandler::new()
                    .package(&path, version.as_deref(), repo.as_deref(), &helm, verbose)
                    .await
            }
            Commands::Upload { archive } => {
                let config = self.load_config()?;
                PackageHandler::new()
                    .upload(&archive, config.helm.chart_repo(), verbose)
                    .await
            }
        }
    }
}
