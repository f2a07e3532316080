use crate::api::helm::DEFAULT_HELM_BIN;
use crate::api::runner::DEFAULT_PROCESS_TIMEOUT_SECS;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "asgard")]
#[command(about = "Deploy tool based on k8s, helm and chartmuseum")]
#[command(version)]
#[command(after_help = "Examples:
  asgard init                          # Configure cluster and chart repository
  asgard search web                    # Search charts
  asgard package ./charts/web          # Package, bump patch version, upload
  asgard install web --release web-prod
  asgard upgrade web --dry-run         # Show current and target versions

Environment Variables:
  ASGARD_CONFIG     Config file path
  ASGARD_HELM_BIN   helm binary name or path
  VIRTUAL_ENV       Keeps the config file inside the active environment")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(long, global = true, env = "ASGARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// helm binary name or path
    #[arg(long, global = true, env = "ASGARD_HELM_BIN", default_value = DEFAULT_HELM_BIN)]
    pub helm_bin: String,

    /// Seconds to wait for each helm invocation
    #[arg(long, global = true, default_value_t = DEFAULT_PROCESS_TIMEOUT_SECS)]
    pub process_timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Create or update the config file interactively
    Init,
    /// Show the config file
    Info,
    /// List deployed releases
    List,
    /// Download a chart from the repository
    Fetch {
        /// Chart name, optionally prefixed with `repo/`
        chart: String,
        /// Chart version (default: latest)
        #[arg(long)]
        version: Option<String>,
        /// Repository alias (default: helm.repo)
        #[arg(long)]
        repo: Option<String>,
    },
    /// Lint a chart directory
    Lint {
        /// Chart directory
        path: PathBuf,
    },
    /// Search charts in the repositories
    Search {
        /// Keyword
        keyword: String,
    },
    /// Lint, package and upload a chart
    #[command(after_help = "Examples:
  asgard package ./charts/web          # Next patch after the latest published version
  asgard package ./charts/web 1.0.0    # Explicit version")]
    Package {
        /// Chart directory
        path: PathBuf,
        /// Chart version (default: next patch of the latest published version)
        version: Option<String>,
        /// Repository alias used to look up the latest version (default: helm.repo)
        #[arg(long)]
        repo: Option<String>,
    },
    /// Upload an already packaged chart archive
    Upload {
        /// Chart archive (.tgz)
        archive: PathBuf,
    },
    /// Delete and purge a release
    Delete {
        /// Release name
        release: String,
    },
    /// Upgrade a release to a chart version
    Upgrade {
        /// Chart name, optionally prefixed with `repo/`
        chart: String,
        /// Release name (default: chart name)
        #[arg(long)]
        release: Option<String>,
        /// Chart version (default: latest)
        #[arg(long)]
        version: Option<String>,
        /// Show what would be done without upgrading
        #[arg(long, alias = "dry_run")]
        dry_run: bool,
        /// Seconds helm waits for Kubernetes operations
        #[arg(long, default_value_t = 300)]
        timeout: u64,
        /// Force resource update through delete/recreate
        #[arg(long)]
        force: bool,
        /// Restart pods of the release
        #[arg(long)]
        recreate_pods: bool,
        /// Wait until resources are ready
        #[arg(long)]
        wait: bool,
        /// Repository alias (default: helm.repo)
        #[arg(long)]
        repo: Option<String>,
    },
    /// Install a chart as a new release
    Install {
        /// Chart name, optionally prefixed with `repo/`
        chart: String,
        /// Release name (default: chart name)
        #[arg(long)]
        release: Option<String>,
        /// Chart version (default: latest)
        #[arg(long)]
        version: Option<String>,
        /// Repository alias (default: helm.repo)
        #[arg(long)]
        repo: Option<String>,
    },
}
