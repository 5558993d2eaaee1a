//! Command-line and environment configuration

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use ogg_probe_core::application::ScanOptions;
use ogg_probe_core::domain::SignatureSet;
use ogg_probe_infra_system::{CheckCommand, IntrospectionTools};

const DEFAULT_CHECK_COMMAND: &str = "ogg_monitor.py";
const DEFAULT_CONFIG_FILE: &str = "~/ogg_monitor/ogg_monitor.ini";
const DEFAULT_CONFIG_FLAG: &str = "-c";
const DEFAULT_PROCFS_ROOT: &str = "/proc";

/// Output format of the end-of-run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ogg-probe")]
#[command(about = "Find running GoldenGate managers and launch one monitoring check per instance", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Monitoring check executable
    #[arg(long, env = "OGG_PROBE_CHECK_COMMAND", default_value = DEFAULT_CHECK_COMMAND)]
    pub check_command: PathBuf,

    /// Configuration file handed to the check
    #[arg(long, env = "OGG_PROBE_CONFIG_FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    /// Flag preceding the configuration file (empty: pass the file alone)
    #[arg(long, env = "OGG_PROBE_CONFIG_FLAG", default_value = DEFAULT_CONFIG_FLAG, allow_hyphen_values = true)]
    pub config_flag: String,

    /// Command-line fragment identifying a worker process (repeatable)
    #[arg(long = "signature", value_name = "PATTERN")]
    pub signatures: Vec<String>,

    /// Discover and reconstruct environments without launching checks
    #[arg(long, env = "OGG_PROBE_DRY_RUN")]
    pub dry_run: bool,

    /// Summary format printed to stdout
    #[arg(long, env = "OGG_PROBE_REPORT", value_enum, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, env = "OGG_PROBE_LOG_DIR")]
    pub log_dir: Option<String>,

    #[arg(long, env = "OGG_PROBE_PROCFS_ROOT", default_value = DEFAULT_PROCFS_ROOT, hide = true)]
    pub procfs_root: PathBuf,

    /// Arguments passed to the check after the configuration file
    #[arg(last = true)]
    pub check_args: Vec<String>,
}

/// Resolved probe configuration
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub check: CheckCommand,
    pub signatures: SignatureSet,
    pub options: ScanOptions,
    pub tools: IntrospectionTools,
    pub report: ReportFormat,
    pub log_dir: Option<PathBuf>,
}

impl ProbeConfig {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        ensure!(!cli.config_file.trim().is_empty(), "config file path is empty");
        ensure!(
            cli.signatures.iter().all(|s| !s.is_empty()),
            "worker signatures must not be empty"
        );

        let signatures = if cli.signatures.is_empty() {
            SignatureSet::default()
        } else {
            SignatureSet::from_patterns(cli.signatures)
        };

        let config_flag = Some(cli.config_flag).filter(|f| !f.is_empty());

        Ok(Self {
            check: CheckCommand {
                program: cli.check_command,
                config_flag,
                config_file: expand(&cli.config_file),
                extra_args: cli.check_args,
            },
            signatures,
            options: ScanOptions {
                dry_run: cli.dry_run,
            },
            tools: IntrospectionTools {
                procfs_root: cli.procfs_root,
                ..IntrospectionTools::default()
            },
            report: cli.report,
            log_dir: cli.log_dir.as_deref().map(expand),
        })
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
