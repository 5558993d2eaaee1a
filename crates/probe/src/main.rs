//! OGG Probe - Main Entry Point
//! One discovery pass: find running managers, launch a check for each, print a summary

mod config;
mod logging;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use ogg_probe_core::application::Scanner;
use ogg_probe_core::domain::PlatformKind;
use ogg_probe_core::AppError;
use ogg_probe_core::port::id_provider::UuidProvider;
use ogg_probe_core::port::time_provider::SystemTimeProvider;
use ogg_probe_infra_system::{PsProcessLister, SubprocessLauncher, SystemAdapterProvider};

use config::{Cli, ProbeConfig, ReportFormat};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = ProbeConfig::from_cli(Cli::parse())?;

    // 2. Initialize logging (guard flushes the file writer on exit)
    let _log_guard = logging::init_logging(config.log_dir.as_deref())
        .context("Logging initialization failed")?;

    let platform = PlatformKind::current();
    info!(platform = %platform, "OGG probe v{} starting...", VERSION);

    // before any platform-specific setup, so the lister never masks it
    if let Err(e) = ensure_supported(platform) {
        error!(error = %e, "Nothing scanned");
        return Err(e.into());
    }

    // 3. Setup dependencies (DI wiring)
    let lister = Arc::new(
        PsProcessLister::new(config.tools.ps.clone()).context("Process lister setup failed")?,
    );
    let adapters = Arc::new(SystemAdapterProvider::new(config.tools.clone()));
    let launcher = Arc::new(SubprocessLauncher::new(config.check.clone()));

    info!(
        user = %lister.user(),
        check = %config.check.program.display(),
        config_file = %config.check.config_file.display(),
        dry_run = config.options.dry_run,
        "Probe configured"
    );

    let scanner = Scanner::new(
        lister,
        adapters,
        launcher,
        config.signatures.clone(),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
    )
    .with_options(config.options.clone());

    // 4. Run one pass
    let report = match scanner.run(platform).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Scan pass aborted");
            return Err(e.into());
        }
    };

    info!(
        matched = report.matched,
        dispatched = report.dispatched_count(),
        failed = report.failure_count(),
        elapsed_ms = report.elapsed_ms,
        "Scan pass completed"
    );

    // 5. Print summary
    match config.report {
        ReportFormat::Json => {
            println!("{}", report.to_json().context("Report serialization failed")?)
        }
        ReportFormat::Text => print!("{}", report::render_text(&report)),
    }

    Ok(())
}

fn ensure_supported(platform: PlatformKind) -> Result<(), AppError> {
    if platform.is_supported() {
        Ok(())
    } else {
        Err(AppError::UnsupportedPlatform(platform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform_rejected_before_setup() {
        let err = ensure_supported(PlatformKind::from_os_name("windows")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedPlatform(PlatformKind::Unsupported)));
        assert_eq!(err.to_string(), "Platform not supported: unsupported");
    }

    #[test]
    fn test_supported_platforms_accepted() {
        for platform in [PlatformKind::Aix, PlatformKind::SunOs, PlatformKind::Linux] {
            assert!(ensure_supported(platform).is_ok());
        }
    }
}
