// Scanner - process discovery and check dispatch

mod report;

pub use report::{DispatchRecord, FailureKind, ProcessFailure, ScanReport};

use crate::application::reconstructor::Reconstructor;
use crate::domain::{EnvironmentDescriptor, Pid, PlatformKind, ProcessHandle, SignatureSet};
use crate::error::{AppError, Result};
use crate::port::{
    AdapterError, AdapterProvider, CheckLauncher, IdProvider, PlatformAdapter, ProcessLister,
    TimeProvider,
};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

/// Per-pass switches
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Discover and reconstruct, but launch nothing
    pub dry_run: bool,
}

/// Scanner drives one discovery pass: list → match → introspect → reconstruct → launch
///
/// The loop is sequential. Checks are launched fire-and-forget, so a slow or
/// hung check never delays the next match. One process failing is recorded
/// and skipped; only an unsupported platform or a failed listing aborts the pass.
pub struct Scanner {
    lister: Arc<dyn ProcessLister>,
    adapters: Arc<dyn AdapterProvider>,
    launcher: Arc<dyn CheckLauncher>,
    signatures: SignatureSet,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    self_pid: Pid,
    options: ScanOptions,
}

impl Scanner {
    /// Create a new scanner
    ///
    /// # Example
    /// ```ignore
    /// let scanner = Scanner::new(
    ///     Arc::new(PsProcessLister::new("ps")?),
    ///     Arc::new(SystemAdapterProvider::default()),
    ///     Arc::new(SubprocessLauncher::new(check)),
    ///     SignatureSet::default(),
    ///     Arc::new(UuidProvider),
    ///     Arc::new(SystemTimeProvider),
    /// );
    /// let report = scanner.run(PlatformKind::current()).await?;
    /// ```
    pub fn new(
        lister: Arc<dyn ProcessLister>,
        adapters: Arc<dyn AdapterProvider>,
        launcher: Arc<dyn CheckLauncher>,
        signatures: SignatureSet,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            lister,
            adapters,
            launcher,
            signatures,
            id_provider,
            time_provider,
            self_pid: std::process::id(),
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Override the pid treated as "ourselves" (tests)
    pub fn with_self_pid(mut self, pid: Pid) -> Self {
        self.self_pid = pid;
        self
    }

    /// Run one scan pass on `platform`
    ///
    /// # Errors
    /// - AppError::UnsupportedPlatform before anything is listed
    /// - AppError::Listing if the process table cannot be read
    pub async fn run(&self, platform: PlatformKind) -> Result<ScanReport> {
        let run_id = self.id_provider.new_run_id();
        let span = info_span!("scan", run_id = %run_id, platform = %platform);
        self.run_pass(run_id, platform).instrument(span).await
    }

    async fn run_pass(&self, run_id: String, platform: PlatformKind) -> Result<ScanReport> {
        let started_at_ms = self.time_provider.now_millis();

        let adapter = self.adapters.adapter_for(platform).map_err(|e| match e {
            AdapterError::UnsupportedPlatform(p) => AppError::UnsupportedPlatform(p),
            other => AppError::Adapter(other),
        })?;
        let reconstructor = Reconstructor::new(platform);

        let processes = self.lister.list_processes().await?;
        let listed = processes.len();
        let matches = self.select_matches(processes);

        info!(
            listed = %listed,
            matched = %matches.len(),
            dry_run = %self.options.dry_run,
            "Process scan completed"
        );

        let mut report = ScanReport {
            run_id,
            platform,
            dry_run: self.options.dry_run,
            started_at_ms,
            elapsed_ms: 0,
            listed,
            matched: matches.len(),
            dispatched: Vec::new(),
            failures: Vec::new(),
        };

        for process in matches {
            self.handle_process(adapter.as_ref(), &reconstructor, process, &mut report)
                .await;
        }

        report.elapsed_ms = self.time_provider.elapsed_since(started_at_ms);

        info!(
            dispatched = %report.dispatched_count(),
            failures = %report.failure_count(),
            elapsed_ms = %report.elapsed_ms,
            "Scan pass finished"
        );

        Ok(report)
    }

    /// Keep signature matches, dropping our own process
    fn select_matches(&self, processes: Vec<ProcessHandle>) -> Vec<ProcessHandle> {
        processes
            .into_iter()
            .filter(|p| p.pid != self.self_pid)
            .filter(|p| self.signatures.matches_process(p))
            .collect()
    }

    async fn handle_process(
        &self,
        adapter: &dyn PlatformAdapter,
        reconstructor: &Reconstructor,
        process: ProcessHandle,
        report: &mut ScanReport,
    ) {
        debug!(pid = %process.pid, command_line = %process.command_line, "Inspecting worker");

        let descriptor = match adapter.introspect(&process).await {
            Ok(raw) => reconstructor.reconstruct(&raw),
            Err(e) => {
                let kind = if e.is_vanished() {
                    FailureKind::Vanished
                } else {
                    FailureKind::Introspection
                };
                warn!(pid = %process.pid, kind = %kind, error = %e, "Skipping worker");
                report.failures.push(ProcessFailure {
                    pid: process.pid,
                    kind,
                    message: e.to_string(),
                });
                return;
            }
        };

        let unresolved = descriptor.unresolved_fields();
        for field in &unresolved {
            warn!(pid = %process.pid, field = %field, "Environment variable unresolved, dispatching anyway");
        }

        if self.options.dry_run {
            info!(
                pid = %process.pid,
                ogg_home = %descriptor.installation_home,
                "Dry run: check not launched"
            );
            report.dispatched.push(DispatchRecord {
                pid: process.pid,
                command_line: process.command_line,
                installation_home: descriptor.installation_home.clone(),
                check_pid: None,
                unresolved,
                descriptor: Some(descriptor),
            });
            return;
        }

        self.dispatch(process, descriptor, unresolved, report);
    }

    fn dispatch(
        &self,
        process: ProcessHandle,
        descriptor: EnvironmentDescriptor,
        unresolved: Vec<&'static str>,
        report: &mut ScanReport,
    ) {
        let installation_home = descriptor.installation_home.clone();

        match self.launcher.launch(&process, descriptor) {
            Ok(handle) => {
                info!(
                    pid = %process.pid,
                    check_pid = ?handle.check_pid,
                    ogg_home = %installation_home,
                    "Check dispatched"
                );
                report.dispatched.push(DispatchRecord {
                    pid: process.pid,
                    command_line: process.command_line,
                    installation_home,
                    check_pid: handle.check_pid,
                    unresolved,
                    descriptor: None,
                });
            }
            Err(e) => {
                warn!(pid = %process.pid, error = %e, "Check launch failed");
                report.failures.push(ProcessFailure {
                    pid: process.pid,
                    kind: FailureKind::Launch,
                    message: e.to_string(),
                });
            }
        }
    }
}
