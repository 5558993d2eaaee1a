// Human-readable scan summary

use std::fmt::Write;

use ogg_probe_core::application::ScanReport;

/// Render the report as a few aligned lines for a terminal or cron mail
pub fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "run {} on {}{}: listed={} matched={} dispatched={} failed={} ({} ms)",
        report.run_id,
        report.platform,
        if report.dry_run { " (dry run)" } else { "" },
        report.listed,
        report.matched,
        report.dispatched_count(),
        report.failure_count(),
        report.elapsed_ms,
    );

    for record in &report.dispatched {
        let check = record
            .check_pid
            .map_or_else(|| "-".to_string(), |pid| pid.to_string());
        let _ = write!(
            out,
            "  ok    pid={:<8} home={} check_pid={}",
            record.pid, record.installation_home, check
        );
        if !record.unresolved.is_empty() {
            let _ = write!(out, " unresolved={}", record.unresolved.join(","));
        }
        out.push('\n');
    }

    for failure in &report.failures {
        let _ = writeln!(
            out,
            "  fail  pid={:<8} {}: {}",
            failure.pid, failure.kind, failure.message
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ogg_probe_core::application::scanner::{DispatchRecord, FailureKind, ProcessFailure};
    use ogg_probe_core::domain::{EnvValue, PlatformKind};

    fn report(dry_run: bool) -> ScanReport {
        ScanReport {
            run_id: "run-7".to_string(),
            platform: PlatformKind::Aix,
            dry_run,
            started_at_ms: 0,
            elapsed_ms: 42,
            listed: 12,
            matched: 2,
            dispatched: vec![DispatchRecord {
                pid: 1001,
                command_line: "./mgr PARAMFILE /ogg/dirprm/mgr.prm".to_string(),
                installation_home: EnvValue::Resolved("/ogg".to_string()),
                check_pid: Some(2002),
                unresolved: vec!["OGG_VAR_HOME", "LIBPATH"],
                descriptor: None,
            }],
            failures: vec![ProcessFailure {
                pid: 1003,
                kind: FailureKind::Vanished,
                message: "Process 1003 vanished".to_string(),
            }],
        }
    }

    #[test]
    fn test_render_summary_line() {
        let text = render_text(&report(false));
        let first = text.lines().next().unwrap();

        assert_eq!(
            first,
            "run run-7 on AIX: listed=12 matched=2 dispatched=1 failed=1 (42 ms)"
        );
    }

    #[test]
    fn test_render_records() {
        let text = render_text(&report(false));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("pid=1001"));
        assert!(lines[1].contains("home=/ogg"));
        assert!(lines[1].contains("check_pid=2002"));
        assert!(lines[1].ends_with("unresolved=OGG_VAR_HOME,LIBPATH"));
        assert!(lines[2].contains("VANISHED: Process 1003 vanished"));
    }

    #[test]
    fn test_render_dry_run_marker() {
        let mut r = report(true);
        r.dispatched[0].check_pid = None;
        let text = render_text(&r);

        assert!(text.starts_with("run run-7 on AIX (dry run):"));
        assert!(text.contains("check_pid=-"));
    }
}
