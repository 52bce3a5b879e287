use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::analysis::analyze_scan_file;
use crate::config::{FailurePolicy, Settings};
use crate::snapshot::Snapshot;

#[derive(Debug)]
pub struct Session {
    settings: Settings,
    source: Option<PathBuf>,
    snapshot: Option<Arc<Snapshot>>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            source: None,
            snapshot: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.clone()
    }

    pub fn select_file(&mut self, path: impl Into<PathBuf>) -> Result<Arc<Snapshot>> {
        let path = path.into();
        info!(action = "select", component = "session", file_path = ?path, "Scan file selected");
        self.source = Some(path);
        self.run_pass()
    }

    pub fn refresh(&mut self) -> Result<Arc<Snapshot>> {
        if self.source.is_none() {
            anyhow::bail!("No scan file selected");
        }
        info!(action = "refresh", component = "session", "Manual refresh requested");
        self.run_pass()
    }

    fn run_pass(&mut self) -> Result<Arc<Snapshot>> {
        let Some(source) = self.source.as_deref() else {
            anyhow::bail!("No scan file selected");
        };

        match analyze_scan_file(source, &self.settings) {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.snapshot = Some(Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(e) => {
                let cleared = self.settings.on_parse_failure == FailurePolicy::Clear;
                if cleared {
                    self.snapshot = None;
                }
                warn!(
                    action = "failed",
                    component = "session",
                    error = %format!("{:#}", e),
                    snapshot_cleared = cleared,
                    "Scan log pass failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn refresh_without_selection_fails() {
        let mut session = Session::new(Settings::default());
        assert!(session.refresh().is_err());
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn refresh_rereads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "scan.csv", "Domain Name,Scan Date\na.com,2024-01-01\n");

        let mut session = Session::new(Settings::default());
        let first = session.select_file(&path).unwrap();
        assert_eq!(first.series.points.len(), 1);

        fs::write(&path, "Domain Name,Scan Date\na.com,2024-01-01\nb.net,2024-01-02\n").unwrap();
        let second = session.refresh().unwrap();

        assert_eq!(second.series.keys, ["com", "net"]);
        assert_eq!(first.series.keys, ["com"]);
        assert!(Arc::ptr_eq(&second, &session.snapshot().unwrap()));
    }

    #[test]
    fn failed_pass_keeps_snapshot_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "good.csv", "Domain Name,Scan Date\na.com,2024-01-01\n");
        let bad = write(dir.path(), "bad.csv", "Domain Name,Scan Date\na.com,2024-01-01,x\n");

        let mut session = Session::new(Settings::default());
        let kept = session.select_file(&good).unwrap();

        assert!(session.select_file(&bad).is_err());
        assert_eq!(session.source(), Some(bad.as_path()));
        assert!(Arc::ptr_eq(&kept, &session.snapshot().unwrap()));
    }

    #[test]
    fn failed_pass_clears_snapshot_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "scan.csv", "Domain Name,Scan Date\na.com,2024-01-01\n");

        let settings = Settings {
            on_parse_failure: FailurePolicy::Clear,
            ..Default::default()
        };
        let mut session = Session::new(settings);
        session.select_file(&path).unwrap();

        fs::remove_file(&path).unwrap();
        assert!(session.refresh().is_err());
        assert!(session.snapshot().is_none());
    }
}
