//! Asset loading with fractional progress reporting.
//!
//! [`StubLoader`] stands in for a real splat decoder: it checks that the
//! asset exists, reports progress over a fixed number of timed steps and
//! resolves with a wireframe cube.

use crate::config::LoaderConfig;
use crate::scene::{Mesh, SceneNode};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors produced while loading an asset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("asset not found: {} ({source})", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read asset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset is not a regular file: {}", .path.display())]
    NotAFile { path: PathBuf },

    #[error("loader runtime failed to start: {0}")]
    Runtime(#[source] std::io::Error),
}

impl LoadError {
    fn from_io(path: &Path, source: std::io::Error) -> Self {
        let path = path.to_path_buf();
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound { path, source }
        } else {
            LoadError::Io { path, source }
        }
    }
}

/// Fraction of an asset that has been loaded, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct LoadProgress(f32);

impl LoadProgress {
    pub const COMPLETE: LoadProgress = LoadProgress(1.0);

    /// Clamp `fraction` into `[0, 1]`; NaN counts as no progress.
    pub fn new(fraction: f32) -> Self {
        if fraction.is_nan() {
            Self(0.0)
        } else {
            Self(fraction.clamp(0.0, 1.0))
        }
    }

    pub fn from_steps(done: u32, total: u32) -> Self {
        if total == 0 {
            return Self::COMPLETE;
        }
        Self::new(done as f32 / total as f32)
    }

    pub fn fraction(&self) -> f32 {
        self.0
    }

    pub fn percent(&self) -> f32 {
        self.0 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.0 >= 1.0
    }
}

/// Forwards progress to a callback, dropping reports that would go backwards.
pub struct ProgressReporter<F: FnMut(LoadProgress)> {
    callback: F,
    last: Option<LoadProgress>,
}

impl<F: FnMut(LoadProgress)> ProgressReporter<F> {
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            last: None,
        }
    }

    /// Report `progress` unless it is lower than what was already reported.
    pub fn report(&mut self, progress: LoadProgress) {
        if self.last.is_some_and(|last| progress < last) {
            return;
        }
        self.last = Some(progress);
        (self.callback)(progress);
    }

    /// Report completion if it has not been reported yet.
    pub fn finish(&mut self) {
        if !self.last.is_some_and(|last| last.is_complete()) {
            self.report(LoadProgress::COMPLETE);
        }
    }
}

/// Produces a scene node from an asset path, reporting progress as it goes.
pub trait AssetLoader {
    fn load<F>(
        &self,
        path: &Path,
        on_progress: F,
    ) -> impl Future<Output = Result<SceneNode, LoadError>> + Send
    where
        F: FnMut(LoadProgress) + Send;
}

/// Placeholder loader that simulates a timed load.
#[derive(Debug, Clone)]
pub struct StubLoader {
    steps: u32,
    step_interval: Duration,
}

impl StubLoader {
    pub fn new(steps: u32, step_interval: Duration) -> Self {
        Self {
            steps: steps.max(1),
            step_interval,
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(config.steps, Duration::from_millis(config.step_interval_ms))
    }
}

impl Default for StubLoader {
    fn default() -> Self {
        Self::from_config(&LoaderConfig::default())
    }
}

impl AssetLoader for StubLoader {
    fn load<F>(
        &self,
        path: &Path,
        on_progress: F,
    ) -> impl Future<Output = Result<SceneNode, LoadError>> + Send
    where
        F: FnMut(LoadProgress) + Send,
    {
        async move {
            debug!(path = %path.display(), steps = self.steps, "starting stub load");
            let metadata = tokio::fs::metadata(path)
                .await
                .map_err(|source| LoadError::from_io(path, source))?;
            if !metadata.is_file() {
                return Err(LoadError::NotAFile {
                    path: path.to_path_buf(),
                });
            }

            let mut reporter = ProgressReporter::new(on_progress);
            for step in 1..=self.steps {
                tokio::time::sleep(self.step_interval).await;
                reporter.report(LoadProgress::from_steps(step, self.steps));
            }
            reporter.finish();

            info!(path = %path.display(), "asset loaded (placeholder cube)");
            Ok(SceneNode::Mesh(Mesh::placeholder_cube()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_asset() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(LoadProgress::new(1.5).fraction(), 1.0);
        assert_eq!(LoadProgress::new(-0.5).fraction(), 0.0);
        assert_eq!(LoadProgress::new(f32::NAN).fraction(), 0.0);
        assert_eq!(LoadProgress::from_steps(10, 10), LoadProgress::COMPLETE);
        assert_eq!(LoadProgress::from_steps(3, 0), LoadProgress::COMPLETE);
    }

    #[test]
    fn test_reporter_drops_regressions() {
        let mut seen = Vec::new();
        let mut reporter = ProgressReporter::new(|p: LoadProgress| seen.push(p.fraction()));
        reporter.report(LoadProgress::new(0.3));
        reporter.report(LoadProgress::new(0.2));
        reporter.report(LoadProgress::new(0.3));
        reporter.finish();
        reporter.finish();
        assert_eq!(seen, vec![0.3, 0.3, 1.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stub_progress_is_monotonic_and_ends_at_one() {
        let loader = StubLoader::default();
        let mut seen = Vec::new();
        let node = loader
            .load(&existing_asset(), |p| seen.push(p.fraction()))
            .await
            .expect("stub load should succeed");

        assert_eq!(seen.len(), 10);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert!(seen.iter().all(|&p| (0.0..=1.0).contains(&p)));
        assert_eq!(seen.last().copied(), Some(1.0));

        let mesh = node.as_mesh().expect("placeholder is a mesh");
        assert!(mesh.material.wireframe);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stub_waits_between_steps() {
        let loader = StubLoader::new(4, Duration::from_millis(250));
        let start = tokio::time::Instant::now();
        loader
            .load(&existing_asset(), |_| {})
            .await
            .expect("stub load should succeed");
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_asset_rejects_without_progress() {
        let loader = StubLoader::default();
        let path = PathBuf::from("does/not/exist.splat");
        let mut reports = 0;
        let err = loader
            .load(&path, |_| reports += 1)
            .await
            .expect_err("missing asset should fail");

        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(err.to_string().contains("does/not/exist.splat"));
        assert_eq!(reports, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_directory_is_rejected() {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
        let mut reports = 0;
        let err = StubLoader::default()
            .load(&dir, |_| reports += 1)
            .await
            .expect_err("directory should not load");

        assert!(matches!(err, LoadError::NotAFile { .. }));
        assert_eq!(reports, 0);
    }
}
