use splatview_scene::{LoadError, LoadProgress};

/// Loading overlay: a progress bar while the asset loads, an error message if it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressOverlay {
    visible: bool,
    bar_percent: f32,
    message: Option<String>,
}

impl Default for ProgressOverlay {
    fn default() -> Self {
        Self {
            visible: true,
            bar_percent: 0.0,
            message: None,
        }
    }
}

impl ProgressOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bar width to `progress` as a percentage.
    pub fn set_progress(&mut self, progress: LoadProgress) {
        self.bar_percent = progress.percent();
    }

    /// Hide the overlay once the asset is in the scene.
    pub fn complete(&mut self) {
        self.bar_percent = 100.0;
        self.visible = false;
    }

    /// Replace the overlay content with the load error. The overlay stays visible.
    pub fn fail(&mut self, error: &LoadError) {
        self.visible = true;
        self.message = Some(format!("Error loading asset: {error}"));
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn bar_percent(&self) -> f32 {
        self.bar_percent
    }

    pub fn bar_fraction(&self) -> f32 {
        self.bar_percent / 100.0
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The bar is drawn only while loading; an error message replaces it.
    pub fn shows_progress_bar(&self) -> bool {
        self.visible && self.message.is_none()
    }

    /// Text mirrored into the window title, or `None` once hidden.
    pub fn status_text(&self) -> Option<String> {
        if !self.visible {
            return None;
        }
        Some(match &self.message {
            Some(message) => message.clone(),
            None => format!("Loading {:.0}%", self.bar_percent),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn not_found() -> LoadError {
        LoadError::NotFound {
            path: PathBuf::from("missing.splat"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
    }

    #[test]
    fn test_progress_sets_bar_width() {
        let mut overlay = ProgressOverlay::new();
        overlay.set_progress(LoadProgress::new(0.3));
        assert!((overlay.bar_percent() - 30.0).abs() < 1e-4);
        assert_eq!(overlay.status_text().as_deref(), Some("Loading 30%"));
        assert!(overlay.shows_progress_bar());
    }

    #[test]
    fn test_complete_hides() {
        let mut overlay = ProgressOverlay::new();
        overlay.complete();
        assert!(!overlay.is_visible());
        assert_eq!(overlay.status_text(), None);
        assert!(!overlay.shows_progress_bar());
    }

    #[test]
    fn test_failure_keeps_overlay_with_verbatim_error() {
        let mut overlay = ProgressOverlay::new();
        let error = not_found();
        overlay.fail(&error);
        assert!(overlay.is_visible());
        assert!(!overlay.shows_progress_bar());
        let message = overlay.message().unwrap();
        assert!(message.contains(&error.to_string()));
        assert_eq!(overlay.status_text().as_deref(), Some(message));
    }
}
