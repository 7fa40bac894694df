//! Window management system
//!
//! Handles window creation, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Update window title with frame rate and pause state
    pub fn update_title(&self, fps: Option<f32>, paused: bool) {
        self.window.set_title(&format_title(&self.base_title, fps, paused));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn format_title(base: &str, fps: Option<f32>, paused: bool) -> String {
    let mut title = base.to_string();
    if let Some(fps) = fps {
        title.push_str(&format!(" - {:.0} fps", fps));
    }
    if paused {
        title.push_str(" [paused]");
    }
    title
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_plain() {
        assert_eq!(format_title("Spacescape", None, false), "Spacescape");
    }

    #[test]
    fn test_title_with_fps_and_pause() {
        let title = format_title("Spacescape", Some(59.6), true);
        assert_eq!(title, "Spacescape - 60 fps [paused]");
    }

    #[test]
    fn test_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(format!("{}", err), "Window creation failed: no display");
    }
}
