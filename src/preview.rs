//! Keeps the camera preview surface attached to the mirror view.

use crate::geometry::Rect;

/// Something that can display a preview surface, e.g. a layer-backed view.
pub trait SurfaceHost {
    type Surface: PartialEq;

    fn attach(&self, surface: &Self::Surface);
    fn detach(&self, surface: &Self::Surface);
    fn resize(&self, surface: &Self::Surface, bounds: Rect);
    fn bounds(&self) -> Rect;
}

/// What the mirror view is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState<'a> {
    Loading,
    Error(&'a str),
    Live,
}

pub struct PreviewAdapter<H: SurfaceHost> {
    host: H,
    surface: Option<H::Surface>,
    error: Option<String>,
}

impl<H: SurfaceHost> PreviewAdapter<H> {
    pub fn new(host: H) -> Self {
        PreviewAdapter {
            host,
            surface: None,
            error: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn surface(&self) -> Option<&H::Surface> {
        self.surface.as_ref()
    }

    /// Attach `surface`, replacing a different one. Setting the surface that
    /// is already attached only refreshes its size.
    pub fn set_surface(&mut self, surface: H::Surface) {
        if self.surface.as_ref() != Some(&surface) {
            if let Some(old) = self.surface.take() {
                self.host.detach(&old);
            }
            self.host.attach(&surface);
            self.surface = Some(surface);
        }
        self.layout();
    }

    /// Show `message` instead of the feed. Any live surface is detached.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.detach_surface();
        self.error = Some(message.into());
    }

    /// Back to the loading state.
    pub fn clear(&mut self) {
        self.detach_surface();
        self.error = None;
    }

    /// Resize the surface to exactly fill the host.
    pub fn layout(&self) {
        if let Some(surface) = &self.surface {
            self.host.resize(surface, self.host.bounds());
        }
    }

    pub fn display_state(&self) -> DisplayState<'_> {
        match (&self.error, &self.surface) {
            (Some(message), _) => DisplayState::Error(message),
            (None, Some(_)) => DisplayState::Live,
            (None, None) => DisplayState::Loading,
        }
    }

    /// Bring the adapter in line with the camera's published state.
    pub fn sync(&mut self, preview: Option<&H::Surface>, error: Option<&str>)
    where
        H::Surface: Clone,
    {
        match (error, preview) {
            (Some(message), _) => {
                if self.error.as_deref() != Some(message) {
                    self.set_error(message);
                }
            }
            (None, Some(surface)) => {
                self.error = None;
                self.set_surface(surface.clone());
            }
            (None, None) => self.clear(),
        }
    }

    fn detach_surface(&mut self) {
        if let Some(old) = self.surface.take() {
            self.host.detach(&old);
        }
    }
}
