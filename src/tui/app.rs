use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::core::spinner::{DEMO_FRAME_INTERVAL, FrameSpinner, PointerEvent};
use crate::core::surface::PixelSurface;
use crate::tui::async_bridge::{AsyncRequest, AsyncResponse};
use crate::tui::widgets::spinner::Spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Viewer,
}

/// Loading screen state
pub struct LoadingState {
    pub loaded: usize,
    pub total: usize,
    pub spinner: Spinner,
    pub error: Option<String>,
}

pub struct App {
    pub screen: Screen,
    pub spinner: FrameSpinner<PixelSurface>,
    pub loading: LoadingState,
    pub should_quit: bool,
    request_tx: mpsc::Sender<AsyncRequest>,
    last_demo_step: Instant,
}

impl App {
    pub fn new(spinner: FrameSpinner<PixelSurface>, request_tx: mpsc::Sender<AsyncRequest>) -> Self {
        let total = spinner.source_count();
        Self {
            screen: Screen::Loading,
            spinner,
            loading: LoadingState {
                loaded: 0,
                total,
                spinner: Spinner::default(),
                error: None,
            },
            should_quit: false,
            request_tx,
            last_demo_step: Instant::now(),
        }
    }

    /// Kick off the frame load on the async runtime.
    pub fn start_loading(&mut self) {
        let sources = self.spinner.sources().to_vec();
        if self
            .request_tx
            .try_send(AsyncRequest::LoadFrames { sources })
            .is_err()
        {
            self.loading.error = Some("Async bridge unavailable".to_string());
        }
    }

    pub fn handle_async_response(&mut self, response: AsyncResponse) {
        match response {
            AsyncResponse::FrameLoaded { .. } => {
                self.loading.loaded += 1;
            }
            AsyncResponse::LoadComplete(Ok(frames)) => {
                info!("Loaded {} frames", frames.len());
                self.spinner.attach_frames(frames);
                self.screen = Screen::Viewer;
                self.last_demo_step = Instant::now();
            }
            AsyncResponse::LoadComplete(Err(e)) => {
                error!("Frame load failed: {e}");
                self.loading.error = Some(e);
            }
        }
    }

    /// Periodic housekeeping between input events.
    pub fn tick(&mut self) {
        match self.screen {
            Screen::Loading => {
                if self.loading.error.is_none() {
                    self.loading.spinner.tick();
                }
            }
            Screen::Viewer => {
                if self.spinner.demo_running()
                    && self.last_demo_step.elapsed() >= DEMO_FRAME_INTERVAL
                {
                    self.spinner.demo_step();
                    self.last_demo_step = Instant::now();
                }
            }
        }
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        self.spinner.handle_pointer(event);
    }

    pub fn step(&mut self, direction: isize) {
        self.spinner.update(direction);
    }

    pub fn restart_demo(&mut self) {
        self.spinner.start_demo();
        self.last_demo_step = Instant::now();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
