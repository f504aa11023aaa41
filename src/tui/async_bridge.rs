use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::debug;

use crate::core::frame::Frame;
use crate::core::loader::FrameLoader;
use crate::core::source::FrameSource;

/// Sources fetched concurrently at any one time.
pub const MAX_CONCURRENT_FETCHES: usize = 4;

/// Messages sent from the TUI to the async runtime
#[derive(Debug)]
pub enum AsyncRequest {
    LoadFrames { sources: Vec<FrameSource> },
}

/// Messages sent from the async runtime to the TUI
#[derive(Debug)]
pub enum AsyncResponse {
    /// One source finished fetching and decoding
    FrameLoaded { index: usize },
    /// The whole set finished: either every frame in source order, or the
    /// first failure
    LoadComplete(Result<Vec<Frame>, String>),
}

/// Bridge between the sync TUI and async frame loading
pub struct AsyncBridge {
    request_rx: mpsc::Receiver<AsyncRequest>,
    response_tx: mpsc::Sender<AsyncResponse>,
    loader: Arc<FrameLoader>,
}

impl AsyncBridge {
    pub fn new(
        request_rx: mpsc::Receiver<AsyncRequest>,
        response_tx: mpsc::Sender<AsyncResponse>,
        loader: FrameLoader,
    ) -> Self {
        Self {
            request_rx,
            response_tx,
            loader: Arc::new(loader),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.request_rx.recv().await {
            debug!("Received async request: {request:?}");

            match request {
                AsyncRequest::LoadFrames { sources } => self.handle_load(sources).await,
            }
        }
    }

    async fn handle_load(&self, sources: Vec<FrameSource>) {
        let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES));
        let mut handles = Vec::with_capacity(sources.len());

        for (index, source) in sources.into_iter().enumerate() {
            let permit = semaphore.clone().acquire_owned().await.unwrap();
            let loader = self.loader.clone();
            let response_tx = self.response_tx.clone();

            let handle = tokio::spawn(async move {
                let result = loader.fetch_frame(&source).await;
                if result.is_ok() {
                    let _ = response_tx.send(AsyncResponse::FrameLoaded { index }).await;
                }
                drop(permit);
                result
            });

            handles.push(handle);
        }

        // Handles are awaited in spawn order, so the set stays source-ordered.
        let mut frames = Vec::with_capacity(handles.len());
        let mut failure: Option<String> = None;

        for handle in handles {
            match handle.await {
                Ok(Ok(frame)) => frames.push(frame),
                Ok(Err(e)) => {
                    failure.get_or_insert(e.to_string());
                }
                Err(e) => {
                    failure.get_or_insert(format!("Load task panicked: {e}"));
                }
            }
        }

        let result = match failure {
            None => Ok(frames),
            Some(e) => Err(e),
        };
        let _ = self.response_tx.send(AsyncResponse::LoadComplete(result)).await;
    }
}
