use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::core::fetch::{DefaultFetcher, FrameFetcher};
use crate::core::frame::Frame;
use crate::core::source::FrameSource;
use crate::error::{Result, SpinError};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Pause between attempts for a failing source.
const RETRY_PAUSE: Duration = Duration::from_millis(250);

/// Fetches and decodes frame sets.
///
/// A fetch or decode failure is transient up to `max_attempts` tries per
/// source; after that the source is reported as failed instead of being
/// retried forever.
#[derive(Clone)]
pub struct FrameLoader {
    fetcher: Arc<dyn FrameFetcher>,
    max_attempts: u32,
}

impl FrameLoader {
    pub fn new(max_attempts: u32) -> Self {
        Self::with_fetcher(Arc::new(DefaultFetcher::new()), max_attempts)
    }

    pub fn with_fetcher(fetcher: Arc<dyn FrameFetcher>, max_attempts: u32) -> Self {
        Self {
            fetcher,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Fetch and decode a single frame, retrying failed attempts.
    pub async fn fetch_frame(&self, source: &FrameSource) -> Result<Frame> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_attempts {
            match self.try_fetch(source).await {
                Ok(frame) => {
                    if attempt > 1 {
                        debug!("{source} succeeded on attempt {attempt}");
                    }
                    return Ok(frame);
                }
                Err(e) => {
                    warn!("Attempt {attempt}/{} failed for {source}: {e}", self.max_attempts);
                    last_error = e.to_string();
                    if attempt < self.max_attempts {
                        tokio::time::sleep(RETRY_PAUSE).await;
                    }
                }
            }
        }

        Err(SpinError::LoadFailed {
            frame_source: source.to_string(),
            attempts: self.max_attempts,
            reason: last_error,
        })
    }

    async fn try_fetch(&self, source: &FrameSource) -> Result<Frame> {
        let bytes = self.fetcher.fetch(source).await?;
        Frame::from_bytes(&bytes)
    }

    /// Load the whole set concurrently. Either every frame decodes and the
    /// result is in source order, or the first failure is returned and no
    /// partial set escapes.
    pub async fn load_all(&self, sources: &[FrameSource]) -> Result<Vec<Frame>> {
        debug!("Loading {} frames", sources.len());
        futures::future::try_join_all(sources.iter().map(|source| self.fetch_frame(source))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    /// Serves garbage for the first `failures` attempts, then a valid image.
    struct FlakyFetcher {
        failures: u32,
        attempts: AtomicU32,
    }

    impl FlakyFetcher {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                attempts: AtomicU32::new(0),
            }
        }
    }

    impl FrameFetcher for FlakyFetcher {
        fn fetch(
            &self,
            _source: &FrameSource,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + '_>> {
            Box::pin(async move {
                let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
                if attempt < self.failures {
                    Ok(b"corrupt bytes".to_vec())
                } else {
                    Ok(encoded_png(4, 4))
                }
            })
        }
    }

    fn source() -> FrameSource {
        FrameSource::parse("frame.png")
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_decode_failures() {
        let fetcher = Arc::new(FlakyFetcher::new(2));
        let loader = FrameLoader::with_fetcher(fetcher.clone(), 5);

        let frame = loader.fetch_frame(&source()).await.unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(fetcher.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_bounded_attempts() {
        let fetcher = Arc::new(FlakyFetcher::new(u32::MAX));
        let loader = FrameLoader::with_fetcher(fetcher.clone(), 3);

        let err = loader.fetch_frame(&source()).await.unwrap_err();
        match err {
            SpinError::LoadFailed { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fetcher.attempts.load(Ordering::SeqCst), 3);
    }

    /// Each source gets a distinct width so order is observable.
    struct SizedFetcher;

    impl FrameFetcher for SizedFetcher {
        fn fetch(
            &self,
            source: &FrameSource,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + '_>> {
            let width = match source {
                FrameSource::Local(path) => {
                    path.to_string_lossy().trim_end_matches(".png").parse().unwrap()
                }
                _ => 1,
            };
            Box::pin(async move { Ok(encoded_png(width, 2)) })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn load_all_preserves_source_order() {
        let loader = FrameLoader::with_fetcher(Arc::new(SizedFetcher), 1);
        let sources: Vec<FrameSource> = ["3.png", "1.png", "2.png"]
            .iter()
            .map(|s| FrameSource::parse(s))
            .collect();

        let frames = loader.load_all(&sources).await.unwrap();
        let widths: Vec<u32> = frames.iter().map(Frame::width).collect();
        assert_eq!(widths, vec![3, 1, 2]);
    }

    /// Fails the `flaky.png` source twice; every source gets a distinct width.
    struct FlakyAt {
        attempts: AtomicU32,
    }

    impl FrameFetcher for FlakyAt {
        fn fetch(
            &self,
            source: &FrameSource,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + '_>> {
            let name = source.to_string();
            Box::pin(async move {
                if name.starts_with("flaky") {
                    if self.attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                        return Ok(b"garbage".to_vec());
                    }
                    return Ok(encoded_png(2, 2));
                }
                let width = name.trim_end_matches(".png").parse().unwrap_or(1);
                Ok(encoded_png(width, 2))
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retried_frame_lands_at_its_own_index() {
        let loader = FrameLoader::with_fetcher(
            Arc::new(FlakyAt {
                attempts: AtomicU32::new(0),
            }),
            5,
        );
        let sources: Vec<FrameSource> = ["1.png", "flaky.png", "3.png"]
            .iter()
            .map(|s| FrameSource::parse(s))
            .collect();

        let frames = loader.load_all(&sources).await.unwrap();
        let widths: Vec<u32> = frames.iter().map(Frame::width).collect();
        assert_eq!(widths, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn load_all_is_all_or_nothing() {
        let fetcher = Arc::new(FlakyFetcher::new(u32::MAX));
        let loader = FrameLoader::with_fetcher(fetcher, 2);
        let sources = vec![source(), source()];

        assert!(matches!(
            loader.load_all(&sources).await,
            Err(SpinError::LoadFailed { .. })
        ));
    }
}
