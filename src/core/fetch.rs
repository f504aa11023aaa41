use std::future::Future;
use std::io::Read;
use std::path::Path;
use std::pin::Pin;

use tracing::debug;
use url::Url;

use crate::core::source::FrameSource;
use crate::error::Result;

/// Resolves a frame source to its raw encoded bytes.
///
/// Tests substitute scripted implementations; everything else goes through
/// [`DefaultFetcher`].
pub trait FrameFetcher: Send + Sync {
    fn fetch(&self, source: &FrameSource) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + '_>>;
}

/// HTTP for remote sources, the filesystem for local files and archive entries.
pub struct DefaultFetcher {
    http: reqwest::Client,
}

impl DefaultFetcher {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    async fn fetch_remote(&self, url: &Url) -> Result<Vec<u8>> {
        debug!("GET {url}");
        let response = self.http.get(url.clone()).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for DefaultFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameFetcher for DefaultFetcher {
    fn fetch(&self, source: &FrameSource) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + '_>> {
        let source = source.clone();
        Box::pin(async move {
            match &source {
                FrameSource::Remote(url) => self.fetch_remote(url).await,
                FrameSource::Local(path) => Ok(tokio::fs::read(path).await?),
                FrameSource::ArchiveEntry { archive, name } => read_archive_entry(archive, name),
            }
        })
    }
}

fn read_archive_entry(archive: &Path, name: &str) -> Result<Vec<u8>> {
    let file = std::fs::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)?;
    let mut entry = zip.by_name(name)?;

    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}
