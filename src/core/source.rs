use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::error::Result;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// A single opaque frame identifier, resolved to bytes by a fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSource {
    Remote(Url),
    Local(PathBuf),
    /// One named image inside a local `.zip` archive.
    ArchiveEntry { archive: PathBuf, name: String },
}

impl FrameSource {
    /// Classify a raw source string. Anything that is not an http(s) URL is
    /// treated as a filesystem path.
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            _ => Self::Local(PathBuf::from(input)),
        }
    }
}

impl fmt::Display for FrameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::ArchiveEntry { archive, name } => write!(f, "{}:{name}", archive.display()),
        }
    }
}

/// Expand raw inputs into the ordered source list, unpacking `.zip` archives
/// into one source per contained image (entries sorted by name).
pub fn expand_sources(inputs: &[String]) -> Result<Vec<FrameSource>> {
    let mut sources = Vec::with_capacity(inputs.len());

    for input in inputs {
        let source = FrameSource::parse(input);
        match source {
            FrameSource::Local(ref path) if is_zip(path) => {
                sources.extend(archive_entries(path)?);
            }
            _ => sources.push(source),
        }
    }

    Ok(sources)
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn archive_entries(path: &Path) -> Result<Vec<FrameSource>> {
    let file = File::open(path)?;
    let archive = zip::ZipArchive::new(file)?;

    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| is_image_name(name))
        .map(String::from)
        .collect();
    names.sort();

    debug!("Archive {} holds {} image entries", path.display(), names.len());

    Ok(names
        .into_iter()
        .map(|name| FrameSource::ArchiveEntry {
            archive: path.to_path_buf(),
            name,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_http_urls_as_remote() {
        assert!(matches!(
            FrameSource::parse("https://cdn.example.com/chair/000.jpg"),
            FrameSource::Remote(_)
        ));
        assert!(matches!(
            FrameSource::parse("http://localhost:8080/f.png"),
            FrameSource::Remote(_)
        ));
    }

    #[test]
    fn classifies_everything_else_as_local() {
        assert_eq!(
            FrameSource::parse("shots/000.png"),
            FrameSource::Local(PathBuf::from("shots/000.png"))
        );
        // `C:` parses as a URL scheme; it must still be treated as a path.
        assert!(matches!(
            FrameSource::parse("file.png"),
            FrameSource::Local(_)
        ));
    }

    #[test]
    fn expand_keeps_input_order() {
        let inputs = vec!["b.png".to_string(), "a.png".to_string()];
        let sources = expand_sources(&inputs).unwrap();
        assert_eq!(sources[0], FrameSource::Local(PathBuf::from("b.png")));
        assert_eq!(sources[1], FrameSource::Local(PathBuf::from("a.png")));
    }

    #[test]
    fn filters_archive_entries_by_extension() {
        assert!(is_image_name("frames/000.PNG"));
        assert!(is_image_name("000.webp"));
        assert!(!is_image_name("readme.txt"));
        assert!(!is_image_name("no_extension"));
    }
}
