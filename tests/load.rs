use std::io::Write;
use std::path::Path;

use framespin::SpinError;
use framespin::core::loader::FrameLoader;
use framespin::core::manifest::SpinManifest;
use framespin::core::source::{FrameSource, expand_sources};

fn encoded_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([128, 64, 32, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn write_png(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encoded_png(width, height)).unwrap();
}

#[tokio::test]
async fn loads_local_files_in_argument_order() {
    let dir = tempfile::tempdir().unwrap();
    for (name, width) in [("east.png", 10), ("north.png", 20), ("west.png", 30)] {
        write_png(&dir.path().join(name), width, 8);
    }

    let inputs: Vec<String> = ["north.png", "west.png", "east.png"]
        .iter()
        .map(|name| dir.path().join(name).to_string_lossy().into_owned())
        .collect();

    let sources = expand_sources(&inputs).unwrap();
    let frames = FrameLoader::new(2).load_all(&sources).await.unwrap();

    let widths: Vec<u32> = frames.iter().map(|f| f.width()).collect();
    assert_eq!(widths, vec![20, 30, 10]);
}

#[tokio::test]
async fn expands_zip_archives_into_sorted_image_entries() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("turntable.zip");

    let file = std::fs::File::create(&archive_path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    // Out of order on purpose; expansion must sort by name.
    for (name, width) in [("02.png", 3), ("00.png", 1), ("01.png", 2)] {
        writer.start_file(name, options).unwrap();
        writer.write_all(&encoded_png(width, 2)).unwrap();
    }
    writer.start_file("notes.txt", options).unwrap();
    writer.write_all(b"not a frame").unwrap();
    writer.finish().unwrap();

    let sources = expand_sources(&[archive_path.to_string_lossy().into_owned()]).unwrap();
    assert_eq!(sources.len(), 3);
    assert!(matches!(sources[0], FrameSource::ArchiveEntry { ref name, .. } if name == "00.png"));

    let frames = FrameLoader::new(2).load_all(&sources).await.unwrap();
    let widths: Vec<u32> = frames.iter().map(|f| f.width()).collect();
    assert_eq!(widths, vec![1, 2, 3]);
}

#[tokio::test]
async fn missing_file_surfaces_a_bounded_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone.png").to_string_lossy().into_owned();

    let sources = expand_sources(&[missing]).unwrap();
    let err = FrameLoader::new(2).load_all(&sources).await.unwrap_err();

    match err {
        SpinError::LoadFailed { attempts, .. } => assert_eq!(attempts, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn corrupt_image_fails_all_or_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("good.png"), 4, 4);
    std::fs::write(dir.path().join("bad.png"), b"truncated junk").unwrap();

    let inputs: Vec<String> = ["good.png", "bad.png"]
        .iter()
        .map(|name| dir.path().join(name).to_string_lossy().into_owned())
        .collect();

    let sources = expand_sources(&inputs).unwrap();
    let result = FrameLoader::new(1).load_all(&sources).await;
    assert!(matches!(result, Err(SpinError::LoadFailed { .. })));
}

#[tokio::test]
async fn manifest_drives_the_frame_list() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("a.png"), 6, 6);
    write_png(&dir.path().join("b.png"), 7, 6);

    let manifest_path = dir.path().join("spin.json");
    let manifest_json = serde_json::json!({
        "frames": [
            dir.path().join("a.png").to_string_lossy(),
            dir.path().join("b.png").to_string_lossy(),
        ],
        "demo": true,
    });
    std::fs::write(&manifest_path, manifest_json.to_string()).unwrap();

    let manifest = SpinManifest::load(&manifest_path).unwrap();
    assert!(manifest.demo);

    let sources = expand_sources(&manifest.frames).unwrap();
    let frames = FrameLoader::new(2).load_all(&sources).await.unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].width(), 6);
    assert_eq!(frames[1].width(), 7);
}
