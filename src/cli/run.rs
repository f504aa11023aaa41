use anyhow::Result;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::cli::commands::SourceArgs;
use crate::core::loader::FrameLoader;

/// Headless validation of a frame set: fetch and decode everything, report
/// per-source results, exit non-zero when anything fails.
pub async fn run_check(source_args: SourceArgs, parallel: u8) -> Result<()> {
    let (sources, _) = source_args.resolve()?;
    if sources.is_empty() {
        anyhow::bail!("No frame sources provided");
    }
    info!("Checking {} frame sources", sources.len());

    let loader = FrameLoader::new(source_args.max_retries);

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut results: Vec<_> = futures::stream::iter(sources.iter().enumerate())
        .map(|(index, source)| {
            let loader = loader.clone();
            let pb = pb.clone();
            async move {
                let result = loader.fetch_frame(source).await;
                pb.inc(1);
                (index, source, result)
            }
        })
        .buffer_unordered(parallel.max(1) as usize)
        .collect()
        .await;
    pb.finish_and_clear();

    results.sort_by_key(|(index, _, _)| *index);

    let mut reference_dims: Option<(u32, u32)> = None;
    let mut failed = 0usize;

    for (_, source, result) in &results {
        match result {
            Ok(frame) => {
                let dims = (frame.width(), frame.height());
                let note = match reference_dims {
                    None => {
                        reference_dims = Some(dims);
                        ""
                    }
                    // The viewer sizes its surface to the first frame, so
                    // stragglers with other dimensions get clipped.
                    Some(reference) if reference != dims => "  (dimension mismatch)",
                    Some(_) => "",
                };
                println!("✓ {source} {}x{}{note}", dims.0, dims.1);
            }
            Err(e) => {
                failed += 1;
                println!("✗ {source}: {e}");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} sources failed", results.len());
    }

    println!("All {} frames OK", results.len());
    Ok(())
}
