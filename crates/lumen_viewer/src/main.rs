//! Lumen command line renderer.
//!
//! Loads a scene (or uses the demo scene), renders one frame and writes it
//! to an image file.

mod options;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::{demo_scene, load_scene};
use lumen_renderer::{FrameBuffers, FrameProducer, Scene};

use crate::options::Options;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse();

    let description = match &options.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, using the demo scene");
            demo_scene()
        }
    };
    let scene = Scene::from_description(&description).context("Invalid scene")?;
    let mut producer = FrameProducer::new(scene, options.producer_config())?;

    let request = options.request(1);
    let mut delivered = None;
    producer.produce(&request, &mut |frame: FrameBuffers, id: u64| {
        delivered = Some((frame, id));
    })?;

    let (frame, id) = delivered.context("Renderer finished without delivering a frame")?;
    save_image(&frame, &options.output)?;
    log::info!("Saved render {} to {}", id, options.output.display());

    Ok(())
}

/// Write the frame as an 8-bit RGB image.
fn save_image(frame: &FrameBuffers, path: &Path) -> Result<()> {
    let width = u32::try_from(frame.width).context("Image too wide")?;
    let height = u32::try_from(frame.height).context("Image too tall")?;

    let image = image::RgbImage::from_raw(width, height, frame.to_rgb_bytes())
        .context("Frame buffers do not match the image size")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
