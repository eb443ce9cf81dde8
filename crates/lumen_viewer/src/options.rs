//! Command line options.

use std::path::PathBuf;

use clap::Parser;
use lumen_core::DemoView;
use lumen_math::Vector3;
use lumen_renderer::{ProducerConfig, RenderRequest, DEFAULT_LEAF_ROWS};

/// Render a sphere scene with the Lumen ray caster.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// JSON scene file. The built-in demo scene is used when omitted.
    #[arg(long, short = 's', value_name = "FILE")]
    pub scene: Option<PathBuf>,

    /// Image width in pixels.
    #[arg(long, default_value_t = 500)]
    pub width: usize,

    /// Image height in pixels.
    #[arg(long, default_value_t = 500)]
    pub height: usize,

    /// Eye position.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub eye: Option<Vec<f64>>,

    /// Point the eye looks at.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub view: Option<Vec<f64>>,

    /// Approximate up direction.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub up: Option<Vec<f64>>,

    /// Screen width in world units.
    #[arg(long)]
    pub horizontal: Option<f64>,

    /// Screen height in world units.
    #[arg(long)]
    pub vertical: Option<f64>,

    /// Render on the calling thread only.
    #[arg(long)]
    pub single_threaded: bool,

    /// Number of render threads (0 = one per core).
    #[arg(long, short = 't', value_name = "NUM", default_value_t = 0)]
    pub threads: usize,

    /// Maximum number of rows rendered by one task.
    #[arg(long, value_name = "NUM", default_value_t = DEFAULT_LEAF_ROWS)]
    pub leaf_rows: usize,

    /// Output image; the format follows the extension (png, ppm).
    #[arg(long, short = 'o', value_name = "FILE", default_value = "render.png")]
    pub output: PathBuf,
}

impl Options {
    /// Producer settings selected on the command line.
    pub fn producer_config(&self) -> ProducerConfig {
        ProducerConfig {
            multithreading: !self.single_threaded,
            threads: self.threads,
            leaf_rows: self.leaf_rows,
        }
    }

    /// Render request for the selected view, falling back to the demo view.
    pub fn request(&self, request_id: u64) -> RenderRequest {
        let demo = DemoView::default();
        let view = DemoView {
            eye: to_vector(&self.eye).unwrap_or(demo.eye),
            view: to_vector(&self.view).unwrap_or(demo.view),
            view_up: to_vector(&self.up).unwrap_or(demo.view_up),
            horizontal: self.horizontal.unwrap_or(demo.horizontal),
            vertical: self.vertical.unwrap_or(demo.vertical),
        };
        RenderRequest::from_view(&view, self.width, self.height, request_id)
    }
}

fn to_vector(values: &Option<Vec<f64>>) -> Option<Vector3> {
    match values.as_deref() {
        Some(&[x, y, z]) => Some(Vector3::new(x, y, z)),
        _ => None,
    }
}
