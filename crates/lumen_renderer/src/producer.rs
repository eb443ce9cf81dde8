//! Frame production: render requests in, RGB planes out.
//!
//! `FrameProducer::produce` builds the camera, allocates the output planes,
//! runs the row scheduler over the whole image and hands the planes to a
//! [`RenderObserver`]. A render either delivers a complete frame exactly
//! once or returns an error and delivers nothing.

use std::time::{Duration, Instant};

use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::scene::Scene;
use crate::scheduler::{PlaneSlices, RowSpan, TileScheduler, DEFAULT_LEAF_ROWS};
use lumen_core::DemoView;
use lumen_math::{Point3, Vector3};

/// Parameters of one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    /// Eye position
    pub eye: Point3,
    /// Point the eye looks at; the center of the screen
    pub view: Point3,
    /// Approximate up direction
    pub view_up: Vector3,
    /// Screen width in world units
    pub horizontal: f64,
    /// Screen height in world units
    pub vertical: f64,
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Echoed back to the observer unchanged
    pub request_id: u64,
}

impl RenderRequest {
    /// Create a request for the given point of view.
    pub fn from_view(view: &DemoView, width: usize, height: usize, request_id: u64) -> Self {
        Self {
            eye: view.eye,
            view: view.view,
            view_up: view.view_up,
            horizontal: view.horizontal,
            vertical: view.vertical,
            width,
            height,
            request_id,
        }
    }

    /// Check the parameters that do not depend on geometry.
    ///
    /// Pixel positions are spread over `width - 1` and `height - 1` steps,
    /// so both dimensions must be at least 2.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width <= 1 || self.height <= 1 {
            return Err(RenderError::InvalidConfig(format!(
                "image must be at least 2x2 pixels, got {}x{}",
                self.width, self.height
            )));
        }
        // The interleaved RGB copy is the largest buffer a frame needs.
        if self
            .width
            .checked_mul(self.height)
            .and_then(|pixels| pixels.checked_mul(3))
            .is_none()
        {
            return Err(RenderError::InvalidConfig(format!(
                "image of {}x{} pixels is too large",
                self.width, self.height
            )));
        }
        if !(self.horizontal.is_finite() && self.horizontal > 0.0)
            || !(self.vertical.is_finite() && self.vertical > 0.0)
        {
            return Err(RenderError::InvalidConfig(format!(
                "screen extents must be positive, got {} x {}",
                self.horizontal, self.vertical
            )));
        }
        if !(self.eye.is_finite() && self.view.is_finite() && self.view_up.is_finite()) {
            return Err(RenderError::InvalidConfig(
                "eye, view and view up must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// A rendered frame as three row-major intensity planes.
///
/// The value of pixel (x, y) on each plane is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffers {
    pub width: usize,
    pub height: usize,
    pub red: Vec<u8>,
    pub green: Vec<u8>,
    pub blue: Vec<u8>,
}

impl FrameBuffers {
    /// Create black planes.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            height,
            red: vec![0; len],
            green: vec![0; len],
            blue: vec![0; len],
        }
    }

    /// Number of pixels in each plane.
    pub fn len(&self) -> usize {
        self.red.len()
    }

    /// Check if the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    /// Get the pixel at (x, y).
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = y * self.width + x;
        [self.red[i], self.green[i], self.blue[i]]
    }

    /// Interleave the planes into `RGBRGB...` bytes (for display or saving).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len() * 3);
        for i in 0..self.len() {
            bytes.extend_from_slice(&[self.red[i], self.green[i], self.blue[i]]);
        }
        bytes
    }

    fn planes_mut(&mut self) -> PlaneSlices<'_> {
        PlaneSlices {
            span: RowSpan::new(0, self.height),
            width: self.width,
            red: &mut self.red,
            green: &mut self.green,
            blue: &mut self.blue,
        }
    }
}

/// Receives finished frames.
pub trait RenderObserver {
    /// Called exactly once per successful render.
    fn accept_result(&mut self, frame: FrameBuffers, request_id: u64);
}

impl<F> RenderObserver for F
where
    F: FnMut(FrameBuffers, u64),
{
    fn accept_result(&mut self, frame: FrameBuffers, request_id: u64) {
        self(frame, request_id)
    }
}

/// Producer configuration.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Run the row scheduler on a thread pool
    pub multithreading: bool,
    /// Worker threads; 0 uses the available hardware concurrency
    pub threads: usize,
    /// Maximum rows rendered by one leaf task
    pub leaf_rows: usize,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            multithreading: true,
            threads: 0,
            leaf_rows: DEFAULT_LEAF_ROWS,
        }
    }
}

impl ProducerConfig {
    /// Sequential configuration.
    pub fn single_threaded() -> Self {
        Self {
            multithreading: false,
            ..Default::default()
        }
    }
}

/// Timing of the last completed render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStats {
    pub request_id: u64,
    pub width: usize,
    pub height: usize,
    pub elapsed: Duration,
    pub multithreaded: bool,
}

/// Renders frames of one scene.
///
/// `produce` takes `&mut self`: requests to one producer are serialized by
/// the borrow checker. Wrap the producer in a lock to share it.
pub struct FrameProducer {
    scene: Scene,
    config: ProducerConfig,
    pool: Option<rayon::ThreadPool>,
    last_stats: Option<RenderStats>,
}

impl FrameProducer {
    /// Create a producer, building its worker pool when multithreading is
    /// enabled.
    pub fn new(scene: Scene, config: ProducerConfig) -> RenderResult<Self> {
        if config.leaf_rows == 0 {
            return Err(RenderError::InvalidConfig(
                "leaf_rows must be at least 1".to_string(),
            ));
        }

        let pool = if config.multithreading {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .thread_name(|i| format!("lumen-render-{i}"))
                .build()?;
            log::info!("Render pool started with {} threads", pool.current_num_threads());
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            scene,
            config,
            pool,
            last_stats: None,
        })
    }

    /// The scene this producer renders.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The producer configuration.
    pub fn config(&self) -> &ProducerConfig {
        &self.config
    }

    /// Timing of the last successful render.
    pub fn last_stats(&self) -> Option<&RenderStats> {
        self.last_stats.as_ref()
    }

    /// Render one frame and deliver it to `observer`.
    ///
    /// Blocks until the frame is complete. On error nothing is delivered.
    pub fn produce(
        &mut self,
        request: &RenderRequest,
        observer: &mut dyn RenderObserver,
    ) -> RenderResult<()> {
        let start = Instant::now();
        let multithreaded = self.pool.is_some();
        log::info!(
            "Starting render {} ({}x{}, {})",
            request.request_id,
            request.width,
            request.height,
            if multithreaded { "multithreaded" } else { "single-threaded" }
        );

        let camera = Camera::new(request)?;
        let mut frame = FrameBuffers::new(request.width, request.height);

        let scheduler =
            TileScheduler::new(&camera, &self.scene, self.config.leaf_rows, multithreaded);
        let planes = frame.planes_mut();
        match &self.pool {
            Some(pool) => pool.install(|| scheduler.render(planes))?,
            None => scheduler.render(planes)?,
        }

        observer.accept_result(frame, request.request_id);

        let stats = RenderStats {
            request_id: request.request_id,
            width: request.width,
            height: request.height,
            elapsed: start.elapsed(),
            multithreaded,
        };
        log::info!(
            "Render {} finished in {} ms",
            stats.request_id,
            stats.elapsed.as_millis()
        );
        self.last_stats = Some(stats);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{demo_scene, LightSource, Material, SceneDescription, SphereShape};

    fn producer(description: &SceneDescription, config: ProducerConfig) -> FrameProducer {
        FrameProducer::new(Scene::from_description(description).unwrap(), config).unwrap()
    }

    fn request(width: usize, height: usize, request_id: u64) -> RenderRequest {
        RenderRequest::from_view(&DemoView::default(), width, height, request_id)
    }

    /// Render and return the delivered frames.
    fn run(
        producer: &mut FrameProducer,
        request: &RenderRequest,
    ) -> (RenderResult<()>, Vec<(FrameBuffers, u64)>) {
        let mut delivered = Vec::new();
        let mut observer = |frame: FrameBuffers, id: u64| delivered.push((frame, id));
        let result = producer.produce(request, &mut observer);
        (result, delivered)
    }

    #[test]
    fn test_delivers_once_with_request_id() {
        let mut producer = producer(&demo_scene(), ProducerConfig::default());
        let (result, delivered) = run(&mut producer, &request(32, 24, 42));

        result.unwrap();
        assert_eq!(delivered.len(), 1);

        let (frame, id) = &delivered[0];
        assert_eq!(*id, 42);
        assert_eq!(frame.width, 32);
        assert_eq!(frame.height, 24);
        assert_eq!(frame.red.len(), 32 * 24);
        assert_eq!(frame.green.len(), 32 * 24);
        assert_eq!(frame.blue.len(), 32 * 24);
    }

    #[test]
    fn test_multithreaded_matches_single_threaded() {
        let req = request(64, 48, 7);

        let mut sequential = producer(&demo_scene(), ProducerConfig::single_threaded());
        let mut parallel = producer(
            &demo_scene(),
            ProducerConfig {
                multithreading: true,
                threads: 4,
                leaf_rows: 2,
            },
        );

        let (a, mut seq_frames) = run(&mut sequential, &req);
        let (b, mut par_frames) = run(&mut parallel, &req);
        a.unwrap();
        b.unwrap();

        assert_eq!(seq_frames.pop(), par_frames.pop());
    }

    #[test]
    fn test_empty_scene_is_background() {
        let mut producer = producer(&SceneDescription::new(), ProducerConfig::default());
        let (result, delivered) = run(&mut producer, &request(10, 10, 1));

        result.unwrap();
        assert!(delivered[0].0.to_rgb_bytes().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_occluded_pixel_is_ambient() {
        // Light directly behind the sphere as seen from the eye at (10, 0, 0).
        let description = SceneDescription::new()
            .with_sphere(SphereShape::new(
                Point3::ZERO,
                1.0,
                Material::new(Vector3::ONE, Vector3::ONE, 5.0),
            ))
            .with_light(LightSource::white(Point3::new(-10.0, 0.0, 0.0), 255));
        let mut producer = producer(&description, ProducerConfig::default());
        let (result, delivered) = run(&mut producer, &request(21, 21, 3));

        result.unwrap();
        let frame = &delivered[0].0;
        assert_eq!(frame.pixel(10, 10), [15, 15, 15]);
        assert_eq!(frame.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_front_sphere_color() {
        let description = SceneDescription::new()
            .with_sphere(SphereShape::new(
                Point3::ZERO,
                2.0,
                Material::new(Vector3::X, Vector3::ZERO, 1.0),
            ))
            .with_sphere(SphereShape::new(
                Point3::new(1.5, 0.0, 0.0),
                1.0,
                Material::new(Vector3::Z, Vector3::ZERO, 1.0),
            ))
            .with_light(LightSource::white(Point3::new(10.0, 0.0, 0.0), 100));
        let mut producer = producer(&description, ProducerConfig::default());
        let (result, delivered) = run(&mut producer, &request(21, 21, 3));

        result.unwrap();
        assert_eq!(delivered[0].0.pixel(10, 10), [15, 15, 115]);
    }

    #[test]
    fn test_invalid_resolution_is_not_delivered() {
        let mut producer = producer(&demo_scene(), ProducerConfig::default());

        for (width, height) in [(1, 10), (10, 1), (0, 0)] {
            let (result, delivered) = run(&mut producer, &request(width, height, 9));
            assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
            assert!(delivered.is_empty());
        }
        assert!(producer.last_stats().is_none());
    }

    #[test]
    fn test_oversized_resolution_is_rejected() {
        let mut producer = producer(&demo_scene(), ProducerConfig::default());

        for (width, height) in [(usize::MAX, 2), (usize::MAX / 4, 2), (2, usize::MAX / 2)] {
            let (result, delivered) = run(&mut producer, &request(width, height, 9));
            assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
            assert!(delivered.is_empty());
        }
        assert!(producer.last_stats().is_none());
    }

    #[test]
    fn test_invalid_extents_are_rejected() {
        let mut producer = producer(&demo_scene(), ProducerConfig::default());
        let mut req = request(10, 10, 1);
        req.horizontal = 0.0;

        let (result, delivered) = run(&mut producer, &req);
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
        assert!(delivered.is_empty());
    }

    #[test]
    fn test_degenerate_render_is_not_delivered() {
        // Light on the surface point seen through the image center.
        let description = SceneDescription::new()
            .with_sphere(SphereShape::new(Point3::ZERO, 1.0, Material::default()))
            .with_light(LightSource::white(Point3::new(1.0, 0.0, 0.0), 100));

        for config in [ProducerConfig::default(), ProducerConfig::single_threaded()] {
            let mut producer = producer(&description, config);
            let (result, delivered) = run(&mut producer, &request(21, 21, 5));
            assert!(matches!(result, Err(RenderError::Geometry(_))));
            assert!(delivered.is_empty());
        }
    }

    #[test]
    fn test_stats_recorded() {
        let mut producer = producer(&demo_scene(), ProducerConfig::single_threaded());
        let (result, _) = run(&mut producer, &request(8, 6, 11));
        result.unwrap();

        let stats = producer.last_stats().unwrap();
        assert_eq!(stats.request_id, 11);
        assert_eq!((stats.width, stats.height), (8, 6));
        assert!(!stats.multithreaded);
    }

    #[test]
    fn test_zero_leaf_rows_rejected() {
        let config = ProducerConfig {
            leaf_rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            FrameProducer::new(Scene::default(), config),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_frame_buffer_helpers() {
        let mut frame = FrameBuffers::new(2, 2);
        frame.red[3] = 10;
        frame.green[3] = 20;
        frame.blue[3] = 30;

        assert_eq!(frame.len(), 4);
        assert_eq!(frame.pixel(1, 1), [10, 20, 30]);
        assert_eq!(
            frame.to_rgb_bytes(),
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 10, 20, 30]
        );
    }
}
