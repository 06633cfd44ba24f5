//! 3D model viewer widget.
//!
//! Rendering itself belongs to the `<model-viewer>` element. This module owns
//! what the page decides: camera placement and orbit limits, and the texture
//! cycle that runs only while the section is active.

use crate::tracker::ActiveGate;
use crate::utils::html::escape_attr;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::time::Duration;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial camera position (x, y, z) looking at the origin.
    pub position: [f64; 3],
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Maximum polar angle as a fraction of π (keeps the camera above the model).
    pub max_polar: f64,
    /// Fraction of the remaining distance covered per frame.
    pub damping: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [4.2, 1.6, 6.0],
            fov: 20.0,
            near: 0.01,
            far: 200.0,
            min_distance: 6.0,
            max_distance: 8.0,
            max_polar: 0.49,
            damping: 0.08,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model file path under the public directory (glTF / glb).
    pub src: String,
    /// Texture images cycled onto the model while active.
    #[serde(default)]
    pub textures: Vec<String>,
    /// Milliseconds between texture swaps.
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
    #[serde(default)]
    pub camera: CameraConfig,
    /// Accessible label for the viewer.
    #[serde(default = "default_alt")]
    pub alt: String,
}

fn default_interval() -> u64 {
    3000
}

fn default_alt() -> String {
    "3D model".to_string()
}

// ============================================================================
// Orbit camera
// ============================================================================

/// Spherical camera coordinates around the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Azimuth in radians, measured from +z toward +x.
    pub theta: f64,
    /// Polar angle in radians from +y.
    pub phi: f64,
    pub radius: f64,
}

impl Orbit {
    pub fn from_position([x, y, z]: [f64; 3]) -> Self {
        let radius = (x * x + y * y + z * z).sqrt();
        let phi = if radius > 0.0 {
            (y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };
        Self {
            theta: x.atan2(z),
            phi,
            radius,
        }
    }

    /// `model-viewer` camera-orbit syntax.
    pub fn to_attr(&self) -> String {
        format!(
            "{:.1}deg {:.1}deg {:.2}m",
            self.theta.to_degrees(),
            self.phi.to_degrees(),
            self.radius
        )
    }
}

/// Damped orbit camera with distance and polar clamps.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    current: Orbit,
    target: Orbit,
    min_distance: f64,
    max_distance: f64,
    max_phi: f64,
    damping: f64,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let mut camera = Self {
            current: Orbit::from_position(config.position),
            target: Orbit::from_position(config.position),
            min_distance: config.min_distance,
            max_distance: config.max_distance.max(config.min_distance),
            max_phi: config.max_polar * PI,
            damping: config.damping.clamp(0.0, 1.0),
        };
        camera.target = camera.clamp(camera.target);
        camera.current = camera.target;
        camera
    }

    pub fn current(&self) -> Orbit {
        self.current
    }

    pub fn target(&self) -> Orbit {
        self.target
    }

    fn clamp(&self, orbit: Orbit) -> Orbit {
        Orbit {
            theta: orbit.theta,
            phi: orbit.phi.clamp(0.0, self.max_phi),
            radius: orbit.radius.clamp(self.min_distance, self.max_distance),
        }
    }

    /// Request a new orbit; out-of-range values are clamped.
    pub fn look_from(&mut self, orbit: Orbit) {
        self.target = self.clamp(orbit);
    }

    /// Advance one frame toward the target.
    pub fn step(&mut self) {
        let ease = |from: f64, to: f64| from + (to - from) * self.damping;
        self.current = Orbit {
            theta: ease(self.current.theta, self.target.theta),
            phi: ease(self.current.phi, self.target.phi),
            radius: ease(self.current.radius, self.target.radius),
        };
    }

    /// Lower orbit limit in `model-viewer` syntax.
    pub fn min_attr(&self) -> String {
        format!("auto 0deg {:.2}m", self.min_distance)
    }

    /// Upper orbit limit in `model-viewer` syntax.
    pub fn max_attr(&self) -> String {
        format!("auto {:.1}deg {:.2}m", self.max_phi.to_degrees(), self.max_distance)
    }
}

// ============================================================================
// Texture cycle
// ============================================================================

/// Fixed-interval index over a texture list.
///
/// Time only accumulates while running; stopping drops the partial interval
/// so a restart waits a full interval before the next swap.
#[derive(Debug, Clone)]
pub struct TextureCycle {
    len: usize,
    index: usize,
    interval: Duration,
    elapsed: Duration,
    running: bool,
}

impl TextureCycle {
    pub fn new(len: usize, interval: Duration) -> Self {
        Self {
            len,
            index: 0,
            interval,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    /// Feed elapsed time; returns the new index when at least one swap fired.
    pub fn advance(&mut self, dt: Duration) -> Option<usize> {
        if !self.running || self.len < 2 || self.interval.is_zero() {
            return None;
        }
        self.elapsed += dt;
        let mut swapped = false;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.index = (self.index + 1) % self.len;
            swapped = true;
        }
        swapped.then_some(self.index)
    }
}

// ============================================================================
// Viewer
// ============================================================================

/// Model viewer gated by its section's activity.
#[derive(Debug, Clone)]
pub struct ModelViewer {
    config: ModelConfig,
    camera: OrbitCamera,
    cycle: TextureCycle,
    active: bool,
}

impl ModelViewer {
    pub fn new(config: ModelConfig) -> Self {
        let camera = OrbitCamera::new(&config.camera);
        let cycle = TextureCycle::new(
            config.textures.len(),
            Duration::from_millis(config.interval_ms),
        );
        Self {
            config,
            camera,
            cycle,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn cycle(&self) -> &TextureCycle {
        &self.cycle
    }

    pub fn current_texture(&self) -> Option<&str> {
        self.config
            .textures
            .get(self.cycle.index())
            .map(String::as_str)
    }

    /// One frame of the render loop. Does nothing while inactive.
    pub fn tick(&mut self, dt: Duration) -> Option<&str> {
        if !self.active {
            return None;
        }
        self.camera.step();
        self.cycle.advance(dt)?;
        self.current_texture()
    }

    /// Markup for the viewer; `url` maps public paths to page URLs.
    pub fn render(&self, url: impl Fn(&str) -> String) -> String {
        let camera = &self.config.camera;
        let textures: Vec<String> = self.config.textures.iter().map(|t| url(t)).collect();
        let textures = serde_json::to_string(&textures).unwrap_or_else(|_| "[]".into());
        format!(
            concat!(
                r#"<div class="model-frame" data-model data-interval="{interval}" data-textures="{textures}">"#,
                r#"<model-viewer src="{src}" alt="{alt}" camera-controls interaction-prompt="none" "#,
                r#"camera-orbit="{orbit}" min-camera-orbit="{min}" max-camera-orbit="{max}" "#,
                r#"field-of-view="{fov}deg" interpolation-decay="{decay}"></model-viewer></div>"#
            ),
            interval = self.config.interval_ms,
            textures = escape_attr(&textures),
            src = escape_attr(&url(&self.config.src)),
            alt = escape_attr(&self.config.alt),
            orbit = self.camera.target().to_attr(),
            min = self.camera.min_attr(),
            max = self.camera.max_attr(),
            fov = camera.fov,
            decay = interpolation_decay(camera.damping),
        )
    }
}

impl ActiveGate for ModelViewer {
    fn set_active(&mut self, active: bool) {
        self.active = active;
        if active {
            self.cycle.start();
        } else {
            self.cycle.stop();
        }
    }
}

/// Convert per-frame damping into `model-viewer`'s decay time (ms, 60fps).
fn interpolation_decay(damping: f64) -> u32 {
    if damping <= 0.0 || damping >= 1.0 {
        return 50;
    }
    // Frames to cover ~99% of the distance
    let frames = (0.01f64).ln() / (1.0 - damping).ln();
    (frames * 1000.0 / 60.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(textures: &[&str]) -> ModelConfig {
        ModelConfig {
            src: "/models/pictureFrame.gltf".into(),
            textures: textures.iter().map(|s| s.to_string()).collect(),
            interval_ms: 1000,
            camera: CameraConfig::default(),
            alt: default_alt(),
        }
    }

    #[test]
    fn test_orbit_from_default_position() {
        let orbit = Orbit::from_position([4.2, 1.6, 6.0]);
        assert!((orbit.radius - 7.495).abs() < 0.01);
        assert!((orbit.theta.to_degrees() - 35.0).abs() < 0.1);
        assert!((orbit.phi.to_degrees() - 77.7).abs() < 0.1);
    }

    #[test]
    fn test_camera_clamps_distance_and_polar() {
        let mut camera = OrbitCamera::new(&CameraConfig::default());
        camera.look_from(Orbit {
            theta: 0.0,
            phi: PI,
            radius: 50.0,
        });
        assert_eq!(camera.target().radius, 8.0);
        assert!((camera.target().phi - 0.49 * PI).abs() < 1e-9);

        camera.look_from(Orbit {
            theta: 0.0,
            phi: -1.0,
            radius: 1.0,
        });
        assert_eq!(camera.target().radius, 6.0);
        assert_eq!(camera.target().phi, 0.0);
    }

    #[test]
    fn test_camera_damped_step_converges() {
        let mut camera = OrbitCamera::new(&CameraConfig::default());
        let start = camera.current().radius;
        camera.look_from(Orbit {
            radius: 8.0,
            ..camera.current()
        });

        camera.step();
        let first = camera.current().radius;
        assert!((first - (start + (8.0 - start) * 0.08)).abs() < 1e-9);

        for _ in 0..200 {
            camera.step();
        }
        assert!((camera.current().radius - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_cycle_advances_only_while_running() {
        let mut cycle = TextureCycle::new(3, Duration::from_millis(100));
        assert_eq!(cycle.advance(Duration::from_millis(500)), None);

        cycle.start();
        assert_eq!(cycle.advance(Duration::from_millis(50)), None);
        assert_eq!(cycle.advance(Duration::from_millis(50)), Some(1));
        assert_eq!(cycle.advance(Duration::from_millis(250)), Some(0));
        assert_eq!(cycle.index(), 0);
    }

    #[test]
    fn test_cycle_stop_cancels_pending_tick() {
        let mut cycle = TextureCycle::new(2, Duration::from_millis(100));
        cycle.start();
        cycle.advance(Duration::from_millis(90));
        cycle.stop();
        cycle.start();
        assert_eq!(cycle.advance(Duration::from_millis(20)), None);
        assert_eq!(cycle.advance(Duration::from_millis(80)), Some(1));
    }

    #[test]
    fn test_single_texture_never_cycles() {
        let mut cycle = TextureCycle::new(1, Duration::from_millis(10));
        cycle.start();
        assert_eq!(cycle.advance(Duration::from_secs(1)), None);
    }

    #[test]
    fn test_viewer_gated_by_activity() {
        let mut viewer = ModelViewer::new(config(&["/a.jpg", "/b.jpg"]));
        assert_eq!(viewer.tick(Duration::from_secs(2)), None);
        assert_eq!(viewer.current_texture(), Some("/a.jpg"));

        viewer.set_active(true);
        assert_eq!(viewer.tick(Duration::from_millis(1000)), Some("/b.jpg"));

        viewer.set_active(false);
        assert!(!viewer.cycle().is_running());
        assert_eq!(viewer.tick(Duration::from_secs(5)), None);
        assert_eq!(viewer.current_texture(), Some("/b.jpg"));
    }

    #[test]
    fn test_render_attributes() {
        let viewer = ModelViewer::new(config(&["/a.jpg"]));
        let html = viewer.render(|p| format!("/site{p}"));
        assert!(html.contains(r#"src="/site/models/pictureFrame.gltf""#));
        assert!(html.contains(r#"field-of-view="20deg""#));
        assert!(html.contains(r#"max-camera-orbit="auto 88.2deg 8.00m""#));
        assert!(html.contains(r#"min-camera-orbit="auto 0deg 6.00m""#));
        assert!(html.contains("data-textures=\"[&quot;/site/a.jpg&quot;]\""));
        assert!(html.contains(r#"data-interval="1000""#));
    }

    #[test]
    fn test_interpolation_decay() {
        assert_eq!(interpolation_decay(0.0), 50);
        let decay = interpolation_decay(0.08);
        assert!((900..=940).contains(&decay));
    }
}
