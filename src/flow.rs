//! Frame loop tying the figure, the globe and the tween driver to a scene.
//!
//! Each frame follows the same order:
//! 1. Advance the [`TweenTimeline`], the only writer of [`FigureParams`]
//! 2. Pose the figure from the updated parameters
//! 3. Spin the globe by one tick
//! 4. Render the scene through the [`Renderer`] backend

use cgmath::Deg;
use instant::{Duration, Instant};

use crate::{
    camera::Camera,
    config::StageConfig,
    data_structures::{light::Light, material::Color},
    figure::{Figure, FigureParams},
    globe::Globe,
    random::RandomSource,
    render::Renderer,
    scene::{Scene, SceneHost},
    tween::TweenTimeline,
};

/// Measures wall-clock time between frames.
#[derive(Debug)]
pub struct Ticker {
    last_time: Instant,
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            last_time: Instant::now(),
        }
    }

    /// Time since the previous call (or since creation).
    pub fn tick(&mut self) -> Duration {
        let dt = self.last_time.elapsed();
        self.last_time = Instant::now();
        dt
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Stage<R: Renderer> {
    scene: Scene<R>,
    figure: Figure,
    globe: Globe,
    params: FigureParams,
    timeline: TweenTimeline,
    ticker: Ticker,
    frames: u64,
}

impl<R: Renderer> Stage<R> {
    /// Builds the lit scene, the globe and one figure, and queues the configured tweens.
    pub fn new(
        config: &StageConfig,
        renderer: R,
        rng: &mut dyn RandomSource,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let cam = &config.camera;
        let camera = Camera::new(
            cam.distance,
            cam.width,
            cam.height,
            Deg(cam.fov),
            cam.near,
            cam.far,
        );
        let mut scene = Scene::with_camera(cam.width, cam.height, camera, renderer);
        scene.add_light(Light::ambient(Color::WHITE, 0.2));
        scene.add_light(Light::point(Color::WHITE, 1.0, [5.0, 3.0, 5.0]));
        scene.add_light(Light::ambient(Color::hex(0x9eaeff), 0.5));
        scene.add_light(Light::directional(Color::WHITE, 0.8, [5.0, 5.0, 5.0]));

        let globe = Globe::new(&mut scene, &config.globe);
        let figure = Figure::construct(&mut scene, &config.figure.overrides, rng);

        let mut params = FigureParams::merged(&config.figure.overrides);
        let mut timeline = TweenTimeline::new();
        timeline.set(&mut params, &config.figure.initial);
        for tween in &config.figure.tweens {
            timeline.to(tween.clone());
        }
        figure.pose(&mut scene, &params);

        log::info!(
            "stage ready at {}x{} with {} tweens",
            cam.width,
            cam.height,
            timeline.len()
        );
        Ok(Self {
            scene,
            figure,
            globe,
            params,
            timeline,
            ticker: Ticker::new(),
            frames: 0,
        })
    }

    /// Runs one frame that advances animations by `dt` seconds.
    pub fn frame(&mut self, dt: f32) -> anyhow::Result<()> {
        self.timeline.tick(dt, &mut self.params);
        self.figure.pose(&mut self.scene, &self.params);
        self.globe.spin(&mut self.scene);
        self.scene.render()?;
        self.frames += 1;
        Ok(())
    }

    /// [`Stage::frame`] with the wall-clock time since the last frame.
    pub fn frame_now(&mut self) -> anyhow::Result<()> {
        let dt = self.ticker.tick();
        self.frame(dt.as_secs_f32())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.resize(width, height);
    }

    pub fn scene(&self) -> &Scene<R> {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene<R> {
        &mut self.scene
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn globe(&self) -> &Globe {
        &self.globe
    }

    pub fn params(&self) -> &FigureParams {
        &self.params
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn renderer(&self) -> &R {
        self.scene.renderer()
    }
}

/// Installs the platform logger. Safe to call more than once.
pub fn init_logger() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            log::debug!("logger already installed: {}", e);
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            log::debug!("logger already installed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{random::RngSource, render::FrameRecorder};

    #[test]
    fn initial_set_is_posed_before_first_frame() {
        let stage = Stage::new(
            &StageConfig::default(),
            FrameRecorder::new(),
            &mut RngSource::seeded(5),
        )
        .unwrap();
        assert_eq!(stage.params().y, -1.5);
        let root = stage.scene().node(stage.figure().root()).unwrap();
        assert_eq!(root.get_local_transform().position.y, -1.5);
        assert_eq!(stage.renderer().frames_drawn(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = StageConfig::default();
        config.camera.near = 2000.0;
        assert!(Stage::new(&config, FrameRecorder::new(), &mut RngSource::seeded(5)).is_err());
    }

    #[test]
    fn init_logger_twice_is_harmless() {
        init_logger();
        init_logger();
    }
}
