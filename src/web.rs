//! Browser entry point.
//!
//! The page owns the canvas and the GPU upload; it drives [`WebStage::tick`]
//! from `requestAnimationFrame` and reads back flat float buffers.

use wasm_bindgen::prelude::*;

use crate::{
    config::StageConfig,
    flow::{Stage, init_logger},
    random::RngSource,
    render::FrameRecorder,
};

#[wasm_bindgen]
pub struct WebStage {
    stage: Stage<FrameRecorder>,
}

#[wasm_bindgen]
impl WebStage {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Result<WebStage, JsError> {
        init_logger();
        let mut rng = RngSource::seeded(u64::from(seed));
        let stage = Stage::new(&StageConfig::default(), FrameRecorder::new(), &mut rng)
            .map_err(|e| JsError::new(&format!("{:#}", e)))?;
        Ok(Self { stage })
    }

    /// Advances by `dt` seconds and records the frame.
    pub fn tick(&mut self, dt: f32) -> Result<(), JsError> {
        self.stage
            .frame(dt)
            .map_err(|e| JsError::new(&format!("{:#}", e)))
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.stage.resize(width, height);
    }

    pub fn draw_count(&self) -> usize {
        self.stage.renderer().draws().len()
    }

    /// Column-major model matrices, 16 floats per draw.
    pub fn model_matrices(&self) -> Vec<f32> {
        self.stage.renderer().model_matrices()
    }

    /// Linear RGB, 3 floats per draw.
    pub fn colors(&self) -> Vec<f32> {
        self.stage.renderer().colors()
    }

    /// Camera view-projection, column major.
    pub fn view_proj(&self) -> Vec<f32> {
        let view_proj = self.stage.renderer().camera().view_proj;
        bytemuck::cast::<[[f32; 4]; 4], [f32; 16]>(view_proj).to_vec()
    }
}
