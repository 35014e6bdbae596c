//! Render composition and backend hand-off.
//!
//! Scene nodes describe what they want drawn through the [`Render`] enum. The
//! scene flattens all renders of a tick into a [`Frame`]: opaque draws first,
//! transparent draws after them, plus camera and light uniforms. A
//! [`Renderer`] backend turns the frame into pixels.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the enum nodes return from `get_render`
//! - [`Instanced<'a>`] is one mesh with its world transform
//! - [`Frame<'a>`] is everything a backend needs for one tick
//! - [`FrameRecorder`] is the headless backend keeping owned snapshots
//!

use crate::{
    camera::CameraUniform,
    data_structures::{
        geometry::Geometry,
        instance::InstanceRaw,
        light::LightUniform,
        material::{Color, Material, Shading},
    },
};

/// One mesh ready to draw: geometry, material and its world transform.
#[derive(Clone, Copy, Debug)]
pub struct Instanced<'a> {
    pub name: &'a str,
    pub geometry: &'a Geometry,
    pub material: &'a Material,
    pub instance: InstanceRaw,
}

/// Specifies how a scene object should be rendered.
///
/// - `None` renders nothing
/// - `Default(Instanced)` renders a single opaque object
/// - `Defaults(Vec<Instanced>)` renders a batch of opaque objects
/// - `Transparent(Instanced)` renders a single transparent object
/// - `Transparents(Vec<Instanced>)` renders a batch of transparent objects
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
#[derive(Debug)]
pub enum Render<'a> {
    None,
    Default(Instanced<'a>),
    Defaults(Vec<Instanced<'a>>),
    Transparent(Instanced<'a>),
    Transparents(Vec<Instanced<'a>>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    /// Sorts this render tree into the opaque and transparent batches.
    pub fn set_pipelines(self, basics: &mut Vec<Instanced<'a>>, trans: &mut Vec<Instanced<'a>>) {
        match self {
            Render::Default(instanced) => basics.push(instanced),
            Render::Defaults(mut vec) => basics.append(&mut vec),
            Render::Transparent(instanced) => trans.push(instanced),
            Render::Transparents(mut vec) => trans.append(&mut vec),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(basics, trans)),
            Render::None => (),
        }
    }
}

/// Everything drawn during one tick.
#[derive(Debug)]
pub struct Frame<'a> {
    pub clear_colour: [f32; 4],
    pub camera: CameraUniform,
    pub lights: Vec<LightUniform>,
    pub basics: Vec<Instanced<'a>>,
    pub transparents: Vec<Instanced<'a>>,
}

impl<'a> Frame<'a> {
    /// Opaque draws followed by transparent ones, the order a backend should submit them in.
    pub fn draws(&self) -> impl Iterator<Item = &Instanced<'a>> {
        self.basics.iter().chain(self.transparents.iter())
    }

    pub fn draw_count(&self) -> usize {
        self.basics.len() + self.transparents.len()
    }
}

/// A rendering backend.
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>) -> anyhow::Result<()>;

    fn resize(&mut self, width: u32, height: u32);
}

/// Owned copy of an [`Instanced`] draw.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawSnapshot {
    pub name: String,
    pub geometry: Geometry,
    pub shading: Shading,
    pub color: Color,
    pub transparent: bool,
    pub instance: InstanceRaw,
}

impl From<&Instanced<'_>> for DrawSnapshot {
    fn from(instanced: &Instanced<'_>) -> Self {
        Self {
            name: instanced.name.to_string(),
            geometry: *instanced.geometry,
            shading: instanced.material.shading,
            color: instanced.material.color,
            transparent: instanced.material.transparent,
            instance: instanced.instance,
        }
    }
}

/// Headless backend: keeps an owned snapshot of the most recent frame.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    frames_drawn: u64,
    size: (u32, u32),
    camera: CameraUniform,
    lights: Vec<LightUniform>,
    draws: Vec<DrawSnapshot>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn camera(&self) -> &CameraUniform {
        &self.camera
    }

    pub fn lights(&self) -> &[LightUniform] {
        &self.lights
    }

    pub fn draws(&self) -> &[DrawSnapshot] {
        &self.draws
    }

    pub fn find(&self, name: &str) -> Option<&DrawSnapshot> {
        self.draws.iter().find(|draw| draw.name == name)
    }

    /// Model matrices of all draws, column major, 16 floats each.
    pub fn model_matrices(&self) -> Vec<f32> {
        self.draws
            .iter()
            .flat_map(|draw| bytemuck::cast::<[[f32; 4]; 4], [f32; 16]>(draw.instance.model))
            .collect()
    }

    /// Linear colours of all draws, 3 floats each.
    pub fn colors(&self) -> Vec<f32> {
        self.draws
            .iter()
            .flat_map(|draw| draw.color.to_linear())
            .collect()
    }
}

impl Renderer for FrameRecorder {
    fn draw(&mut self, frame: &Frame<'_>) -> anyhow::Result<()> {
        self.camera = frame.camera;
        self.lights = frame.lights.clone();
        self.draws = frame.draws().map(DrawSnapshot::from).collect();
        self.frames_drawn += 1;
        log::trace!("recorded frame {} with {} draws", self.frames_drawn, self.draws.len());
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}
