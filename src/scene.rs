//! Scene host: the render graph roots, camera, lights and renderer backend.

use cgmath::Deg;

use crate::{
    camera::Camera,
    data_structures::{light::Light, scene_graph::SceneNode},
    render::{Frame, Renderer},
};

/// Identifies a root node inserted with [`SceneHost::add_to_scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

pub type ResizeCallback = Box<dyn FnMut(u32, u32)>;

/// What the figure and globe need from whoever owns the render graph.
pub trait SceneHost {
    /// Inserts a tree root into the render graph. The host owns it from now on.
    fn add_to_scene(&mut self, node: Box<dyn SceneNode>) -> NodeId;

    fn node(&self, id: NodeId) -> Option<&dyn SceneNode>;

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Box<dyn SceneNode>>;

    /// Draws the current state of the render graph.
    fn render(&mut self) -> anyhow::Result<()>;

    /// Registers `callback` to run after every effective resize.
    fn on_resize(&mut self, callback: ResizeCallback);
}

pub const DEFAULT_FOV_DEG: f32 = 60.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 1000.0;
pub const DEFAULT_CAMERA_DISTANCE: f32 = 2.0;

pub struct Scene<R: Renderer> {
    roots: Vec<Box<dyn SceneNode>>,
    lights: Vec<Light>,
    pub camera: Camera,
    pub clear_colour: [f32; 4],
    size: (u32, u32),
    resize_callbacks: Vec<ResizeCallback>,
    renderer: R,
}

impl<R: Renderer> Scene<R> {
    /// Empty scene with the default camera and a transparent clear colour.
    pub fn new(width: u32, height: u32, renderer: R) -> Self {
        let camera = Camera::new(
            DEFAULT_CAMERA_DISTANCE,
            width,
            height,
            Deg(DEFAULT_FOV_DEG),
            DEFAULT_NEAR,
            DEFAULT_FAR,
        );
        Self::with_camera(width, height, camera, renderer)
    }

    pub fn with_camera(width: u32, height: u32, camera: Camera, mut renderer: R) -> Self {
        renderer.resize(width, height);
        Self {
            roots: Vec::new(),
            lights: Vec::new(),
            camera,
            clear_colour: [0.0, 0.0, 0.0, 0.0],
            size: (width, height),
            resize_callbacks: Vec::new(),
            renderer,
        }
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn roots(&self) -> &[Box<dyn SceneNode>] {
        &self.roots
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Updates camera aspect and backend, then notifies resize callbacks.
    ///
    /// Zero sized surfaces are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring resize to {}x{}", width, height);
            return;
        }
        self.size = (width, height);
        self.camera.projection.resize(width, height);
        self.renderer.resize(width, height);
        for callback in self.resize_callbacks.iter_mut() {
            callback(width, height);
        }
    }
}

fn build_frame<'a>(
    roots: &'a [Box<dyn SceneNode>],
    lights: &[Light],
    camera: &Camera,
    clear_colour: [f32; 4],
) -> Frame<'a> {
    let mut basics = Vec::new();
    let mut transparents = Vec::new();
    for root in roots {
        root.get_render().set_pipelines(&mut basics, &mut transparents);
    }
    Frame {
        clear_colour,
        camera: camera.uniform(),
        lights: lights.iter().map(Light::to_uniform).collect(),
        basics,
        transparents,
    }
}

impl<R: Renderer> SceneHost for Scene<R> {
    fn add_to_scene(&mut self, node: Box<dyn SceneNode>) -> NodeId {
        log::debug!("adding '{}' to the scene", node.name());
        self.roots.push(node);
        NodeId(self.roots.len() - 1)
    }

    fn node(&self, id: NodeId) -> Option<&dyn SceneNode> {
        self.roots.get(id.0).map(|node| node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Box<dyn SceneNode>> {
        self.roots.get_mut(id.0)
    }

    fn render(&mut self) -> anyhow::Result<()> {
        for root in self.roots.iter_mut() {
            root.update_world_transform_all();
        }
        let Self {
            roots,
            lights,
            camera,
            clear_colour,
            renderer,
            ..
        } = self;
        let frame = build_frame(roots, lights, camera, *clear_colour);
        log::trace!("rendering {} draws", frame.draw_count());
        renderer.draw(&frame)
    }

    fn on_resize(&mut self, callback: ResizeCallback) {
        self.resize_callbacks.push(callback);
    }
}
