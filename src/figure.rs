//! Procedural low-poly figure.
//!
//! [`Figure::construct`] assembles the rig once and hands its root to a scene
//! host; [`Figure::pose`] projects the current [`FigureParams`] onto that rig
//! every tick. The rig looks like this (child order matters for [`NodePath`]s):
//!
//! ```text
//! group
//! ├── body
//! │   ├── body mesh
//! │   ├── legs ── leg, leg
//! │   ├── arm group ── arm      (+x side)
//! │   └── arm group ── arm      (-x side)
//! └── head
//!     ├── head mesh
//!     └── eyes ── eye, eye
//! ```

use std::rc::Rc;

use cgmath::Rad;
use serde::{Deserialize, Serialize};

use crate::{
    data_structures::{
        geometry::Geometry,
        instance::Instance,
        material::{Color, Material},
        scene_graph::{ContainerNode, MeshNode, NodePath, SceneNode},
    },
    random::RandomSource,
    scene::{NodeId, SceneHost},
};

pub const DEFAULT_PLACEMENT: f32 = 0.82;
pub const FIGURE_SCALE: f32 = 0.2;

const BODY_SIZE: [f32; 3] = [1.0, 1.5, 1.0];
const HEAD_SIZE: f32 = 1.4;
const HEAD_OFFSET_Y: f32 = 1.65;
const EYE_RADIUS: f32 = 0.15;
const EYE_SPACING: f32 = 0.36;
const EYES_OFFSET: [f32; 3] = [0.0, -0.1, 0.7];
const ARM_SIZE: [f32; 3] = [0.25, 0.85, 0.25];
const ARM_OFFSET: [f32; 2] = [0.8, 0.6];
const ARM_REST_ANGLE_DEG: f32 = 30.0;
const LEG_SIZE: [f32; 3] = [0.25, 0.4, 0.25];
const LEG_SPACING: f32 = 0.22;
const LEGS_OFFSET_Y: f32 = -1.15;

const HEAD_SATURATION: f32 = 30.0;
const BODY_SATURATION: f32 = 85.0;
const BODY_LIGHTNESS: f32 = 50.0;
const EYE_COLOR: u32 = 0x44445c;

/// Sign for the `index`-th part of a left/right pair: `+1` first, `-1` second.
pub fn mirror_sign(index: usize) -> f32 {
    if index % 2 == 0 { 1.0 } else { -1.0 }
}

/// Animated state of a figure.
///
/// Written by the tween driver only and read by [`Figure::pose`] only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureParams {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Yaw in radians.
    pub ry: f32,
    /// Arm swing in radians; zero until a tween drives it.
    pub arm_rotation: f32,
}

impl Default for FigureParams {
    fn default() -> Self {
        Self {
            x: DEFAULT_PLACEMENT,
            y: DEFAULT_PLACEMENT,
            z: DEFAULT_PLACEMENT,
            ry: DEFAULT_PLACEMENT,
            arm_rotation: 0.0,
        }
    }
}

impl FigureParams {
    /// Defaults with every field present in `overrides` replaced.
    pub fn merged(overrides: &FigureOverrides) -> Self {
        let defaults = Self::default();
        Self {
            x: overrides.x.unwrap_or(defaults.x),
            y: overrides.y.unwrap_or(defaults.y),
            z: overrides.z.unwrap_or(defaults.z),
            ry: overrides.ry.unwrap_or(defaults.ry),
            arm_rotation: overrides.arm_rotation.unwrap_or(defaults.arm_rotation),
        }
    }
}

/// Partial [`FigureParams`]; absent fields keep their defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureOverrides {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub ry: Option<f32>,
    pub arm_rotation: Option<f32>,
}

/// Colour choices drawn once per figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub head_hue: u32,
    pub body_hue: u32,
    pub head_lightness: u32,
}

impl Palette {
    /// Draws head hue, body hue and head lightness, in that order.
    pub fn draw(rng: &mut dyn RandomSource) -> Self {
        let head_hue = rng.int_in(0..360);
        let body_hue = rng.int_in(0..360);
        let head_lightness = rng.int_in(40..65);
        Self {
            head_hue,
            body_hue,
            head_lightness,
        }
    }

    pub fn head_color(&self) -> Color {
        Color::hsl(
            self.head_hue as f32,
            HEAD_SATURATION,
            self.head_lightness as f32,
        )
    }

    pub fn body_color(&self) -> Color {
        Color::hsl(self.body_hue as f32, BODY_SATURATION, BODY_LIGHTNESS)
    }
}

/// Handle to a figure living in a scene host.
#[derive(Clone, Debug)]
pub struct Figure {
    root: NodeId,
    body: NodePath,
    head: NodePath,
    arms: [NodePath; 2],
    palette: Palette,
}

/// Intermediate state while the rig is being assembled.
struct RigBuilder {
    group: ContainerNode,
    head_material: Rc<Material>,
    body_material: Rc<Material>,
}

impl RigBuilder {
    /// Returns the body's index among the group's children.
    fn create_body(&mut self) -> usize {
        let mut body = ContainerNode::new("body");
        body.add_child(Box::new(MeshNode::new(
            "body mesh",
            Geometry::cuboid(BODY_SIZE[0], BODY_SIZE[1], BODY_SIZE[2]),
            self.body_material.clone(),
        )));
        body.add_child(Box::new(self.create_legs()));
        self.group.add_child(Box::new(body))
    }

    fn create_legs(&self) -> ContainerNode {
        let mut legs = ContainerNode::new("legs")
            .with_transform(Instance::new().with_position(0.0, LEGS_OFFSET_Y, 0.0));
        let geometry = Geometry::cuboid(LEG_SIZE[0], LEG_SIZE[1], LEG_SIZE[2]);
        for i in 0..2 {
            let m = mirror_sign(i);
            legs.add_child(Box::new(
                MeshNode::new("leg", geometry, self.head_material.clone())
                    .with_transform(Instance::new().with_position(m * LEG_SPACING, 0.0, 0.0)),
            ));
        }
        legs
    }

    fn create_head(&mut self) -> usize {
        let mut head = ContainerNode::new("head")
            .with_transform(Instance::new().with_position(0.0, HEAD_OFFSET_Y, 0.0));
        head.add_child(Box::new(MeshNode::new(
            "head mesh",
            Geometry::cuboid(HEAD_SIZE, HEAD_SIZE, HEAD_SIZE),
            self.head_material.clone(),
        )));
        head.add_child(Box::new(Self::create_eyes()));
        self.group.add_child(Box::new(head))
    }

    fn create_eyes() -> ContainerNode {
        let mut eyes = ContainerNode::new("eyes").with_transform(Instance::new().with_position(
            EYES_OFFSET[0],
            EYES_OFFSET[1],
            EYES_OFFSET[2],
        ));
        let geometry = Geometry::sphere(EYE_RADIUS, 12, 8);
        let material = Rc::new(Material::lambert(Color::hex(EYE_COLOR)));
        for i in 0..2 {
            let m = mirror_sign(i);
            eyes.add_child(Box::new(
                MeshNode::new("eye", geometry, material.clone())
                    .with_transform(Instance::new().with_position(EYE_SPACING * m, 0.0, 0.0)),
            ));
        }
        eyes
    }

    /// Attaches both arm groups to the body at `body_index`.
    fn create_arms(&mut self, body_index: usize) -> [NodePath; 2] {
        let body_path = NodePath::root().child(body_index);
        let geometry = Geometry::cuboid(ARM_SIZE[0], ARM_SIZE[1], ARM_SIZE[2]);
        let height = ARM_SIZE[1];
        [0, 1].map(|i| {
            let m = mirror_sign(i);
            let arm = MeshNode::new("arm", geometry, self.head_material.clone())
                .with_transform(Instance::new().with_position(0.0, height * -0.5, 0.0));
            let mut arm_group = ContainerNode::new("arm group").with_transform(
                Instance::new().with_position(m * ARM_OFFSET[0], ARM_OFFSET[1], 0.0),
            );
            arm_group.get_local_transform_mut().rotation.z =
                Rad(ARM_REST_ANGLE_DEG.to_radians() * m);
            arm_group.add_child(Box::new(arm));

            let body = &mut self.group.get_children_mut()[body_index];
            body_path.child(body.add_child(Box::new(arm_group)))
        })
    }
}

impl Figure {
    /// Builds a figure and inserts its root into `host`.
    ///
    /// Colours are drawn from `rng` on every call, so two figures built from
    /// the same source in sequence differ.
    pub fn construct(
        host: &mut dyn SceneHost,
        overrides: &FigureOverrides,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let params = FigureParams::merged(overrides);

        let mut root = Instance::new()
            .with_position(params.x, params.y, params.z)
            .with_uniform_scale(FIGURE_SCALE);
        root.rotation.y = Rad(params.ry);

        let palette = Palette::draw(rng);
        let mut rig = RigBuilder {
            group: ContainerNode::new("figure").with_transform(root),
            head_material: Rc::new(Material::lambert(palette.head_color())),
            body_material: Rc::new(Material::lambert(palette.body_color())),
        };
        let body = rig.create_body();
        let head = rig.create_head();
        let arms = rig.create_arms(body);

        let root = host.add_to_scene(Box::new(rig.group));
        log::info!(
            "figure {:?} constructed: head hsl({}, {}%, {}%), body hsl({}, {}%, {}%)",
            root,
            palette.head_hue,
            HEAD_SATURATION,
            palette.head_lightness,
            palette.body_hue,
            BODY_SATURATION,
            BODY_LIGHTNESS,
        );

        Self {
            root,
            body: NodePath::root().child(body),
            head: NodePath::root().child(head),
            arms,
            palette,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> &NodePath {
        &self.body
    }

    pub fn head(&self) -> &NodePath {
        &self.head
    }

    /// Arm groups, `+x` side first.
    pub fn arms(&self) -> &[NodePath; 2] {
        &self.arms
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Writes yaw, height and arm swing from `params` into the rig.
    ///
    /// Only `y`, `ry` and `arm_rotation` are applied; `x` and `z` stay wherever
    /// they were. Non-finite values are treated as zero.
    pub fn pose(&self, host: &mut dyn SceneHost, params: &FigureParams) {
        let Some(root) = host.node_mut(self.root) else {
            log::warn!("figure root {:?} is not part of the scene, pose skipped", self.root);
            return;
        };
        {
            let local = root.get_local_transform_mut();
            local.rotation.y = Rad(finite_or_zero(params.ry));
            local.position.y = finite_or_zero(params.y);
        }
        let swing = finite_or_zero(params.arm_rotation);
        for (index, path) in self.arms.iter().enumerate() {
            match path.resolve_mut(&mut *root) {
                Some(arm) => {
                    arm.get_local_transform_mut().rotation.z = Rad(swing * mirror_sign(index));
                }
                None => log::warn!("arm path {:?} no longer resolves", path),
            }
        }
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}
