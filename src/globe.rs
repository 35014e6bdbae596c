//! Earth, cloud layer and starfield.

use std::rc::Rc;

use cgmath::Rad;
use serde::{Deserialize, Serialize};

use crate::{
    data_structures::{
        geometry::Geometry,
        material::{Color, Material, Side},
        scene_graph::MeshNode,
    },
    scene::{NodeId, SceneHost},
};

/// Texture locations handed to the renderer backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeTextures {
    pub earth: String,
    pub earth_bump: String,
    pub clouds: String,
    pub galaxy: String,
}

impl Default for GlobeTextures {
    fn default() -> Self {
        Self {
            earth: "texture/earthmap1k.jpg".to_string(),
            earth_bump: "texture/earthbump.jpg".to_string(),
            clouds: "texture/earthCloud.png".to_string(),
            galaxy: "texture/galaxy.png".to_string(),
        }
    }
}

/// Radians added to each sphere's yaw per tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeSpin {
    pub earth: f32,
    pub clouds: f32,
    pub stars: f32,
}

impl Default for GlobeSpin {
    fn default() -> Self {
        Self {
            earth: 0.0015,
            clouds: 0.001,
            stars: 0.002,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub textures: GlobeTextures,
    pub spin: GlobeSpin,
    pub earth_radius: f32,
    pub cloud_radius: f32,
    pub star_radius: f32,
    pub bump_scale: f32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            textures: GlobeTextures::default(),
            spin: GlobeSpin::default(),
            earth_radius: 0.6,
            cloud_radius: 0.63,
            star_radius: 80.0,
            bump_scale: 0.3,
        }
    }
}

pub struct Globe {
    earth: NodeId,
    clouds: NodeId,
    stars: NodeId,
    spin: GlobeSpin,
}

impl Globe {
    /// Adds the three spheres to `host`.
    pub fn new(host: &mut dyn SceneHost, config: &GlobeConfig) -> Self {
        let textures = &config.textures;
        let earth = MeshNode::new(
            "earth",
            Geometry::sphere(config.earth_radius, 32, 32),
            Rc::new(
                Material::phong(Color::WHITE)
                    .with_map(textures.earth.as_str())
                    .with_bump_map(textures.earth_bump.as_str(), config.bump_scale),
            ),
        );
        let clouds = MeshNode::new(
            "clouds",
            Geometry::sphere(config.cloud_radius, 32, 32),
            Rc::new(
                Material::phong(Color::WHITE)
                    .with_map(textures.clouds.as_str())
                    .transparent(),
            ),
        );
        // seen from inside, so only back faces are drawn
        let stars = MeshNode::new(
            "stars",
            Geometry::sphere(config.star_radius, 64, 64),
            Rc::new(
                Material::basic(Color::WHITE)
                    .with_map(textures.galaxy.as_str())
                    .with_side(Side::Back),
            ),
        );
        Self {
            earth: host.add_to_scene(Box::new(earth)),
            clouds: host.add_to_scene(Box::new(clouds)),
            stars: host.add_to_scene(Box::new(stars)),
            spin: config.spin,
        }
    }

    pub fn earth(&self) -> NodeId {
        self.earth
    }

    pub fn clouds(&self) -> NodeId {
        self.clouds
    }

    pub fn stars(&self) -> NodeId {
        self.stars
    }

    /// Advances every sphere by one tick of spin.
    pub fn spin(&self, host: &mut dyn SceneHost) {
        for (id, step) in [
            (self.stars, self.spin.stars),
            (self.earth, self.spin.earth),
            (self.clouds, self.spin.clouds),
        ] {
            match host.node_mut(id) {
                Some(node) => node.get_local_transform_mut().rotation.y += Rad(step),
                None => log::warn!("globe node {:?} missing from the scene", id),
            }
        }
    }
}
