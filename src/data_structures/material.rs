//! Surface materials and colours.
//!
//! Materials are immutable once built and shared between meshes through
//! [`Rc`](std::rc::Rc) handles, so recolouring one mesh never requires touching
//! the others that reuse it.

/// An sRGB colour with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB` notation.
    pub fn hex(value: u32) -> Self {
        let channel = |shift: u32| ((value >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// CSS style `hsl(hue, saturation%, lightness%)`.
    ///
    /// `hue` is in degrees and wraps around; saturation and lightness are
    /// percentages and are clamped to `0..=100`.
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::rgb(l, l, l);
        }
        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::rgb(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    }

    /// Converts to linear space, which is what lighting is computed in.
    pub fn to_linear(self) -> [f32; 3] {
        let convert = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        [convert(self.r), convert(self.g), convert(self.b)]
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Lighting model used by a backend when shading a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Unlit, colour/texture only.
    Basic,
    /// Diffuse only.
    Lambert,
    /// Diffuse plus specular, with optional bump mapping.
    Phong,
}

/// Which faces are rasterised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    Front,
    Back,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: Color,
    /// Texture location resolved by the renderer backend.
    pub map: Option<String>,
    pub bump_map: Option<String>,
    pub bump_scale: f32,
    pub transparent: bool,
    pub side: Side,
}

impl Material {
    fn with_shading(shading: Shading, color: Color) -> Self {
        Self {
            shading,
            color,
            map: None,
            bump_map: None,
            bump_scale: 1.0,
            transparent: false,
            side: Side::Front,
        }
    }

    pub fn basic(color: Color) -> Self {
        Self::with_shading(Shading::Basic, color)
    }

    pub fn lambert(color: Color) -> Self {
        Self::with_shading(Shading::Lambert, color)
    }

    pub fn phong(color: Color) -> Self {
        Self::with_shading(Shading::Phong, color)
    }

    pub fn with_map(mut self, map: impl Into<String>) -> Self {
        self.map = Some(map.into());
        self
    }

    pub fn with_bump_map(mut self, bump_map: impl Into<String>, scale: f32) -> Self {
        self.bump_map = Some(bump_map.into());
        self.bump_scale = scale;
        self
    }

    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}
