//! The planet stack: nine bodies laid out top to bottom along -Y.
//!
//! Order matters. The sun sits at the origin and every following body is one
//! `BODY_SPACING` further down, so scrolling the page walks the camera down
//! the stack.

pub const BODY_COUNT: usize = 9;

/// Vertical distance between neighbouring bodies.
pub const BODY_SPACING: f32 = 3.0;

/// Sphere radius shared by every body.
pub const BODY_RADIUS: f32 = 1.0;

/// Where the host serves texture files from.
pub const TEXTURE_ROOT: &str = "/textures";

/// Background image drawn behind the scene.
pub const BACKGROUND_TEXTURE: &str = "space";
pub const BACKGROUND_FILE: &str = "space.jpg";

/// Sprite used by every star particle.
pub const STAR_TEXTURE: &str = "star";
pub const STAR_FILE: &str = "star.png";

/// Static description of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub name: &'static str,
    /// Colour map file under `TEXTURE_ROOT`.
    pub map: &'static str,
    /// Optional normal map file under `TEXTURE_ROOT`.
    pub normal_map: Option<&'static str>,
}

pub const BODIES: [BodyDesc; BODY_COUNT] = [
    BodyDesc { name: "sun",     map: "sun.jpg",     normal_map: None },
    BodyDesc { name: "mercury", map: "mercury.jpg", normal_map: None },
    BodyDesc { name: "venus",   map: "venus.jpg",   normal_map: None },
    BodyDesc { name: "earth",   map: "earth.jpg",   normal_map: Some("earth_normal_map.png") },
    BodyDesc { name: "mars",    map: "mars.jpg",    normal_map: None },
    BodyDesc { name: "jupiter", map: "jupiter.jpg", normal_map: None },
    BodyDesc { name: "saturn",  map: "saturn.jpg",  normal_map: None },
    BodyDesc { name: "uranus",  map: "uranus.jpg",  normal_map: None },
    BodyDesc { name: "neptune", map: "neptune.jpg", normal_map: None },
];

impl BodyDesc {
    /// Y coordinate of the body at `index` in the stack.
    pub fn stack_y(index: usize, spacing: f32) -> f32 {
        -(index as f32) * spacing
    }

    /// CSS selector of the description panel paired with this body.
    pub fn overlay_selector(&self) -> String {
        format!(".{}-desc", self.name)
    }

    /// Registry name of the normal map texture, if the body has one.
    pub fn normal_map_name(&self) -> Option<String> {
        self.normal_map.map(|_| format!("{}_normal_map", self.name))
    }
}

/// Full URL path of a texture file.
pub fn texture_path(file: &str) -> String {
    format!("{}/{}", TEXTURE_ROOT, file)
}
