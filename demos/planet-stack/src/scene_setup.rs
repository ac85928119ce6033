//! Builds the static scene: background, starfield, the body stack and the
//! key light. Everything here runs once, from `Demo::init`.

use glam::Vec3;
use stellar_engine::error::Result;
use stellar_engine::{
    EngineContext, Geometry, Material, MeshComponent, ObjectId, PointLight, SceneObject,
    TextureRegistry,
};

use crate::bodies::{
    self, BodyDesc, BACKGROUND_FILE, BACKGROUND_TEXTURE, BODIES, BODY_COUNT, STAR_FILE,
    STAR_TEXTURE,
};
use crate::config::StackConfig;

/// Ids of everything `build` spawned.
#[derive(Debug, Clone)]
pub struct StackHandles {
    /// Bodies in stack order (sun first).
    pub bodies: [ObjectId; BODY_COUNT],
    pub stars: Vec<ObjectId>,
}

/// Register every texture the scene uses with the host loader.
pub fn register_textures(textures: &mut TextureRegistry) {
    textures.register(BACKGROUND_TEXTURE, bodies::texture_path(BACKGROUND_FILE));
    textures.register(STAR_TEXTURE, bodies::texture_path(STAR_FILE));
    for body in &BODIES {
        textures.register(body.name, bodies::texture_path(body.map));
        if let (Some(file), Some(name)) = (body.normal_map, body.normal_map_name()) {
            textures.register(name, bodies::texture_path(file));
        }
    }
}

/// Spawn the whole scene into `ctx`. Stars go in first, then the bodies.
pub fn build(ctx: &mut EngineContext, cfg: &StackConfig) -> Result<StackHandles> {
    register_textures(&mut ctx.textures);
    ctx.scene.background = Some(ctx.textures.require(BACKGROUND_TEXTURE)?);

    let stars = spawn_stars(ctx, cfg)?;

    let mut ids = [ObjectId(0); BODY_COUNT];
    for (i, body) in BODIES.iter().enumerate() {
        ids[i] = spawn_body(ctx, cfg, i, body)?;
    }

    let light = &cfg.light;
    ctx.lights.add(PointLight::from_hex(
        Vec3::from_array(light.position),
        light.color,
        light.intensity,
    ));

    log::info!("planet stack: {} bodies, {} stars", ids.len(), stars.len());
    Ok(StackHandles { bodies: ids, stars })
}

fn spawn_stars(ctx: &mut EngineContext, cfg: &StackConfig) -> Result<Vec<ObjectId>> {
    let star = ctx.textures.require(STAR_TEXTURE)?;
    let mesh = MeshComponent::new(
        Geometry::plane(cfg.star_size, cfg.star_size),
        Material::textured(star).transparent(),
    );

    let mut ids = Vec::with_capacity(cfg.particle_count);
    for _ in 0..cfg.particle_count {
        let x = ctx.rng.spread(cfg.particle_spread);
        let y = ctx.rng.spread(cfg.particle_spread);
        let z = ctx.rng.spread(cfg.particle_spread);
        let id = ctx.next_id();
        let object = SceneObject::new(id)
            .with_position(Vec3::new(x, y, z))
            .with_mesh(mesh);
        ids.push(ctx.scene.spawn(object)?);
    }
    Ok(ids)
}

fn spawn_body(
    ctx: &mut EngineContext,
    cfg: &StackConfig,
    index: usize,
    body: &BodyDesc,
) -> Result<ObjectId> {
    let mut material = Material::textured(ctx.textures.require(body.name)?);
    if let Some(name) = body.normal_map_name() {
        material = material.with_normal_map(ctx.textures.require(&name)?);
    }

    let id = ctx.next_id();
    let object = SceneObject::new(id)
        .with_name(body.name)
        .with_position(Vec3::new(0.0, BodyDesc::stack_y(index, cfg.body_spacing), 0.0))
        .with_mesh(MeshComponent::new(Geometry::sphere(cfg.body_radius), material));
    ctx.scene.spawn(object)
}
