//! Planet Stack: nine textured bodies stacked down the page over a
//! starfield. Scrolling slides the camera down the stack; hovering a body
//! pulls it aside and fades in its description panel.

use stellar_engine::error::Result;
use stellar_engine::input::queue::InputQueue;
use stellar_engine::{Demo, EngineContext};

use crate::bodies::BODIES;
use crate::config::StackConfig;
use crate::interaction::{self, BodyLink, Interaction};
use crate::scene_setup;

pub struct PlanetStack {
    settings: StackConfig,
    interaction: Interaction,
    /// Bodies in stack order, filled by `init`.
    bodies: Vec<BodyLink>,
}

impl PlanetStack {
    pub fn new() -> Self {
        let settings = StackConfig::default();
        Self {
            interaction: Interaction::new(settings.hover_policy),
            settings,
            bodies: Vec::new(),
        }
    }

    pub fn settings(&self) -> &StackConfig {
        &self.settings
    }

    pub fn bodies(&self) -> &[BodyLink] {
        &self.bodies
    }
}

impl Default for PlanetStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for PlanetStack {
    fn configure(&mut self, json: &str) -> Result<()> {
        self.settings = StackConfig::from_json(json)?;
        self.interaction.set_policy(self.settings.hover_policy);
        log::info!("hover policy: {:?}", self.interaction.policy());
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<()> {
        let handles = scene_setup::build(ctx, &self.settings)?;
        self.bodies = handles
            .bodies
            .iter()
            .map(|&object| BodyLink { object, overlay: None })
            .collect();
        Ok(())
    }

    fn overlay_selectors(&self) -> Vec<String> {
        BODIES.iter().map(|b| b.overlay_selector()).collect()
    }

    fn overlays_bound(&mut self, ctx: &mut EngineContext) {
        for (link, body) in self.bodies.iter_mut().zip(BODIES.iter()) {
            link.overlay = match ctx.overlays.require(&body.overlay_selector()) {
                Ok(id) => Some(id),
                Err(err) => {
                    log::warn!("{}; the {} panel will not animate", err, body.name);
                    None
                }
            };
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        interaction::apply_input(ctx, input, self.settings.scroll_factor);
        self.interaction.frame(ctx, &self.bodies);
    }
}
