//! The handle scripts use to reach the engine.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use tessera_core::EntityId;
use tessera_native::NativeEngine;
use tessera_services::Settings;

use crate::entity::Entity;
use crate::facades::{
    Application, Gizmos, Input, Log, Noise, Physics, Scene, SceneManager, Time,
};
use crate::random::Random;

/// Shared engine handle plus script-side state. Clones share both.
#[derive(Clone)]
pub struct ScriptContext {
    engine: Rc<dyn NativeEngine>,
    random: Rc<RefCell<Random>>,
}

impl ScriptContext {
    pub fn new(engine: Rc<dyn NativeEngine>) -> Self {
        Self::with_random(engine, Random::from_entropy())
    }

    pub fn with_seed(engine: Rc<dyn NativeEngine>, seed: u64) -> Self {
        Self::with_random(engine, Random::seeded(seed))
    }

    /// Seeds `Random` from `settings.random.seed` when one is configured.
    pub fn with_settings(engine: Rc<dyn NativeEngine>, settings: &Settings) -> Self {
        let random = settings
            .random
            .seed
            .map_or_else(Random::from_entropy, Random::seeded);
        Self::with_random(engine, random)
    }

    fn with_random(engine: Rc<dyn NativeEngine>, random: Random) -> Self {
        Self {
            engine,
            random: Rc::new(RefCell::new(random)),
        }
    }

    pub fn engine(&self) -> &Rc<dyn NativeEngine> {
        &self.engine
    }

    /// A fresh handle for `id` with its own empty cache.
    pub fn entity(&self, id: EntityId) -> Entity {
        Entity::new(id, Rc::clone(&self.engine))
    }

    /// Panics if the generator is already borrowed.
    pub fn random(&self) -> RefMut<'_, Random> {
        self.random.borrow_mut()
    }

    pub fn application(&self) -> Application<'_> {
        Application::new(self.engine.as_ref())
    }

    pub fn time(&self) -> Time<'_> {
        Time::new(self.engine.as_ref())
    }

    pub fn input(&self) -> Input<'_> {
        Input::new(self.engine.as_ref())
    }

    pub fn physics(&self) -> Physics<'_> {
        Physics::new(self)
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene::new(self)
    }

    pub fn scene_manager(&self) -> SceneManager<'_> {
        SceneManager::new(self.engine.as_ref())
    }

    pub fn log(&self) -> Log<'_> {
        Log::new(self.engine.as_ref())
    }

    pub fn gizmos(&self) -> Gizmos<'_> {
        Gizmos::new(self.engine.as_ref())
    }

    pub fn noise(&self) -> Noise<'_> {
        Noise::new(self.engine.as_ref())
    }
}

impl std::fmt::Debug for ScriptContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptContext").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_native::HeadlessEngine;

    #[test]
    fn test_clones_share_random() {
        let ctx = ScriptContext::with_seed(Rc::new(HeadlessEngine::new()), 9);
        let mut reference = Random::seeded(9);

        let clone = ctx.clone();
        assert_eq!(ctx.random().next_u32(), reference.next_u32());
        assert_eq!(clone.random().next_u32(), reference.next_u32());
    }

    #[test]
    fn test_settings_seed() {
        let mut settings = Settings::default();
        settings.random.seed = Some(21);
        let ctx = ScriptContext::with_settings(Rc::new(HeadlessEngine::new()), &settings);
        assert_eq!(ctx.random().next_u32(), Random::seeded(21).next_u32());
    }

    #[test]
    fn test_entity_handles_are_independent() {
        let headless = Rc::new(HeadlessEngine::new());
        let ctx = ScriptContext::new(headless.clone());
        let id = headless.create_entity("Player");

        let a = ctx.entity(id);
        let b = ctx.entity(id);
        assert_eq!(a, b);
        a.transform().unwrap();
        assert_eq!(a.cache().len(), 1);
        assert!(b.cache().is_empty());
    }
}
