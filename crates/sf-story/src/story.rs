//! The scene registry.

use std::collections::HashMap;

use log::debug;

use crate::error::{StoryError, StoryResult};
use crate::scene::{Scene, SceneId, StoryContext, Transition};
use crate::scenes;

/// Maps scene identifiers to the scenes that play them.
pub struct Story {
    scenes: HashMap<SceneId, Box<dyn Scene>>,
}

impl Story {
    /// A story with no scenes registered.
    pub fn empty() -> Self {
        Self {
            scenes: HashMap::new(),
        }
    }

    /// The full Spirefall story.
    pub fn standard() -> Self {
        let mut story = Self::empty();
        for scene in scenes::all() {
            story.register(scene);
        }
        story
    }

    /// Register a scene under its own id, replacing any previous one.
    pub fn register(&mut self, scene: Box<dyn Scene>) {
        self.scenes.insert(scene.id(), scene);
    }

    /// Whether a scene is registered for `id`.
    pub fn contains(&self, id: SceneId) -> bool {
        self.scenes.contains_key(&id)
    }

    /// Number of registered scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scenes are registered.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Play the scene registered for `id`.
    pub fn advance(&self, id: SceneId, ctx: &mut StoryContext<'_>) -> StoryResult<Transition> {
        let scene = self
            .scenes
            .get(&id)
            .ok_or_else(|| StoryError::UnknownScene(id.to_string()))?;
        debug!("entering scene {id}");
        let transition = scene.advance(ctx)?;
        debug!("scene {id} -> {transition:?}");
        Ok(transition)
    }
}

impl Default for Story {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Story {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&str> = self.scenes.keys().map(|id| id.as_str()).collect();
        ids.sort_unstable();
        f.debug_struct("Story").field("scenes", &ids).finish()
    }
}
