//! SceneSet: a group of scenes with an optional main scene.
//!
//! The main scene is the default parent for entities spawned without one.
//! Keeping it here, rather than in process-wide state, lets every test build
//! its own independent set.

use std::fmt;

use tracing::debug;

use crate::entity::{Entity, EntityId};
use crate::error::SceneError;
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(usize);

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

/// Where a spawned entity ended up.
#[derive(Debug)]
pub enum Spawned {
    Attached { scene: SceneId, entity: EntityId },
    /// No parent was given and no main scene is set.
    Detached(Entity),
}

impl Spawned {
    pub fn entity_id(&self) -> EntityId {
        match self {
            Spawned::Attached { entity, .. } => *entity,
            Spawned::Detached(e) => e.id(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SceneSet {
    scenes: Vec<Scene>,
    main: Option<SceneId>,
}

impl SceneSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, scene: Scene) -> SceneId {
        self.scenes.push(scene);
        SceneId(self.scenes.len() - 1)
    }

    /// Insert a scene and make it the main scene.
    pub fn insert_main(&mut self, scene: Scene) -> SceneId {
        let id = self.insert(scene);
        self.main = Some(id);
        id
    }

    /// Replace (or clear) the main scene. At most one is set at a time.
    pub fn set_main_scene(&mut self, id: Option<SceneId>) -> Result<(), SceneError> {
        if let Some(id) = id {
            self.scene(id)?;
        }
        self.main = id;
        Ok(())
    }

    pub fn main_scene(&self) -> Option<SceneId> {
        self.main
    }

    pub fn is_main_scene(&self, id: SceneId) -> bool {
        self.main == Some(id)
    }

    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(id.0)
    }

    pub fn get_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.get_mut(id.0)
    }

    pub fn scene(&self, id: SceneId) -> Result<&Scene, SceneError> {
        self.get(id).ok_or(SceneError::UnknownScene(id))
    }

    pub fn scene_mut(&mut self, id: SceneId) -> Result<&mut Scene, SceneError> {
        self.get_mut(id).ok_or(SceneError::UnknownScene(id))
    }

    /// Scene currently holding `entity`.
    pub fn find_entity(&self, entity: EntityId) -> Option<SceneId> {
        self.scenes
            .iter()
            .position(|s| s.contains(entity))
            .map(SceneId)
    }

    /// Attach a new entity to `parent`, or to the main scene when `parent` is `None`.
    pub fn spawn(&mut self, entity: Entity, parent: Option<SceneId>) -> Result<Spawned, SceneError> {
        match parent.or(self.main) {
            Some(scene) => {
                let entity = self.scene_mut(scene)?.add_to_scene(entity);
                Ok(Spawned::Attached { scene, entity })
            }
            None => Ok(Spawned::Detached(entity)),
        }
    }

    /// Move an attached entity to another scene, or detach it with `None`.
    ///
    /// The position is kept as-is and wraps into the new scene on its next
    /// write. Reassigning to the current parent does nothing. A detached entity
    /// is handed back.
    pub fn set_parent(
        &mut self,
        entity: EntityId,
        parent: Option<SceneId>,
    ) -> Result<Option<Entity>, SceneError> {
        let from = self
            .find_entity(entity)
            .ok_or(SceneError::UnknownEntity(entity))?;
        if parent == Some(from) {
            return Ok(None);
        }
        if let Some(to) = parent {
            self.scene(to)?;
        }

        let detached = self
            .scene_mut(from)?
            .remove(entity)
            .ok_or(SceneError::UnknownEntity(entity))?;
        debug!(%entity, %from, to = ?parent, "reparent");

        match parent {
            Some(to) => {
                self.scene_mut(to)?.add_to_scene(detached);
                Ok(None)
            }
            None => Ok(Some(detached)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SceneId, &Scene)> {
        self.scenes.iter().enumerate().map(|(i, s)| (SceneId(i), s))
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
