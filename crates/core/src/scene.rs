//! Scene module - owns entities and composites them into a stage
//!
//! Rendering builds a background-filled [`Stage`], then stamps every selected
//! child in descending layer order, so the smallest layer number is painted
//! last and ends up on top. Entity cells wrap around the scene edges.
//!
//! [`Scene::compose`] is the pure half of a render pass. It never touches
//! entity or scene state, which is what makes it safe to use as a collision
//! bake while an entity is in the middle of moving.

use std::fmt;
use std::io;

use tracing::trace;

use crate::entity::{Content, Entity, EntityId};
use crate::error::SceneError;
use crate::present::{PresentOptions, Presenter, TextPresenter};
use crate::stage::{Cell, Stage};
use crate::types::{
    has_layer_wildcard, selects_all_layers, Colour, Size, Vec2D, DEFAULT_CLEAR_CHAR, VOID_CHAR,
};

/// Callback run before each render.
pub type RenderHook = Box<dyn FnMut()>;

/// Background and display settings for a new scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneConfig {
    pub clear_char: char,
    pub bg_colour: Colour,
    pub use_separator: bool,
    /// Terminal height for the separator when frames go to stdout without a
    /// presenter.
    pub terminal_rows: Option<u16>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_char: DEFAULT_CLEAR_CHAR,
            bg_colour: Colour::NONE,
            use_separator: true,
            terminal_rows: None,
        }
    }
}

/// Options for a single render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Hand the finished stage to the presenter.
    pub is_display: bool,
    /// Only draw entities on these layers. Empty or `[-1]` means all.
    pub layers: Vec<i32>,
    pub run_functions: bool,
    pub show_coord_numbers: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            is_display: true,
            layers: Vec::new(),
            run_functions: true,
            show_coord_numbers: false,
        }
    }
}

impl RenderOptions {
    /// A silent pass: no display, no render hooks.
    pub fn bake(layers: Vec<i32>) -> Self {
        Self {
            is_display: false,
            layers,
            run_functions: false,
            show_coord_numbers: false,
        }
    }
}

pub struct Scene {
    size: Size,
    pub clear_char: char,
    pub bg_colour: Colour,
    pub use_separator: bool,
    pub terminal_rows: Option<u16>,
    children: Vec<Entity>,
    render_functions: Vec<RenderHook>,
    presenter: Option<Box<dyn Presenter>>,
}

impl Scene {
    pub fn new(size: Size) -> Result<Self, SceneError> {
        Self::with_config(size, SceneConfig::default())
    }

    pub fn with_config(size: Size, config: SceneConfig) -> Result<Self, SceneError> {
        if size.is_empty() {
            return Err(SceneError::EmptySize(size));
        }
        Ok(Self {
            size,
            clear_char: config.clear_char,
            bg_colour: config.bg_colour,
            use_separator: config.use_separator,
            terminal_rows: config.terminal_rows,
            children: Vec::new(),
            render_functions: Vec::new(),
            presenter: None,
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn add_render_function(&mut self, hook: impl FnMut() + 'static) {
        self.render_functions.push(Box::new(hook));
    }

    /// Where displayed frames go. Without one they are printed to stdout.
    pub fn set_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.presenter = Some(presenter);
    }

    pub fn take_presenter(&mut self) -> Option<Box<dyn Presenter>> {
        self.presenter.take()
    }

    /// The cell every stage position starts as.
    pub fn get_background(&self) -> Cell {
        Cell::new(self.clear_char, self.bg_colour)
    }

    /// Attach an entity.
    ///
    /// The entity keeps its position as given; it is wrapped into this scene on
    /// the next position write. Callers moving an entity between scenes should
    /// detach it from the old one first (see `SceneSet::set_parent`).
    pub fn add_to_scene(&mut self, mut entity: Entity) -> EntityId {
        entity.attach(self.size);
        let id = entity.id();
        self.children.push(entity);
        id
    }

    /// Detach an entity and hand it back.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.index_of(id)?;
        let mut entity = self.children.remove(index);
        entity.detach();
        Some(entity)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.children.iter().find(|e| e.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.children.iter_mut().find(|e| e.id() == id)
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[Entity] {
        &self.children
    }

    pub(crate) fn index_of(&self, id: EntityId) -> Option<usize> {
        self.children.iter().position(|e| e.id() == id)
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> &mut Entity {
        &mut self.children[index]
    }

    pub(crate) fn child(&self, index: usize) -> &Entity {
        &self.children[index]
    }

    /// Run a render pass.
    ///
    /// Render hooks run first when `run_functions` is set. With `is_display`
    /// the stage is handed to the presenter. The raw stage is returned either
    /// way and never includes coordinate labels.
    pub fn render(&mut self, opts: &RenderOptions) -> Result<Stage, SceneError> {
        if opts.run_functions {
            for hook in self.render_functions.iter_mut() {
                hook();
            }
        }

        let stage = self.compose(&opts.layers);
        trace!(size = %self.size, children = self.children.len(), display = opts.is_display, "render");

        if opts.is_display {
            self.display(&stage, opts.show_coord_numbers)?;
        }
        Ok(stage)
    }

    fn display(&mut self, stage: &Stage, show_coord_numbers: bool) -> Result<(), SceneError> {
        let opts = PresentOptions {
            show_coord_numbers,
            use_separator: self.use_separator,
        };
        match self.presenter.as_mut() {
            Some(presenter) => presenter.present(stage, opts)?,
            None => {
                let mut fallback = TextPresenter::new(io::stdout().lock());
                fallback.set_terminal_rows(self.terminal_rows);
                fallback.present(stage, opts)?
            }
        }
        Ok(())
    }

    /// Composite the selected children into a fresh stage.
    pub fn compose(&self, layers: &[i32]) -> Stage {
        let mut stage = Stage::new(self.size, self.get_background());

        let mut candidates: Vec<&Entity> = if selects_all_layers(layers) {
            self.children.iter().collect()
        } else {
            self.children
                .iter()
                .filter(|e| layers.contains(&e.layer))
                .collect()
        };
        // Stable sort: equal layers keep insertion order.
        candidates.sort_by(|a, b| b.layer.cmp(&a.layer));

        for entity in candidates {
            if entity.hidden {
                continue;
            }
            self.stamp(&mut stage, entity);
        }
        stage
    }

    fn stamp(&self, stage: &mut Stage, entity: &Entity) {
        let size = entity.size();
        match entity.content() {
            Content::Fill(ch) => {
                for x in 0..size.width {
                    for y in 0..size.height {
                        self.put(stage, entity, x, y, *ch);
                    }
                }
            }
            content => {
                let Some(sprite) = content.sprite() else {
                    return;
                };
                let width = size.width.saturating_add(sprite.max_extra());
                for x in 0..width {
                    for y in 0..size.height {
                        let pixel = sprite.pixel(x as usize, y as usize);
                        if pixel == ' ' && sprite.transparent {
                            continue;
                        }
                        self.put(stage, entity, x, y, pixel);
                    }
                }
            }
        }
    }

    #[inline(always)]
    fn put(&self, stage: &mut Stage, entity: &Entity, x: u16, y: u16, pixel: char) {
        let origin = entity.pos().wrapped(self.size);
        let at = (origin + Vec2D::new(x as i32, y as i32)).wrapped(self.size);
        let ch = if pixel == VOID_CHAR { ' ' } else { pixel };
        stage.set(at.x as u16, at.y as u16, Cell::new(ch, entity.colour));
    }

    /// True if the wrapped cell at `pos` shows anything but the background.
    ///
    /// Pass a `bake` to test against an earlier render; otherwise a silent
    /// render restricted to `layers` is made, where `-1` anywhere in the list
    /// means all layers.
    pub fn is_entity_at(&self, pos: Vec2D, layers: &[i32], bake: Option<&Stage>) -> bool {
        let pos = pos.wrapped(self.size);
        let fresh;
        let stage = match bake {
            Some(stage) => stage,
            None => {
                let layers: &[i32] = if has_layer_wildcard(layers) { &[] } else { layers };
                fresh = self.compose(layers);
                &fresh
            }
        };
        stage
            .at(pos)
            .is_some_and(|cell| cell != self.get_background())
    }

    /// Children whose raw bounding box contains `pos`.
    ///
    /// This is box membership without wraparound, so near the scene edges it
    /// can disagree with [`Scene::is_entity_at`]. Empty or `[-1]` layers
    /// means all.
    pub fn get_entities_at(&self, pos: Vec2D, layers: &[i32]) -> Vec<&Entity> {
        let all = selects_all_layers(layers);
        self.children
            .iter()
            .filter(|e| all || layers.contains(&e.layer))
            .filter(|e| e.covers(pos))
            .collect()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("size", &self.size)
            .field("clear_char", &self.clear_char)
            .field("bg_colour", &self.bg_colour)
            .field("use_separator", &self.use_separator)
            .field("terminal_rows", &self.terminal_rows)
            .field("children", &self.children)
            .field("render_functions", &self.render_functions.len())
            .field("presenter", &self.presenter.is_some())
            .finish()
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scene(size={},clear_char='{}',children={})",
            self.size,
            self.clear_char,
            self.children.len()
        )
    }
}
