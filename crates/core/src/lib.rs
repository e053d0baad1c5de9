//! Scene core - entities, compositing and collisions
//!
//! This crate holds the render/collision logic. It does no terminal I/O of its
//! own: displayed frames go through the [`Presenter`] seam, which defaults to
//! plain text on stdout.
//!
//! # Module Structure
//!
//! - [`entity`]: positioned rectangles with fill or sprite content
//! - [`sprite`]: static and animated ASCII-art content
//! - [`image`]: multi-line text images
//! - [`stage`]: the composited grid produced by a render pass
//! - [`scene`]: entity ownership, the render pipeline and position queries
//! - [`movement`]: stepwise movement with collision resolution
//! - [`scene_set`]: groups of scenes with an optional main scene
//! - [`present`]: where displayed frames are written
//!
//! # Rendering Rules
//!
//! - **Layers**: entities are painted in descending layer order; the smallest
//!   layer number ends up on top
//! - **Wraparound**: an entity hanging over an edge reappears on the other side
//! - **Transparency**: spaces in a transparent sprite leave the cell untouched;
//!   `¶` always paints a blank
//! - **Hidden** entities are not painted at all
//!
//! # Example
//!
//! ```
//! use tui_scene_core::{Entity, MoveOptions, Movement, RenderOptions, Scene};
//! use tui_scene_types::Size;
//!
//! let mut scene = Scene::new(Size::new(5, 3)).unwrap();
//! let id = scene.add_to_scene(Entity::new((1, 1), Size::new(1, 1)));
//!
//! let stage = scene.render(&RenderOptions::bake(vec![])).unwrap();
//! assert_eq!(stage.plain_rows(), ["░░░░░", "░█░░░", "░░░░░"]);
//!
//! // Wraparound: ten cells right on a five-wide scene lands where it started
//! let moved = scene.move_entity(id, (10, 0), MoveOptions::default()).unwrap();
//! assert_eq!(moved, Movement::Clear);
//! assert_eq!(scene.entity(id).unwrap().pos().x, 1);
//! ```

pub mod entity;
pub mod error;
pub mod image;
pub mod movement;
pub mod present;
pub mod scene;
pub mod scene_set;
pub mod sprite;
pub mod stage;

pub use tui_scene_types as types;

// Re-export commonly used types for convenience
pub use entity::{Content, Entity, EntityId, MoveHook};
pub use error::SceneError;
pub use image::Image;
pub use movement::{MoveOptions, Movement};
pub use present::{PresentOptions, Presenter, TextPresenter};
pub use scene::{RenderHook, RenderOptions, Scene, SceneConfig};
pub use scene_set::{SceneId, SceneSet, Spawned};
pub use sprite::{AnimatedSprite, Sprite};
pub use stage::{Cell, Stage};
