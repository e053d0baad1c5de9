//! Entity module - positioned rectangles drawn onto a scene
//!
//! An entity is either a solid block of one fill character or a sprite image.
//! While attached to a scene it remembers the scene size (`bounds`) so every
//! position write wraps into the scene grid. Detached entities store positions
//! as given.

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::image::Image;
use crate::sprite::{AnimatedSprite, Sprite};
use crate::types::{Colour, Size, Vec2D, ALL_LAYERS, DEFAULT_FILL_CHAR};

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique entity handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Callback run after a move that did not collide.
pub type MoveHook = Box<dyn FnMut(&mut Entity)>;

/// What an entity draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Every cell of the box shows this glyph.
    Fill(char),
    Sprite(Sprite),
    Animated(AnimatedSprite),
}

impl Content {
    /// The sprite behind this content, if any.
    pub fn sprite(&self) -> Option<&Sprite> {
        match self {
            Content::Fill(_) => None,
            Content::Sprite(s) => Some(s),
            Content::Animated(a) => Some(a.sprite()),
        }
    }
}

pub struct Entity {
    id: EntityId,
    pos: Vec2D,
    size: Size,
    content: Content,
    pub colour: Colour,
    /// Ordering key. Smaller layers are drawn on top.
    pub layer: i32,
    /// Layers this entity collides with; `[-1]` is every layer, empty is none.
    pub collisions: Vec<i32>,
    pub hidden: bool,
    /// Render the parent scene after every move.
    pub auto_render: bool,
    move_functions: Vec<MoveHook>,
    bounds: Option<Size>,
}

impl Entity {
    /// A solid block filled with `█`.
    pub fn new(pos: impl Into<Vec2D>, size: Size) -> Self {
        Self::with_content(pos.into(), size, Content::Fill(DEFAULT_FILL_CHAR))
    }

    /// A sprite entity; its size comes from the image.
    pub fn sprite(pos: impl Into<Vec2D>, sprite: Sprite) -> Self {
        let size = sprite.size();
        Self::with_content(pos.into(), size, Content::Sprite(sprite))
    }

    /// An animated sprite entity sized from its first frame.
    pub fn animated(pos: impl Into<Vec2D>, sprite: AnimatedSprite) -> Self {
        let size = sprite.sprite().size();
        Self::with_content(pos.into(), size, Content::Animated(sprite))
    }

    fn with_content(pos: Vec2D, size: Size, content: Content) -> Self {
        Self {
            id: EntityId::next(),
            pos,
            size,
            content,
            colour: Colour::NONE,
            layer: 0,
            collisions: Vec::new(),
            hidden: false,
            auto_render: false,
            move_functions: Vec::new(),
            bounds: None,
        }
    }

    pub fn with_fill_char(mut self, fill_char: char) -> Self {
        if let Content::Fill(ch) = &mut self.content {
            *ch = fill_char;
        }
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_collisions(mut self, layers: Vec<i32>) -> Self {
        self.collisions = layers;
        self
    }

    /// Collide with every layer.
    pub fn colliding(self) -> Self {
        self.with_collisions(vec![ALL_LAYERS])
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_auto_render(mut self, auto_render: bool) -> Self {
        self.auto_render = auto_render;
        self
    }

    pub fn with_move_function(mut self, hook: impl FnMut(&mut Entity) + 'static) -> Self {
        self.move_functions.push(Box::new(hook));
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn pos(&self) -> Vec2D {
        self.pos
    }

    /// Set the position, wrapping into the parent scene when attached.
    pub fn set_pos(&mut self, pos: impl Into<Vec2D>) {
        let pos = pos.into();
        self.pos = match self.bounds {
            Some(bounds) => pos.wrapped(bounds),
            None => pos,
        };
    }

    /// Shift by `delta` with no collision checks.
    ///
    /// Attached entities reduce both sides into the scene first, so any `i32`
    /// delta lands on the same cell as the exact sum would.
    pub fn move_by(&mut self, delta: impl Into<Vec2D>) {
        let delta = delta.into();
        let pos = match self.bounds {
            Some(bounds) => self.pos.wrapped(bounds) + delta.wrapped(bounds),
            None => self.pos.wrapping_add(delta),
        };
        self.set_pos(pos);
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    /// Size of the scene this entity is attached to.
    pub fn bounds(&self) -> Option<Size> {
        self.bounds
    }

    pub fn is_attached(&self) -> bool {
        self.bounds.is_some()
    }

    pub fn collides(&self) -> bool {
        !self.collisions.is_empty()
    }

    /// Displayed glyph of a plain entity; `background` while hidden.
    ///
    /// Sprites have no fill character.
    pub fn fill_char(&self, background: char) -> Option<char> {
        match self.content {
            Content::Fill(_) if self.hidden => Some(background),
            Content::Fill(ch) => Some(ch),
            _ => None,
        }
    }

    pub fn set_fill_char(&mut self, fill_char: char) {
        if let Content::Fill(ch) = &mut self.content {
            *ch = fill_char;
        }
    }

    /// Visible image of a sprite entity.
    ///
    /// A hidden sprite yields a blank image of the same height, so it never
    /// leaks stale content.
    pub fn image(&self) -> Option<Cow<'_, Image>> {
        let sprite = self.content.sprite()?;
        if self.hidden {
            Some(Cow::Owned(Image::blank(self.size.height)))
        } else {
            Some(Cow::Borrowed(sprite.image()))
        }
    }

    pub fn animation(&self) -> Option<&AnimatedSprite> {
        match &self.content {
            Content::Animated(a) => Some(a),
            _ => None,
        }
    }

    pub fn animation_mut(&mut self) -> Option<&mut AnimatedSprite> {
        match &mut self.content {
            Content::Animated(a) => Some(a),
            _ => None,
        }
    }

    /// Advance an animated sprite; `None` for other content.
    pub fn next_frame(&mut self) -> Option<usize> {
        self.animation_mut().map(AnimatedSprite::next_frame)
    }

    /// Every cell of the bounding box, not wrapped.
    pub fn all_positions(&self) -> Vec<Vec2D> {
        let (w, h) = (self.size.width as i32, self.size.height as i32);
        (0..w)
            .flat_map(|i| (0..h).map(move |j| (i, j)))
            .map(|(i, j)| self.pos.wrapping_add(Vec2D::new(i, j)))
            .collect()
    }

    /// True if `pos` lies in the raw bounding box.
    pub fn covers(&self, pos: Vec2D) -> bool {
        let dx = i64::from(pos.x) - i64::from(self.pos.x);
        let dy = i64::from(pos.y) - i64::from(self.pos.y);
        (0..i64::from(self.size.width)).contains(&dx)
            && (0..i64::from(self.size.height)).contains(&dy)
    }

    pub fn add_move_function(&mut self, hook: impl FnMut(&mut Entity) + 'static) {
        self.move_functions.push(Box::new(hook));
    }

    pub fn move_function_count(&self) -> usize {
        self.move_functions.len()
    }

    /// Run move hooks in registration order.
    pub(crate) fn run_move_functions(&mut self) {
        let mut hooks = std::mem::take(&mut self.move_functions);
        for hook in hooks.iter_mut() {
            hook(self);
        }
        // Keep hooks registered while the others were running.
        hooks.append(&mut self.move_functions);
        self.move_functions = hooks;
    }

    pub(crate) fn attach(&mut self, bounds: Size) {
        self.bounds = Some(bounds);
    }

    pub(crate) fn detach(&mut self) {
        self.bounds = None;
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("pos", &self.pos)
            .field("size", &self.size)
            .field("content", &self.content)
            .field("colour", &self.colour)
            .field("layer", &self.layer)
            .field("collisions", &self.collisions)
            .field("hidden", &self.hidden)
            .field("auto_render", &self.auto_render)
            .field("move_functions", &self.move_functions.len())
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.content, self.content.sprite()) {
            (Content::Fill(ch), _) => write!(
                f,
                "Entity(pos={},size={},fill_char='{}')",
                self.pos, self.size, ch
            ),
            (_, None) => Ok(()),
            (_, Some(sprite)) => {
                let text = sprite.image().to_string();
                let head: String = text.chars().take(10).collect();
                let more = if text.chars().count() > 10 { "..." } else { "" };
                write!(
                    f,
                    "Sprite(pos={},size={},image='{}{}')",
                    self.pos, self.size, head, more
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extreme_deltas_wrap_like_the_exact_sum() {
        let mut e = Entity::new((1, 1), Size::new(1, 1));
        e.attach(Size::new(5, 3));
        e.move_by((i32::MAX, i32::MIN));
        // 1 + (2^31 - 1) = 2^31 ≡ 3 (mod 5); 1 - 2^31 ≡ 2 (mod 3).
        assert_eq!(e.pos(), Vec2D::new(3, 2));

        let mut loose = Entity::new((i32::MAX, 0), Size::new(1, 1));
        loose.move_by((1, 0));
        assert_eq!(loose.pos(), Vec2D::new(i32::MIN, 0));
        assert!(loose.covers(Vec2D::new(i32::MIN, 0)));
        assert!(!loose.covers(Vec2D::new(i32::MAX, 0)));
    }

    #[test]
    fn detached_positions_are_stored_raw() {
        let mut e = Entity::new((1, 1), Size::new(1, 1));
        e.set_pos((-3, 40));
        assert_eq!(e.pos(), Vec2D::new(-3, 40));
    }

    #[test]
    fn attached_positions_wrap() {
        let mut e = Entity::new((1, 1), Size::new(1, 1));
        e.attach(Size::new(5, 3));
        e.move_by((10, 0));
        assert_eq!(e.pos(), Vec2D::new(1, 1));
        e.set_pos((-1, -1));
        assert_eq!(e.pos(), Vec2D::new(4, 2));
    }

    #[test]
    fn all_positions_cover_the_box() {
        let e = Entity::new((4, 2), Size::new(2, 2));
        let cells = e.all_positions();
        assert_eq!(cells.len(), 4);
        for p in [(4, 2), (5, 2), (4, 3), (5, 3)] {
            assert!(cells.contains(&Vec2D::from(p)));
            assert!(e.covers(Vec2D::from(p)));
        }
        assert!(!e.covers(Vec2D::new(6, 2)));
    }

    #[test]
    fn hidden_fill_shows_background() {
        let e = Entity::new((0, 0), Size::new(1, 1)).with_fill_char('#').with_hidden(true);
        assert_eq!(e.fill_char('░'), Some('░'));
    }

    #[test]
    fn hidden_sprite_image_is_blank() {
        let mut e = Entity::sprite((0, 0), Sprite::new("ab\ncd"));
        assert_eq!(e.image().unwrap().to_string(), "ab\ncd");
        e.hidden = true;
        assert_eq!(e.image().unwrap().to_string(), " \n ");
    }

    #[test]
    fn move_hooks_can_be_added_during_a_hook() {
        let mut e = Entity::new((0, 0), Size::new(1, 1)).with_move_function(|e| {
            if e.move_function_count() == 0 {
                e.add_move_function(|_| {});
            }
        });
        e.run_move_functions();
        assert_eq!(e.move_function_count(), 2);
    }

    #[test]
    fn display_summaries() {
        let e = Entity::new((1, 2), Size::new(3, 1));
        assert_eq!(e.to_string(), "Entity(pos=(1, 2),size=3x1,fill_char='█')");
        let s = Entity::sprite((0, 0), Sprite::new("Hello there, world"));
        assert_eq!(
            s.to_string(),
            "Sprite(pos=(0, 0),size=18x1,image='Hello ther...')"
        );
    }
}
