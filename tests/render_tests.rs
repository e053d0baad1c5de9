//! Render pipeline tests - compositing, layering, transparency and display

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use tui_scene::core::{
    Entity, PresentOptions, Presenter, RenderOptions, Scene, SceneConfig, Sprite, Stage,
    TextPresenter,
};
use tui_scene::types::{Colour, Size};

/// Presenter that records every displayed frame as text.
#[derive(Clone, Default)]
struct Recorder {
    frames: Rc<RefCell<Vec<String>>>,
}

impl Presenter for Recorder {
    fn present(&mut self, stage: &Stage, opts: PresentOptions) -> io::Result<()> {
        self.frames
            .borrow_mut()
            .push(stage.to_text(opts.show_coord_numbers));
        Ok(())
    }
}

fn silent() -> RenderOptions {
    RenderOptions::bake(vec![])
}

#[test]
fn test_single_entity_scenario() {
    let mut scene = Scene::new(Size::new(5, 3)).unwrap();
    scene.add_to_scene(Entity::new((1, 1), Size::new(1, 1)));

    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.plain_rows(), vec!["░░░░░", "░█░░░", "░░░░░"]);
}

#[test]
fn test_empty_scene_is_background() {
    let mut scene = Scene::with_config(
        Size::new(6, 4),
        SceneConfig {
            clear_char: '.',
            bg_colour: Colour::INVERTED_GREY,
            ..SceneConfig::default()
        },
    )
    .unwrap();

    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.cells().len(), 24);
    for cell in stage.cells() {
        assert_eq!(*cell, scene.get_background());
    }
}

#[test]
fn test_lower_layer_paints_on_top() {
    let mut scene = Scene::new(Size::new(3, 1)).unwrap();
    // Insertion order must not matter.
    scene.add_to_scene(Entity::new((1, 0), Size::new(1, 1)).with_fill_char('2').with_layer(2));
    scene.add_to_scene(Entity::new((1, 0), Size::new(1, 1)).with_fill_char('5').with_layer(5));

    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.plain_rows(), vec!["░2░"]);
}

#[test]
fn test_hidden_entity_shows_what_is_underneath() {
    let mut scene = Scene::new(Size::new(3, 1)).unwrap();
    scene.add_to_scene(Entity::new((0, 0), Size::new(2, 1)).with_fill_char('b').with_layer(4));
    let id = scene.add_to_scene(Entity::new((1, 0), Size::new(2, 1)).with_fill_char('a').with_hidden(true));

    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.plain_rows(), vec!["bb░"]);

    scene.entity_mut(id).unwrap().hidden = false;
    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.plain_rows(), vec!["baa"]);
}

#[test]
fn test_hidden_sprite_does_not_leak_image() {
    let mut scene = Scene::new(Size::new(3, 2)).unwrap();
    scene.add_to_scene(
        Entity::sprite((0, 0), Sprite::new("xyz\nxyz").with_transparent(false)).with_hidden(true),
    );

    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.plain_rows(), vec!["░░░", "░░░"]);
}

#[test]
fn test_transparent_space_keeps_underlying_cell() {
    let mut scene = Scene::new(Size::new(3, 1)).unwrap();
    scene.add_to_scene(Entity::new((0, 0), Size::new(3, 1)).with_fill_char('#').with_layer(1));
    scene.add_to_scene(Entity::sprite((0, 0), Sprite::new("a b")));

    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.plain_rows(), vec!["a#b"]);
}

#[test]
fn test_opaque_space_overwrites() {
    let mut scene = Scene::new(Size::new(3, 1)).unwrap();
    scene.add_to_scene(Entity::new((0, 0), Size::new(3, 1)).with_fill_char('#').with_layer(1));
    scene.add_to_scene(Entity::sprite((0, 0), Sprite::new("a b").with_transparent(false)));

    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.plain_rows(), vec!["a b"]);
}

#[test]
fn test_jagged_sprite_rows_render() {
    let mut scene = Scene::new(Size::new(4, 2)).unwrap();
    scene.add_to_scene(Entity::sprite((0, 0), Sprite::new("abc\nd").with_transparent(false)));

    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.plain_rows(), vec!["abc░", "d  ░"]);
}

#[test]
fn test_extra_characters_widen_the_stamp() {
    let mut scene = Scene::new(Size::new(4, 1)).unwrap();
    scene.add_to_scene(Entity::sprite((0, 0), Sprite::new("ツ!").with_extra_characters(vec![1])));

    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.plain_rows(), vec!["ツ!\u{200B}░"]);
}

#[test]
fn test_sprite_wraps_around_corner() {
    let mut scene = Scene::new(Size::new(3, 3)).unwrap();
    scene.add_to_scene(Entity::sprite((2, 2), Sprite::new("ab\ncd")));

    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.plain_rows(), vec!["d░c", "░░░", "b░a"]);
}

#[test]
fn test_entity_colour_wraps_cell() {
    let mut scene = Scene::new(Size::new(2, 1)).unwrap();
    scene.add_to_scene(Entity::new((0, 0), Size::new(1, 1)).with_colour(Colour::RED));

    let stage = scene.render(&silent()).unwrap();
    assert_eq!(stage.to_text(false), "\x1b[91m█\x1b[0m░\n");
}

#[test]
fn test_render_functions_run_in_order_unless_suppressed() {
    let mut scene = Scene::new(Size::new(1, 1)).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    for name in ["first", "second"] {
        let log = Rc::clone(&log);
        scene.add_render_function(move || log.borrow_mut().push(name));
    }

    scene
        .render(&RenderOptions {
            is_display: false,
            ..RenderOptions::default()
        })
        .unwrap();
    assert_eq!(*log.borrow(), vec!["first", "second"]);

    scene.render(&silent()).unwrap();
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_display_goes_to_presenter() {
    let mut scene = Scene::new(Size::new(2, 1)).unwrap();
    let recorder = Recorder::default();
    scene.set_presenter(Box::new(recorder.clone()));
    scene.add_to_scene(Entity::new((1, 0), Size::new(1, 1)));

    let stage = scene
        .render(&RenderOptions {
            show_coord_numbers: true,
            ..RenderOptions::default()
        })
        .unwrap();

    // Labels only exist in the displayed text.
    assert_eq!(stage.plain_rows(), vec!["░█"]);
    assert_eq!(*recorder.frames.borrow(), vec![" 01\n0░█\n".to_string()]);
}

#[test]
fn test_silent_render_does_not_touch_state() {
    let mut scene = Scene::new(Size::new(4, 4)).unwrap();
    let id = scene.add_to_scene(Entity::new((3, 3), Size::new(2, 2)).with_hidden(false));
    let before = format!("{:?}", scene.entity(id).unwrap());

    let a = scene.compose(&[]);
    let b = scene.compose(&[]);
    assert_eq!(a, b);
    assert_eq!(format!("{:?}", scene.entity(id).unwrap()), before);
}

/// Writer shared between a boxed presenter and the test.
#[derive(Clone, Default)]
struct SharedOut(Rc<RefCell<Vec<u8>>>);

impl io::Write for SharedOut {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedOut {
    fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

#[test]
fn test_render_writes_separator_for_known_terminal() {
    let out = SharedOut::default();
    let mut scene = Scene::new(Size::new(2, 2)).unwrap();
    assert!(scene.use_separator);
    scene.set_presenter(Box::new(TextPresenter::new(out.clone()).with_terminal_rows(5)));

    scene.render(&RenderOptions::default()).unwrap();
    // 5 rows minus 2 scene rows of padding, then the frame.
    assert_eq!(out.text(), "\n\n\n░░\n░░\n\n");

    out.0.borrow_mut().clear();
    scene.use_separator = false;
    scene.render(&RenderOptions::default()).unwrap();
    assert_eq!(out.text(), "░░\n░░\n\n");
}
