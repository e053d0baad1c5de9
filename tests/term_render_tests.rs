use tui_scene::core::{Entity, RenderOptions, Scene};
use tui_scene::term::{encode_diff_into, encode_full_into};
use tui_scene::types::{Colour, Size};

fn stage_with_block(x: i32) -> tui_scene::core::Stage {
    let mut scene = Scene::new(Size::new(6, 2)).unwrap();
    scene.add_to_scene(
        Entity::new((x, 1), Size::new(1, 1))
            .with_fill_char('@')
            .with_colour(Colour::RED),
    );
    scene.render(&RenderOptions::bake(vec![])).unwrap()
}

#[test]
fn full_redraw_prints_every_glyph() {
    let stage = stage_with_block(2);
    let mut out = Vec::new();
    encode_full_into(&stage, &mut out).unwrap();

    let text = String::from_utf8_lossy(&out);
    assert_eq!(text.matches('░').count(), 11);
    assert_eq!(text.matches('@').count(), 1);
    assert!(text.contains("\r\n"));
}

#[test]
fn diff_redraw_only_prints_changed_cells() {
    let before = stage_with_block(2);
    let after = stage_with_block(3);
    let mut out = Vec::new();
    encode_diff_into(&before, &after, &mut out).unwrap();

    let text = String::from_utf8_lossy(&out);
    assert_eq!(text.matches('@').count(), 1);
    assert_eq!(text.matches('░').count(), 1);
}
