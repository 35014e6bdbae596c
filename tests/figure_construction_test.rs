use figure_globe::{
    data_structures::{
        material::Color,
        scene_graph::{SceneNode, count_nodes},
    },
    figure::{Figure, FigureOverrides, Palette},
    random::RngSource,
    scene::SceneHost,
};

use crate::common::test_utils::{SequenceSource, assert_close, scene};

mod common;

fn child_names(node: &dyn SceneNode) -> Vec<&str> {
    node.get_children().iter().map(|child| child.name()).collect()
}

#[test]
fn rig_has_expected_shape() {
    let mut scene = scene();
    let figure = Figure::construct(
        &mut scene,
        &FigureOverrides::default(),
        &mut RngSource::seeded(11),
    );
    let root = scene.node(figure.root()).unwrap();
    assert_eq!(child_names(root), ["body", "head"]);

    let body = figure.body().resolve(root).unwrap();
    assert_eq!(child_names(body), ["body mesh", "legs", "arm group", "arm group"]);
    assert_eq!(child_names(body.get_children()[1].as_ref()), ["leg", "leg"]);

    let head = figure.head().resolve(root).unwrap();
    assert_eq!(child_names(head), ["head mesh", "eyes"]);
    assert_close(head.get_local_transform().position.y, 1.65);
    assert_eq!(child_names(head.get_children()[1].as_ref()), ["eye", "eye"]);

    assert_eq!(count_nodes(root), 15);
}

#[test]
fn legs_are_attached_once_under_body() {
    let mut scene = scene();
    let figure = Figure::construct(
        &mut scene,
        &FigureOverrides::default(),
        &mut RngSource::seeded(11),
    );
    let root = scene.node(figure.root()).unwrap();
    let legs_groups = |node: &dyn SceneNode| {
        node.get_children()
            .iter()
            .filter(|child| child.name() == "legs")
            .count()
    };
    assert_eq!(legs_groups(root), 0);
    assert_eq!(legs_groups(figure.body().resolve(root).unwrap()), 1);

    scene.render().unwrap();
    let legs = scene
        .renderer()
        .draws()
        .iter()
        .filter(|draw| draw.name == "leg")
        .count();
    assert_eq!(legs, 2);
}

#[test]
fn paired_parts_are_mirrored() {
    let mut scene = scene();
    let figure = Figure::construct(
        &mut scene,
        &FigureOverrides::default(),
        &mut RngSource::seeded(2),
    );
    let root = scene.node(figure.root()).unwrap();
    let [first, second] = figure
        .arms()
        .clone()
        .map(|path| *path.resolve(root).unwrap().get_local_transform());
    assert_close(first.position.x, 0.8);
    assert_close(second.position.x, -0.8);
    assert_close(first.position.y, 0.6);
    assert_close(second.position.y, 0.6);

    let legs = figure.body().resolve(root).unwrap().get_children()[1].as_ref();
    assert_close(legs.get_local_transform().position.y, -1.15);
    let xs: Vec<f32> = legs
        .get_children()
        .iter()
        .map(|leg| leg.get_local_transform().position.x)
        .collect();
    assert_close(xs[0], 0.22);
    assert_close(xs[1], -0.22);
}

#[test]
fn colours_come_from_the_injected_source() {
    let mut scene = scene();
    let mut rng = SequenceSource::new(&[120, 240, 50]);
    let figure = Figure::construct(&mut scene, &FigureOverrides::default(), &mut rng);
    assert_eq!(rng.calls, 3);
    assert_eq!(
        figure.palette(),
        Palette {
            head_hue: 120,
            body_hue: 240,
            head_lightness: 50,
        }
    );

    scene.render().unwrap();
    let recorder = scene.renderer();
    let head = Color::hsl(120.0, 30.0, 50.0);
    assert_eq!(recorder.find("head mesh").unwrap().color, head);
    assert_eq!(recorder.find("arm").unwrap().color, head);
    assert_eq!(recorder.find("leg").unwrap().color, head);
    assert_eq!(
        recorder.find("body mesh").unwrap().color,
        Color::hsl(240.0, 85.0, 50.0)
    );
    assert_eq!(recorder.find("eye").unwrap().color, Color::hex(0x44445c));
}

#[test]
fn same_seed_same_palette() {
    let build = |seed| {
        let mut scene = scene();
        Figure::construct(
            &mut scene,
            &FigureOverrides::default(),
            &mut RngSource::seeded(seed),
        )
        .palette()
    };
    assert_eq!(build(99), build(99));
}

#[test]
fn sequential_figures_draw_fresh_colours() {
    let mut scene = scene();
    let mut rng = SequenceSource::new(&[10, 20, 41, 30, 40, 60]);
    let first = Figure::construct(&mut scene, &FigureOverrides::default(), &mut rng);
    let second = Figure::construct(&mut scene, &FigureOverrides::default(), &mut rng);
    assert_ne!(first.root(), second.root());
    assert_eq!(second.palette().head_hue, 30);
    assert_eq!(second.palette().head_lightness, 60);
    assert_ne!(first.palette(), second.palette());
}
