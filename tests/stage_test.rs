use figure_globe::{
    config::StageConfig,
    flow::Stage,
    random::RngSource,
    render::FrameRecorder,
    scene::SceneHost,
    tween::{EasingFunction, ParamField, Repeat, Tween},
};

use crate::common::test_utils::{SequenceSource, assert_close};

mod common;

fn stage(config: &StageConfig) -> Stage<FrameRecorder> {
    Stage::new(config, FrameRecorder::new(), &mut RngSource::seeded(21)).unwrap()
}

#[test]
fn every_frame_renders_figure_and_globe() {
    let mut stage = stage(&StageConfig::default());
    for _ in 0..3 {
        stage.frame(1.0 / 60.0).unwrap();
    }
    let recorder = stage.renderer();
    assert_eq!(recorder.frames_drawn(), 3);
    assert_eq!(stage.frames(), 3);
    // 8 figure meshes and 3 spheres
    assert_eq!(recorder.draws().len(), 11);
    assert_eq!(recorder.draws().last().unwrap().name, "clouds");
    assert_eq!(recorder.lights().len(), 4);
    assert_eq!(recorder.model_matrices().len(), 11 * 16);
}

#[test]
fn default_tweens_drive_the_pose() {
    let mut stage = stage(&StageConfig::default());
    stage.frame(5.0).unwrap();
    // eased progress 0.75 half way through the first cycle
    assert_close(stage.params().y, -0.375);
    assert_close(stage.params().arm_rotation, std::f32::consts::FRAC_PI_2 * 0.75);

    let root = stage.scene().node(stage.figure().root()).unwrap();
    assert_close(root.get_local_transform().position.y, -0.375);

    stage.frame(5.0).unwrap();
    assert_close(stage.params().y, 0.0);
    stage.frame(10.0).unwrap();
    assert_close(stage.params().y, -1.5);
}

#[test]
fn globe_spins_once_per_frame() {
    let mut stage = stage(&StageConfig::default());
    for _ in 0..4 {
        stage.frame(0.0).unwrap();
    }
    let yaw = |id| {
        stage
            .scene()
            .node(id)
            .unwrap()
            .get_local_transform()
            .rotation
            .y
            .0
    };
    assert_close(yaw(stage.globe().earth()), 0.006);
    assert_close(yaw(stage.globe().clouds()), 0.004);
    assert_close(yaw(stage.globe().stars()), 0.008);
}

#[test]
fn resize_updates_camera_and_backend() {
    let mut stage = stage(&StageConfig::default());
    stage.resize(1000, 500);
    stage.resize(0, 0);
    assert_eq!(stage.renderer().size(), (1000, 500));
    assert_eq!(stage.scene().camera.projection.aspect(), 2.0);
}

#[test]
fn custom_tweens_and_overrides_apply() {
    let mut config = StageConfig::default();
    config.figure.overrides.ry = Some(0.0);
    config.figure.initial.clear();
    config.figure.tweens = vec![
        Tween::to(vec![(ParamField::Ry, 1.0)], 2.0)
            .repeat(Repeat::Count(1))
            .ease(EasingFunction::Linear),
    ];
    let mut rng = SequenceSource::new(&[]);
    let mut stage = Stage::new(&config, FrameRecorder::new(), &mut rng).unwrap();
    stage.frame(1.0).unwrap();
    assert_close(stage.params().ry, 0.5);
    stage.frame(2.0).unwrap();
    assert_close(stage.params().ry, 0.5);
    stage.frame(10.0).unwrap();
    assert_close(stage.params().ry, 1.0);
    assert_eq!(stage.figure().palette().head_hue, 0);
}

#[test]
fn frame_now_uses_wall_clock() {
    let mut stage = stage(&StageConfig::default());
    stage.frame_now().unwrap();
    stage.frame_now().unwrap();
    assert_eq!(stage.renderer().frames_drawn(), 2);
    assert!(stage.params().y >= -1.5 && stage.params().y < 0.0);
}
