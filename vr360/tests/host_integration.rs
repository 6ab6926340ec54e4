use std::time::Duration;

use cgmath::{vec3, Deg, InnerSpace, Quaternion, Rotation3};
use vr360::camera_feed::{FrameHalf, RowOrder, StillImageSource, TestPatternSource};
use vr360::screens::HemisphereHalf;
use vr360::{AppConfig, Hand, ViewerScene};

const FRAME: Duration = Duration::from_millis(16);

fn small_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.camera_feed.width = 64;
    config.camera_feed.height = 64;
    config.hemisphere.longitude_segments = 12;
    config.hemisphere.latitude_segments = 6;
    config.blink_delay_ms = 0;
    config
}

#[test]
fn test_scene_builds_meshes_on_start() {
    let mut scene = ViewerScene::from_config(&small_config());
    scene.start();

    let front = scene.front_dome.record();
    let rear = scene.rear_dome.record();
    assert_eq!(front.mesh.vertex_count(), 13 * 7);
    assert!(front.mesh.validate().is_ok());
    assert!(rear.mesh.validate().is_ok());

    // Default half is Upper, so the rear dome hangs below the equator.
    let (_, front_max) = front.mesh.bounds().unwrap();
    let (_, rear_max) = rear.mesh.bounds().unwrap();
    assert!(front_max.y > 1.0);
    assert!(rear_max.y < 1e-4);
    assert!(!scene.curved_screen.record().mesh.is_empty());
}

#[test]
fn test_frames_are_split_across_domes() {
    let config = small_config();
    let source = TestPatternSource::new(64, 64)
        .with_colors([200, 0, 0, 255], [0, 0, 200, 255])
        .with_warmup_frames(2);
    let mut scene = ViewerScene::with_source(&config, Box::new(source));
    scene.start();
    scene.run(5, FRAME);

    // Two placeholder frames are dropped.
    assert_eq!(scene.front_dome.texture_uploads(), 3);
    assert_eq!(scene.rear_dome.texture_uploads(), 3);

    let front = scene.front_dome.record();
    let texture = front.texture.as_ref().unwrap();
    assert_eq!((texture.width, texture.height), (64, 32));
    assert_eq!(&texture.bytes[4..8], &[200, 0, 0, 255]);

    let rear = scene.rear_dome.record();
    assert_eq!(&rear.texture.as_ref().unwrap().bytes[4..8], &[0, 0, 200, 255]);
}

#[test]
fn test_curved_screen_shows_feed() {
    let source = || {
        TestPatternSource::new(64, 64).with_colors([200, 0, 0, 255], [0, 0, 200, 255])
    };

    let mut scene = ViewerScene::with_source(&small_config(), Box::new(source()));
    scene.start();
    scene.run(5, FRAME);

    assert_eq!(scene.curved_screen.texture_uploads(), 5);
    let curved = scene.curved_screen.record();
    let texture = curved.texture.as_ref().unwrap();
    assert_eq!((texture.width, texture.height), (64, 32));
    assert_eq!(&texture.bytes[4..8], &[200, 0, 0, 255]);
    drop(curved);

    let mut config = small_config();
    config.camera_feed.curved_screen_image = Some(FrameHalf::Rear);
    let mut scene = ViewerScene::with_source(&config, Box::new(source()));
    scene.start();
    scene.run(2, FRAME);
    let curved = scene.curved_screen.record();
    assert_eq!(&curved.texture.as_ref().unwrap().bytes[4..8], &[0, 0, 200, 255]);
    drop(curved);

    config.camera_feed.curved_screen_image = None;
    let mut scene = ViewerScene::with_source(&config, Box::new(source()));
    scene.start();
    scene.run(2, FRAME);
    assert_eq!(scene.curved_screen.texture_uploads(), 0);
    assert_eq!(scene.front_dome.texture_uploads(), 2);
}

#[test]
fn test_still_image_top_down() {
    let mut image = image::RgbaImage::from_pixel(32, 64, image::Rgba([0, 255, 0, 255]));
    for y in 0..32 {
        for x in 0..32 {
            image.put_pixel(x, y, image::Rgba([255, 255, 0, 255]));
        }
    }
    let image = image::DynamicImage::ImageRgba8(image);

    let mut config = small_config();
    config.camera_feed.row_order = RowOrder::TopDown;
    let source = StillImageSource::from_image(&image, RowOrder::TopDown);
    let mut scene = ViewerScene::with_source(&config, Box::new(source));
    scene.start();
    scene.run(3, FRAME);

    assert_eq!(scene.front_dome.texture_uploads(), 1);
    let front = scene.front_dome.record();
    assert!(front
        .texture
        .as_ref()
        .unwrap()
        .bytes
        .chunks(4)
        .all(|p| p == [255, 255, 0, 255]));
}

#[test]
fn test_snap_places_rig_at_anchor() {
    let mut config = small_config();
    config.snap.anchor_position = vec3(2.0, 0.0, -3.0);
    config.snap.anchor_yaw_degrees = 90.0;
    let mut scene = ViewerScene::from_config(&config);
    scene.start();
    scene.run(1, FRAME);

    let rig = scene.rig();
    assert!((rig.camera_floor_position() - config.snap.anchor_position).magnitude() < 1e-4);
    assert!((rig.forward() - vec3(1.0, 0.0, 0.0)).magnitude() < 1e-4);
}

#[test]
fn test_hand_teleport_moves_rig() {
    let mut scene = ViewerScene::from_config(&small_config());
    scene.start();
    scene.run(1, FRAME);

    scene.input.borrow_mut().right_hand = Hand {
        position: vec3(0.0, 1.0, 0.0),
        rotation: Quaternion::from_angle_x(Deg(-30.0)),
        trigger_value: 1.0,
        ..Default::default()
    };
    scene.run(1, FRAME);
    scene.input.borrow_mut().right_hand.trigger_value = 0.0;
    scene.run(1, FRAME);

    let floor = scene.rig().camera_floor_position();
    assert!(floor.z > 5.0);
    assert!(floor.x.abs() < 1e-3);
    assert_eq!(floor.y, 0.0);
}

#[test]
fn test_live_edit_and_shutdown() {
    let mut scene = ViewerScene::from_config(&small_config());
    scene.start();
    assert_eq!(scene.front_dome.mesh_uploads(), 1);

    assert_eq!(scene.host.notify_parameters_changed("front_dome"), 1);
    assert_eq!(scene.host.notify_parameters_changed("no_such_component"), 0);
    assert_eq!(scene.front_dome.mesh_uploads(), 2);

    scene.stop();
    assert!(scene.front_dome.record().mesh.is_empty());
    assert!(scene.rear_dome.record().mesh.is_empty());
}

#[test]
fn test_meridian_halves() {
    let mut config = small_config();
    config.hemisphere.half = HemisphereHalf::Front;
    config.hemisphere.add_flat_cap = true;
    let mut scene = ViewerScene::from_config(&config);
    scene.start();

    let front = scene.front_dome.record();
    let rear = scene.rear_dome.record();
    // Caps are skipped for meridian cuts.
    assert_eq!(front.mesh.vertex_count(), 13 * 7);
    let (front_min, _) = front.mesh.bounds().unwrap();
    let (_, rear_max) = rear.mesh.bounds().unwrap();
    assert!(front_min.z > -1e-4);
    assert!(rear_max.z < 1e-4);
}
