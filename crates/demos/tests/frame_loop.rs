use framekit_common::EngineConfig;
use framekit_demos::{BrickBreaker, DemoKind, FrameLoop, LoopState, build};
use framekit_input::{Key, KeyState};
use framekit_kernel::{ManualTimer, TimeSource};
use framekit_render::{DebugTextRenderer, Renderer};
use glam::Vec3;

fn config_in(dir: &tempfile::TempDir) -> EngineConfig {
    EngineConfig {
        assets_dir: dir.path().to_path_buf(),
        ..EngineConfig::default()
    }
}

#[test]
fn paddle_scenario_positive_positive_neutral() {
    let mut lp = FrameLoop::new(Box::new(BrickBreaker::new()), &EngineConfig::default());
    let mut timer = ManualTimer::new();
    let right = KeyState::from_keys([Key::ArrowRight]);
    let none = KeyState::new();

    // first frame establishes the clock origin
    lp.advance(timer.now(), &none);

    let mut xs = Vec::new();
    for keys in [&right, &right, &none] {
        timer.advance_millis(100);
        let frame = lp.advance(timer.now(), keys).unwrap();
        xs.push(frame.records[0].position());
    }
    let expected = [
        Vec3::new(1.0, -20.0, 0.0),
        Vec3::new(2.0, -20.0, 0.0),
        Vec3::new(2.0, -20.0, 0.0),
    ];
    for (got, want) in xs.iter().zip(expected) {
        assert!((*got - want).length() < 1e-5, "{got} != {want}");
    }
}

#[test]
fn every_demo_submits_valid_frames() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let keys = KeyState::from_keys([Key::ArrowLeft, Key::ArrowUp, Key::Space]);
    for kind in DemoKind::ALL {
        let mut lp = FrameLoop::new(build(kind, &config), &config);
        let mut timer = ManualTimer::new();
        for _ in 0..5 {
            timer.advance_millis(16);
            let frame = lp.advance(timer.now(), &keys).unwrap();
            assert!(frame.draw_calls() > 0, "{kind}");
            assert_eq!(frame.validate(lp.resources()), Ok(()), "{kind}");
        }
    }
}

#[test]
fn one_draw_per_record_even_off_screen() {
    let mut lp = FrameLoop::new(Box::new(BrickBreaker::new()), &EngineConfig::default());
    let mut timer = ManualTimer::new();
    let left = KeyState::from_keys([Key::ArrowLeft]);
    lp.advance(timer.now(), &left);
    timer.advance_millis(60_000);
    let frame = lp.advance(timer.now(), &left).unwrap();
    assert_eq!(frame.records[0].position().x, -600_000.0 / 1000.0);

    let mut renderer = DebugTextRenderer::new(lp.resources());
    let text = renderer.render(&frame);
    assert_eq!(renderer.stats().draw_calls, 1);
    assert!(text.contains("[paddle]"));
}

#[test]
fn quit_then_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let mut lp = FrameLoop::new(build(DemoKind::PointLight, &config), &config);
    let mut timer = ManualTimer::new();
    assert!(lp.advance(timer.now(), &KeyState::new()).is_some());
    timer.advance_millis(16);
    let escape = KeyState::from_keys([Key::Escape]);
    assert!(lp.advance(timer.now(), &escape).is_none());
    assert_eq!(lp.state(), LoopState::Stopped);
    timer.advance_millis(16);
    assert!(lp.advance(timer.now(), &KeyState::new()).is_none());
}

#[test]
fn animation_depends_on_elapsed_time_only() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let none = KeyState::new();

    // ten small steps and one big step reach the same angles
    let mut stepped = FrameLoop::new(build(DemoKind::DirectionalLight, &config), &config);
    let mut timer = ManualTimer::new();
    stepped.advance(timer.now(), &none);
    let mut last = None;
    for _ in 0..10 {
        timer.advance_millis(100);
        last = stepped.advance(timer.now(), &none);
    }

    let mut jumped = FrameLoop::new(build(DemoKind::DirectionalLight, &config), &config);
    let mut timer = ManualTimer::new();
    jumped.advance(timer.now(), &none);
    timer.advance_millis(1_000);
    let direct = jumped.advance(timer.now(), &none);

    assert_eq!(last.map(|f| f.records), direct.map(|f| f.records));
}
