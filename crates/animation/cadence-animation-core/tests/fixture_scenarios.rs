use std::rc::Rc;

use approx::assert_abs_diff_eq;
use cadence_animation_core::{
    animation_config_to_json, parse_animation_config_json, Animation, Completion, FrameScheduler,
    ManualScheduler, PlayState, SampleLog,
};
use cadence_test_fixtures::{animations, scenarios};

fn replay(name: &str) {
    let json = scenarios::animation_json(name).expect("scenario animation json");
    let config = parse_animation_config_json(&json).expect("scenario config parses");
    let frames = scenarios::frames(name).expect("scenario frames");

    let sched = Rc::new(ManualScheduler::new());
    let log = SampleLog::new();
    let mut anim = Animation::new(config, Rc::clone(&sched), log.clone()).expect("valid config");

    for frame in frames {
        sched.set_time(frame.at_ms);
        for id in sched.take_pending() {
            anim.on_frame(id, sched.now());
        }
        let got = log.last().expect("frame delivered a value");
        assert!(
            (got - frame.value).abs() < 1e-9,
            "{name} @ {} ms: expected {}, got {got}",
            frame.at_ms,
            frame.value
        );
        if let Some(state) = &frame.state {
            assert_eq!(
                anim.play_state().name(),
                state.as_str(),
                "{name} @ {} ms: wrong play state",
                frame.at_ms
            );
        }
    }

    if anim.play_state() == PlayState::Finished {
        assert!(matches!(anim.completion(), Completion::Completed(_)));
        assert_eq!(sched.pending_count(), 0);
    }
}

#[test]
fn all_scenarios_replay() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut keys = scenarios::keys();
    keys.sort();
    assert!(!keys.is_empty());
    for key in keys {
        replay(&key);
    }
}

#[test]
fn every_animation_fixture_parses() {
    for key in animations::keys() {
        let json = animations::json(&key).expect("fixture readable");
        let config = parse_animation_config_json(&json)
            .unwrap_or_else(|e| panic!("fixture {key} failed to parse: {e}"));
        let again = animation_config_to_json(&config).expect("serializable");
        parse_animation_config_json(&again)
            .unwrap_or_else(|e| panic!("fixture {key} did not survive re-serialization: {e}"));
    }
}

#[test]
fn symmetric_bezier_passes_through_the_midpoint() {
    let json = animations::json("ease-in-out-default").expect("fixture readable");
    let config = parse_animation_config_json(&json).expect("fixture parses");
    assert_eq!(config.duration, 0.3);

    let sched = Rc::new(ManualScheduler::new());
    let log = SampleLog::new();
    let mut anim = Animation::new(config, Rc::clone(&sched), log.clone()).expect("valid config");
    sched.set_time(150.0);
    for id in sched.take_pending() {
        anim.on_frame(id, sched.now());
    }
    assert_abs_diff_eq!(log.last().unwrap_or(f64::NAN), 150.0, epsilon = 1e-6);

    sched.set_time(75.0 + 150.0);
    for id in sched.take_pending() {
        anim.on_frame(id, sched.now());
    }
    // Ease-in-out runs ahead of linear after the midpoint.
    assert!(log.last().unwrap_or(f64::NAN) > 175.0);
}
