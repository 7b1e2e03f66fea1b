use std::cell::RefCell;
use std::rc::Rc;

use datajoin_api_core::{AttrKey, ElementHandle, Value};
use datajoin_transition_core::{
    Ease, FrameTicker, ManualTicker, Scheduler, SchedulerConfig, Target, TransitionEvent,
    TransitionSpec, TransitionState,
};

fn width(el: u64) -> Target {
    Target::new(ElementHandle(el), AttrKey::attr("width"))
}

fn tween(target: Target, from: f32, to: f32, ms: f32) -> TransitionSpec {
    TransitionSpec::new(target, Value::Float(from), Value::Float(to)).with_duration(ms)
}

fn only_value(s: &mut Scheduler, dt: f32) -> Option<Value> {
    let out = s.tick(dt);
    assert!(out.changes.len() <= 1);
    out.changes.first().map(|c| c.value.clone())
}

#[test]
fn linear_midpoint_and_exact_completion() {
    let mut s = Scheduler::default();
    let id = s.schedule(tween(width(1), 0.0, 100.0, 1000.0));
    assert_eq!(s.state(id), Some(TransitionState::Scheduled));

    assert_eq!(only_value(&mut s, 500.0), Some(Value::Float(50.0)));
    assert_eq!(s.state(id), Some(TransitionState::Running));

    assert_eq!(only_value(&mut s, 600.0), Some(Value::Float(100.0)));
    assert_eq!(s.state(id), Some(TransitionState::Completed));
    assert!(s.is_idle());
    assert_eq!(s.active_for(&width(1)), None);

    // nothing more once completed
    assert!(s.tick(100.0).is_empty());
    assert_eq!(s.now_ms(), 1200.0);
}

#[test]
fn eased_value_stays_between_endpoints() {
    let mut s = Scheduler::default();
    s.schedule(tween(width(1), 10.0, 20.0, 400.0).with_ease(Ease::CubicInOut));
    for _ in 0..3 {
        let v = only_value(&mut s, 100.0).and_then(|v| v.as_float()).unwrap();
        assert!((10.0..=20.0).contains(&v), "{v}");
    }
    assert_eq!(only_value(&mut s, 100.0), Some(Value::Float(20.0)));
}

#[test]
fn events_follow_lifecycle() {
    let mut s = Scheduler::default();
    let id = s.schedule(tween(width(1), 0.0, 1.0, 100.0));
    let out = s.tick(50.0);
    assert_eq!(
        out.events,
        vec![TransitionEvent::Started {
            transition: id,
            target: width(1)
        }]
    );
    let out = s.tick(50.0);
    assert_eq!(
        out.events,
        vec![TransitionEvent::Ended {
            transition: id,
            target: width(1)
        }]
    );
}

#[test]
fn delay_holds_then_runs() {
    let mut s = Scheduler::default();
    let id = s.schedule(tween(width(1), 0.0, 100.0, 100.0).with_delay(200.0));
    assert_eq!(only_value(&mut s, 100.0), None);
    assert_eq!(s.state(id), Some(TransitionState::Scheduled));
    assert_eq!(only_value(&mut s, 150.0), Some(Value::Float(50.0)));
    assert_eq!(s.state(id), Some(TransitionState::Running));
}

#[test]
fn zero_duration_completes_on_first_tick() {
    let mut s = Scheduler::default();
    let id = s.schedule(tween(width(1), 0.0, 7.0, 0.0));
    assert_eq!(only_value(&mut s, 0.0), Some(Value::Float(7.0)));
    assert_eq!(s.state(id), Some(TransitionState::Completed));
}

#[test]
fn new_transition_supersedes_live_one() {
    let mut s = Scheduler::default();
    let first = s.schedule(tween(width(1), 0.0, 100.0, 1000.0));
    s.tick(500.0);
    let second = s.schedule(tween(width(1), 50.0, 0.0, 100.0));

    assert_eq!(s.state(first), Some(TransitionState::Cancelled));
    assert_eq!(s.active_for(&width(1)), Some(second));
    assert_eq!(s.active_len(), 1);

    let out = s.tick(50.0);
    assert_eq!(out.changes.len(), 1);
    assert_eq!(out.changes[0].transition, second);
    assert_eq!(out.changes[0].value, Value::Float(25.0));
    assert!(out.events.contains(&TransitionEvent::Interrupted {
        transition: first,
        target: width(1),
        by: second
    }));
}

#[test]
fn different_targets_run_side_by_side() {
    let mut s = Scheduler::default();
    s.schedule(tween(width(1), 0.0, 10.0, 100.0));
    s.schedule(TransitionSpec::new(
        Target::new(ElementHandle(1), AttrKey::style("opacity")),
        Value::Float(0.0),
        Value::Float(1.0),
    ));
    s.schedule(tween(width(2), 0.0, 10.0, 100.0));
    assert_eq!(s.tick(10.0).changes.len(), 3);
}

#[test]
fn cancel_is_idempotent_and_freezes_value() {
    let mut s = Scheduler::default();
    let id = s.schedule(tween(width(1), 0.0, 100.0, 1000.0));
    s.tick(250.0);
    assert!(s.cancel(id));
    assert!(!s.cancel(id));
    assert_eq!(s.state(id), Some(TransitionState::Cancelled));
    let out = s.tick(1000.0);
    assert!(out.changes.is_empty());
    assert_eq!(out.events.len(), 1);
    assert!(!s.cancel(datajoin_transition_core::TransitionId(999)));
}

#[test]
fn cancel_element_clears_all_attributes() {
    let mut s = Scheduler::default();
    s.schedule(tween(width(1), 0.0, 1.0, 100.0));
    s.schedule(tween(
        Target::new(ElementHandle(1), AttrKey::attr("height")),
        0.0,
        1.0,
        100.0,
    ));
    s.schedule(tween(width(2), 0.0, 1.0, 100.0));
    assert_eq!(s.cancel_element(ElementHandle(1)), 2);
    assert_eq!(s.active_len(), 1);
    assert!(s.cancel_target(&width(2)));
    assert!(s.is_idle());
}

#[test]
fn completion_hook_chains_a_follow_up() {
    let mut s = Scheduler::default();
    let id = s.schedule(tween(width(1), 0.0, 100.0, 100.0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    assert!(s.on_completed(id, move |done| {
        sink.borrow_mut().push(done.value.clone());
        Some(tween(done.target.clone(), 100.0, 0.0, 100.0))
    }));

    s.tick(100.0);
    assert_eq!(*seen.borrow(), vec![Value::Float(100.0)]);
    let follow = s.active_for(&width(1)).unwrap();
    assert_ne!(follow, id);

    assert_eq!(only_value(&mut s, 50.0), Some(Value::Float(50.0)));
    assert_eq!(only_value(&mut s, 50.0), Some(Value::Float(0.0)));
    assert!(s.is_idle());
}

#[test]
fn hooks_do_not_run_on_cancel_or_supersession() {
    let mut s = Scheduler::default();
    let ran = Rc::new(RefCell::new(0));
    let a = s.schedule(tween(width(1), 0.0, 1.0, 100.0));
    let b = s.schedule(tween(width(2), 0.0, 1.0, 100.0));
    for id in [a, b] {
        let r = Rc::clone(&ran);
        s.on_completed(id, move |_| {
            *r.borrow_mut() += 1;
            None
        });
    }
    s.cancel(a);
    s.schedule(tween(width(2), 0.0, 1.0, 100.0));
    s.tick(1000.0);
    assert_eq!(*ran.borrow(), 0);
    assert!(!s.on_completed(a, |_| None));
}

#[test]
fn events_are_bounded_per_tick() {
    let mut s = Scheduler::new(SchedulerConfig {
        max_events_per_tick: 2,
        ..SchedulerConfig::default()
    });
    for el in 0..3 {
        s.schedule(tween(width(el), 0.0, 1.0, 0.0));
    }
    let out = s.tick(0.0);
    assert_eq!(out.changes.len(), 3);
    assert_eq!(out.events.len(), 2);
    assert_eq!(out.dropped_events, 4);
}

#[test]
fn manual_ticker_drives_shared_scheduler() {
    let scheduler = Rc::new(RefCell::new(Scheduler::default()));
    let values = Rc::new(RefCell::new(Vec::new()));
    let id = scheduler
        .borrow_mut()
        .schedule(tween(width(1), 0.0, 100.0, 100.0));

    let mut ticker = ManualTicker::new();
    let s = Rc::clone(&scheduler);
    let v = Rc::clone(&values);
    ticker.subscribe(Box::new(move |dt| {
        let mut sched = s.borrow_mut();
        for change in &sched.tick(dt).changes {
            v.borrow_mut().push(change.value.clone());
        }
    }));

    assert_eq!(ticker.run_for(100.0, 25.0), 4);
    assert_eq!(
        *values.borrow(),
        vec![
            Value::Float(25.0),
            Value::Float(50.0),
            Value::Float(75.0),
            Value::Float(100.0)
        ]
    );
    assert_eq!(scheduler.borrow().state(id), Some(TransitionState::Completed));
}

#[test]
fn color_transition_interpolates_channels() {
    let mut s = Scheduler::default();
    s.schedule(
        TransitionSpec::new(
            Target::new(ElementHandle(1), AttrKey::style("fill")),
            Value::rgba(0.0, 0.0, 0.0, 1.0),
            Value::rgba(1.0, 0.5, 0.0, 1.0),
        )
        .with_duration(100.0),
    );
    assert_eq!(
        only_value(&mut s, 50.0),
        Some(Value::ColorRgba([0.5, 0.25, 0.0, 1.0]))
    );
}

#[test]
fn scheduler_defaults_come_from_config() {
    let s = Scheduler::new(SchedulerConfig {
        default_duration_ms: 80.0,
        default_delay_ms: 20.0,
        default_ease: Ease::QuadOut,
        ..SchedulerConfig::default()
    });
    let spec = s.spec(width(1), Value::f(0.0), Value::f(1.0));
    assert_eq!(spec.duration_ms, 80.0);
    assert_eq!(spec.delay_ms, 20.0);
    assert_eq!(spec.ease, Ease::QuadOut);
}
