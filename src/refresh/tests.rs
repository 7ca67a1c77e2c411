use super::*;

const DEBOUNCE: Duration = Duration::from_millis(500);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_starts_idle() {
    let s = RefreshScheduler::new(DEBOUNCE, true);
    assert_eq!(s.state(), RefreshState::Idle);
    assert_eq!(s.next_wakeup(Instant::now()), None);
}

#[test]
fn test_ten_edits_fifty_ms_apart_compose_once() {
    let t0 = Instant::now();
    let mut s = RefreshScheduler::new(DEBOUNCE, true);
    let mut content = String::new();
    let mut composed = Vec::new();

    for i in 0..10u64 {
        let now = t0 + ms(i * 50);
        content = format!("edit {i}");
        assert!(s.request(Trigger::Edit, now));
        if s.poll(now) == Poll::Compose {
            composed.push(content.clone());
        }
    }

    let last = t0 + ms(450);
    assert_eq!(s.next_wakeup(last), Some(DEBOUNCE));
    assert_eq!(s.poll(last + ms(499)), Poll::Wait);

    for step in 0..20u64 {
        let now = last + DEBOUNCE + ms(step * 10);
        if s.poll(now) == Poll::Compose {
            composed.push(content.clone());
            s.render_complete();
        }
    }

    assert_eq!(composed, ["edit 9"]);
    assert_eq!(s.state(), RefreshState::Idle);
}

#[test]
fn test_immediate_triggers() {
    let now = Instant::now();
    for trigger in [Trigger::Switch, Trigger::Structure, Trigger::Manual, Trigger::Mount] {
        let mut s = RefreshScheduler::new(DEBOUNCE, true);
        assert!(s.request(trigger, now));
        assert_eq!(s.next_wakeup(now), Some(Duration::ZERO), "{}", trigger.label());
        assert_eq!(s.poll(now), Poll::Compose);
        assert_eq!(s.state(), RefreshState::Rendering);
    }
}

#[test]
fn test_switch_replaces_pending_debounce() {
    let now = Instant::now();
    let mut s = RefreshScheduler::new(DEBOUNCE, true);
    s.request(Trigger::Edit, now);
    assert_eq!(s.poll(now + ms(10)), Poll::Wait);
    s.request(Trigger::Switch, now + ms(10));
    assert_eq!(s.poll(now + ms(10)), Poll::Compose);
}

#[test]
fn test_auto_update_off_ignores_all_but_manual_and_mount() {
    let now = Instant::now();
    let mut s = RefreshScheduler::new(DEBOUNCE, false);

    for trigger in [Trigger::Edit, Trigger::Switch, Trigger::Structure] {
        assert!(!s.request(trigger, now));
        assert_eq!(s.state(), RefreshState::Idle);
    }
    assert!(s.request(Trigger::Manual, now));
    assert_eq!(s.poll(now), Poll::Compose);
    s.render_complete();

    assert!(s.request(Trigger::Mount, now));
    assert_eq!(s.poll(now), Poll::Compose);

    s.render_complete();
    s.set_auto_update(true);
    assert!(s.request(Trigger::Edit, now));
}

#[test]
fn test_render_failed_parks_until_next_trigger() {
    let now = Instant::now();
    let mut s = RefreshScheduler::new(DEBOUNCE, true);
    s.request(Trigger::Manual, now);
    assert_eq!(s.poll(now), Poll::Compose);

    s.render_failed();
    assert_eq!(s.state(), RefreshState::Pending { deadline: None });
    assert_eq!(s.next_wakeup(now), None);
    assert_eq!(s.poll(now + ms(10_000)), Poll::Wait);

    s.request(Trigger::Mount, now + ms(10_000));
    assert_eq!(s.poll(now + ms(10_000)), Poll::Compose);
}

#[test]
fn test_request_during_rendering_survives_completion() {
    let now = Instant::now();
    let mut s = RefreshScheduler::new(DEBOUNCE, true);
    s.request(Trigger::Switch, now);
    assert_eq!(s.poll(now), Poll::Compose);

    s.request(Trigger::Edit, now + ms(100));
    s.render_complete();
    assert_eq!(
        s.state(),
        RefreshState::Pending {
            deadline: Some(now + ms(600))
        }
    );
    assert_eq!(s.poll(now + ms(600)), Poll::Compose);
}

#[test]
fn test_render_complete_outside_rendering_is_noop() {
    let mut s = RefreshScheduler::new(DEBOUNCE, true);
    s.render_complete();
    assert_eq!(s.state(), RefreshState::Idle);
}
