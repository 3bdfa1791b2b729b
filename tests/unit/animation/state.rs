use super::*;

#[test]
fn fresh_state_is_idle_at_zero_with_labels_visible() {
    let state = CanvasState::default();
    assert!(!state.has_container());
    assert_eq!(state.phase(), PlaybackPhase::Idle);
    assert!(!state.is_animating());
    assert!(state.metas().is_empty());
    assert_eq!(state.total_units(), 0.0);
    assert_eq!(state.total_ms(), 0.0);
    assert!(state.stroke_order_visible());
    assert!(state.stroke_offsets().is_empty());
}

#[test]
fn snapshot_copies_public_fields() {
    let mut state = CanvasState::default();
    state.current_unit = 12.5;
    state.finished = vec![true, false];
    state.revision = 3;
    let snap = state.snapshot();
    assert_eq!(snap.current_unit, 12.5);
    assert_eq!(snap.finished, vec![true, false]);
    assert_eq!(snap.revision, 3);
    assert!(!snap.has_container);

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["phase"], "idle");
}

#[test]
fn cancel_callbacks_empties_the_schedule() {
    let mut session = AnimationSession::default();
    session.frame = Some(session.schedule.request_frame());
    session.completion = Some(session.schedule.set_timeout(0.0, 100.0));
    session.start_wall_clock_ms = Some(5.0);
    assert_eq!(session.cancel_callbacks(), 2);
    assert!(session.schedule.is_empty());
    assert!(session.frame.is_none());
    assert!(session.completion.is_none());
    assert!(session.start_wall_clock_ms.is_none());
}

#[test]
fn store_registers_canvases_on_demand() {
    let mut store = AnimationStore::new();
    assert!(store.get(CanvasId(2)).is_none());
    store.entry(CanvasId(2)).current_unit = 1.0;
    store.entry(CanvasId::MAIN);
    assert_eq!(store.len(), 2);
    assert_eq!(
        store.canvas_ids().collect::<Vec<_>>(),
        vec![CanvasId::MAIN, CanvasId(2)]
    );
    assert_eq!(store.get(CanvasId(2)).unwrap().current_unit(), 1.0);
}
