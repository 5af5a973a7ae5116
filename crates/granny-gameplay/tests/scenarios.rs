//! End-to-end runs through the public API.

use glam::Vec3;
use granny_gameplay::prelude::*;
use proptest::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn run(difficulty: Difficulty, seed: u64) -> GameState {
    match GameState::new(
        RunConfig::new(difficulty, RunSettings::default()),
        fastrand::Rng::with_seed(seed),
    ) {
        Ok(state) => state,
        Err(err) => panic!("stock layout rejected: {err}"),
    }
}

/// Places Granny `distance` units along +X from the player, on the same floor.
fn granny_beside_player(state: &mut GameState, distance: f32) {
    let feet = state.player.feet();
    if let Some(granny) = state.granny.as_mut() {
        granny.place(feet + Vec3::new(distance, FLOOR_OFFSET, 0.0), 0.0);
    }
}

fn granny_mode(state: &GameState) -> Option<GrannyMode> {
    state.granny.as_ref().map(Granny::mode)
}

fn caught(events: &[SimEvent]) -> usize {
    count_events(events, SimEvent::ends_day)
}

#[test]
fn test_distant_granny_keeps_patrolling_until_noise() {
    let mut state = run(Difficulty::Easy, 2);
    granny_beside_player(&mut state, 20.0);
    let idle = FrameInput::captured();
    for _ in 0..120 {
        let events = state.tick(&idle, DT);
        assert_eq!(caught(&events), 0);
        assert_eq!(granny_mode(&state), Some(GrannyMode::Patrol));
    }

    let mut events = Vec::new();
    if let Some(granny) = state.granny.as_mut() {
        granny.hear_noise(Vec3::new(-10.0, 10.0, -10.0), &mut events);
    }
    assert_eq!(granny_mode(&state), Some(GrannyMode::Investigate));
}

#[test]
fn test_nightmare_chases_and_catches() {
    let mut state = run(Difficulty::Nightmare, 2);
    granny_beside_player(&mut state, 10.0);
    let idle = FrameInput::captured();

    let events = state.tick(&idle, DT);
    assert_eq!(granny_mode(&state), Some(GrannyMode::Chase));
    assert!(events.contains(&SimEvent::GrannyModeChanged {
        from: GrannyMode::Patrol,
        to: GrannyMode::Chase,
    }));

    // Chase speed is 13 * 1.5 = 19.5; allow one tick of slack
    let budget = (10.0 / 19.5 / DT).ceil() as usize + 1;
    let caught_at = (1..budget).find(|_| caught(&state.tick(&idle, DT)) > 0);
    assert!(caught_at.is_some());
}

#[test]
fn test_noise_interrupts_chase() {
    let mut state = run(Difficulty::Nightmare, 2);
    granny_beside_player(&mut state, 30.0);
    state.tick(&FrameInput::captured(), DT);
    assert_eq!(granny_mode(&state), Some(GrannyMode::Chase));

    let first = Vec3::new(0.0, 10.0, 10.0);
    let second = Vec3::new(5.0, 10.0, 5.0);
    let mut events = Vec::new();
    if let Some(granny) = state.granny.as_mut() {
        granny.hear_noise(first, &mut events);
        granny.hear_noise(second, &mut events);
    }
    assert_eq!(granny_mode(&state), Some(GrannyMode::Investigate));
    assert_eq!(
        state.granny.as_ref().and_then(Granny::noise_location),
        Some(second)
    );

    // Still in sight, but the noise wins
    state.tick(&FrameInput::captured(), DT);
    assert_eq!(granny_mode(&state), Some(GrannyMode::Investigate));
}

#[test]
fn test_one_catch_per_approach() {
    let mut state = run(Difficulty::Nightmare, 4);
    granny_beside_player(&mut state, 8.0);
    let idle = FrameInput::captured();
    let mut total = 0;
    for _ in 0..300 {
        total += caught(&state.tick(&idle, DT));
    }
    assert_eq!(total, 1);

    // Back off and come in again
    granny_beside_player(&mut state, 15.0);
    for _ in 0..300 {
        total += caught(&state.tick(&idle, DT));
    }
    assert_eq!(total, 2);
}

#[test]
fn test_hidden_player_is_never_caught() {
    let mut state = run(Difficulty::Nightmare, 6);
    let spot = state.layout().hiding_spots()[0].clone();
    state.player.hide(&spot);
    let hidden_at = state.player.position;
    granny_beside_player(&mut state, 4.0);

    let input = FrameInput::captured().with_movement(MoveIntent::FORWARD);
    for _ in 0..240 {
        let events = state.tick(&input, DT);
        assert_eq!(caught(&events), 0);
        assert_ne!(granny_mode(&state), Some(GrannyMode::Chase));
    }
    assert_eq!(state.player.position, hidden_at);
}

#[test]
fn test_practice_never_catches() {
    let mut state = run(Difficulty::Practice, 8);
    let input = FrameInput::captured()
        .with_movement(MoveIntent::FORWARD)
        .with_run();
    for _ in 0..1200 {
        assert_eq!(caught(&state.tick(&input, DT)), 0);
    }
}

fn walk_over_bedroom_creak(crouch: bool) -> Vec<SimEvent> {
    let mut state = run(Difficulty::Practice, 9);
    state.player = PlayerKinematics::new(Vec3::new(20.0, 15.0, -2.0), state.layout());
    let walk = FrameInput::captured().with_movement(MoveIntent::FORWARD);
    let mut events = Vec::new();
    if crouch {
        events.extend(state.tick(&walk.with_crouch_toggle(), DT));
    }
    for _ in 0..240 {
        events.extend(state.tick(&walk, DT));
    }
    events
}

#[test]
fn test_crouching_over_creaky_floor_is_silent() {
    let events = walk_over_bedroom_creak(true);
    assert!(!events.contains(&SimEvent::Sound(SoundCue::FloorCreak)));
    assert!(!events.iter().any(|e| matches!(e, SimEvent::Noise { .. })));

    let events = walk_over_bedroom_creak(false);
    assert!(events.contains(&SimEvent::Sound(SoundCue::FloorCreak)));
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::Noise {
            source: NoiseSource::Creak,
            ..
        }
    )));
}

fn session(difficulty: Difficulty) -> Session {
    Session::new(run(difficulty, 12)).with_renderer(Box::new(NullRenderer::new()))
}

#[test]
fn test_catch_starts_next_day() {
    let mut session = session(Difficulty::Nightmare);
    assert!(session.begin_day().is_ok());
    granny_beside_player(session.state_mut(), 6.0);

    let idle = FrameInput::captured();
    let mut events = Vec::new();
    for _ in 0..120 {
        events.extend(session.frame(&idle, DT));
        if session.mode() != GameMode::Playing {
            break;
        }
    }
    assert_eq!(session.mode(), GameMode::Transition);
    assert_eq!(session.day(), 2);
    assert!(events.contains(&SimEvent::ModeChanged {
        from: GameMode::Playing,
        to: GameMode::Transition,
    }));

    // Frames during the day card do nothing
    let frames = session.frames();
    assert!(session.frame(&idle, DT).is_empty());
    assert_eq!(session.frames(), frames);

    let events = session.begin_day();
    assert!(events.is_ok_and(|e| e.contains(&SimEvent::DayStarted { day: 2 })));
    let granny = session.state().granny.as_ref();
    assert!(granny.is_some_and(Granny::is_catch_armed));
    assert_eq!(
        session.state().player.position,
        session.state().layout().player_start()
    );
}

#[test]
fn test_escape_with_master_key() {
    let mut session = session(Difficulty::Practice);
    assert!(session.begin_day().is_ok());
    let layout = session.state().layout().clone();
    session.state_mut().player = PlayerKinematics::new(Vec3::new(0.0, 5.0, 14.0), &layout);
    session.state_mut().inventory_mut().add(ItemType::MasterKey);

    let input = FrameInput::captured()
        .with_look(std::f32::consts::PI, 0.0)
        .with_selection(ItemType::MasterKey)
        .with_interact();
    let events = session.frame(&input, DT);
    assert!(events.contains(&SimEvent::UsedExitWithItem {
        item: ItemType::MasterKey
    }));
    assert_eq!(session.mode(), GameMode::Victory);
    assert_eq!(session.state().inventory().selected(), None);

    // Finished runs can be retried from day one
    assert!(session.retry().is_ok());
    assert_eq!(session.mode(), GameMode::Transition);
    assert!(session.state().inventory().is_empty());
}

fn move_intent() -> impl Strategy<Value = MoveIntent> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(forward, backward, left, right)| MoveIntent {
            forward,
            backward,
            left,
            right,
        },
    )
}

fn frame_input() -> impl Strategy<Value = FrameInput> {
    (
        move_intent(),
        -3.2f32..3.2,
        -1.5f32..1.5,
        prop::bool::weighted(0.05),
        any::<bool>(),
        prop::bool::weighted(0.1),
    )
        .prop_map(|(movement, yaw, pitch, crouch, running, interact)| {
            let mut input = FrameInput::captured()
                .with_movement(movement)
                .with_look(yaw, pitch);
            if crouch {
                input = input.with_crouch_toggle();
            }
            if running {
                input = input.with_run();
            }
            if interact {
                input = input.with_interact();
            }
            input
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_player_never_sinks_below_floor(
        seed in any::<u64>(),
        inputs in prop::collection::vec(frame_input(), 1000),
    ) {
        let mut state = run(Difficulty::Medium, seed);
        for input in &inputs {
            state.tick(input, DT);
            let player = &state.player;
            if player.is_hidden() {
                continue;
            }
            let clearance = player.position.y - player.floor().height();
            prop_assert!(
                clearance >= player.stand_height() - 1e-3,
                "eye {:.3} above {:?} with stance {}",
                clearance,
                player.floor(),
                player.stand_height()
            );
        }
    }

    #[test]
    fn test_granny_stays_on_a_floor(
        seed in any::<u64>(),
        movement in move_intent(),
        yaw in -3.0f32..3.0,
        running in any::<bool>(),
    ) {
        let mut state = run(Difficulty::Hard, seed);
        let mut input = FrameInput::captured()
            .with_movement(movement)
            .with_look(yaw, 0.0);
        if running {
            input = input.with_run();
        }
        let heights: Vec<f32> = FloorLevel::ALL.iter().map(|f| f.height()).collect();
        for _ in 0..1000 {
            state.tick(&input, DT);
            let feet_y = state.granny.as_ref().map_or(0.0, |g| g.feet().y);
            prop_assert!(heights.iter().any(|h| (feet_y - h).abs() < 1e-3));
        }
    }
}
