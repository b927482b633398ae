use std::time::Duration;

use lane_rush_core::{
    Event, GameState, LaneId, MissCause, ModeName, NoteId, HIT_ZONE_DISTANCE, PROGRESS_GOAL,
};
use lane_rush_headless::{Config, GameLoop};

const TICK_LIMIT: usize = 100_000;

fn started(mode: &str) -> GameLoop {
    let mut game = GameLoop::new(Config::new(Duration::from_nanos(16_666_667), 0x5eed));
    game.start(mode).expect("preset exists");
    let _ = game.drain_events();
    game
}

fn tick_until<F>(game: &mut GameLoop, mut done: F) -> Vec<Event>
where
    F: FnMut(&GameLoop, &[Event]) -> bool,
{
    let mut log = Vec::new();
    for _ in 0..TICK_LIMIT {
        game.tick();
        let events = game.drain_events();
        let finished = done(game, &events);
        log.extend(events);
        if finished {
            return log;
        }
    }
    panic!("condition not reached within {TICK_LIMIT} ticks");
}

fn first_spawn(events: &[Event]) -> Option<(NoteId, LaneId)> {
    events.iter().find_map(|event| match event {
        Event::NoteSpawned { note, lane } => Some((*note, *lane)),
        _ => None,
    })
}

/// Strikes every note that reached the hit zone during the last tick.
fn autoplay(game: &mut GameLoop) {
    let ready: Vec<LaneId> = game
        .active_notes()
        .iter()
        .filter(|note| note.position >= HIT_ZONE_DISTANCE - 10.0)
        .map(|note| note.lane)
        .collect();
    for lane in ready {
        game.on_lane_activated(lane);
    }
}

#[test]
fn hit_on_the_hit_zone_scores() {
    let mut game = started("easy");
    let log = tick_until(&mut game, |_, events| first_spawn(events).is_some());
    let (note, lane) = first_spawn(&log).expect("a note spawned");

    let _ = tick_until(&mut game, |game, _| {
        game.active_notes()
            .iter()
            .any(|live| live.id == note && live.position >= HIT_ZONE_DISTANCE - 3.0)
    });
    game.on_lane_activated(lane);

    let events = game.drain_events();
    assert!(
        matches!(
            events.as_slice(),
            [Event::NoteHit { note: hit, lane: hit_lane, distance }]
                if *hit == note && *hit_lane == lane && *distance < 15.0
        ),
        "unexpected events {events:?}"
    );
    assert_eq!(game.combo(), 1);
    assert_eq!(game.score(), 115);
    assert_eq!(game.progress(), 0.5);
}

#[test]
fn unstruck_note_expires_as_miss() {
    let mut game = started("easy");
    let log = tick_until(&mut game, |_, events| {
        events
            .iter()
            .any(|event| matches!(event, Event::NoteMissed { .. }))
    });

    let (first, lane) = first_spawn(&log).expect("a note spawned");
    let miss = log
        .iter()
        .find(|event| matches!(event, Event::NoteMissed { .. }))
        .copied();
    assert_eq!(
        miss,
        Some(Event::NoteMissed {
            note: Some(first),
            lane,
            cause: MissCause::Expired,
        })
    );
    assert_eq!(game.combo(), 0);
    assert_eq!(game.score(), 70);
    assert_eq!(game.progress(), 0.0);
}

#[test]
fn repeated_hits_win_and_freeze_the_session() {
    let mut game = started("hard");
    for _ in 0..TICK_LIMIT {
        game.tick();
        autoplay(&mut game);
        if game.state() != GameState::Running {
            break;
        }
    }

    assert_eq!(game.state(), GameState::Won);
    assert_eq!(game.progress(), PROGRESS_GOAL);
    let stats = game.stats();
    assert_eq!(stats.hits, 200);
    assert_eq!(stats.misses, 0);
    assert_eq!(game.combo(), 200);
    assert_eq!(game.score(), 100 + 200 * 15);

    let events = game.drain_events();
    assert_eq!(events.last(), Some(&Event::GameWon));

    let notes_before = game.active_notes().into_vec();
    let ticks_before = game.ticks();
    game.tick();
    game.on_lane_activated(LaneId::Left);
    assert!(game.drain_events().is_empty());
    assert_eq!(game.active_notes().into_vec(), notes_before);
    assert_eq!(game.ticks(), ticks_before);
}

#[test]
fn repeated_misses_lose_the_session() {
    let mut game = started("easy");
    for _ in 0..4 {
        game.on_lane_activated(LaneId::Down);
    }

    assert_eq!(game.state(), GameState::Lost);
    assert_eq!(game.score(), 0);
    let events = game.drain_events();
    assert_eq!(events.len(), 5);
    assert_eq!(events.last(), Some(&Event::GameLost));

    game.tick();
    game.on_lane_activated(LaneId::Down);
    assert!(game.drain_events().is_empty());
    assert_eq!(game.ticks(), 0);
}

#[test]
fn empty_lane_activation_costs_the_same_as_expiry() {
    let mut game = started("crazy");
    game.on_lane_activated(LaneId::W);

    assert_eq!(
        game.drain_events(),
        vec![Event::NoteMissed {
            note: None,
            lane: LaneId::W,
            cause: MissCause::EmptyActivation,
        }]
    );
    assert_eq!(game.score(), 70);
    assert_eq!(game.combo(), 0);
    assert_eq!(game.progress(), 0.0);
}

#[test]
fn inactive_lane_activation_is_ignored() {
    let mut game = started("easy");
    game.on_lane_activated(LaneId::Up);
    game.on_lane_activated(LaneId::Q);

    assert!(game.drain_events().is_empty());
    assert_eq!(game.score(), 100);
}

#[test]
fn idle_loop_ignores_ticks_and_input() {
    let mut game = GameLoop::default();
    game.tick();
    game.on_lane_activated(LaneId::Left);

    assert!(game.drain_events().is_empty());
    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(game.ticks(), 0);
}

#[test]
fn invalid_mode_leaves_state_untouched() {
    let mut game = GameLoop::default();
    let error = game.start("impossible").expect_err("not a preset");
    assert_eq!(error.name(), "impossible");
    assert_eq!(game.state(), GameState::Idle);

    game.start("easy").expect("preset exists");
    game.tick();
    let _ = game.drain_events();

    assert!(game.start("EASY").is_err());
    assert_eq!(game.state(), GameState::Running);
    assert_eq!(game.mode(), Some(ModeName::Easy));
    assert_eq!(game.ticks(), 1);
    assert!(game.drain_events().is_empty());
}

#[test]
fn retry_restarts_last_mode_and_reset_returns_to_idle() {
    let mut game = started("crazy");
    for _ in 0..4 {
        game.on_lane_activated(LaneId::Q);
    }
    assert_eq!(game.state(), GameState::Lost);

    assert!(game.retry());
    assert_eq!(game.state(), GameState::Running);
    assert_eq!(game.mode(), Some(ModeName::Crazy));
    assert_eq!(game.score(), 100);
    assert_eq!(game.stats().misses, 0);

    game.reset();
    assert_eq!(game.state(), GameState::Idle);
    assert!(game.mode().is_none());
    assert!(game.retry(), "the last mode is remembered across resets");
    assert_eq!(game.mode(), Some(ModeName::Crazy));
}

#[test]
fn restart_discards_notes_in_flight() {
    let mut game = started("easy");
    let _ = tick_until(&mut game, |game, _| !game.active_notes().is_empty());

    game.start_mode(ModeName::Hard);
    assert!(game.active_notes().is_empty());
    assert_eq!(game.ticks(), 0);
    assert_eq!(game.spawn_interval(), Some(Duration::from_millis(750)));
    assert_eq!(game.note_speed(), Some(5.0));
}

#[test]
fn difficulty_ramp_is_monotonic_and_bounded() {
    let mut game = started("crazy");
    let mut interval = game.spawn_interval().expect("running");
    let mut speed = game.note_speed().expect("running");

    for _ in 0..3_000 {
        game.tick();
        autoplay(&mut game);
        if game.state() != GameState::Running {
            break;
        }
        let next_interval = game.spawn_interval().expect("running");
        let next_speed = game.note_speed().expect("running");
        assert!(next_interval <= interval);
        assert!(next_interval >= Duration::from_millis(400));
        assert!(next_speed >= speed);
        assert!(next_speed <= 15.0);
        interval = next_interval;
        speed = next_speed;
    }
}

#[test]
fn same_seed_replays_identically() {
    let run = || {
        let mut game = started("crazy");
        let mut log = Vec::new();
        for index in 0..1_500 {
            game.tick();
            if index % 7 == 0 {
                autoplay(&mut game);
            }
            log.extend(game.drain_events());
        }
        (log, game.score(), game.state())
    };

    assert_eq!(run(), run());
}

#[test]
fn retry_draws_a_fresh_lane_sequence() {
    let session_lanes = |game: &mut GameLoop| {
        let mut lanes = Vec::new();
        for _ in 0..600 {
            game.tick();
            autoplay(game);
            lanes.extend(game.drain_events().iter().filter_map(|event| match event {
                Event::NoteSpawned { lane, .. } => Some(*lane),
                _ => None,
            }));
        }
        lanes
    };

    let mut game = started("crazy");
    let first = session_lanes(&mut game);
    assert!(game.retry());
    let _ = game.drain_events();
    let second = session_lanes(&mut game);

    assert!(first.len() > 10);
    assert!(second.len() > 10);
    assert_ne!(first, second);

    let mut replay = started("crazy");
    assert_eq!(session_lanes(&mut replay), first);
    assert!(replay.retry());
    let _ = replay.drain_events();
    assert_eq!(session_lanes(&mut replay), second);
}
