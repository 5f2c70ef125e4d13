use crawler_core::geometry::chebyshev;
use crawler_core::{
    AbilityKind, Actor, ActorKind, Behavior, ClassKind, EntityId, Env, GameConfig, GameEngine,
    GameEvent, GameRng, GameState, GridMap, Message, MessageLog, Position, StatusEffect,
    StatusKind,
};

fn hero_at(x: i32, y: i32) -> GameState {
    let mut state = GameState::new();
    state.add_actor(Actor::player_from_class(ClassKind::Warrior, "Hero", Position::new(x, y)));
    state
}

fn monster(id: u32, name: &str, x: i32, y: i32, behavior: Behavior) -> Actor {
    Actor::new(EntityId(id), name, ActorKind::Monster, Position::new(x, y))
        .with_resources(40, 60, 50)
        .with_combat_stats(6, 2, 10)
        .with_behavior(behavior)
}

fn position(state: &GameState, id: u32) -> Option<Position> {
    state.actor(EntityId(id)).map(|a| a.position)
}

/// Runs one monster phase and returns the recorded events.
fn monster_phase(
    state: &mut GameState,
    map: &GridMap,
    config: &GameConfig,
    seed: u64,
    log: &mut MessageLog,
) -> Vec<GameEvent> {
    let mut rng = GameRng::new(seed);
    let mut engine = GameEngine::new(state, Env::new(map), config, &mut rng, log);
    engine.process_all_monsters();
    engine.take_events()
}

#[test]
fn aggressive_monster_closes_in_one_step() {
    let map = GridMap::open(12, 12);
    let config = GameConfig::default();
    let mut state = hero_at(2, 2);
    state.add_actor(monster(1, "Goblin", 6, 2, Behavior::Aggressive));
    let mut log = MessageLog::new();

    monster_phase(&mut state, &map, &config, 1, &mut log);
    assert_eq!(position(&state, 1), Some(Position::new(5, 2)));
}

#[test]
fn adjacent_aggressive_monster_attacks() {
    let map = GridMap::open(12, 12);
    let config = GameConfig::default();
    let mut state = hero_at(2, 2);
    state.add_actor(monster(1, "Goblin", 3, 3, Behavior::Aggressive));
    let mut log = MessageLog::new();

    monster_phase(&mut state, &map, &config, 1, &mut log);
    assert_eq!(position(&state, 1), Some(Position::new(3, 3)));
    assert!(log.contains("Goblin hits Hero"));
    assert!(state.player().is_some_and(|p| p.hp() < 120));
}

#[test]
fn monsters_beyond_detection_radius_hold_still() {
    let map = GridMap::open(30, 5);
    let config = GameConfig::default();
    let mut state = hero_at(1, 2);
    state.add_actor(monster(1, "Goblin", 12, 2, Behavior::Aggressive));
    state.add_actor(monster(2, "Bat", 11, 2, Behavior::Aggressive).on_floor(1));
    let mut log = MessageLog::new();

    monster_phase(&mut state, &map, &config, 1, &mut log);
    assert_eq!(position(&state, 1), Some(Position::new(12, 2)));
    assert_eq!(position(&state, 2), Some(Position::new(11, 2)));
    assert!(log.is_empty());
}

#[test]
fn slowed_monsters_skip_even_turns() {
    let map = GridMap::open(12, 12);
    let config = GameConfig::default();
    let mut state = hero_at(2, 2);
    let mut goblin = monster(1, "Goblin", 6, 2, Behavior::Aggressive);
    goblin.status_effects.add(StatusEffect::slowed());
    state.add_actor(goblin);
    state.turn.number = 2;
    let mut log = MessageLog::new();

    monster_phase(&mut state, &map, &config, 1, &mut log);
    assert_eq!(position(&state, 1), Some(Position::new(6, 2)));
    assert!(log.contains("Goblin is slowed and moves sluggishly."));

    state.turn.number = 3;
    monster_phase(&mut state, &map, &config, 1, &mut log);
    assert_eq!(position(&state, 1), Some(Position::new(5, 2)));
}

#[test]
fn flanker_heads_for_the_far_side() {
    let map = GridMap::open(12, 12);
    let config = GameConfig::default();
    let mut state = hero_at(3, 2);
    state.add_actor(monster(1, "Wolf", 6, 2, Behavior::Flanking));
    let mut log = MessageLog::new();

    monster_phase(&mut state, &map, &config, 1, &mut log);
    // The flank tile is (2, 3), the first of the far-side tiles in compass order.
    let wolf = position(&state, 1).expect("wolf");
    assert_eq!(chebyshev(wolf, Position::new(2, 3)), 3);
}

#[test]
fn ranged_monster_backs_off_when_crowded() {
    let map = GridMap::open(12, 12);
    let config = GameConfig::default();
    let mut state = hero_at(3, 5);
    state.add_actor(monster(1, "Archer", 5, 5, Behavior::Ranged));
    let mut log = MessageLog::new();

    monster_phase(&mut state, &map, &config, 1, &mut log);
    assert_eq!(position(&state, 1), Some(Position::new(6, 5)));
}

#[test]
fn ranged_monster_fires_from_its_band() {
    let map = GridMap::open(12, 12);
    let config = GameConfig::default();
    let mut state = hero_at(2, 5);
    state.add_actor(
        monster(1, "Cobra", 6, 5, Behavior::Ranged).with_abilities(&[AbilityKind::VenomSpit]),
    );
    let mut log = MessageLog::new();

    monster_phase(&mut state, &map, &config, 1, &mut log);
    assert_eq!(position(&state, 1), Some(Position::new(6, 5)));
    assert!(log.contains("Cobra spits venom at Hero"));
    assert!(
        state
            .player()
            .is_some_and(|p| p.status_effects.has(StatusKind::Poisoned))
    );
    assert_eq!(state.actor(EntityId(1)).map(|a| a.resources.stamina.current), Some(35));
}

#[test]
fn ranged_monster_without_sight_repositions() {
    let map = GridMap::from_rows(&[
        "..........",
        "....#.....",
        "..........",
    ])
    .expect("grid");
    let config = GameConfig::default();
    let mut state = hero_at(1, 1);
    state.add_actor(
        monster(1, "Cobra", 6, 1, Behavior::Ranged).with_abilities(&[AbilityKind::VenomSpit]),
    );
    let mut log = MessageLog::new();

    monster_phase(&mut state, &map, &config, 1, &mut log);
    assert_ne!(position(&state, 1), Some(Position::new(6, 1)));
    assert!(!log.contains("spits venom"));
}

#[test]
fn cautious_monster_heals_when_badly_hurt() {
    let map = GridMap::open(12, 12);
    let config = GameConfig::default();
    let mut state = hero_at(2, 2);
    let mut shaman = monster(1, "Shaman", 3, 2, Behavior::Cautious)
        .with_resources(100, 60, 50)
        .with_abilities(&[AbilityKind::Heal]);
    shaman.resources.hp.set(10);
    state.add_actor(shaman);
    let mut log = MessageLog::new();

    monster_phase(&mut state, &map, &config, 1, &mut log);
    let shaman = state.actor(EntityId(1)).expect("shaman");
    assert_eq!(shaman.hp(), 35);
    assert_eq!(shaman.resources.mana.current, 30);
    assert!(log.contains("Shaman heals for 25 HP."));
}

#[test]
fn cautious_monster_without_heal_retreats() {
    let map = GridMap::open(12, 12);
    let config = GameConfig::default();
    let mut state = hero_at(2, 2);
    let mut kobold = monster(1, "Kobold", 3, 2, Behavior::Cautious);
    kobold.resources.hp.set(5);
    state.add_actor(kobold);
    let mut log = MessageLog::new();

    monster_phase(&mut state, &map, &config, 1, &mut log);
    assert_eq!(position(&state, 1), Some(Position::new(4, 2)));
    assert!(state.player().is_some_and(|p| p.hp() == 120));
}

#[test]
fn monster_phase_stops_when_the_player_falls() {
    let map = GridMap::open(12, 12);
    let config = GameConfig::default();
    let mut state = hero_at(2, 2);
    if let Some(hero) = state.player_mut() {
        hero.resources.hp.set(1);
    }
    state.add_actor(monster(1, "Orc", 3, 2, Behavior::Aggressive).with_combat_stats(30, 2, 12));
    state.add_actor(monster(2, "Goblin", 1, 2, Behavior::Aggressive).with_combat_stats(30, 2, 5));
    let mut log = MessageLog::new();
    let mut rng = GameRng::new(1);
    let mut engine = GameEngine::new(&mut state, Env::new(&map), &config, &mut rng, &mut log);

    assert_eq!(engine.process_all_monsters(), 1);
    assert!(engine.take_events().contains(&GameEvent::ActorSlain {
        victim: EntityId::PLAYER,
        killer: Some(EntityId(1)),
    }));
    drop(engine);
    assert!(state.player().is_some_and(|p| !p.alive));
    assert!(log.contains("Orc hits Hero"));
    assert!(!log.contains("Goblin hits Hero"));
}

#[test]
fn same_seed_replays_identically() {
    fn skirmish(seed: u64) -> (GameState, Vec<Message>) {
        let map = GridMap::from_rows(&[
            "..............",
            "....##........",
            "..............",
            "........#.....",
            "..............",
        ])
        .expect("grid");
        let config = GameConfig::default();
        let mut state = hero_at(1, 2);
        state.add_actor(
            monster(1, "Goblin", 7, 0, Behavior::Aggressive)
                .with_abilities(&[AbilityKind::Rend]),
        );
        state.add_actor(monster(2, "Wolf", 9, 4, Behavior::Flanking));
        state.add_actor(
            monster(3, "Cobra", 12, 2, Behavior::Ranged).with_abilities(&[AbilityKind::VenomSpit]),
        );
        let mut log = MessageLog::new();
        let mut rng = GameRng::new(seed);
        let mut engine = GameEngine::new(&mut state, Env::new(&map), &config, &mut rng, &mut log);
        for _ in 0..8 {
            engine.process_all_monsters();
            engine.advance_turn();
        }
        drop(engine);
        (state, log.iter().cloned().collect())
    }

    assert_eq!(skirmish(42), skirmish(42));
}
