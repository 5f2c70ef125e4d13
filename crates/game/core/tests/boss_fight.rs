use crawler_core::{
    AbilityKind, Actor, ActorKind, ActorTags, Behavior, BossPhase, ClassKind, EntityId, Env,
    GameConfig, GameEngine, GameEvent, GameRng, GameState, GridMap, MessageLog, MonsterFactory,
    Position, TelegraphKind, combat,
};

const DRAGON: EntityId = EntityId(1);

struct Hatchery;

impl MonsterFactory for Hatchery {
    fn create_monster(
        &self,
        template: &str,
        id: EntityId,
        floor: u32,
        position: Position,
    ) -> Option<Actor> {
        (template == "dragon_whelp").then(|| {
            Actor::new(id, "Dragon Whelp", ActorKind::Monster, position)
                .with_resources(30, 0, 0)
                .with_combat_stats(8, 3, 11)
                .with_template(template)
                .on_floor(floor)
        })
    }
}

/// Hero west of a 200 hp dragon at `distance` tiles.
fn lair(distance: i32) -> GameState {
    let mut state = GameState::new();
    state.add_actor(Actor::player_from_class(
        ClassKind::Warrior,
        "Hero",
        Position::new(6 - distance, 6),
    ));
    state.add_actor(
        Actor::new(DRAGON, "Dragon", ActorKind::Monster, Position::new(6, 6))
            .with_resources(200, 100, 100)
            .with_combat_stats(12, 8, 6)
            .with_behavior(Behavior::Boss)
            .with_tags(ActorTags::BOSS)
            .with_xp_value(500),
    );
    state
}

fn set_phase(state: &mut GameState, phase: BossPhase, hp: u32) {
    if let Some(dragon) = state.actor_mut(DRAGON) {
        dragon.resources.hp.set(hp);
        if let Some(boss) = dragon.boss.as_mut() {
            boss.phase = phase;
        }
    }
}

fn summon_waves(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, GameEvent::MinionsSummoned { .. }))
        .count()
}

#[test]
fn one_heavy_hit_across_both_thresholds_enrages_and_summons_once() {
    let map = GridMap::open(14, 14);
    let config = GameConfig::default();
    let mut state = lair(1);
    set_phase(&mut state, BossPhase::Normal, 102);
    let mut log = MessageLog::new();

    // 51% down to 20% in a single blow.
    if let Some(dragon) = state.actor_mut(DRAGON) {
        combat::apply_damage(dragon, 62, &mut log);
    }

    let mut rng = GameRng::new(5);
    let mut engine = GameEngine::new(
        &mut state,
        Env::new(&map).with_monsters(&Hatchery),
        &config,
        &mut rng,
        &mut log,
    );
    engine.process_all_monsters();
    let events = engine.take_events();
    assert_eq!(summon_waves(&events), 1);
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, GameEvent::BossPhaseChanged { .. }))
            .count(),
        1
    );
    // Enrage lands on the same turn as the first wave, ahead of it.
    assert_eq!(events.first(), Some(&GameEvent::BossEnraged { boss: DRAGON }));
    let dragon = engine.state().actor(DRAGON).expect("dragon");
    assert!(dragon.boss.is_some_and(|b| b.is_enraged()));
    assert_eq!(dragon.speed, 6 + config.boss.enrage_speed_bonus);

    // The second wave only comes on the boss's next turn.
    engine.advance_turn();
    engine.process_monster_turn(DRAGON);
    assert_eq!(summon_waves(&engine.take_events()), 1);
    engine.advance_turn();
    engine.process_monster_turn(DRAGON);
    assert_eq!(summon_waves(&engine.take_events()), 0);
    drop(engine);

    let phase = state.actor(DRAGON).and_then(|a| a.boss).map(|b| b.phase);
    assert_eq!(phase, Some(BossPhase::Overrun));
    assert_eq!(state.count_living_from_template(0, "dragon_whelp"), 4);
}

#[test]
fn enraged_boss_acts_twice() {
    let map = GridMap::open(14, 14);
    let mut config = GameConfig::default();
    config.boss.telegraph_chance = 0;
    let mut state = lair(1);
    set_phase(&mut state, BossPhase::Overrun, 40);
    let mut log = MessageLog::new();
    let mut rng = GameRng::new(5);
    let mut engine = GameEngine::new(&mut state, Env::new(&map), &config, &mut rng, &mut log);

    engine.process_monster_turn(DRAGON);
    drop(engine);
    let blows = log
        .iter()
        .filter(|m| m.text.contains("Dragon hits Hero"))
        .count();
    assert_eq!(blows, 2);
}

#[test]
fn breath_is_announced_then_lands_next_turn() {
    let map = GridMap::open(14, 14);
    let mut config = GameConfig::default();
    config.boss.telegraph_chance = 100;
    let mut state = lair(3);
    set_phase(&mut state, BossPhase::Reinforced, 80);
    let mut log = MessageLog::new();
    let mut rng = GameRng::new(5);
    let mut engine = GameEngine::new(&mut state, Env::new(&map), &config, &mut rng, &mut log);

    engine.process_monster_turn(DRAGON);
    let telegraph = engine
        .state()
        .actor(DRAGON)
        .and_then(|a| a.boss)
        .and_then(|b| b.telegraph);
    assert_eq!(telegraph.map(|t| t.kind), Some(TelegraphKind::Breath));
    assert_eq!(engine.state().player().map(|p| p.hp()), Some(120));

    engine.advance_turn();
    engine.process_monster_turn(DRAGON);
    drop(engine);
    assert!(log.contains("Dragon draws a deep breath..."));
    assert!(log.contains("Dragon unleashes a torrent of flame! 1 targets hit."));
    assert!(state.player().is_some_and(|p| p.hp() < 120));
}

#[test]
fn boss_nukes_from_medium_range() {
    let map = GridMap::open(14, 14);
    let config = GameConfig::default();
    let mut state = lair(3);
    if let Some(dragon) = state.actor_mut(DRAGON) {
        dragon.abilities.push(AbilityKind::Fireball);
    }
    let mut log = MessageLog::new();
    let mut rng = GameRng::new(5);
    let mut engine = GameEngine::new(&mut state, Env::new(&map), &config, &mut rng, &mut log);

    engine.process_monster_turn(DRAGON);
    drop(engine);
    assert!(log.contains("Dragon casts Fireball! 1 targets hit."));
    assert_eq!(state.actor(DRAGON).map(|a| a.resources.mana.current), Some(70));
    assert_eq!(state.actor(DRAGON).map(|a| a.position), Some(Position::new(6, 6)));
}

#[test]
fn boss_war_cries_before_closing_in() {
    let map = GridMap::open(14, 14);
    let config = GameConfig::default();
    let mut state = lair(5);
    if let Some(dragon) = state.actor_mut(DRAGON) {
        dragon.abilities.push(AbilityKind::WarCry);
    }
    let mut log = MessageLog::new();
    let mut rng = GameRng::new(5);
    let mut engine = GameEngine::new(&mut state, Env::new(&map), &config, &mut rng, &mut log);

    engine.process_monster_turn(DRAGON);
    assert_eq!(engine.state().actor(DRAGON).map(|a| a.attack), Some(19));
    engine.process_monster_turn(DRAGON);
    drop(engine);
    assert_eq!(state.actor(DRAGON).map(|a| a.position), Some(Position::new(5, 6)));
}

#[test]
fn slain_boss_drops_boss_loot() {
    let map = GridMap::open(14, 14);
    let config = GameConfig::default();
    let mut state = lair(1);
    set_phase(&mut state, BossPhase::Overrun, 1);
    let mut log = MessageLog::new();
    let mut rng = GameRng::new(5);
    let mut engine = GameEngine::new(&mut state, Env::new(&map), &config, &mut rng, &mut log);

    let outcome = engine
        .melee_attack(EntityId::PLAYER, DRAGON)
        .expect("adjacent");
    assert!(outcome.killed);
    assert!(engine.take_events().contains(&GameEvent::LootDropped {
        victim: DRAGON,
        floor: 0,
        position: Position::new(6, 6),
        boss: true,
    }));
    // A dead boss takes no further turns.
    assert!(!engine.process_monster_turn(DRAGON));
}
