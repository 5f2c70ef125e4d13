use std::fs;

use crawler_content::{ContentFactory, MonsterCatalog};
use crawler_core::{
    Actor, ActorTags, BossPhase, ClassKind, EntityId, Env, GameEngine, GameEvent, GameRng,
    GameState, MapOracle, MessageLog, MonsterFactory, Position,
};

fn bundled() -> (ContentFactory, MonsterCatalog) {
    let factory = ContentFactory::bundled();
    let catalog = factory.load_monsters().expect("bundled monsters");
    (factory, catalog)
}

#[test]
fn bundled_data_directory_loads() {
    let (factory, catalog) = bundled();
    let config = factory.load_config().expect("bundled config");
    let lair = factory.load_map("dragon_lair").expect("bundled map");

    assert_eq!(config, crawler_core::GameConfig::default());
    assert_eq!(catalog.len(), 13);
    assert_eq!(lair.floor_count(), 2);
    assert_eq!(lair.dimensions().width, 16);
}

#[test]
fn deep_floors_have_no_shallow_monsters() {
    let (_, catalog) = bundled();
    let keys: Vec<&str> = catalog.templates_for_floor(9).map(|(key, _)| key).collect();
    assert_eq!(keys, ["demon", "dragon_lord", "dragon_whelp", "lich", "troll"]);
}

#[test]
fn catalog_boss_summons_catalog_whelps() {
    let (factory, catalog) = bundled();
    let config = factory.load_config().expect("bundled config");
    let lair = factory.load_map("dragon_lair").expect("bundled map");

    let mut state = GameState::new();
    state.add_actor(
        Actor::player_from_class(ClassKind::Warrior, "Hero", Position::new(7, 3)).on_floor(1),
    );
    let boss_id = state.allocate_entity_id();
    let mut boss = catalog
        .create_monster("dragon_lord", boss_id, 1, Position::new(8, 3))
        .expect("boss template");
    assert_eq!(boss.hp(), 230);
    assert!(boss.tags.contains(ActorTags::BOSS));
    boss.resources.hp.set(115);
    state.add_actor(boss);

    let mut rng = GameRng::new(11);
    let mut log = MessageLog::new();
    let mut engine = GameEngine::new(
        &mut state,
        Env::new(&lair).with_monsters(&catalog),
        &config,
        &mut rng,
        &mut log,
    );
    engine.process_monster_turn(boss_id);
    let events = engine.take_events();
    drop(engine);

    assert!(events.contains(&GameEvent::BossPhaseChanged {
        boss: boss_id,
        from: BossPhase::Normal,
        to: BossPhase::Reinforced,
    }));
    assert_eq!(state.count_living_from_template(1, "dragon_whelp"), 2);
    for whelp in state
        .actors_on_floor(1)
        .filter(|a| a.template.as_deref() == Some("dragon_whelp"))
    {
        assert_eq!(whelp.resources.hp.maximum, 69);
        assert_eq!(whelp.attack, 17);
        assert_eq!(whelp.speed, 11);
        assert!(lair.is_walkable(1, whelp.position));
        assert_ne!(whelp.id, EntityId::PLAYER);
    }
    assert!(log.contains("Dragon Lord roars and summons minions!"));
}

#[test]
fn custom_data_directory_overrides_bundled_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("maps")).expect("maps dir");
    fs::write(
        dir.path().join("config.toml"),
        "[boss]\nsummon_template = \"imp\"\nsummons_per_trigger = 1\n",
    )
    .expect("config");
    fs::write(
        dir.path().join("monsters.ron"),
        r#"(monsters: {
            "imp": (name: "Imp", hp: 10, attack: 3, defense: 1, speed: 12,
                    behavior: flanking, xp_value: 5, floors: [0]),
        })"#,
    )
    .expect("monsters");
    fs::write(
        dir.path().join("maps").join("closet.ron"),
        r####"(floors: [["###", "#.#", "###"]])"####,
    )
    .expect("map");

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().expect("config");
    let catalog = factory.load_monsters().expect("monsters");
    let closet = factory.load_map("closet").expect("map");

    assert_eq!(config.boss.summon_template, "imp");
    assert_eq!(config.boss.summons_per_trigger, 1);
    assert_eq!(config.boss.max_active_minions, 4);
    assert!(catalog.get("imp").is_some());
    assert!(closet.is_walkable(0, Position::new(1, 1)));
    assert!(!closet.is_walkable(0, Position::new(0, 1)));
}
