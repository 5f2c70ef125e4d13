//! Kill rewards, experience and class regeneration.

use crate::config::ProgressionConfig;
use crate::engine::{GameEngine, GameEvent};
use crate::env::{MessageCategory, MessageSink};
use crate::state::{Actor, ActorKind, ActorTags, EntityId};

/// Hp gained per level, to both maximum and current.
const LEVEL_HP_GAIN: u32 = 10;
const LEVEL_MANA_GAIN: u32 = 3;
const LEVEL_STAMINA_GAIN: u32 = 3;

/// Spends banked experience on as many levels as it covers.
///
/// Returns the number of levels gained. Leftover experience carries over, and
/// nothing happens once the table's last level is reached.
pub fn check_level_up(
    actor: &mut Actor,
    progression: &ProgressionConfig,
    log: &mut dyn MessageSink,
) -> u32 {
    let mut gained = 0;
    while actor.level < progression.max_level() {
        let Some(&needed) = progression.xp_per_level.get(actor.level as usize - 1) else {
            break;
        };
        if actor.xp < needed {
            break;
        }
        actor.xp -= needed;
        actor.level += 1;
        actor.resources.hp.grow(LEVEL_HP_GAIN);
        actor.resources.mana.grow(LEVEL_MANA_GAIN);
        actor.resources.stamina.grow(LEVEL_STAMINA_GAIN);
        actor.attack += 1;
        actor.defense += 1;
        gained += 1;
        log.push(
            format!("{} reaches level {}!", actor.name, actor.level),
            MessageCategory::System,
        );
    }
    gained
}

/// Restores resources by the actor's class rates.
///
/// Returns false, and does nothing, for dead or classless actors. When to
/// regenerate (e.g. only outside combat) is the caller's decision.
pub fn regenerate(actor: &mut Actor, log: &mut dyn MessageSink) -> bool {
    if !actor.alive {
        return false;
    }
    let Some(class) = actor.class else {
        return false;
    };
    let rates = class.regen_rates();

    let parts: Vec<String> = [
        (actor.resources.hp.restore(rates.hp), "HP"),
        (actor.resources.mana.restore(rates.mana), "mana"),
        (actor.resources.stamina.restore(rates.stamina), "stamina"),
    ]
    .into_iter()
    .filter(|(gain, _)| *gain > 0)
    .map(|(gain, label)| format!("{gain} {label}"))
    .collect();

    if !parts.is_empty() {
        log.push(
            format!("You regenerate {}.", parts.join(", ")),
            MessageCategory::Info,
        );
    }
    true
}

impl GameEngine<'_> {
    /// Resolves a death caused by `killer`.
    ///
    /// Callers invoke this only on the alive-to-dead edge, so each death is
    /// rewarded once. A player killer banks the victim's experience.
    pub fn on_kill(&mut self, killer: EntityId, victim: EntityId) {
        let Some(slain) = self.state.actor(victim) else {
            return;
        };
        let name = slain.name.clone();
        let xp_value = slain.xp_value;
        let (floor, position) = (slain.floor, slain.position);
        let boss = slain.tags.contains(ActorTags::BOSS);

        self.say(format!("{name} is slain!"), MessageCategory::Combat);
        self.emit(GameEvent::ActorSlain {
            victim,
            killer: Some(killer),
        });

        let config = self.config;
        let mut levels = None;
        if let Some(hero) = self
            .state
            .actor_mut(killer)
            .filter(|actor| actor.kind == ActorKind::Player)
        {
            if xp_value > 0 {
                hero.xp += xp_value;
                self.log
                    .push(format!("+{xp_value} XP"), MessageCategory::System);
                let gained = check_level_up(hero, &config.progression, &mut *self.log);
                levels = Some((hero.level, gained));
            }
        }
        if let Some((level, gained)) = levels {
            self.emit_level_ups(killer, level, gained);
        }

        self.emit(GameEvent::LootDropped {
            victim,
            floor,
            position,
            boss,
        });
    }

    /// Applies pending level-ups to `id`, recording one event per level.
    pub fn check_level_up(&mut self, id: EntityId) -> u32 {
        let config = self.config;
        let Some(actor) = self.state.actor_mut(id) else {
            return 0;
        };
        let gained = check_level_up(actor, &config.progression, &mut *self.log);
        let level = actor.level;
        self.emit_level_ups(id, level, gained);
        gained
    }

    fn emit_level_ups(&mut self, actor: EntityId, level: u32, gained: u32) {
        for reached in (level + 1 - gained)..=level {
            self.emit(GameEvent::LevelUp {
                actor,
                level: reached,
            });
        }
    }

    /// Class regeneration for `id`; see [`regenerate`].
    pub fn regenerate(&mut self, id: EntityId) -> bool {
        match self.state.actor_mut(id) {
            Some(actor) => regenerate(actor, &mut *self.log),
            None => false,
        }
    }
}
