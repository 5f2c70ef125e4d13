//! Boss controller.
//!
//! Per turn, in strict precedence:
//! 1. enrage at a quarter health, then at most one summon wave, which ends
//!    the turn
//! 2. a telegraphed attack announced last turn lands
//! 3. below half health, a chance to announce the next heavy attack
//! 4. the regular action, taken twice once enraged

use crate::action::AbilityKind;
use crate::combat::has_line_of_sight;
use crate::engine::{GameEngine, GameEvent};
use crate::env::MessageCategory;
use crate::geometry::{in_bounds, neighbors};
use crate::state::{ENRAGE_THRESHOLD_PCT, EntityId, StatusKind, Telegraph, TelegraphKind};

impl GameEngine<'_> {
    pub(super) fn act_boss(&mut self, id: EntityId) {
        if self.advance_boss_phase(id) {
            return;
        }
        if self.resolve_telegraph(id) {
            return;
        }
        if self.begin_telegraph(id) {
            return;
        }

        self.boss_regular_action(id);

        let enraged = self
            .state
            .actor(id)
            .and_then(|boss| boss.boss)
            .is_some_and(|state| state.is_enraged());
        if enraged && self.engagement(id).is_some() {
            self.boss_regular_action(id);
        }
    }

    /// Fires the one-shot threshold triggers. Enrage is checked first and
    /// does not end the turn. At most one summon wave follows; entering it
    /// ends the turn, and a second pending wave waits for the next turn.
    fn advance_boss_phase(&mut self, id: EntityId) -> bool {
        self.try_enrage(id);

        let Some(boss) = self.state.actor(id) else {
            return false;
        };
        let Some(current) = boss.boss.map(|state| state.phase) else {
            return false;
        };
        let Some(next) = current.next() else {
            return false;
        };
        if !boss.hp_at_or_below(next.threshold_pct()) {
            return false;
        }

        if let Some(state) = self.state.actor_mut(id).and_then(|boss| boss.boss.as_mut()) {
            state.phase = next;
        }
        tracing::debug!(boss = %id, from = %current, to = %next, "boss phase change");
        self.emit(GameEvent::BossPhaseChanged {
            boss: id,
            from: current,
            to: next,
        });
        self.summon_minions(id);
        true
    }

    fn try_enrage(&mut self, id: EntityId) {
        let speed_bonus = self.config.boss.enrage_speed_bonus;
        let Some(boss) = self.state.actor_mut(id) else {
            return;
        };
        if !boss.hp_at_or_below(ENRAGE_THRESHOLD_PCT) {
            return;
        }
        let Some(state) = boss.boss.as_mut().filter(|state| !state.enraged) else {
            return;
        };
        state.enraged = true;
        boss.speed += speed_bonus;
        let name = boss.name.clone();

        tracing::debug!(boss = %id, "boss enraged");
        self.emit(GameEvent::BossEnraged { boss: id });
        self.say(format!("{name} flies into a rage!"), MessageCategory::Combat);
    }

    /// Spawns minions on free tiles around the boss, respecting the cap on
    /// living minions of the summoned template. Returns the new ids.
    pub fn summon_minions(&mut self, id: EntityId) -> Vec<EntityId> {
        let Some(boss) = self.state.actor(id) else {
            return Vec::new();
        };
        let (floor, origin) = (boss.floor, boss.position);
        let text = format!("{} roars and summons minions!", boss.name);
        self.say(text, MessageCategory::Combat);

        let config = self.config;
        let template = config.boss.summon_template.as_str();
        let active = self.state.count_living_from_template(floor, template) as u32;
        let allowed = config
            .boss
            .summons_per_trigger
            .min(config.boss.max_active_minions.saturating_sub(active));

        let env = self.env;
        let map = env.map();
        let mut minions = Vec::new();
        let mut failed = false;
        for cell in neighbors(origin) {
            if minions.len() as u32 >= allowed {
                break;
            }
            if !in_bounds(cell, map.dimensions())
                || !map.is_walkable(floor, cell)
                || self.state.is_occupied(floor, cell)
            {
                continue;
            }
            let minion_id = self.state.allocate_entity_id();
            match env.spawn_monster(template, minion_id, floor, cell) {
                Ok(minion) => {
                    minions.push(minion.id);
                    self.state.add_actor(minion);
                }
                Err(error) => {
                    tracing::warn!(boss = %id, %error, "boss cannot summon");
                    failed = true;
                    break;
                }
            }
        }
        if !failed && (minions.len() as u32) < allowed {
            tracing::warn!(
                boss = %id,
                summoned = minions.len(),
                allowed,
                "not enough room to summon"
            );
        }

        self.emit(GameEvent::MinionsSummoned {
            boss: id,
            minions: minions.clone(),
        });
        minions
    }

    /// Lands last turn's telegraphed attack, if any. Consumes the turn.
    fn resolve_telegraph(&mut self, id: EntityId) -> bool {
        let Some(telegraph) = self
            .state
            .actor_mut(id)
            .and_then(|boss| boss.boss.as_mut())
            .and_then(|state| state.telegraph.take())
        else {
            return false;
        };
        let Some(boss) = self.state.actor(id) else {
            return true;
        };
        let (name, floor) = (boss.name.clone(), boss.floor);
        let config = self.config;

        match telegraph.kind {
            TelegraphKind::Crush => {
                let in_reach = self
                    .engagement(id)
                    .is_some_and(|engagement| engagement.distance <= 1);
                if in_reach {
                    let raw = self.roll_damage(id, EntityId::PLAYER)
                        * config.boss.crush_multiplier_pct
                        / 100;
                    self.strike(id, EntityId::PLAYER, raw, true, |a, d, n| {
                        format!("{a} brings down a crushing blow on {d} for {n} damage!")
                    });
                } else {
                    self.say(
                        format!("{name}'s crushing blow hits only stone."),
                        MessageCategory::Combat,
                    );
                }
            }
            TelegraphKind::Breath => {
                let hits = self.aoe_attack(
                    id,
                    telegraph.target,
                    floor,
                    config.boss.breath_radius,
                    config.boss.breath_multiplier_pct,
                );
                self.say(
                    format!("{name} unleashes a torrent of flame! {hits} targets hit."),
                    MessageCategory::Combat,
                );
            }
        }
        true
    }

    /// Below half health, may announce a heavy attack for next turn: a crush
    /// when adjacent, otherwise a breath at the player's cell if in range
    /// and sight. Consumes the turn when one is announced.
    fn begin_telegraph(&mut self, id: EntityId) -> bool {
        let Some(boss) = self.state.actor(id) else {
            return false;
        };
        if !boss.hp_below(50) {
            return false;
        }
        let name = boss.name.clone();
        let config = self.config;
        if !self.rng.percent(config.boss.telegraph_chance) {
            return false;
        }
        let Some(engagement) = self.engagement(id) else {
            return false;
        };

        let (telegraph, warning) = if engagement.distance <= 1 {
            (
                Telegraph {
                    kind: TelegraphKind::Crush,
                    target: engagement.player,
                },
                format!("{name} raises its claws high!"),
            )
        } else if engagement.distance <= config.boss.breath_range
            && has_line_of_sight(
                self.env.map(),
                engagement.floor,
                engagement.origin,
                engagement.player,
            )
        {
            (
                Telegraph {
                    kind: TelegraphKind::Breath,
                    target: engagement.player,
                },
                format!("{name} draws a deep breath..."),
            )
        } else {
            return false;
        };

        if let Some(state) = self.state.actor_mut(id).and_then(|boss| boss.boss.as_mut()) {
            state.telegraph = Some(telegraph);
        }
        tracing::debug!(boss = %id, kind = ?telegraph.kind, target = %telegraph.target, "telegraph");
        self.say(warning, MessageCategory::Combat);
        true
    }

    /// Buff, nuke at medium range, power strike or melee when adjacent,
    /// otherwise close in.
    fn boss_regular_action(&mut self, id: EntityId) {
        let Some(engagement) = self.engagement(id) else {
            return;
        };
        let Some(boss) = self.state.actor(id) else {
            return;
        };
        let config = self.config;
        let ready = |kind: AbilityKind| boss.knows(kind) && boss.can_afford(kind.costs());

        let war_cry = !boss.status_effects.has(StatusKind::Buffed) && ready(AbilityKind::WarCry);
        let fireball = (config.boss.nuke_min_distance..=config.boss.nuke_max_distance)
            .contains(&engagement.distance)
            && ready(AbilityKind::Fireball);
        let power_strike = ready(AbilityKind::PowerStrike);

        if war_cry && self.use_ability(AbilityKind::WarCry, id, id).is_ok() {
            return;
        }

        if fireball
            && has_line_of_sight(
                self.env.map(),
                engagement.floor,
                engagement.origin,
                engagement.player,
            )
            && self
                .use_ability(AbilityKind::Fireball, id, EntityId::PLAYER)
                .is_ok()
        {
            return;
        }

        if engagement.distance <= 1 {
            if power_strike
                && self.rng.percent(config.boss.power_strike_chance)
                && self
                    .use_ability(AbilityKind::PowerStrike, id, EntityId::PLAYER)
                    .is_ok()
            {
                return;
            }
            self.melee_player(id);
            return;
        }

        self.move_toward(id, engagement.player);
    }
}
