use rand::Rng;

use crate::engine::{Action, Character, HEAL_MP, LIGHT_MP};
use crate::players::player::Player;

/// Fixed opponent: sometimes heals when badly hurt, mostly casts light while it has mp,
/// otherwise attacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptedEnemy;

impl Player for ScriptedEnemy {
    fn choose_action<R: Rng + ?Sized>(
        &self,
        me: &Character,
        _foe: &Character,
        rng: &mut R,
    ) -> Action {
        if me.hp < me.max_hp / 4 && me.mp >= HEAL_MP && rng.gen_range(0..3) == 0 {
            return Action::Heal;
        }
        if me.mp >= LIGHT_MP && rng.gen_range(0..4) != 0 {
            return Action::Light;
        }
        Action::Attack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ENEMY_STATS, PLAYER_STATS};
    use rand::SeedableRng;
    use rand_xoshiro::SplitMix64;

    #[test]
    fn test_no_mp_always_attacks() {
        let mut rng = SplitMix64::seed_from_u64(21);
        let mut me = ENEMY_STATS;
        me.mp = 4;
        me.hp = 1;
        for _ in 0..200 {
            assert_eq!(ScriptedEnemy.choose_action(&me, &PLAYER_STATS, &mut rng), Action::Attack);
        }
    }

    #[test]
    fn test_healthy_never_heals() {
        let mut rng = SplitMix64::seed_from_u64(22);
        let me = ENEMY_STATS;
        let mut lights = 0;
        for _ in 0..2000 {
            match ScriptedEnemy.choose_action(&me, &PLAYER_STATS, &mut rng) {
                Action::Heal => panic!("healed at full health"),
                Action::Light => lights += 1,
                Action::Attack => {}
            }
        }
        // three in four
        assert!((1350..1650).contains(&lights), "{}", lights);
    }

    #[test]
    fn test_wounded_sometimes_heals() {
        let mut rng = SplitMix64::seed_from_u64(23);
        let mut me = ENEMY_STATS;
        me.hp = 59;
        let heals = (0..3000)
            .filter(|_| ScriptedEnemy.choose_action(&me, &PLAYER_STATS, &mut rng) == Action::Heal)
            .count();
        assert!((850..1150).contains(&heals), "{}", heals);

        // floor(240 / 4) = 60 is not below the threshold
        me.hp = 60;
        assert!((0..500)
            .all(|_| ScriptedEnemy.choose_action(&me, &PLAYER_STATS, &mut rng) != Action::Heal));
    }
}
