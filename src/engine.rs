use std::fmt;

use rand::Rng;

pub const HEAL_MP: i32 = 8;
pub const LIGHT_MP: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Attack,
    Heal,
    Light,
}

impl Action {
    /// Fixed ordering used to index the Q-table. Spells are dropped from the tail.
    pub const ALL: [Action; 3] = [Action::Attack, Action::Heal, Action::Light];

    pub fn index(self) -> usize {
        match self {
            Action::Attack => 0,
            Action::Heal => 1,
            Action::Light => 2,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Attack => "attack",
            Action::Heal => "heal",
            Action::Light => "light",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub atk: i32,
    pub def: i32,
    pub agt: i32,
    /// Multiplier on light damage taken, 1.0 is normal.
    pub light_res: f64,
}

impl Character {
    pub const fn new(
        max_hp: i32,
        max_mp: i32,
        atk: i32,
        def: i32,
        agt: i32,
        light_res: f64,
    ) -> Self {
        Character {
            hp: max_hp,
            max_hp,
            mp: max_mp,
            max_mp,
            atk,
            def,
            agt,
            light_res,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    pub fn restore(&mut self) {
        self.hp = self.max_hp;
        self.mp = self.max_mp;
    }

    fn take_damage(&mut self, damage: i32) {
        self.hp = (self.hp - damage).max(0);
    }

    fn spend_mp(&mut self, cost: i32) {
        debug_assert!(self.mp >= cost, "spell cast without enough mp");
        self.mp = (self.mp - cost).max(0);
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP {:>3}/{:<3} MP {:>3}/{:<3}",
            self.hp, self.max_hp, self.mp, self.max_mp
        )
    }
}

pub const PLAYER_STATS: Character = Character::new(138, 123, 125, 69, 82, 0.75);
pub const ENEMY_STATS: Character = Character::new(240, 40, 107, 110, 55, 1.0);

/// Damage roll for a physical attack given the base damage.
fn roll_physical<R: Rng + ?Sized>(base: i32, rng: &mut R) -> i32 {
    if base < 2 {
        rng.gen_range(0..2)
    } else if base < 9 {
        base - rng.gen_range(0..3)
    } else {
        let spread = f64::from(rng.gen_range(0..256_i32)) / 256.0;
        (f64::from(base * 7) / 8.0 + (f64::from(base) / 4.0 + 1.0) * spread).floor() as i32
    }
}

pub fn physical_attack<R: Rng + ?Sized>(
    attacker: &Character,
    defender: &mut Character,
    rng: &mut R,
) {
    let base = attacker.atk / 2 - defender.def / 4;
    let damage = roll_physical(base, rng);
    defender.take_damage(damage);
}

pub fn heal<R: Rng + ?Sized>(caster: &mut Character, rng: &mut R) {
    caster.spend_mp(HEAL_MP);
    caster.hp = (caster.hp + 85 + rng.gen_range(0..16)).min(caster.max_hp);
}

pub fn light_spell<R: Rng + ?Sized>(caster: &mut Character, target: &mut Character, rng: &mut R) {
    caster.spend_mp(LIGHT_MP);
    let damage = (f64::from(50 + rng.gen_range(0..16_i32)) * target.light_res).floor() as i32;
    target.take_damage(damage);
}

/// Applies `action` from `actor` against `target`.
pub fn perform<R: Rng + ?Sized>(
    action: Action,
    actor: &mut Character,
    target: &mut Character,
    rng: &mut R,
) {
    match action {
        Action::Attack => physical_attack(actor, target, rng),
        Action::Heal => heal(actor, rng),
        Action::Light => light_spell(actor, target, rng),
    }
}

pub fn reset_battle(a: &mut Character, b: &mut Character) {
    a.restore();
    b.restore();
}
