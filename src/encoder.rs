use crate::engine::Character;

pub const BUCKETS: usize = 10;
pub const STATE_COUNT: usize = BUCKETS * BUCKETS;

/// Health bucket in `0..10`, each bucket a tenth of max hp. Full health lands in 9.
pub fn quantify(c: &Character) -> usize {
    let buckets = BUCKETS as i32;
    (0..buckets)
        .find(|&i| c.max_hp * i / buckets <= c.hp && c.hp < c.max_hp * (i + 1) / buckets)
        .map_or(BUCKETS - 1, |i| i as usize)
}

/// Joint state index in `0..100`: player bucket is the tens digit.
pub fn encode_state(p1: &Character, p2: &Character) -> usize {
    quantify(p1) * BUCKETS + quantify(p2)
}
