use rand::Rng;

use crate::engine::{Action, Character};

pub trait Player {
    fn choose_action<R: Rng + ?Sized>(
        &self,
        me: &Character,
        foe: &Character,
        rng: &mut R,
    ) -> Action;
}
