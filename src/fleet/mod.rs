mod enemy_type;
pub use enemy_type::{create_random_enemy, EnemyType, SpecialAbility, ENEMY_TYPES};

mod ship;
pub use ship::{HitOutcome, Ship, MAX_EVASION};
