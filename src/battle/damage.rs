use rand::Rng;

/// 1 から攻撃力までの一様乱数。攻撃力 0 でも最低 1 ダメージ。
pub(super) fn roll_damage<R: Rng + ?Sized>(attack_power: u16, rng: &mut R) -> u16 {
    rng.random_range(1..=attack_power.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_roll_damage_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let rolls: Vec<u16> = (0..500).map(|_| roll_damage(20, &mut rng)).collect();
        assert!(rolls.iter().all(|d| (1..=20).contains(d)));
        assert!(rolls.contains(&1));
        assert!(rolls.contains(&20));
    }

    #[test]
    fn test_roll_damage_minimum_one() {
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(roll_damage(0, &mut rng), 1);
        assert_eq!(roll_damage(1, &mut rng), 1);
    }
}
