use itertools::iproduct;
use log::debug;
use rand::Rng;

use crate::error::GameError;
use crate::map::tile::{Position, Tile, TileKind};

/// 左、右、上、下の順。斜めは含まない。
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 霧に覆われた海図。タイルは行優先 (`y * size + x`) で保持する。
#[derive(Debug, Clone)]
pub struct SeaMap {
    size: usize,
    tiles: Vec<Tile>,
}

impl SeaMap {
    /// 各タイルの種類を [`TileKind::ALL`] から一様に選ぶ。
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let tiles = iproduct!(0..size, 0..size)
            .map(|(y, x)| {
                let kind = TileKind::ALL[rng.random_range(0..TileKind::ALL.len())];
                Tile::new(Position::new(x, y), kind)
            })
            .collect();
        Self { size, tiles }
    }

    /// 行優先の固定レイアウトから海図を作る。
    pub fn from_layout(size: usize, kinds: &[TileKind]) -> Result<Self, GameError> {
        let expected = size.checked_mul(size);
        if expected != Some(kinds.len()) {
            // 桁あふれする一辺は usize::MAX 個必要として報告する
            return Err(GameError::InvalidLayout {
                expected: expected.unwrap_or(usize::MAX),
                actual: kinds.len(),
            });
        }
        let tiles = iproduct!(0..size, 0..size)
            .zip(kinds.iter())
            .map(|((y, x), kind)| Tile::new(Position::new(x, y), *kind))
            .collect();
        Ok(Self { size, tiles })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.y * self.size + pos.x)
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).and_then(|i| self.tiles.get(i))
    }

    fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).and_then(move |i| self.tiles.get_mut(i))
    }

    /// 盤面内の上下左右の隣接座標。
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .filter_map(|(dx, dy)| {
                let x = pos.x.checked_add_signed(*dx)?;
                let y = pos.y.checked_add_signed(*dy)?;
                let neighbor = Position::new(x, y);
                self.contains(neighbor).then_some(neighbor)
            })
            .collect()
    }

    /// 霧を晴らす。既に公開済みなら何もしない。変化があれば true を返す。
    pub fn reveal(&mut self, pos: Position) -> bool {
        self.tile_mut(pos).is_some_and(|t| t.reveal())
    }

    pub fn reveal_neighbors(&mut self, pos: Position) {
        let revealed = self
            .neighbors(pos)
            .into_iter()
            .filter(|n| self.reveal(*n))
            .count();
        debug!("Revealed {revealed} tiles around {pos}");
    }

    /// 移動可能判定: タイル自身か、上下左右のいずれかが公開済み。
    pub fn is_reachable(&self, pos: Position) -> bool {
        let Some(tile) = self.tile(pos) else {
            return false;
        };
        tile.is_revealed()
            || self
                .neighbors(pos)
                .iter()
                .filter_map(|n| self.tile(*n))
                .any(|t| t.is_revealed())
    }

    pub fn mark_used(&mut self, pos: Position) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.mark_used();
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_revealed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn open_sea(size: usize) -> SeaMap {
        SeaMap::from_layout(size, &vec![TileKind::OpenSea; size * size]).unwrap()
    }

    #[test]
    fn test_generate_fills_grid_hidden() {
        let mut rng = StdRng::seed_from_u64(11);
        let map = SeaMap::generate(5, &mut rng);
        assert_eq!(map.tiles().len(), 25);
        assert_eq!(map.revealed_count(), 0);
        assert!(map.tiles().iter().all(|t| !t.is_used()));
        assert_eq!(map.tile(Position::new(3, 1)).unwrap().position(), Position::new(3, 1));
    }

    #[test]
    fn test_from_layout_rejects_wrong_length() {
        let err = SeaMap::from_layout(5, &[TileKind::Island; 24]).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidLayout {
                expected: 25,
                actual: 24
            }
        );
    }

    #[test]
    fn test_from_layout_rejects_overflowing_size() {
        let err = SeaMap::from_layout(usize::MAX, &[]).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidLayout {
                expected: usize::MAX,
                actual: 0
            }
        );
    }

    #[test]
    fn test_from_layout_is_row_major() {
        let mut kinds = vec![TileKind::OpenSea; 25];
        kinds[2 * 5 + 4] = TileKind::Skull;
        let map = SeaMap::from_layout(5, &kinds).unwrap();
        assert_eq!(map.tile(Position::new(4, 2)).unwrap().kind(), TileKind::Skull);
    }

    #[test]
    fn test_neighbors_order_and_bounds() {
        let map = open_sea(5);
        assert_eq!(
            map.neighbors(Position::new(2, 2)),
            vec![
                Position::new(1, 2),
                Position::new(3, 2),
                Position::new(2, 1),
                Position::new(2, 3)
            ]
        );
        assert_eq!(
            map.neighbors(Position::new(0, 0)),
            vec![Position::new(1, 0), Position::new(0, 1)]
        );
        assert_eq!(map.neighbors(Position::new(4, 4)).len(), 2);
        assert_eq!(map.neighbors(Position::new(0, 3)).len(), 3);
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut map = open_sea(5);
        assert!(map.reveal(Position::new(1, 1)));
        assert!(!map.reveal(Position::new(1, 1)));
        assert!(!map.reveal(Position::new(9, 9)));
        assert_eq!(map.revealed_count(), 1);
    }

    #[test]
    fn test_reachability() {
        let mut map = open_sea(5);
        map.reveal(Position::new(2, 2));
        assert!(map.is_reachable(Position::new(2, 2)));
        assert!(map.is_reachable(Position::new(2, 3)));
        assert!(!map.is_reachable(Position::new(3, 3)));
        assert!(!map.is_reachable(Position::new(5, 2)));

        map.reveal_neighbors(Position::new(2, 2));
        assert_eq!(map.revealed_count(), 5);
        assert!(map.is_reachable(Position::new(3, 3)));
        assert!(!map.is_reachable(Position::new(0, 0)));
    }

    #[test]
    fn test_mark_used() {
        let mut map = open_sea(3);
        map.mark_used(Position::new(0, 2));
        assert!(map.tile(Position::new(0, 2)).unwrap().is_used());
        assert!(!map.tile(Position::new(0, 2)).unwrap().is_revealed());
    }
}
