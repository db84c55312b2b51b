mod sea_map;
pub use sea_map::SeaMap;

mod tile;
pub use tile::{Position, Tile, TileKind};
