use serde::{Deserialize, Serialize};

/// 盤面上の座標。左上が原点。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// タイルの種類。踏むまで中身は見えない。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TileKind {
    OpenSea,
    Island,
    Skull,
    Treasure,
}

impl TileKind {
    pub const ALL: [TileKind; 4] = [
        TileKind::OpenSea,
        TileKind::Island,
        TileKind::Skull,
        TileKind::Treasure,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            TileKind::OpenSea => "🌊",
            TileKind::Island => "🏝️",
            TileKind::Skull => "💀",
            TileKind::Treasure => "💰",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    position: Position,
    kind: TileKind,
    revealed: bool,
    used: bool,
}

impl Tile {
    pub fn new(position: Position, kind: TileKind) -> Self {
        Self {
            position,
            kind,
            revealed: false,
            used: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }
    pub fn kind(&self) -> TileKind {
        self.kind
    }
    /// 霧が晴れて選択可能な状態かどうか。
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
    /// プレイヤーが一度踏んだかどうか。踏んだタイルのみ中身を表示する。
    pub fn is_used(&self) -> bool {
        self.used
    }

    pub(super) fn reveal(&mut self) -> bool {
        let changed = !self.revealed;
        self.revealed = true;
        changed
    }

    pub(super) fn mark_used(&mut self) {
        self.used = true;
    }
}
