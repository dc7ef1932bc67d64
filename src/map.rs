// =============================================================================
// MAP.RS: Static tile grid
//
// The map is a fixed columns × rows grid of unit tiles. Storage row 0 is the
// first CSV line and sits at the *top* of the world, so world Y grows as the
// row index shrinks:
//
//   row 0        → y = rows - 1
//   row rows - 1 → y = 0
//
// Any index outside the grid reads as `Blank`, which lets collision code probe
// freely past the map edges.
// =============================================================================

use std::path::{Path, PathBuf};

use glam::Vec3;
use tracing::{info, warn};

use crate::error::MapError;

pub const TILE_WIDTH: f32 = 1.0;
pub const TILE_HEIGHT: f32 = 1.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileType {
    #[default]
    Blank,
    Block,
    Goal,
}

impl TileType {
    /// Map a CSV token to a tile. Unknown tokens return `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "0" => Some(TileType::Blank),
            "1" => Some(TileType::Block),
            "2" => Some(TileType::Goal),
            _ => None,
        }
    }
}

/// Grid dimensions in tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MapSize {
    pub columns: u32,
    pub rows: u32,
}

impl MapSize {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }
}

impl Default for MapSize {
    /// The stage layout: 100 tiles wide, 20 tall.
    fn default() -> Self {
        Self { columns: 100, rows: 20 }
    }
}

/// Signed so that probes left of or below the map stay representable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileIndex {
    pub col: i32,
    pub row: i32,
}

impl TileIndex {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// World-space extent of one tile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileRect {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

#[derive(Clone, Debug)]
pub struct GridMap {
    size: MapSize,
    /// Row-major, `rows * columns` entries.
    tiles: Vec<TileType>,
}

impl GridMap {
    /// An all-blank map.
    pub fn blank(size: MapSize) -> Result<Self, MapError> {
        if size.columns == 0 || size.rows == 0 {
            return Err(MapError::EmptySize { columns: size.columns, rows: size.rows });
        }
        Ok(Self {
            size,
            tiles: vec![TileType::Blank; size.columns as usize * size.rows as usize],
        })
    }

    /// Parse comma-separated tile tokens into a map of the given size.
    ///
    /// Lines beyond `size.rows` and tokens beyond `size.columns` are ignored;
    /// missing lines or cells stay `Blank`. Unrecognized tokens become `Blank`
    /// and are reported once as a warning.
    pub fn parse(text: &str, size: MapSize) -> Result<Self, MapError> {
        let mut map = Self::blank(size)?;
        let mut unknown = 0usize;

        for (row, line) in text.lines().take(size.rows as usize).enumerate() {
            for (col, token) in line.split(',').take(size.columns as usize).enumerate() {
                match TileType::from_token(token) {
                    Some(tile) => map.tiles[row * size.columns as usize + col] = tile,
                    None => unknown += 1,
                }
            }
        }

        if unknown > 0 {
            warn!(unknown, "map contains unrecognized tokens; treated as blank");
        }
        Ok(map)
    }

    /// Read and parse a CSV map file.
    pub fn load<P: AsRef<Path>>(path: P, size: MapSize) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| MapError::Io { path: path.to_path_buf(), source })?;
        let map = Self::parse(&text, size)?;
        info!(
            path = %path.display(),
            columns = size.columns,
            rows = size.rows,
            blocks = map.tiles_of(TileType::Block).count(),
            "map loaded"
        );
        Ok(map)
    }

    pub fn size(&self) -> MapSize {
        self.size
    }

    pub fn columns(&self) -> u32 {
        self.size.columns
    }

    pub fn rows(&self) -> u32 {
        self.size.rows
    }

    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as u32) < self.size.columns && (row as u32) < self.size.rows
    }

    /// Tile at `(col, row)`; `Blank` outside the grid.
    pub fn tile_at(&self, col: i32, row: i32) -> TileType {
        if !self.in_bounds(col, row) {
            return TileType::Blank;
        }
        self.tiles[row as usize * self.size.columns as usize + col as usize]
    }

    pub fn tile_at_index(&self, index: TileIndex) -> TileType {
        self.tile_at(index.col, index.row)
    }

    /// World-space center of a tile.
    pub fn world_position_of(&self, col: i32, row: i32) -> Vec3 {
        Vec3::new(
            TILE_WIDTH * col as f32,
            TILE_HEIGHT * (self.size.rows as i32 - 1).saturating_sub(row) as f32,
            0.0,
        )
    }

    /// Tile containing a world position.
    ///
    /// Uses a truncating cast, not rounding: `(x + w/2) / w` is cut toward
    /// zero, and likewise for Y before the row flip.
    pub fn index_of(&self, position: Vec3) -> TileIndex {
        let col = ((position.x + TILE_WIDTH / 2.0) / TILE_WIDTH) as i32;
        let from_bottom = ((position.y + TILE_HEIGHT / 2.0) / TILE_HEIGHT) as i32;
        TileIndex { col, row: (self.size.rows as i32 - 1).saturating_sub(from_bottom) }
    }

    /// Exact tile bounds: center ± half a tile.
    pub fn rect_of(&self, col: i32, row: i32) -> TileRect {
        let center = self.world_position_of(col, row);
        TileRect {
            left: center.x - TILE_WIDTH / 2.0,
            right: center.x + TILE_WIDTH / 2.0,
            bottom: center.y - TILE_HEIGHT / 2.0,
            top: center.y + TILE_HEIGHT / 2.0,
        }
    }

    pub fn rect_of_index(&self, index: TileIndex) -> TileRect {
        self.rect_of(index.col, index.row)
    }

    /// All indices holding `kind`, row-major from the top-left.
    pub fn tiles_of(&self, kind: TileType) -> impl Iterator<Item = TileIndex> + '_ {
        let columns = self.size.columns as usize;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, t)| **t == kind)
            .map(move |(i, _)| TileIndex::new((i % columns) as i32, (i / columns) as i32))
    }

    /// First tile of `kind` in row-major order.
    pub fn find_first(&self, kind: TileType) -> Option<TileIndex> {
        self.tiles_of(kind).next()
    }
}

/// List every `.csv` file under `dir`, sorted by path.
pub fn discover_levels<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut levels: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("csv"))
        .collect();
    levels.sort();
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            GridMap::blank(MapSize::new(0, 4)),
            Err(MapError::EmptySize { columns: 0, rows: 4 })
        ));
    }

    #[test]
    fn token_table() {
        assert_eq!(TileType::from_token("0"), Some(TileType::Blank));
        assert_eq!(TileType::from_token("1"), Some(TileType::Block));
        assert_eq!(TileType::from_token("2"), Some(TileType::Goal));
        assert_eq!(TileType::from_token("1\r"), Some(TileType::Block));
        assert_eq!(TileType::from_token("x"), None);
        assert_eq!(TileType::from_token(""), None);
    }

    #[test]
    fn short_rows_stay_blank() {
        let map = GridMap::parse("1\n", MapSize::new(3, 2)).unwrap();
        assert_eq!(map.tile_at(0, 0), TileType::Block);
        assert_eq!(map.tile_at(1, 0), TileType::Blank);
        assert_eq!(map.tile_at(2, 1), TileType::Blank);
    }
}
