// =============================================================================
// RESOLVER.RS: Axis-separated box vs. tile-grid collision
//
// A moving box proposes a displacement in `CollisionMapInfo::move_amount`.
// `resolve` runs four checks in a fixed order (ceiling, floor, right, left),
// each of which may shrink one component of that displacement so the box stops
// `clearance` short of the blocking tile's face. Later checks see the clipped
// result of earlier ones.
//
// Hits are found by sampling the two leading corners at the proposed position
// and looking up their tiles. The vertical checks also require the tile's
// approach-side neighbour to be open (the exposed-face rule), which keeps
// stacked blocks from catching the box on internal seams. Horizontal checks
// have no such filter.
// =============================================================================

use glam::{Vec2, Vec3};

use crate::map::{GridMap, TileIndex, TileType};

/// Per-check contact record. Built fresh every frame by the mover.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CollisionMapInfo {
    /// Requested displacement on entry, allowed displacement on exit.
    pub move_amount: Vec3,
    pub hit_ceiling: bool,
    pub hit_landing: bool,
    pub hit_wall: bool,
    /// +1 for a wall on the right, -1 on the left, 0 when untouched.
    pub wall_direction: i32,
}

impl CollisionMapInfo {
    pub fn new(move_amount: Vec3) -> Self {
        Self { move_amount, ..Self::default() }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Corner {
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
}

/// World position of one corner of a box centered on `center`.
pub fn corner_position(center: Vec3, half_extents: Vec2, corner: Corner) -> Vec3 {
    let offset = match corner {
        Corner::LeftTop => Vec3::new(-half_extents.x, half_extents.y, 0.0),
        Corner::RightTop => Vec3::new(half_extents.x, half_extents.y, 0.0),
        Corner::LeftBottom => Vec3::new(-half_extents.x, -half_extents.y, 0.0),
        Corner::RightBottom => Vec3::new(half_extents.x, -half_extents.y, 0.0),
    };
    center + offset
}

/// Clip `info.move_amount` for a box at `position` against `map`.
///
/// Flags are only ever set, never cleared, so callers pass a fresh record.
pub fn resolve(
    map: &GridMap,
    position: Vec3,
    half_extents: Vec2,
    info: &mut CollisionMapInfo,
    clearance: f32,
) {
    resolve_ceiling(map, position, half_extents, info, clearance);
    resolve_floor(map, position, half_extents, info, clearance);
    resolve_right(map, position, half_extents, info, clearance);
    resolve_left(map, position, half_extents, info, clearance);
}

fn is_block(map: &GridMap, index: TileIndex) -> bool {
    map.tile_at_index(index) == TileType::Block
}

/// Block whose neighbour `row_step` rows away is open.
fn is_exposed_block(map: &GridMap, index: TileIndex, row_step: i32) -> bool {
    is_block(map, index)
        && map.tile_at(index.col, index.row.saturating_add(row_step)) != TileType::Block
}

fn resolve_ceiling(
    map: &GridMap,
    position: Vec3,
    half: Vec2,
    info: &mut CollisionMapInfo,
    clearance: f32,
) {
    if info.move_amount.y <= 0.0 {
        return;
    }
    let proposed = position + info.move_amount;
    // Storage row + 1 is the tile below in world space.
    let hit = [Corner::LeftTop, Corner::RightTop].into_iter().any(|c| {
        is_exposed_block(map, map.index_of(corner_position(proposed, half, c)), 1)
    });
    if !hit {
        return;
    }

    let rect = map.rect_of_index(map.index_of(proposed + Vec3::new(0.0, half.y, 0.0)));
    if position.y + half.y >= rect.bottom {
        return;
    }
    let allowed = (rect.bottom - position.y - (half.y + clearance)).max(0.0);
    if allowed < info.move_amount.y {
        info.move_amount.y = allowed;
        info.hit_ceiling = true;
    }
}

fn resolve_floor(
    map: &GridMap,
    position: Vec3,
    half: Vec2,
    info: &mut CollisionMapInfo,
    clearance: f32,
) {
    if info.move_amount.y >= 0.0 {
        return;
    }
    let proposed = position + info.move_amount;
    let hit = [Corner::LeftBottom, Corner::RightBottom].into_iter().any(|c| {
        is_exposed_block(map, map.index_of(corner_position(proposed, half, c)), -1)
    });
    if !hit {
        return;
    }

    let rect = map.rect_of_index(map.index_of(proposed - Vec3::new(0.0, half.y, 0.0)));
    if position.y - half.y <= rect.top {
        return;
    }
    let allowed = (rect.top - position.y + half.y + clearance).min(0.0);
    if allowed > info.move_amount.y {
        info.move_amount.y = allowed;
        info.hit_landing = true;
    }
}

fn resolve_right(
    map: &GridMap,
    position: Vec3,
    half: Vec2,
    info: &mut CollisionMapInfo,
    clearance: f32,
) {
    if info.move_amount.x <= 0.0 {
        return;
    }
    let proposed = position + info.move_amount;
    let hit = [Corner::RightTop, Corner::RightBottom]
        .into_iter()
        .any(|c| is_block(map, map.index_of(corner_position(proposed, half, c))));
    if !hit {
        return;
    }

    let rect = map.rect_of_index(map.index_of(proposed + Vec3::new(half.x, 0.0, 0.0)));
    if position.x + half.x >= rect.left {
        return;
    }
    let allowed = (rect.left - position.x - (half.x + clearance)).max(0.0);
    if allowed < info.move_amount.x {
        info.move_amount.x = allowed;
        info.hit_wall = true;
        info.wall_direction = 1;
    }
}

fn resolve_left(
    map: &GridMap,
    position: Vec3,
    half: Vec2,
    info: &mut CollisionMapInfo,
    clearance: f32,
) {
    if info.move_amount.x >= 0.0 {
        return;
    }
    let proposed = position + info.move_amount;
    let hit = [Corner::LeftTop, Corner::LeftBottom]
        .into_iter()
        .any(|c| is_block(map, map.index_of(corner_position(proposed, half, c))));
    if !hit {
        return;
    }

    let rect = map.rect_of_index(map.index_of(proposed - Vec3::new(half.x, 0.0, 0.0)));
    if position.x - half.x <= rect.right {
        return;
    }
    let allowed = (rect.right - position.x + half.x + clearance).min(0.0);
    if allowed > info.move_amount.x {
        info.move_amount.x = allowed;
        info.hit_wall = true;
        info.wall_direction = -1;
    }
}
