//! The brick grid for the current stage
//!
//! Tile values: 0 is empty, 1-7 is a breakable brick with that many hits
//! left, 8 is indestructible. Only breakable bricks count toward clearing a
//! level, so a stage built around indestructible walls can be unwinnable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::BallSize;
use super::collision::{Cell, Rect};
use super::level_data;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// 1-based level number; keeps growing past the authored set
    number: u32,
    width: usize,
    height: usize,
    /// Gap above the first tile row (pixels)
    margin: f32,
    /// Row-major tile values
    tiles: Vec<u8>,
}

impl Level {
    /// Load level `number`, wrapping over the authored stages.
    ///
    /// Level 0 has no stage and yields an empty board.
    pub fn load(number: u32) -> Self {
        let data = if number == 0 {
            None
        } else {
            level_data::layout((number - 1) % LEVEL_COUNT + 1)
        };
        if data.is_none() {
            log::warn!("No stage data for level {}, using an empty board", number);
        }
        Self::from_layout(number, BOARD_WIDTH, BOARD_HEIGHT, data.unwrap_or(&[]))
    }

    /// Build a board from a flat row-major byte run, zero-padding missing cells
    pub fn from_layout(number: u32, width: usize, height: usize, data: &[u8]) -> Self {
        let mut tiles = vec![TILE_EMPTY; width * height];
        for (tile, &value) in tiles.iter_mut().zip(data) {
            *tile = value;
        }
        Self {
            number,
            width,
            height,
            margin: BOARD_MARGIN,
            tiles,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Launch speed for balls on this level; rises every full cycle of stages
    pub fn ball_speed(&self) -> f32 {
        BALL_BASE_SPEED + BALL_SPEED_STEP * self.cycle() as f32
    }

    /// Ball size for this level: normal, then small, then large, one full
    /// cycle of stages each
    pub fn ball_size(&self) -> BallSize {
        match self.cycle() % 3 {
            0 => BallSize::Normal,
            1 => BallSize::Small,
            _ => BallSize::Large,
        }
    }

    fn cycle(&self) -> u32 {
        self.number.saturating_sub(1) / LEVEL_COUNT
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    fn cell_index(&self, cell: Cell) -> Option<usize> {
        if cell.row < 0 || cell.col < 0 {
            return None;
        }
        self.index(cell.row as usize, cell.col as usize)
    }

    /// Tile value at a grid position; off-board positions read as empty
    pub fn get_tile(&self, row: usize, col: usize) -> u8 {
        self.index(row, col).map_or(TILE_EMPTY, |i| self.tiles[i])
    }

    pub fn tile_at(&self, cell: Cell) -> u8 {
        self.cell_index(cell).map_or(TILE_EMPTY, |i| self.tiles[i])
    }

    /// Damage the tile at a grid position, returning the points earned.
    ///
    /// Every hit on a breakable brick scores the same, whatever its remaining
    /// strength. Empty and indestructible tiles are left alone and score 0.
    pub fn hit_tile(&mut self, row: usize, col: usize) -> u32 {
        match self.index(row, col) {
            Some(i) => Self::hit(&mut self.tiles[i]),
            None => 0,
        }
    }

    pub fn hit_cell(&mut self, cell: Cell) -> u32 {
        match self.cell_index(cell) {
            Some(i) => Self::hit(&mut self.tiles[i]),
            None => 0,
        }
    }

    fn hit(tile: &mut u8) -> u32 {
        if *tile == TILE_EMPTY || *tile >= TILE_INDESTRUCTIBLE {
            return 0;
        }
        *tile -= 1;
        BRICK_POINTS
    }

    /// Bricks still standing that can be broken
    pub fn remaining_breakable_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|&&t| t != TILE_EMPTY && t < TILE_INDESTRUCTIBLE)
            .count()
    }

    /// Screen rectangle covered by a tile
    pub fn tile_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            TILE_WIDTH * col as f32,
            TILE_HEIGHT * row as f32 + self.margin,
            TILE_WIDTH,
            TILE_HEIGHT,
        )
    }

    pub fn cell_rect(&self, cell: Cell) -> Rect {
        Rect::new(
            TILE_WIDTH * cell.col as f32,
            TILE_HEIGHT * cell.row as f32 + self.margin,
            TILE_WIDTH,
            TILE_HEIGHT,
        )
    }

    /// Grid cell under a screen point (may be off the board)
    pub fn screen_to_cell(&self, point: Vec2) -> Cell {
        Cell::new(
            ((point.y - self.margin) / TILE_HEIGHT).floor() as i32,
            (point.x / TILE_WIDTH).floor() as i32,
        )
    }

    /// Non-empty tiles with their grid positions, row-major
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t != TILE_EMPTY)
            .map(|(i, &t)| (i / self.width, i % self.width, t))
    }
}
