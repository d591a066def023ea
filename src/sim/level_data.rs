//! Authored stage layouts
//!
//! Each layout is a row-major run of tile values, `BOARD_WIDTH` per row.
//! Layouts may be shorter than the board; missing cells are empty.

/// Stage 1: plain rows, single hit
const LEVEL_01: &[u8] = &[
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
];

/// Stage 2: toughened centre
const LEVEL_02: &[u8] = &[
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    1, 2, 2, 2, 2, 2, 2, 2, 2, 1, //
    1, 2, 3, 3, 3, 3, 3, 3, 2, 1, //
    1, 2, 2, 2, 2, 2, 2, 2, 2, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
];

/// Stage 3: pillars with indestructible caps
const LEVEL_03: &[u8] = &[
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    8, 0, 8, 0, 8, 8, 0, 8, 0, 8, //
    2, 0, 2, 0, 3, 3, 0, 2, 0, 2, //
    2, 0, 2, 0, 3, 3, 0, 2, 0, 2, //
    2, 0, 2, 0, 3, 3, 0, 2, 0, 2, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
];

/// Stage 4: diamond
const LEVEL_04: &[u8] = &[
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 5, 5, 0, 0, 0, 0, //
    0, 0, 0, 4, 4, 4, 4, 0, 0, 0, //
    0, 0, 3, 3, 3, 3, 3, 3, 0, 0, //
    0, 2, 2, 2, 6, 6, 2, 2, 2, 0, //
    0, 0, 3, 3, 3, 3, 3, 3, 0, 0, //
    0, 0, 0, 4, 4, 4, 4, 0, 0, 0, //
    0, 0, 0, 0, 5, 5, 0, 0, 0, 0, //
];

/// Stage 5: fortress
const LEVEL_05: &[u8] = &[
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    7, 6, 5, 4, 3, 3, 4, 5, 6, 7, //
    8, 2, 2, 2, 2, 2, 2, 2, 2, 8, //
    8, 1, 3, 3, 3, 3, 3, 3, 1, 8, //
    8, 1, 3, 8, 1, 1, 8, 3, 1, 8, //
    8, 1, 3, 3, 3, 3, 3, 3, 1, 8, //
    0, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
];

/// Layout for an authored stage index (1-based); `None` when unmapped
pub fn layout(index: u32) -> Option<&'static [u8]> {
    match index {
        1 => Some(LEVEL_01),
        2 => Some(LEVEL_02),
        3 => Some(LEVEL_03),
        4 => Some(LEVEL_04),
        5 => Some(LEVEL_05),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH, LEVEL_COUNT, TILE_INDESTRUCTIBLE};

    #[test]
    fn test_every_stage_is_mapped_and_fits() {
        for index in 1..=LEVEL_COUNT {
            let data = layout(index).expect("authored stage");
            assert_eq!(data.len() % BOARD_WIDTH, 0);
            assert!(data.len() <= BOARD_WIDTH * BOARD_HEIGHT);
            assert!(data.iter().all(|&t| t <= TILE_INDESTRUCTIBLE));
            assert!(data.iter().any(|&t| (1..TILE_INDESTRUCTIBLE).contains(&t)));
        }
        assert!(layout(0).is_none());
        assert!(layout(LEVEL_COUNT + 1).is_none());
    }
}
