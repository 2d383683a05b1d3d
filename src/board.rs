use rand::thread_rng;
use rand::Rng;
use std::fmt;
use itertools::iproduct;

/// Cells per side of the square grid.
pub const BOARD_SIZE: usize = 8;

/// Mines placed for every game.
pub const MINE_COUNT: usize = 10;

/// One of the 64 grid squares.
///
/// A cell's digit and its visibility flags move independently: digits are
/// assigned once by flood fill and render unconditionally, while the
/// visibility flags only ever decide how a mine is drawn.
#[derive(Debug)]
pub struct Cell {
    pub contains_mine: bool,
    pub content_visible: bool,
    pub revealed: bool,
    pub padding_after: bool,
    pub digit: Option<u8>,
}

impl Cell {
    pub fn new(contains_mine: bool, padding_after: bool) -> Cell {
        Cell {
            contains_mine,
            content_visible: false,
            revealed: false,
            padding_after,
            digit: None,
        }
    }

    /// Marks the cell permanently revealed. Peeks can no longer hide it.
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn show_content(&mut self) {
        self.content_visible = true;
    }

    /// Hides the cell again unless it was permanently revealed.
    pub fn hide_if_unrevealed(&mut self) {
        if !self.revealed {
            self.content_visible = false;
        }
    }

    /// Stores the digit drawn for a non-mine cell. Values above 8 are
    /// silently ignored; a square has at most 8 neighbors.
    pub fn set_display_to_digit(&mut self, digit: usize) {
        if digit <= 8 {
            self.digit = Some(digit as u8);
        }
    }

    /// Current glyph: a mine shows "M" only while its content is visible,
    /// anything else shows its digit once one is assigned, "-" otherwise.
    fn render(&self) -> String {
        let glyph = match (self.contains_mine, self.content_visible) {
            (true, true) => String::from("M"),
            (true, false) => String::from("-"),
            (false, _) => match self.digit {
                Some(digit) => digit.to_string(),
                None => String::from("-"),
            },
        };
        if self.padding_after {
            glyph + " "
        } else {
            glyph
        }
    }
}

/// Grid position as (row, column), both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point(pub usize, pub usize);

impl Point {
    /// Converts a linear index (row-major) into a position on the grid.
    pub fn from_index(index: usize) -> Option<Point> {
        if index >= BOARD_SIZE * BOARD_SIZE {
            return None;
        }
        Some(Point(index / BOARD_SIZE, index % BOARD_SIZE))
    }

    /// L-inf distance; two cells are adjacent exactly when this is 1.
    pub fn distance(self, other: Point) -> usize {
        (self.0 as i64 - other.0 as i64)
            .abs()
            .max((self.1 as i64 - other.1 as i64).abs()) as usize
    }

    /// The up-to-8 surrounding positions, clipped at the board edges,
    /// in row-major order.
    pub fn neighbors(self) -> Vec<Point> {
        iproduct!(-1i32..2, -1i32..2)
            .filter(|&(i, j)| i != 0 || j != 0)
            .map(|(i, j)| (i + self.0 as i32, j + self.1 as i32))
            .filter(|&(row, column)| {
                row >= 0 && row < BOARD_SIZE as i32 && column >= 0 && column < BOARD_SIZE as i32
            })
            .map(|(row, column)| Point(row as usize, column as usize))
            .collect()
    }
}

/// Draws `MINE_COUNT` distinct linear indices by rejection: redraw whenever
/// a placement collides with one already taken.
fn draw_mine_placements<R: Rng>(rng: &mut R) -> Vec<usize> {
    let mut placements = Vec::with_capacity(MINE_COUNT);
    while placements.len() < MINE_COUNT {
        let placement = rng.gen_range(0, BOARD_SIZE * BOARD_SIZE);
        if !placements.contains(&placement) {
            placements.push(placement);
        }
    }
    placements
}

#[derive(Debug)]
pub struct Board {
    cells: Vec<Vec<Cell>>,
    mine_placements: Vec<usize>,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl Board {
    pub fn new() -> Board {
        let placements = draw_mine_placements(&mut thread_rng());
        tracing::debug!("drew mine placements {:?}", placements);
        Board::new_from_placements(placements)
    }

    /// Builds a board with mines at the given linear indices. Callers supply
    /// distinct in-range indices; `new` always supplies exactly `MINE_COUNT`.
    pub fn new_from_placements(mine_placements: Vec<usize>) -> Board {
        let mut cells = Vec::with_capacity(BOARD_SIZE);
        for row in 0..BOARD_SIZE {
            let mut row_vec = Vec::with_capacity(BOARD_SIZE);
            for column in 0..BOARD_SIZE {
                let index = row * BOARD_SIZE + column;
                row_vec.push(Cell::new(mine_placements.contains(&index), true));
            }
            cells.push(row_vec);
        }
        Board {
            cells,
            mine_placements,
        }
    }

    pub fn mine_placements(&self) -> &[usize] {
        &self.mine_placements
    }

    pub fn cell(&self, point: Point) -> &Cell {
        &self.cells[point.0][point.1]
    }

    fn cell_mut(&mut self, point: Point) -> &mut Cell {
        &mut self.cells[point.0][point.1]
    }

    pub fn contains_mine(&self, point: Point) -> bool {
        self.cell(point).contains_mine
    }

    /// Permanently exposes a correctly guessed mine.
    pub fn reveal_mine(&mut self, point: Point) {
        let cell = self.cell_mut(point);
        cell.show_content();
        cell.reveal();
    }

    /// Counts the mines surrounding `point` and stores that as its digit.
    pub fn change_cell_to_digit(&mut self, point: Point) {
        let digit = point
            .neighbors()
            .iter()
            .filter(|&&neighbor| self.cell(neighbor).contains_mine)
            .count();
        self.cell_mut(point).set_display_to_digit(digit);
    }

    /// Flood fill from `start`: assigns the digit there and, wherever a
    /// digit comes out as 0, keeps going through the neighbors. Runs on an
    /// explicit stack; a cell that already has a digit is never reprocessed,
    /// so every digit is computed exactly once. Visibility flags are left
    /// alone. A digit renders on its own, only mines care about visibility.
    pub fn expand(&mut self, start: Point) {
        let mut assigned = 0;
        let mut positions = vec![start];
        while let Some(point) = positions.pop() {
            if self.cell(point).digit.is_some() {
                continue;
            }
            self.change_cell_to_digit(point);
            assigned += 1;
            if self.cell(point).digit == Some(0) {
                positions.extend(point.neighbors());
            }
        }
        tracing::trace!("expand from {:?} assigned {} digits", start, assigned);
    }

    pub fn show_all_cells(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.show_content();
        }
    }

    pub fn hide_cells(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.hide_if_unrevealed();
        }
    }

    /// The 8-line text rendering, one trailing blank line included.
    pub fn render(&self) -> String {
        let mut result = String::new();
        for row in &self.cells {
            for cell in row {
                result += &cell.render();
            }
            result += "\n";
        }
        result += "\n";
        result
    }
}

#[cfg(test)]
use proptest::prelude::*;
