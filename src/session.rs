use std::io::{BufRead, Write};

use super::board::{Board, Point, MINE_COUNT};
use super::interaction::{self, InteractionError};

/// The interaction stages. Prompt stages read input before transitioning;
/// every other stage writes its output and falls straight through to the
/// next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Restart,
    Display,
    PeekPrompt,
    Peek,
    GuessRow,
    GuessColumn,
    GuessMine,
    Lose,
    Win,
    ThankYou,
    PlayAgainPrompt,
    End,
}

/// One interactive session: owns the board and walks the stage machine
/// until the player reaches `End`.
#[derive(Debug)]
pub struct Session {
    board: Board,
    stage: Stage,
    row: usize,
    column: usize,
    mines_found: usize,
}

impl Session {
    pub fn new() -> Session {
        Session::new_from_board(Board::new())
    }

    fn new_from_board(board: Board) -> Session {
        Session {
            board,
            stage: Stage::Start,
            row: 0,
            column: 0,
            mines_found: 0,
        }
    }

    /// Drives the session over the given streams until the player quits.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut out: W,
    ) -> Result<(), InteractionError> {
        writeln!(out, "Welcome to Minesweeper!")?;
        while self.stage != Stage::End {
            self.stage = self.advance(&mut input, &mut out)?;
        }
        writeln!(out, "Goodbye!")?;
        Ok(())
    }

    /// Performs the entry action of the current stage and returns the next
    /// one. Prompt stages keep asking until they get a valid answer, so an
    /// entry action never runs twice for a single visit.
    fn advance<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Stage, InteractionError> {
        let next = match self.stage {
            Stage::Start => {
                if interaction::ask_yes_no(input, out, "Would you like to play a game? (y/n): ")? {
                    Stage::Display
                } else {
                    Stage::End
                }
            }
            Stage::Restart => {
                tracing::debug!("restarting with a fresh board");
                self.mines_found = 0;
                self.board = Board::new();
                Stage::Display
            }
            Stage::Display => {
                write!(out, "{}", self.board)?;
                Stage::PeekPrompt
            }
            Stage::PeekPrompt => {
                if interaction::ask_yes_no(input, out, "Would you like to peek? (y/n): ")? {
                    Stage::Peek
                } else {
                    Stage::GuessRow
                }
            }
            Stage::Peek => {
                self.board.show_all_cells();
                write!(out, "{}", self.board)?;
                self.board.hide_cells();
                Stage::GuessRow
            }
            Stage::GuessRow => {
                self.row =
                    interaction::ask_coordinate(input, out, "Please enter a row number: ")? - 1;
                Stage::GuessColumn
            }
            Stage::GuessColumn => {
                self.column =
                    interaction::ask_coordinate(input, out, "Please enter a column number: ")? - 1;
                Stage::GuessMine
            }
            Stage::GuessMine => self.guess_mine(input, out)?,
            Stage::Lose => {
                writeln!(out, "Boom! You lose.")?;
                Stage::ThankYou
            }
            Stage::Win => {
                writeln!(out, "You win!")?;
                Stage::ThankYou
            }
            Stage::ThankYou => {
                writeln!(out, "Thank you for playing Minesweeper.")?;
                Stage::PlayAgainPrompt
            }
            Stage::PlayAgainPrompt => {
                if interaction::ask_yes_no(input, out, "Would you like to play again? (y/n): ")? {
                    Stage::Restart
                } else {
                    Stage::End
                }
            }
            Stage::End => Stage::End,
        };
        tracing::trace!("stage {:?} -> {:?}", self.stage, next);
        Ok(next)
    }

    /// The guess stage. The board is updated from the ground truth before
    /// the answer is read (a real mine is revealed and counted either way)
    /// and the y/n answer then only picks the route: "y" on a real mine
    /// continues, or wins on the tenth, while an answer that contradicts
    /// the square's actual content loses.
    fn guess_mine<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Stage, InteractionError> {
        let point = Point(self.row, self.column);
        let prompt = format!(
            "Does row {} and column {} contain a mine? (y/n): ",
            self.row + 1,
            self.column + 1
        );
        let (on_yes, on_no) = if self.board.contains_mine(point) {
            self.board.reveal_mine(point);
            self.mines_found += 1;
            tracing::debug!(
                "mine confirmed at {:?}, {} of {} found",
                point,
                self.mines_found,
                MINE_COUNT
            );
            let on_yes = if self.mines_found == MINE_COUNT {
                Stage::Win
            } else {
                Stage::Display
            };
            (on_yes, Stage::Lose)
        } else {
            self.board.expand(point);
            (Stage::Lose, Stage::Display)
        };
        if interaction::ask_yes_no(input, out, &prompt)? {
            Ok(on_yes)
        } else {
            Ok(on_no)
        }
    }
}
