//! Text game loop between a human and a [`MoveSelector`].
//!
//! The human types moves in UCI notation (`e2e4`, `e7e8q`). Input is checked
//! against the legal moves before it reaches [`Position::apply_move`], so a
//! typo only produces a message.

use crate::selector::MoveSelector;
use chess_core::{Color, Rank, Square};
use chess_engine::{EngineError, Position};
use std::fmt;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors that end a session early.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    /// A player quit: the human closed the input, or the bot had no reply.
    Abandoned,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            Outcome::Stalemate => write!(f, "stalemate"),
            Outcome::Abandoned => write!(f, "game abandoned"),
        }
    }
}

/// Renders the board as text, White at the bottom.
pub fn render_board(position: &Position) -> String {
    let mut out = String::new();
    for rank in Rank::ALL.iter().rev() {
        out.push(rank.to_char());
        for sq in Square::ALL.iter().filter(|sq| sq.rank() == *rank) {
            out.push(' ');
            out.push(position.piece_at(*sq).to_fen_char().unwrap_or('.'));
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    out
}

/// A game between the human, reading from `input`, and `selector`.
pub struct Session<S, R, W> {
    position: Position,
    player: Color,
    selector: S,
    input: R,
    output: W,
}

impl<S, R, W> Session<S, R, W>
where
    S: MoveSelector,
    R: BufRead,
    W: Write,
{
    pub fn new(position: Position, player: Color, selector: S, input: R, output: W) -> Self {
        Session {
            position,
            player,
            selector,
            input,
            output,
        }
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Plays until the game ends or the human leaves.
    pub fn run(&mut self) -> Result<Outcome, SessionError> {
        loop {
            self.show_position()?;

            let legal = self.position.legal_moves()?;
            if legal.is_empty() {
                let outcome = if self.position.is_check()? {
                    Outcome::Checkmate {
                        winner: self.position.side_to_move().opposite(),
                    }
                } else {
                    Outcome::Stalemate
                };
                writeln!(self.output, "Game over: {}", outcome)?;
                return Ok(outcome);
            }

            let moved = if self.position.side_to_move() == self.player {
                self.human_turn()?
            } else {
                self.bot_turn()?
            };
            if !moved {
                writeln!(self.output, "Game over: {}", Outcome::Abandoned)?;
                return Ok(Outcome::Abandoned);
            }
        }
    }

    fn show_position(&mut self) -> io::Result<()> {
        write!(self.output, "\n{}", render_board(&self.position))?;
        writeln!(self.output, "FEN: {}", self.position.fen())?;
        writeln!(self.output, "Evaluation: {}", self.position.evaluate())
    }

    /// Reads moves until one is legal and applied. Returns false when the
    /// human quits.
    fn human_turn(&mut self) -> Result<bool, SessionError> {
        loop {
            write!(self.output, "Your move: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            let text = line.trim();
            match text {
                "" => continue,
                "quit" | "exit" => return Ok(false),
                _ => {}
            }

            match self.position.find_legal_move(text)? {
                Some(m) => {
                    self.position.apply_move(m)?;
                    return Ok(true);
                }
                None => {
                    tracing::debug!(input = text, "rejected move");
                    writeln!(self.output, "Illegal move: {}", text)?;
                }
            }
        }
    }

    /// Asks the selector for a reply. Returns false when it has none.
    fn bot_turn(&mut self) -> Result<bool, SessionError> {
        let Some(m) = self.selector.select(&mut self.position)? else {
            return Ok(false);
        };
        writeln!(self.output, "Bot plays: {}", m)?;
        tracing::info!(mv = %m, "bot move");
        self.position.apply_move(m)?;
        Ok(true)
    }
}
