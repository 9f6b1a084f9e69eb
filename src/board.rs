//! Board index maintenance and territory bookkeeping
//!
//! The `board` vector is derived from `pieces` and must be rebuilt after any
//! structural mutation (moves, captures, spawns, deserialization). `reindex`
//! is idempotent and O(pieces).

use std::collections::HashSet;

use crate::constants::{COLS, ROWS};
use crate::types::{Cell, GameState, PieceId, Team};

impl GameState {
    /// Rebuild the positional index from the piece list.
    pub fn reindex(&mut self) {
        let slots = ROWS as usize * COLS as usize;
        if self.board.len() != slots {
            self.board = vec![None; slots];
        } else {
            self.board.fill(None);
        }
        for piece in &self.pieces {
            self.board[piece.pos.index()] = Some(piece.id);
        }
    }

    /// Claim a cell for `team`, evicting the opponent's claim if present.
    /// A cell that changes hands is stamped with the current turn.
    pub fn claim_territory(&mut self, cell: Cell, team: Team) {
        let turn = self.turn_count;
        let (own, other) = match team {
            Team::Snow => (&mut self.snow_territory, &mut self.ash_territory),
            Team::Ash => (&mut self.ash_territory, &mut self.snow_territory),
        };
        own.insert(cell);
        if other.remove(&cell) {
            self.territory_capture_turn.insert(cell, turn);
        }
    }

    /// Remove a piece from play and clear its board slot. Effect records
    /// referencing the id simply stop matching anything.
    pub fn remove_piece(&mut self, id: PieceId) {
        if let Some(idx) = self.pieces.iter().position(|p| p.id == id) {
            let pos = self.pieces[idx].pos;
            self.pieces.remove(idx);
            self.board[pos.index()] = None;
        }
    }

    /// A cell a piece could stand on: in bounds, unoccupied, no wall.
    pub fn is_open(&self, cell: Cell) -> bool {
        cell.in_bounds() && self.piece_id_at(cell).is_none() && !self.wall_at(cell)
    }

    pub fn territory_mut(&mut self, team: Team) -> &mut HashSet<Cell> {
        match team {
            Team::Snow => &mut self.snow_territory,
            Team::Ash => &mut self.ash_territory,
        }
    }
}
