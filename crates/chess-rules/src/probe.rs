//! Scoped make/undo over a rules-engine handle.

use crate::{Move, RulesEngine, RulesError};
use shakmaty::{Board, Color};

/// A scope of probing moves on a borrowed [`RulesEngine`].
///
/// Every move applied through the probe is undone when the probe is dropped,
/// whichever way the scope is left: normal return, `?` propagation or panic
/// unwinding. A probe is itself a `RulesEngine`, so it can be handed to any
/// code that expects a handle, and probes nest.
///
/// `undo_last_move` on a probe only undoes moves applied through that probe;
/// it reports [`RulesError::NothingToUndo`] instead of reaching into the
/// enclosing scope.
pub struct Probe<'a, E: RulesEngine + ?Sized> {
    engine: &'a mut E,
    applied: usize,
}

impl<'a, E: RulesEngine + ?Sized> Probe<'a, E> {
    /// Opens a probe on `engine`.
    pub fn new(engine: &'a mut E) -> Self {
        Probe { engine, applied: 0 }
    }

    /// Number of moves currently applied by this probe.
    pub fn depth(&self) -> usize {
        self.applied
    }
}

impl<E: RulesEngine + ?Sized> RulesEngine for Probe<'_, E> {
    fn legal_moves(&self) -> Vec<Move> {
        self.engine.legal_moves()
    }

    fn legal_move_count(&self) -> usize {
        self.engine.legal_move_count()
    }

    fn apply_move(&mut self, mv: &Move) -> Result<Move, RulesError> {
        let played = self.engine.apply_move(mv)?;
        self.applied += 1;
        Ok(played)
    }

    fn undo_last_move(&mut self) -> Result<Move, RulesError> {
        if self.applied == 0 {
            return Err(RulesError::NothingToUndo);
        }
        let undone = self.engine.undo_last_move()?;
        self.applied -= 1;
        Ok(undone)
    }

    fn fen(&self) -> String {
        self.engine.fen()
    }

    fn side_to_move(&self) -> Color {
        self.engine.side_to_move()
    }

    fn is_in_check(&self) -> bool {
        self.engine.is_in_check()
    }

    fn board(&self) -> &Board {
        self.engine.board()
    }
}

impl<E: RulesEngine + ?Sized> Drop for Probe<'_, E> {
    fn drop(&mut self) {
        while self.applied > 0 {
            if let Err(err) = self.engine.undo_last_move() {
                tracing::warn!(
                    remaining = self.applied,
                    "Failed to restore probed position: {}",
                    err
                );
                break;
            }
            self.applied -= 1;
        }
    }
}
