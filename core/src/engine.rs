use std::collections::VecDeque;
use std::time::Duration;

use ndarray::Array3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameStatus {
    Idle,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// Gameplay engine owning one board.
///
/// Every mutation happens through [`reveal`](Self::reveal) and
/// [`toggle_flag`](Self::toggle_flag); once the status leaves
/// [`GameStatus::Playing`] both become no-ops and the board is frozen until a
/// new engine replaces it.
#[derive(Clone, Debug)]
pub struct GameEngine {
    mine_layout: MineLayout,
    board: Array3<EngineCell>,
    difficulty: Option<Difficulty>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord3>,
    started_at: Instant,
    ended_at: Option<Instant>,
}

impl GameEngine {
    /// Generates a fresh board for the given difficulty preset.
    pub fn new(difficulty: Difficulty) -> Result<Self> {
        Self::with_seed(difficulty, rand::random())
    }

    /// Like [`new`](Self::new), but with a fixed placement seed.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Result<Self> {
        let layout = RandomLayoutGenerator::new(seed).generate(difficulty.config())?;
        Ok(Self::with_layout(layout, Some(difficulty)))
    }

    /// Wraps an explicit mine layout, e.g. one built via
    /// [`MineLayout::from_mine_coords`].
    pub fn from_layout(layout: MineLayout) -> Self {
        Self::with_layout(layout, None)
    }

    fn with_layout(mine_layout: MineLayout, difficulty: Option<Difficulty>) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            board: Array3::default(size.to_nd_index()),
            difficulty,
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::Playing,
            triggered_mine: None,
            started_at: Instant::now(),
            ended_at: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn size(&self) -> Coord3 {
        self.mine_layout.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn mines_left(&self) -> isize {
        (self.mine_layout.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn cell_at(&self, coords: Coord3) -> EngineCell {
        self.board[coords.to_nd_index()]
    }

    pub fn has_mine_at(&self, coords: Coord3) -> bool {
        self.mine_layout.contains_mine(coords)
    }

    pub fn triggered_mine(&self) -> Option<Coord3> {
        self.triggered_mine
    }

    /// Wall-clock play time, frozen at the moment the game ends.
    pub fn elapsed(&self) -> Duration {
        match self.ended_at {
            Some(ended_at) => ended_at.duration_since(self.started_at),
            None => self.started_at.elapsed(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    /// Reveals a cell, flood-revealing through zero-count regions.
    ///
    /// Revealing a mine discloses every mine and loses the game; revealing the
    /// last safe cell wins it. Calls on a finished game, on a flagged cell, or
    /// on an already revealed cell change nothing.
    pub fn reveal(&mut self, coords: Coord3) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.mine_layout.validate_coords(coords)?;

        if !self.status.is_playing() || !matches!(self.cell_at(coords), EngineCell::Hidden) {
            return Ok(NoChange);
        }

        if self.mine_layout.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.disclose_mines();
            self.end_game(false);
            return Ok(HitMine);
        }

        self.reveal_region(coords);

        if self.revealed_count == self.mine_layout.safe_cell_count() {
            self.end_game(true);
            Ok(Won)
        } else {
            Ok(Revealed)
        }
    }

    /// Toggles the flag on a hidden cell. No-op on revealed cells or once the
    /// game is over.
    pub fn toggle_flag(&mut self, coords: Coord3) -> Result<MarkOutcome> {
        use EngineCell::*;
        use MarkOutcome::*;

        let coords = self.mine_layout.validate_coords(coords)?;

        if !self.status.is_playing() {
            return Ok(NoChange);
        }

        Ok(match self.board[coords.to_nd_index()] {
            Hidden => {
                self.board[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                self.board[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed(_) => NoChange,
        })
    }

    /// Iterative flood reveal from a safe starting cell.
    ///
    /// The Hidden check on pop is the visit-once guard: a coordinate may be
    /// queued more than once, but is revealed at most once, so the walk
    /// terminates on cyclic zero regions.
    fn reveal_region(&mut self, start: Coord3) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            if !matches!(self.board[coords.to_nd_index()], EngineCell::Hidden) {
                continue;
            }

            let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
            self.board[coords.to_nd_index()] = EngineCell::Revealed(adjacent_mines);
            self.revealed_count += 1;

            if adjacent_mines == 0 {
                let hidden_neighbors: SmallVec<[Coord3; 26]> = self
                    .mine_layout
                    .iter_neighbors(coords)
                    .filter(|&pos| matches!(self.board[pos.to_nd_index()], EngineCell::Hidden))
                    .collect();
                to_visit.extend(hidden_neighbors);
            }
        }
    }

    /// Force-reveals every mine after a losing move. Non-mine cells and the
    /// revealed counter are untouched.
    fn disclose_mines(&mut self) {
        let (x_end, y_end, z_end) = self.mine_layout.size();
        for x in 0..x_end {
            for y in 0..y_end {
                for z in 0..z_end {
                    let coords = (x, y, z);
                    if !self.mine_layout.contains_mine(coords) {
                        continue;
                    }
                    if matches!(self.board[coords.to_nd_index()], EngineCell::Flagged) {
                        self.flagged_count -= 1;
                    }
                    self.board[coords.to_nd_index()] = EngineCell::Revealed(0);
                }
            }
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        self.ended_at = Some(Instant::now());
        if won {
            self.triggered_mine = None;
        }

        log::debug!(
            "game ended: {:?} after {:?}, {}/{} safe cells revealed",
            self.status,
            self.elapsed(),
            self.revealed_count,
            self.mine_layout.safe_cell_count()
        );
    }
}
