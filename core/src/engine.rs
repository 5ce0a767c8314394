use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Increment for the internal seed stream, so consecutive resets of the same
/// engine produce different boards while staying reproducible from the
/// initial seed.
const SEED_STREAM_INCREMENT: u64 = 0x9E37_79B9_7F4A_7C15;

/// The game engine: owns the grid, mine placement, reveal/flag operations,
/// win/loss evaluation, and validation of pending configuration input.
///
/// One game runs `playing -> won` or `playing -> lost`, both terminal; only
/// a full reset produces a fresh playing state. Play operations never fail:
/// out-of-bounds or post-game interactions are silent no-ops.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    board: Array2<Cell>,
    safe_cells: CellCount,
    game_active: bool,
    you_lost: bool,
    pending: PendingConfig,
    errors: Vec<ConfigError>,
    seed: u64,
}

impl Game {
    /// Starts with the default 4x4 board holding 5 mines.
    pub fn new(seed: u64) -> Self {
        let config = GameConfig::default();
        let mut game = Self {
            config,
            board: Array2::default((0, 0)),
            safe_cells: 0,
            game_active: false,
            you_lost: false,
            pending: PendingConfig::from_config(config),
            errors: Vec::new(),
            seed,
        };
        game.apply_config(config);
        game
    }

    /// Builds a game around a fixed mine placement. Intended for tests and
    /// scripted demos; out-of-bounds coordinates are dropped.
    pub fn with_planted_mines((rows, cols): Coord2, mine_coords: &[Coord2]) -> Self {
        let board = PlantedBoardGenerator::new(mine_coords).generate(GameConfig {
            rows,
            cols,
            mines: 0,
        });
        let mines = board.iter().filter(|cell| cell.mine).count() as CellCount;
        let config = GameConfig { rows, cols, mines };

        Self {
            safe_cells: config.total_cells() - mines,
            game_active: true,
            you_lost: false,
            pending: PendingConfig::from_config(config),
            errors: Vec::new(),
            seed: 0,
            config,
            board,
        }
    }

    /// Replaces the grid and play state from raw parameters. Returns false
    /// and leaves everything untouched when the parameters describe an
    /// infeasible board.
    pub fn generate_board(&mut self, rows: i32, cols: i32, mines: i32) -> bool {
        match GameConfig::checked(rows, cols, mines) {
            Some(config) => {
                self.apply_config(config);
                true
            }
            None => false,
        }
    }

    /// One cell interaction from the presentation layer. Flag clicks toggle
    /// the marker on a hidden cell; reveal clicks open it, flood-filling
    /// across zero-count regions. Everything else is a no-op.
    pub fn handle_click(&mut self, coords: Coord2, is_flag: bool) {
        if !self.game_active {
            return;
        }
        let Some(&cell) = self.board.get(coords.to_nd_index()) else {
            return;
        };
        if cell.revealed() {
            return;
        }

        if is_flag {
            self.board[coords.to_nd_index()].flag = !cell.flag;
            return;
        }

        // Flagging protects a cell from accidental reveal.
        if cell.flag {
            return;
        }

        if cell.mine {
            self.board[coords.to_nd_index()].active = false;
            self.you_lost = true;
            self.game_active = false;
            log::debug!("mine triggered at {:?}", coords);
            return;
        }

        self.reveal_from(coords);

        if self.game_won() {
            self.game_active = false;
            log::debug!("all safe cells revealed and all mines flagged");
        }
    }

    /// True iff every safe cell has been revealed and every mine is flagged.
    /// Both are required: clearing the board with an unflagged mine left, or
    /// flagging every mine with hidden safe cells left, is not a win.
    pub fn game_won(&self) -> bool {
        self.safe_cells == 0 && self.board.iter().filter(|cell| cell.mine).all(|cell| cell.flag)
    }

    /// Regenerates the board from the pending input. Refused while the input
    /// has validation errors, leaving the current game untouched.
    pub fn reset(&mut self) -> bool {
        match self.pending.validate() {
            Ok(config) => {
                self.apply_config(config);
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    pub fn set_pending_rows(&mut self, raw: &str) {
        self.pending.rows = raw.into();
        self.revalidate_pending();
    }

    pub fn set_pending_cols(&mut self, raw: &str) {
        self.pending.cols = raw.into();
        self.revalidate_pending();
    }

    pub fn set_pending_mines(&mut self, raw: &str) {
        self.pending.mines = raw.into();
        self.revalidate_pending();
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        (self.config.rows, self.config.cols)
    }

    pub fn board(&self) -> &Array2<Cell> {
        &self.board
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board[coords.to_nd_index()]
    }

    pub fn safe_cells(&self) -> CellCount {
        self.safe_cells
    }

    pub fn game_active(&self) -> bool {
        self.game_active
    }

    pub fn you_lost(&self) -> bool {
        self.you_lost
    }

    pub fn pending(&self) -> &PendingConfig {
        &self.pending
    }

    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    fn apply_config(&mut self, config: GameConfig) {
        let generator = RandomBoardGenerator::new(self.advance_seed());
        self.board = generator.generate(config);
        self.config = config;
        self.safe_cells = config.safe_cells();
        self.game_active = true;
        self.you_lost = false;
        self.pending = PendingConfig::from_config(config);
        self.errors = Vec::new();
        log::debug!(
            "generated {}x{} board with {} mines",
            config.rows,
            config.cols,
            config.mines
        );
    }

    fn revalidate_pending(&mut self) {
        self.errors = match self.pending.validate() {
            Ok(_) => Vec::new(),
            Err(errors) => errors,
        };
    }

    /// Reveals the safe cell at `start`, then flood-fills outward from
    /// zero-count cells with an explicit work queue. Numbered cells are
    /// revealed but do not cascade; flagged cells are skipped entirely. The
    /// `active` check doubles as the visited guard, so duplicate queue
    /// entries and adjacency cycles terminate.
    fn reveal_from(&mut self, start: Coord2) {
        let bounds = self.size();
        let mut queue = VecDeque::from([start]);

        while let Some(coords) = queue.pop_front() {
            let cell = self.board[coords.to_nd_index()];
            if cell.revealed() || cell.flag {
                continue;
            }

            self.board[coords.to_nd_index()].active = false;
            self.safe_cells -= 1;

            if cell.adjacent_mines == 0 {
                // Neighbors of a zero-count cell are never mines.
                queue.extend(adjacent_coords(coords, bounds).filter(|&pos| {
                    let neighbor = self.board[pos.to_nd_index()];
                    neighbor.active && !neighbor.flag
                }));
            }
        }
    }

    fn advance_seed(&mut self) -> u64 {
        let seed = self.seed;
        self.seed = seed.wrapping_add(SEED_STREAM_INCREMENT);
        seed
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine_count(game: &Game) -> usize {
        game.board().iter().filter(|cell| cell.mine).count()
    }

    fn flag_all_mines(game: &mut Game) {
        let (rows, cols) = game.size();
        for row in 0..rows {
            for col in 0..cols {
                if game.cell_at((row, col)).mine && !game.cell_at((row, col)).flag {
                    game.handle_click((row, col), true);
                }
            }
        }
    }

    #[test]
    fn defaults_to_4x4_and_5_mines() {
        let game = Game::new(1);
        assert_eq!(game.size(), (4, 4));
        assert_eq!(mine_count(&game), 5);
        assert_eq!(game.safe_cells(), 11);
        assert!(game.game_active());
        assert!(!game.you_lost());
    }

    #[test]
    fn generate_board_rejects_invalid_parameters() {
        let mut game = Game::new(1);
        let before = game.clone();

        assert!(!game.generate_board(0, 0, -1));
        assert!(!game.generate_board(0, 4, 2));
        assert!(!game.generate_board(4, 0, 2));
        assert!(!game.generate_board(4, 4, -1));
        assert!(!game.generate_board(4, 4, 16));

        // Prior state is left untouched on every rejection.
        assert_eq!(game, before);
    }

    #[test]
    fn generate_board_places_exactly_the_requested_mines() {
        let mut game = Game::new(9);
        for &(rows, cols, mines) in &[(3, 3, 0), (3, 3, 8), (5, 2, 3)] {
            assert!(game.generate_board(rows, cols, mines));
            assert_eq!(game.size(), (rows as Coord, cols as Coord));
            assert_eq!(mine_count(&game), mines as usize);
            assert_eq!(game.safe_cells(), (rows * cols - mines) as CellCount);
            assert!(game.game_active());
        }
    }

    #[test]
    fn consecutive_resets_use_fresh_boards() {
        let mut game = Game::new(3);
        assert!(game.generate_board(8, 8, 12));
        let first = game.board().clone();
        assert!(game.generate_board(8, 8, 12));
        assert_ne!(*game.board(), first);
    }

    #[test]
    fn revealing_a_mine_loses_and_freezes_the_game() {
        let mut game = Game::with_planted_mines((2, 2), &[(0, 0)]);

        game.handle_click((0, 0), false);

        assert!(game.you_lost());
        assert!(!game.game_active());
        assert!(game.cell_at((0, 0)).revealed());
        // Loss is terminal: no further cells were auto-revealed...
        assert!(game.cell_at((1, 1)).active);

        // ...and subsequent clicks are no-ops.
        game.handle_click((1, 1), false);
        assert!(game.cell_at((1, 1)).active);
        game.handle_click((1, 0), true);
        assert!(!game.cell_at((1, 0)).flag);
    }

    #[test]
    fn flagging_twice_restores_the_cell() {
        let mut game = Game::with_planted_mines((2, 2), &[(0, 0)]);

        game.handle_click((0, 1), true);
        assert!(game.cell_at((0, 1)).flag);

        game.handle_click((0, 1), true);
        assert!(!game.cell_at((0, 1)).flag);
    }

    #[test]
    fn flagged_cells_are_protected_from_reveal() {
        let mut game = Game::with_planted_mines((2, 2), &[(0, 0)]);

        game.handle_click((0, 0), true);
        game.handle_click((0, 0), false);

        assert!(game.cell_at((0, 0)).active);
        assert!(game.game_active());
        assert!(!game.you_lost());
    }

    #[test]
    fn revealed_cells_cannot_be_flagged() {
        let mut game = Game::with_planted_mines((2, 2), &[(0, 0)]);

        game.handle_click((1, 1), false);
        game.handle_click((1, 1), true);

        assert!(!game.cell_at((1, 1)).flag);
    }

    #[test]
    fn out_of_bounds_clicks_are_ignored() {
        let mut game = Game::with_planted_mines((2, 2), &[(0, 0)]);
        let before = game.clone();

        game.handle_click((5, 5), false);
        game.handle_click((0, 9), true);

        assert_eq!(game, before);
    }

    #[test]
    fn flood_fill_opens_the_zero_region_and_halts_at_numbers() {
        let mut game = Game::with_planted_mines((1, 5), &[(0, 4)]);

        game.handle_click((0, 0), false);

        // (0,0)..(0,2) are zero-count, (0,3) is the bordering number.
        for col in 0..4 {
            assert!(game.cell_at((0, col)).revealed(), "col {}", col);
        }
        assert_eq!(game.cell_at((0, 3)).adjacent_mines, 1);
        assert!(game.cell_at((0, 4)).active);
        assert_eq!(game.safe_cells(), 0);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut game = Game::with_planted_mines((3, 3), &[(2, 2)]);

        game.handle_click((0, 2), true);
        game.handle_click((0, 0), false);

        assert!(game.cell_at((0, 2)).active);
        assert!(game.cell_at((0, 2)).flag);
        assert_eq!(game.safe_cells(), 1);
    }

    #[test]
    fn win_requires_all_safe_cells_revealed() {
        let mut game = Game::with_planted_mines((3, 3), &[(2, 2)]);

        flag_all_mines(&mut game);

        // One safe cell is still hidden.
        assert!(game.safe_cells() > 0);
        assert!(!game.game_won());
    }

    #[test]
    fn win_requires_every_mine_flagged() {
        let mut game = Game::with_planted_mines((3, 3), &[(2, 2)]);

        game.handle_click((0, 0), false);

        assert_eq!(game.safe_cells(), 0);
        assert!(!game.game_won());
    }

    #[test]
    fn win_holds_when_safe_cells_cleared_and_mines_flagged() {
        let mut game = Game::with_planted_mines((3, 3), &[(2, 2)]);

        game.handle_click((2, 2), true);
        game.handle_click((0, 0), false);

        assert!(game.game_won());
        assert!(!game.game_active());
        assert!(!game.you_lost());
    }

    #[test]
    fn win_on_the_final_reveal_deactivates_the_game() {
        let mut game = Game::with_planted_mines((2, 1), &[(0, 0)]);

        game.handle_click((0, 0), true);
        game.handle_click((1, 0), false);

        assert!(game.game_won());
        assert!(!game.game_active());
        game.handle_click((0, 0), true);
        assert!(game.cell_at((0, 0)).flag, "post-win clicks are no-ops");
    }

    #[test]
    fn reset_replaces_the_grid_with_the_pending_size() {
        let mut game = Game::new(1);
        game.set_pending_rows("3");
        game.set_pending_cols("3");
        game.set_pending_mines("2");

        assert!(game.reset());
        assert_eq!(game.size(), (3, 3));
        assert_eq!(game.board().len(), 9);
        assert_eq!(mine_count(&game), 2);
    }

    #[test]
    fn reset_is_refused_while_errors_are_present() {
        let mut game = Game::new(1);
        game.set_pending_rows("0");

        assert!(!game.errors().is_empty());
        assert!(!game.reset());
        assert_eq!(game.size(), (4, 4), "existing grid is kept");

        // Correcting the input clears the diagnostics and unblocks reset.
        game.set_pending_rows("4");
        assert!(game.errors().is_empty());
        assert!(game.reset());
    }

    #[test]
    fn pending_input_is_validated_per_change() {
        let mut game = Game::new(1);

        game.set_pending_rows("asdf");
        assert_eq!(
            game.errors(),
            [ConfigError::InvalidDimension(Dimension::Rows)]
        );

        game.set_pending_cols("0");
        assert_eq!(
            game.errors(),
            [
                ConfigError::InvalidDimension(Dimension::Rows),
                ConfigError::InvalidDimension(Dimension::Cols),
            ]
        );

        game.set_pending_rows("4");
        game.set_pending_cols("4");
        game.set_pending_mines("17");
        assert_eq!(game.errors(), [ConfigError::InvalidMineCount]);
    }

    #[test]
    fn state_snapshot_round_trips_through_json() {
        let mut game = Game::with_planted_mines((2, 2), &[(1, 1)]);
        game.handle_click((0, 0), false);

        let json = serde_json::to_string(&game).unwrap();
        let restored: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, game);
    }
}
