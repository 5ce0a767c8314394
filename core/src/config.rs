use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{cell_count, CellCount, Coord};

/// Validated board parameters for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// Validates raw integers, returning a config only when a board can be
    /// generated from them: positive dimensions and at least one safe cell.
    pub fn checked(rows: i32, cols: i32, mines: i32) -> Option<Self> {
        let rows: Coord = rows.try_into().ok().filter(|&rows| rows > 0)?;
        let cols: Coord = cols.try_into().ok().filter(|&cols| cols > 0)?;
        let mines: CellCount = mines.try_into().ok()?;
        (mines < cell_count(rows, cols)).then_some(Self { rows, cols, mines })
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.rows, self.cols)
    }

    /// Number of non-mine cells. Only meaningful on validated configs, where
    /// `mines < total_cells()` holds.
    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            mines: 5,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Rows,
    Cols,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => f.write_str("rows"),
            Self::Cols => f.write_str("columns"),
        }
    }
}

/// Configuration validation diagnostics, rendered verbatim by the
/// presentation layer.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("{0} must be a positive whole number")]
    InvalidDimension(Dimension),
    #[error("mines must be a non-negative whole number smaller than rows x columns")]
    InvalidMineCount,
}

/// Raw configuration input as typed into the form fields, re-validated on
/// every change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConfig {
    pub rows: String,
    pub cols: String,
    pub mines: String,
}

impl PendingConfig {
    pub fn from_config(config: GameConfig) -> Self {
        Self {
            rows: config.rows.to_string(),
            cols: config.cols.to_string(),
            mines: config.mines.to_string(),
        }
    }

    /// Result-with-diagnostics validation: either every field parses into a
    /// feasible [`GameConfig`], or the ordered list of everything wrong with
    /// the current input.
    pub fn validate(&self) -> Result<GameConfig, Vec<ConfigError>> {
        let mut errors = Vec::new();

        let rows = parse_dimension(&self.rows);
        if rows.is_none() {
            errors.push(ConfigError::InvalidDimension(Dimension::Rows));
        }

        let cols = parse_dimension(&self.cols);
        if cols.is_none() {
            errors.push(ConfigError::InvalidDimension(Dimension::Cols));
        }

        let mines = parse_mines(&self.mines);
        match (rows, cols, mines) {
            (_, _, None) => errors.push(ConfigError::InvalidMineCount),
            (Some(rows), Some(cols), Some(mines)) if mines >= cell_count(rows, cols) => {
                errors.push(ConfigError::InvalidMineCount)
            }
            _ => {}
        }

        match (rows, cols, mines, errors.is_empty()) {
            (Some(rows), Some(cols), Some(mines), true) => Ok(GameConfig { rows, cols, mines }),
            _ => Err(errors),
        }
    }
}

impl Default for PendingConfig {
    fn default() -> Self {
        Self::from_config(GameConfig::default())
    }
}

fn parse_dimension(raw: &str) -> Option<Coord> {
    raw.trim().parse().ok().filter(|&value| value > 0)
}

fn parse_mines(raw: &str) -> Option<CellCount> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(rows: &str, cols: &str, mines: &str) -> PendingConfig {
        PendingConfig {
            rows: rows.to_string(),
            cols: cols.to_string(),
            mines: mines.to_string(),
        }
    }

    #[test]
    fn default_config_is_4x4_with_5_mines() {
        let config = GameConfig::default();
        assert_eq!((config.rows, config.cols, config.mines), (4, 4, 5));
        assert_eq!(config.safe_cells(), 11);
    }

    #[test]
    fn checked_rejects_infeasible_boards() {
        assert_eq!(GameConfig::checked(0, 0, -1), None);
        assert_eq!(GameConfig::checked(0, 4, 2), None);
        assert_eq!(GameConfig::checked(4, 0, 2), None);
        assert_eq!(GameConfig::checked(4, 4, -1), None);
        assert_eq!(GameConfig::checked(4, 4, 16), None);
        assert_eq!(GameConfig::checked(300, 4, 2), None);
    }

    #[test]
    fn checked_accepts_feasible_boards() {
        let config = GameConfig::checked(4, 4, 15).unwrap();
        assert_eq!(config.safe_cells(), 1);
        assert!(GameConfig::checked(3, 3, 0).is_some());
    }

    #[test]
    fn validate_accepts_well_formed_input() {
        let config = pending("3", "3", "2").validate().unwrap();
        assert_eq!(config, GameConfig { rows: 3, cols: 3, mines: 2 });
    }

    #[test]
    fn validate_rejects_non_numeric_rows() {
        let errors = pending("asdf", "4", "5").validate().unwrap_err();
        assert_eq!(errors, [ConfigError::InvalidDimension(Dimension::Rows)]);
    }

    #[test]
    fn validate_rejects_zero_rows() {
        let errors = pending("0", "4", "5").validate().unwrap_err();
        assert_eq!(errors, [ConfigError::InvalidDimension(Dimension::Rows)]);
    }

    #[test]
    fn validate_rejects_negative_cols() {
        let errors = pending("4", "-1", "5").validate().unwrap_err();
        assert_eq!(errors, [ConfigError::InvalidDimension(Dimension::Cols)]);
    }

    #[test]
    fn validate_rejects_too_many_mines() {
        // 4x4 = 16 cells, so 17 mines in 16 cells is invalid.
        let errors = pending("4", "4", "17").validate().unwrap_err();
        assert_eq!(errors, [ConfigError::InvalidMineCount]);

        // A full board leaves no safe cell to win with.
        let errors = pending("4", "4", "16").validate().unwrap_err();
        assert_eq!(errors, [ConfigError::InvalidMineCount]);
    }

    #[test]
    fn validate_accumulates_one_error_per_bad_field() {
        let errors = pending("0", "x", "-3").validate().unwrap_err();
        assert_eq!(
            errors,
            [
                ConfigError::InvalidDimension(Dimension::Rows),
                ConfigError::InvalidDimension(Dimension::Cols),
                ConfigError::InvalidMineCount,
            ]
        );
    }

    #[test]
    fn error_messages_are_human_readable() {
        assert_eq!(
            ConfigError::InvalidDimension(Dimension::Rows).to_string(),
            "rows must be a positive whole number"
        );
        assert_eq!(
            ConfigError::InvalidMineCount.to_string(),
            "mines must be a non-negative whole number smaller than rows x columns"
        );
    }
}
