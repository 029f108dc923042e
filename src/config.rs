use serde::Serialize;
use thiserror::Error;

/// Default playfield width in pixels.
pub const DEFAULT_GRID_WIDTH: u32 = 700;

/// Default playfield height in pixels.
pub const DEFAULT_GRID_HEIGHT: u32 = 700;

/// Default grid step; also the rendered size of a segment or food item.
pub const DEFAULT_CELL_SIZE: u32 = 50;

/// Default number of segments a fresh snake starts with.
pub const DEFAULT_BODY_PARTS: u32 = 3;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Fastest tick interval the scheduler accepts.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Rejected engine configuration.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("grid {axis} must be positive, got {value}")]
    EmptyGrid { axis: &'static str, value: u32 },
    #[error("grid {axis} {value} is not a multiple of cell size {cell_size}")]
    Misaligned {
        axis: &'static str,
        value: u32,
        cell_size: u32,
    },
    #[error("initial body length must be at least 1")]
    EmptyBody,
    #[error(
        "initial body of {body_length} cells of size {cell_size} does not fit in width {grid_width}"
    )]
    BodyTooLong {
        body_length: u32,
        cell_size: u32,
        grid_width: u32,
    },
    #[error("grid height {grid_height} leaves no room for the starting row at y = {cell_size}")]
    GridTooShort { grid_height: u32, cell_size: u32 },
    #[error("grid of {columns}x{rows} cells has no room for food")]
    GridTooSmall { columns: u32, rows: u32 },
    #[error("grid of {columns}x{rows} cells is too large")]
    GridTooLarge { columns: u32, rows: u32 },
}

/// Construction-time parameters of one game, in pixel units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct EngineConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell_size: u32,
    pub initial_body_length: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            initial_body_length: DEFAULT_BODY_PARTS,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new(
        grid_width: u32,
        grid_height: u32,
        cell_size: u32,
        initial_body_length: u32,
    ) -> Self {
        Self {
            grid_width,
            grid_height,
            cell_size,
            initial_body_length,
        }
    }

    /// Checks every construction constraint.
    ///
    /// Coordinates are stored as `i32`, so the pixel extent must also fit
    /// that range once the head steps one cell past the edge.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        for (axis, value) in [("width", self.grid_width), ("height", self.grid_height)] {
            if value == 0 {
                return Err(ConfigError::EmptyGrid { axis, value });
            }
            if value % self.cell_size != 0 {
                return Err(ConfigError::Misaligned {
                    axis,
                    value,
                    cell_size: self.cell_size,
                });
            }
        }

        if self.initial_body_length == 0 {
            return Err(ConfigError::EmptyBody);
        }

        let body_extent = u64::from(self.initial_body_length) * u64::from(self.cell_size);
        if body_extent >= u64::from(self.grid_width) {
            return Err(ConfigError::BodyTooLong {
                body_length: self.initial_body_length,
                cell_size: self.cell_size,
                grid_width: self.grid_width,
            });
        }

        if self.cell_size >= self.grid_height {
            return Err(ConfigError::GridTooShort {
                grid_height: self.grid_height,
                cell_size: self.cell_size,
            });
        }

        let limit = i64::from(i32::MAX);
        let overshoot = i64::from(self.cell_size);
        if i64::from(self.grid_width) + overshoot > limit
            || i64::from(self.grid_height) + overshoot > limit
        {
            let size = self.grid_size();
            return Err(ConfigError::GridTooLarge {
                columns: size.columns,
                rows: size.rows,
            });
        }

        Ok(())
    }

    /// Grid dimensions in cells.
    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        let cell = self.cell_size.max(1);
        GridSize {
            columns: self.grid_width / cell,
            rows: self.grid_height / cell,
        }
    }
}
