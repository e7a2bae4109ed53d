use lab_core::crypto::cipher_traits::{CipherAlgorithm, Direction, SimulationOutput, TracedCipher};
use lab_core::crypto::errors::LabError;
use lab_core::crypto::trace::Trace;
use serde::Serialize;

pub const FILLER: char = 'X';
pub const MAX_DEPTH: usize = 1024;

pub type Grid = Vec<Vec<Option<char>>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RailFenceStep {
    NoOp {
        description: String,
        depth: i64,
    },
    Init {
        description: String,
        text: String,
        depth: usize,
        columns: usize,
        padding: usize,
        padded_text: String,
    },
    /// One cell of the grid; the filled grid is `RailFenceSimulation::grid`.
    Write {
        description: String,
        current_char: char,
        row: usize,
        column: usize,
    },
    Read {
        description: String,
        current_char: char,
        row: usize,
        column: usize,
        intermediate_result: String,
    },
    Final {
        description: String,
        final_result: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct RailFenceSimulation {
    pub direction: Direction,
    pub final_result: String,
    pub input_text: String,
    pub grid: Grid,
    pub steps: Trace<RailFenceStep>,
}

impl SimulationOutput for RailFenceSimulation {
    fn final_output(&self) -> &str {
        &self.final_result
    }
}

/// Columnar rail fence: encryption writes the text down the columns of a
/// `depth`-row grid and reads it row by row; decryption does the reverse.
/// A depth of 1 or less leaves the text untouched.
pub struct RailFence {
    depth: i64,
}

/// Grid geometry for one run.
struct Layout {
    depth: usize,
    columns: usize,
    cells: Vec<char>,
    padding: usize,
}

impl RailFence {
    pub fn new(depth: i64) -> Self {
        RailFence { depth }
    }

    /// `None` when the run is a no-op.
    fn effective_depth(&self) -> Result<Option<usize>, LabError> {
        if self.depth <= 1 {
            return Ok(None);
        }
        match usize::try_from(self.depth) {
            Ok(depth) if depth <= MAX_DEPTH => Ok(Some(depth)),
            _ => Err(LabError::InvalidKey(format!(
                "rail depth {} exceeds the maximum of {MAX_DEPTH}",
                self.depth
            ))),
        }
    }

    fn layout(text: &str, depth: usize, direction: Direction) -> Result<Layout, LabError> {
        let mut cells: Vec<char> = text.chars().collect();
        let len = cells.len();
        let padding = match direction {
            Direction::Encrypt => (depth - len % depth) % depth,
            Direction::Decrypt if len % depth != 0 => {
                return Err(LabError::RailFenceLength { len, depth });
            }
            Direction::Decrypt => 0,
        };
        cells.extend(std::iter::repeat(FILLER).take(padding));

        Ok(Layout {
            depth,
            columns: cells.len() / depth,
            cells,
            padding,
        })
    }

    /// Порядок обхода ячеек: по столбцам при записи шифрования, по строкам при чтении.
    fn write_order(layout: &Layout, direction: Direction) -> Vec<(usize, usize)> {
        let (depth, columns) = (layout.depth, layout.columns);
        match direction {
            Direction::Encrypt => (0..columns).flat_map(|c| (0..depth).map(move |r| (r, c))).collect(),
            Direction::Decrypt => (0..depth).flat_map(|r| (0..columns).map(move |c| (r, c))).collect(),
        }
    }

    fn read_order(layout: &Layout, direction: Direction) -> Vec<(usize, usize)> {
        match direction {
            Direction::Encrypt => Self::write_order(layout, Direction::Decrypt),
            Direction::Decrypt => Self::write_order(layout, Direction::Encrypt),
        }
    }

    fn apply(&self, text: &str, direction: Direction) -> Result<String, LabError> {
        let Some(depth) = self.effective_depth()? else {
            return Ok(text.to_string());
        };
        let layout = Self::layout(text, depth, direction)?;

        let mut grid = vec![vec![' '; layout.columns]; layout.depth];
        for (&c, (r, col)) in layout.cells.iter().zip(Self::write_order(&layout, direction)) {
            grid[r][col] = c;
        }
        Ok(Self::read_order(&layout, direction)
            .into_iter()
            .map(|(r, c)| grid[r][c])
            .collect())
    }
}

impl CipherAlgorithm for RailFence {
    fn encrypt(&self, text: &str) -> Result<String, LabError> {
        self.apply(text, Direction::Encrypt)
    }

    fn decrypt(&self, text: &str) -> Result<String, LabError> {
        self.apply(text, Direction::Decrypt)
    }
}

impl TracedCipher for RailFence {
    type Simulation = RailFenceSimulation;

    fn simulate(&self, text: &str, direction: Direction) -> Result<RailFenceSimulation, LabError> {
        let mut steps = Trace::new();

        let Some(depth) = self.effective_depth()? else {
            steps.push(RailFenceStep::NoOp {
                description: format!("Depth {} is not greater than 1, text is returned unchanged", self.depth),
                depth: self.depth,
            });
            steps.push(RailFenceStep::Final {
                description: format!("Result: '{text}'"),
                final_result: text.to_string(),
            });
            return Ok(RailFenceSimulation {
                direction,
                final_result: text.to_string(),
                input_text: text.to_string(),
                grid: Vec::new(),
                steps,
            });
        };

        let layout = Self::layout(text, depth, direction)?;
        let padded_text: String = layout.cells.iter().collect();
        steps.push(RailFenceStep::Init {
            description: format!(
                "{} characters, depth {depth}: {} column(s), {} '{FILLER}' of padding",
                text.chars().count(),
                layout.columns,
                layout.padding
            ),
            text: text.to_string(),
            depth,
            columns: layout.columns,
            padding: layout.padding,
            padded_text: padded_text.clone(),
        });

        let mut grid: Grid = vec![vec![None; layout.columns]; layout.depth];
        for (&c, (row, column)) in layout.cells.iter().zip(Self::write_order(&layout, direction)) {
            grid[row][column] = Some(c);
            steps.push(RailFenceStep::Write {
                description: format!("Write '{c}' at row {row}, column {column}"),
                current_char: c,
                row,
                column,
            });
        }

        let mut result = String::with_capacity(layout.cells.len());
        for (row, column) in Self::read_order(&layout, direction) {
            let c = grid[row][column].unwrap_or(FILLER);
            result.push(c);
            steps.push(RailFenceStep::Read {
                description: format!("Read '{c}' from row {row}, column {column}"),
                current_char: c,
                row,
                column,
                intermediate_result: result.clone(),
            });
        }

        steps.push(RailFenceStep::Final {
            description: format!("Result: '{result}'"),
            final_result: result.clone(),
        });

        Ok(RailFenceSimulation {
            direction,
            final_result: result,
            input_text: padded_text,
            grid,
            steps,
        })
    }
}
