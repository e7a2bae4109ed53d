use serde::{Serialize, Serializer};

/// Состояние AES: state[столбец][строка], заполняется по столбцам.
pub type State = [[u8; 4]; 4];

pub type Word = [u8; 4];

pub fn block_to_state(block: &[u8; 16]) -> State {
    let mut state = [[0u8; 4]; 4];
    for (c, column) in state.iter_mut().enumerate() {
        column.copy_from_slice(&block[c * 4..c * 4 + 4]);
    }
    state
}

pub fn state_to_block(state: &State) -> [u8; 16] {
    let mut block = [0u8; 16];
    for (c, column) in state.iter().enumerate() {
        block[c * 4..c * 4 + 4].copy_from_slice(column);
    }
    block
}

/// Представление состояния только для чтения: сериализуется как четыре строки
/// двузначных hex-ячеек.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matrix(pub State);

impl Matrix {
    pub fn rows(&self) -> [[u8; 4]; 4] {
        let mut rows = [[0u8; 4]; 4];
        for (c, column) in self.0.iter().enumerate() {
            for (r, &byte) in column.iter().enumerate() {
                rows[r][c] = byte;
            }
        }
        rows
    }
}

impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<Vec<String>> = self
            .rows()
            .iter()
            .map(|row| row.iter().map(|b| format!("{b:02x}")).collect())
            .collect();
        rows.serialize(serializer)
    }
}
