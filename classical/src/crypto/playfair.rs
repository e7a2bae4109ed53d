use lab_core::crypto::cipher_traits::{CipherAlgorithm, Direction, SimulationOutput, TracedCipher};
use lab_core::crypto::errors::LabError;
use lab_core::crypto::trace::Trace;
use serde::Serialize;

pub const FILLER: char = 'X';
const SIZE: usize = 5;

pub type Matrix = [[char; SIZE]; SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DigramRule {
    SameRow,
    SameColumn,
    Rectangle,
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PlayfairStep {
    MatrixGeneration {
        description: String,
        key: String,
        matrix: Matrix,
    },
    MessageFormatting {
        description: String,
        word: String,
        formatted: String,
        digrams: Vec<String>,
        intermediate_result: String,
    },
    Digram {
        description: String,
        input_digram: String,
        output_digram: String,
        rule: DigramRule,
        first_position: Option<[usize; 2]>,
        second_position: Option<[usize; 2]>,
        intermediate_result: String,
    },
    Final {
        description: String,
        final_result: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayfairSimulation {
    pub direction: Direction,
    pub final_result: String,
    pub matrix: Matrix,
    pub input_text: String,
    pub steps: Trace<PlayfairStep>,
}

impl SimulationOutput for PlayfairSimulation {
    fn final_output(&self) -> &str {
        &self.final_result
    }
}

/// A formatted word: uppercase, J merged into I, split into digrams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedWord {
    pub chars: Vec<char>,
    pub inserted: usize,
    pub padded: bool,
}

impl FormattedWord {
    pub fn digrams(&self) -> Vec<String> {
        self.chars.chunks(2).map(|pair| pair.iter().collect()).collect()
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

fn normalize(c: char) -> char {
    match c.to_ascii_uppercase() {
        'J' => 'I',
        other => other,
    }
}

/// Encryption separates doubled letters inside a digram with the filler;
/// both directions pad an odd-length word.
pub fn format_word(word: &str, direction: Direction) -> FormattedWord {
    let chars: Vec<char> = word.chars().map(normalize).collect();
    let mut out = Vec::with_capacity(chars.len() + 2);
    let mut inserted = 0;

    match direction {
        Direction::Encrypt => {
            let mut i = 0;
            while i < chars.len() {
                out.push(chars[i]);
                match chars.get(i + 1) {
                    Some(&next) if next == chars[i] => {
                        out.push(FILLER);
                        inserted += 1;
                        i += 1;
                    }
                    Some(&next) => {
                        out.push(next);
                        i += 2;
                    }
                    None => i += 1,
                }
            }
        }
        Direction::Decrypt => out.extend(chars),
    }

    let padded = out.len() % 2 == 1;
    if padded {
        out.push(FILLER);
    }

    FormattedWord {
        chars: out,
        inserted,
        padded,
    }
}

pub struct Playfair {
    key: String,
    matrix: Matrix,
}

impl Playfair {
    /// Key letters (deduplicated, J as I) followed by the rest of the alphabet.
    /// Characters of the key that are not ASCII letters are ignored.
    pub fn new(key: &str) -> Self {
        let mut seen = Vec::with_capacity(SIZE * SIZE);
        let candidates = key
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(normalize)
            .chain(('A'..='Z').filter(|&c| c != 'J'));
        for c in candidates {
            if !seen.contains(&c) {
                seen.push(c);
            }
        }

        let mut matrix = [[' '; SIZE]; SIZE];
        for (index, c) in seen.into_iter().enumerate() {
            matrix[index / SIZE][index % SIZE] = c;
        }

        Playfair {
            key: key.to_string(),
            matrix,
        }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn position(&self, c: char) -> Option<(usize, usize)> {
        self.matrix.iter().enumerate().find_map(|(row, cells)| {
            cells.iter().position(|&cell| cell == c).map(|col| (row, col))
        })
    }

    /// Applies the digram rules. Pairs containing a character outside the
    /// matrix pass through unchanged.
    pub fn transform_digram(&self, a: char, b: char, direction: Direction) -> (char, char, DigramRule) {
        let (Some((r1, c1)), Some((r2, c2))) = (self.position(a), self.position(b)) else {
            return (a, b, DigramRule::PassThrough);
        };
        let step = match direction {
            Direction::Encrypt => 1,
            Direction::Decrypt => SIZE - 1,
        };

        if r1 == r2 {
            (
                self.matrix[r1][(c1 + step) % SIZE],
                self.matrix[r2][(c2 + step) % SIZE],
                DigramRule::SameRow,
            )
        } else if c1 == c2 {
            (
                self.matrix[(r1 + step) % SIZE][c1],
                self.matrix[(r2 + step) % SIZE][c2],
                DigramRule::SameColumn,
            )
        } else {
            (self.matrix[r1][c2], self.matrix[r2][c1], DigramRule::Rectangle)
        }
    }

    fn apply(&self, text: &str, direction: Direction) -> String {
        text.split(' ')
            .map(|word| {
                format_word(word, direction)
                    .chars
                    .chunks(2)
                    .flat_map(|pair| {
                        let (a, b, _) = self.transform_digram(pair[0], pair[1], direction);
                        [a, b]
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl CipherAlgorithm for Playfair {
    fn encrypt(&self, text: &str) -> Result<String, LabError> {
        Ok(self.apply(text, Direction::Encrypt))
    }

    fn decrypt(&self, text: &str) -> Result<String, LabError> {
        Ok(self.apply(text, Direction::Decrypt))
    }
}

fn position_label(position: Option<(usize, usize)>) -> String {
    position.map_or_else(|| "not in matrix".to_string(), |(r, c)| format!("({r}, {c})"))
}

impl TracedCipher for Playfair {
    type Simulation = PlayfairSimulation;

    fn simulate(&self, text: &str, direction: Direction) -> Result<PlayfairSimulation, LabError> {
        let mut steps = Trace::new();
        steps.push(PlayfairStep::MatrixGeneration {
            description: format!("5x5 matrix from key '{}' (J merged into I)", self.key),
            key: self.key.clone(),
            matrix: self.matrix,
        });

        // Форматирование по словам, пробелы сохраняются
        let words: Vec<&str> = text.split(' ').collect();
        let mut formatted_words = Vec::with_capacity(words.len());
        let mut formatted_message = String::new();
        for (index, word) in words.iter().enumerate() {
            if index > 0 {
                formatted_message.push(' ');
            }
            let formatted = format_word(word, direction);
            formatted_message.push_str(&formatted.as_string());

            let description = if word.is_empty() {
                format!("Word {}: empty, space kept", index + 1)
            } else {
                format!(
                    "Word {} ('{word}'): {} filler(s) between doubled letters, {}",
                    index + 1,
                    formatted.inserted,
                    if formatted.padded { "padded to even length" } else { "even length" }
                )
            };
            steps.push(PlayfairStep::MessageFormatting {
                description,
                word: word.to_string(),
                formatted: formatted.as_string(),
                digrams: formatted.digrams(),
                intermediate_result: formatted_message.clone(),
            });
            formatted_words.push(formatted);
        }

        let mut result = String::with_capacity(formatted_message.len());
        for (index, formatted) in formatted_words.iter().enumerate() {
            if index > 0 {
                result.push(' ');
            }
            for pair in formatted.chars.chunks(2) {
                let (a, b) = (pair[0], pair[1]);
                let (first, second) = (self.position(a), self.position(b));
                let (x, y, rule) = self.transform_digram(a, b, direction);
                result.push(x);
                result.push(y);

                let rule_text = match rule {
                    DigramRule::SameRow => "same row, shift along the row",
                    DigramRule::SameColumn => "same column, shift along the column",
                    DigramRule::Rectangle => "rectangle, swap columns",
                    DigramRule::PassThrough => "character outside the matrix, pair kept",
                };
                steps.push(PlayfairStep::Digram {
                    description: format!(
                        "'{a}{b}': '{a}' at {}, '{b}' at {}; {rule_text} -> '{x}{y}'",
                        position_label(first),
                        position_label(second)
                    ),
                    input_digram: [a, b].iter().collect(),
                    output_digram: [x, y].iter().collect(),
                    rule,
                    first_position: first.map(|(r, c)| [r, c]),
                    second_position: second.map(|(r, c)| [r, c]),
                    intermediate_result: result.clone(),
                });
            }
        }

        steps.push(PlayfairStep::Final {
            description: format!("Result: '{result}'"),
            final_result: result.clone(),
        });

        Ok(PlayfairSimulation {
            direction,
            final_result: result,
            matrix: self.matrix,
            input_text: text.to_string(),
            steps,
        })
    }
}
