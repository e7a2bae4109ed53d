use crate::crypto::errors::LabError;
use bitvec::prelude::{BitSlice, BitVec};

/// Битовая строка, старший бит первым (как в таблицах FIPS).
pub type Bits = BitVec;

/// Перестановка по таблице: бит i результата = бит table[i] входа.
/// Таблицы индексируются с 1, длина результата = table.len().
pub fn permute(bits: &BitSlice, table: &[usize]) -> Bits {
    table.iter().map(|&pos| bits[pos - 1]).collect()
}

pub fn xor(left: &BitSlice, right: &BitSlice) -> Result<Bits, LabError> {
    if left.len() != right.len() {
        return Err(LabError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(left
        .iter()
        .by_vals()
        .zip(right.iter().by_vals())
        .map(|(a, b)| a ^ b)
        .collect())
}

/// Циклический сдвиг влево на n бит.
pub fn shift_left_circular(bits: &BitSlice, n: usize) -> Bits {
    let mut shifted = bits.to_bitvec();
    if !shifted.is_empty() {
        let by = n % shifted.len();
        shifted.rotate_left(by);
    }
    shifted
}

/// Байты UTF-8 строки `text`, обрезанные до `block_bytes` и дополненные справа `filler`.
pub fn text_to_block(text: &str, block_bytes: usize, filler: u8) -> Vec<u8> {
    let mut block: Vec<u8> = text.bytes().take(block_bytes).collect();
    block.resize(block_bytes, filler);
    block
}

/// Всегда ровно `block_bytes * 8` бит; короткий текст дополняется пробелами.
pub fn text_to_bits(text: &str, block_bytes: usize) -> Bits {
    bytes_to_bits(&text_to_block(text, block_bytes, b' '))
}

pub fn bytes_to_bits(input: &[u8]) -> Bits {
    let mut bits = BitVec::with_capacity(input.len() * 8);
    for &byte in input {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1 != 0);
        }
    }
    bits
}

pub fn bits_to_bytes(bits: &BitSlice) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len() / 8);

    for chunk in bits.chunks(8) {
        let mut byte = 0;
        for (i, bit) in chunk.iter().by_vals().enumerate() {
            if bit {
                byte |= 1 << (7 - i);
            }
        }
        bytes.push(byte);
    }
    bytes
}

/// Старшие разряды первыми, заглавные буквы, ровно len/4 цифр с ведущими нулями.
pub fn bits_to_hex(bits: &BitSlice) -> String {
    let pad = (4 - bits.len() % 4) % 4;
    let mut aligned: Bits = BitVec::repeat(false, pad);
    aligned.extend_from_bitslice(bits);

    aligned
        .chunks(4)
        .map(|nibble| {
            let value = nibble
                .iter()
                .by_vals()
                .fold(0u32, |acc, bit| (acc << 1) | bit as u32);
            char::from_digit(value, 16)
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('0')
        })
        .collect()
}

/// Разбирает ровно `bit_len / 4` шестнадцатеричных цифр (пробелы игнорируются).
pub fn hex_to_bits(input: &str, bit_len: usize) -> Result<Bits, LabError> {
    let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let invalid = || LabError::InvalidHex {
        input: input.to_string(),
        expected: bit_len / 4,
    };

    if digits.len() != bit_len / 4 {
        return Err(invalid());
    }

    let mut bits = BitVec::with_capacity(bit_len);
    for c in digits.chars() {
        let value = c.to_digit(16).ok_or_else(invalid)?;
        for i in (0..4).rev() {
            bits.push((value >> i) & 1 != 0);
        }
    }
    Ok(bits)
}

pub fn bits_to_string(bits: &BitSlice) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Текст расшифрованного блока (с заменой невалидного UTF-8) без хвостового `filler`.
pub fn block_to_text(block: &[u8], filler: u8) -> String {
    let end = block
        .iter()
        .rposition(|&b| b != filler)
        .map_or(0, |i| i + 1);
    String::from_utf8_lossy(&block[..end]).into_owned()
}
