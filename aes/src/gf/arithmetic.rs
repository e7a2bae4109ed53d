//! Арифметика в GF(2^8) по модулю x^8 + x^4 + x^3 + x + 1.
//! Все функции `const`, чтобы S-box собирался на этапе компиляции.

/// Младшие 8 бит неприводимого полинома 0x11B.
pub const REDUCTION: u8 = 0x1b;

/// Сложение в GF(2^8): XOR поразрядно
pub const fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// xtime: умножение на x с приведением по модулю
pub const fn mul_by_2(b: u8) -> u8 {
    let shifted = b << 1;
    if b & 0x80 != 0 {
        shifted ^ REDUCTION
    } else {
        shifted
    }
}

pub const fn mul_by_3(b: u8) -> u8 {
    add(mul_by_2(b), b)
}

/// Умножение "русского крестьянина": 8 итераций сдвига и сложения
pub const fn mul(a: u8, b: u8) -> u8 {
    let mut a = a;
    let mut b = b;
    let mut product = 0u8;
    let mut i = 0;
    while i < 8 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = mul_by_2(a);
        b >>= 1;
        i += 1;
    }
    product
}

/// Возведение в степень квадрированием
pub const fn pow(base: u8, exp: u8) -> u8 {
    let mut result = 1u8;
    let mut base = base;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul(result, base);
        }
        base = mul(base, base);
        exp >>= 1;
    }
    result
}

/// Обратный элемент: a^254 (0 -> 0)
pub const fn inverse(a: u8) -> u8 {
    if a == 0 {
        0
    } else {
        pow(a, 254)
    }
}

/// Столбец на MDS-матрицу {2,3,1,1} (циклически по строкам)
pub const fn mix_column(col: [u8; 4]) -> [u8; 4] {
    [
        mul_by_2(col[0]) ^ mul_by_3(col[1]) ^ col[2] ^ col[3],
        col[0] ^ mul_by_2(col[1]) ^ mul_by_3(col[2]) ^ col[3],
        col[0] ^ col[1] ^ mul_by_2(col[2]) ^ mul_by_3(col[3]),
        mul_by_3(col[0]) ^ col[1] ^ col[2] ^ mul_by_2(col[3]),
    ]
}

/// Обратная матрица {14,11,13,9}
pub const fn inv_mix_column(col: [u8; 4]) -> [u8; 4] {
    [
        mul(col[0], 0x0e) ^ mul(col[1], 0x0b) ^ mul(col[2], 0x0d) ^ mul(col[3], 0x09),
        mul(col[0], 0x09) ^ mul(col[1], 0x0e) ^ mul(col[2], 0x0b) ^ mul(col[3], 0x0d),
        mul(col[0], 0x0d) ^ mul(col[1], 0x09) ^ mul(col[2], 0x0e) ^ mul(col[3], 0x0b),
        mul(col[0], 0x0b) ^ mul(col[1], 0x0d) ^ mul(col[2], 0x09) ^ mul(col[3], 0x0e),
    ]
}
