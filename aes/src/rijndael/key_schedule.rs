use crate::rijndael::sbox::{sbox, RCON};
use crate::rijndael::state::{State, Word};
use crate::rijndael::steps::AesStep;
use lab_core::crypto::key_expansion::KeyExpansion;
use lab_core::crypto::trace::Trace;

pub const KEY_WORDS: usize = 4;
pub const ROUNDS: usize = 10;
pub const TOTAL_WORDS: usize = KEY_WORDS * (ROUNDS + 1);

/// How word W[index] was obtained from W[index-1] and W[index-4].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDerivation {
    pub index: usize,
    pub previous: Word,
    pub back_four: Word,
    pub rot_word: Option<Word>,
    pub sub_word: Option<Word>,
    pub rcon: Option<Word>,
    pub temp: Word,
    pub word: Word,
}

#[derive(Debug, Clone)]
pub struct KeySchedule {
    words: Vec<Word>,
    derivations: Vec<WordDerivation>,
}

impl KeySchedule {
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn derivations(&self) -> &[WordDerivation] {
        &self.derivations
    }

    /// Раундовый ключ k: столбцы W[4k..4k+3].
    pub fn round_key(&self, round: usize) -> Option<State> {
        let words = self.words.get(round * KEY_WORDS..(round + 1) * KEY_WORDS)?;
        Some(words_to_state(words))
    }

    pub fn round_keys(&self) -> Vec<State> {
        self.words.chunks_exact(KEY_WORDS).map(words_to_state).collect()
    }
}

fn words_to_state(words: &[Word]) -> State {
    let mut state = [[0u8; 4]; 4];
    state.copy_from_slice(words);
    state
}

pub fn rot_word(word: Word) -> Word {
    [word[1], word[2], word[3], word[0]]
}

pub fn sub_word(word: Word) -> Word {
    word.map(sbox)
}

fn xor_words(a: Word, b: Word) -> Word {
    [a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
}

/// Генерация всех 44 слов расписания ключей AES-128
pub fn expand_key(key: &[u8; 16]) -> KeySchedule {
    let mut words: Vec<Word> = key
        .chunks_exact(4)
        .map(|chunk| [chunk[0], chunk[1], chunk[2], chunk[3]])
        .collect();
    let mut derivations = Vec::with_capacity(TOTAL_WORDS - KEY_WORDS);

    for index in KEY_WORDS..TOTAL_WORDS {
        let previous = words[index - 1];
        let back_four = words[index - KEY_WORDS];

        let (rot, sub, rcon, temp) = if index % KEY_WORDS == 0 {
            let rot = rot_word(previous);
            let sub = sub_word(rot);
            let rcon = [RCON[index / KEY_WORDS], 0, 0, 0];
            (Some(rot), Some(sub), Some(rcon), xor_words(sub, rcon))
        } else {
            (None, None, None, previous)
        };

        let word = xor_words(back_four, temp);
        words.push(word);
        derivations.push(WordDerivation {
            index,
            previous,
            back_four,
            rot_word: rot,
            sub_word: sub,
            rcon,
            temp,
            word,
        });
    }

    KeySchedule { words, derivations }
}

pub struct AesKeyExpansion;

impl KeyExpansion for AesKeyExpansion {
    type Key = [u8; 16];
    type RoundKey = State;
    type Step = AesStep;

    fn generate_round_keys(&self, key: &[u8; 16], trace: &mut Trace<AesStep>) -> Vec<State> {
        let schedule = expand_key(key);

        trace.push(AesStep::key_words(&schedule.words()[..KEY_WORDS]));
        for derivation in schedule.derivations() {
            trace.push(AesStep::from(derivation));
        }

        let round_keys = schedule.round_keys();
        trace.push(AesStep::round_keys(&round_keys));
        round_keys
    }
}
