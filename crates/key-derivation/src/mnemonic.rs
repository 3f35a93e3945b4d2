//! Mnemonic codec.
//!
//! A 32-byte key seed is split into 11-bit groups (least significant bits
//! first) and each group indexes the BIP-39 English word list, giving 24
//! words. A 25th word is derived the same way from the first 11 bits of the
//! seed's SHA-512/256 digest and acts as a checksum.

use bip39::Language;
use latinum_primitives::hash::sha512_256;
use zeroize::Zeroizing;

use crate::error::MnemonicError;

/// Length of the key seed encoded by a mnemonic.
pub const SEED_LEN: usize = 32;

/// Number of words carrying key material.
const KEY_WORDS: usize = 24;

/// Total number of words in a mnemonic, including the checksum word.
pub const MNEMONIC_WORDS: usize = KEY_WORDS + 1;

const WORD_BITS: u32 = 11;
const WORD_MASK: u32 = (1 << WORD_BITS) - 1;

/// Regroups bytes into 11-bit values, least significant bits first. A
/// trailing partial group is kept.
fn to_u11(bytes: &[u8]) -> Vec<u16> {
    let mut out = Vec::with_capacity(bytes.len() * 8 / WORD_BITS as usize + 1);
    let mut acc: u32 = 0;
    let mut acc_bits: u32 = 0;
    for &b in bytes {
        acc |= (b as u32) << acc_bits;
        acc_bits += 8;
        if acc_bits >= WORD_BITS {
            out.push((acc & WORD_MASK) as u16);
            acc >>= WORD_BITS;
            acc_bits -= WORD_BITS;
        }
    }
    if acc_bits > 0 {
        out.push(acc as u16);
    }
    out
}

/// Inverse of [`to_u11`]. A trailing partial byte is kept.
fn from_u11(groups: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(groups.len() * WORD_BITS as usize / 8 + 1);
    let mut acc: u32 = 0;
    let mut acc_bits: u32 = 0;
    for &g in groups {
        acc |= (g as u32) << acc_bits;
        acc_bits += WORD_BITS;
        while acc_bits >= 8 {
            out.push((acc & 0xff) as u8);
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        out.push(acc as u8);
    }
    out
}

fn checksum_word(seed: &[u8]) -> &'static str {
    let digest = sha512_256(seed);
    let first = to_u11(&digest)[0];
    Language::English.word_list()[first as usize]
}

/// Encodes a key seed as a 25-word phrase.
pub fn mnemonic_from_seed(seed: &[u8; SEED_LEN]) -> String {
    let list = Language::English.word_list();
    let mut words: Vec<&str> = to_u11(seed).into_iter().map(|i| list[i as usize]).collect();
    words.push(checksum_word(seed));
    words.join(" ")
}

/// Decodes a 25-word phrase back into its key seed, validating the word
/// count, every word, the padding and the checksum word.
pub fn seed_from_mnemonic(phrase: &str) -> Result<Zeroizing<[u8; SEED_LEN]>, MnemonicError> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.len() != MNEMONIC_WORDS {
        return Err(MnemonicError::WrongWordCount {
            expected: MNEMONIC_WORDS,
            actual: words.len(),
        });
    }

    let groups = words[..KEY_WORDS]
        .iter()
        .map(|w| {
            Language::English
                .find_word(w)
                .ok_or_else(|| MnemonicError::UnknownWord((*w).to_owned()))
        })
        .collect::<Result<Vec<u16>, _>>()?;

    // 24 words carry 264 bits: the seed plus one zero pad byte.
    let bytes = Zeroizing::new(from_u11(&groups));
    if bytes.len() != SEED_LEN + 1 || bytes[SEED_LEN] != 0 {
        return Err(MnemonicError::Undecodable);
    }

    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    seed.copy_from_slice(&bytes[..SEED_LEN]);

    if checksum_word(seed.as_slice()) != words[KEY_WORDS] {
        return Err(MnemonicError::ChecksumMismatch);
    }
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_u11_regrouping_inverts() {
        let bytes = [0xde, 0xad, 0xbe, 0xef, 0x01];
        let back = from_u11(&to_u11(&bytes));
        assert_eq!(&back[..bytes.len()], &bytes);
    }

    #[test]
    fn test_zero_seed_encodes_to_abandon() {
        let phrase = mnemonic_from_seed(&[0; SEED_LEN]);
        let words: Vec<&str> = phrase.split(' ').collect();
        assert_eq!(words.len(), MNEMONIC_WORDS);
        assert!(words[..KEY_WORDS].iter().all(|w| *w == "abandon"));
    }

    #[test]
    fn test_sdk_mnemonic_decodes_to_known_seed() {
        let phrase = "advice pudding treat near rule blouse same whisper inner electric quit \
            surface sunny dismiss leader blood seat clown cost exist hospital century reform \
            able sponsor";
        let seed = seed_from_mnemonic(phrase).unwrap();
        let expected: [u8; SEED_LEN] = [
            0x20, 0x48, 0xab, 0xcf, 0x39, 0x99, 0xde, 0x60, 0xdc, 0x97, 0xfa, 0xa3, 0xdb, 0x91,
            0x5f, 0xa3, 0xbd, 0x6c, 0xfd, 0xd0, 0xef, 0x17, 0x12, 0x06, 0x4b, 0x61, 0xfc, 0xf4,
            0xb6, 0x95, 0x88, 0x56,
        ];
        assert_eq!(*seed, expected);
    }

    #[test]
    fn test_rejects_wrong_word_count() {
        let err = seed_from_mnemonic("abandon abandon abandon").unwrap_err();
        assert_eq!(
            err,
            MnemonicError::WrongWordCount {
                expected: 25,
                actual: 3
            }
        );
    }

    #[test]
    fn test_rejects_unknown_word() {
        let mut words: Vec<String> = mnemonic_from_seed(&[3; SEED_LEN])
            .split(' ')
            .map(str::to_owned)
            .collect();
        words[5] = "latinum".to_owned();
        let err = seed_from_mnemonic(&words.join(" ")).unwrap_err();
        assert_eq!(err, MnemonicError::UnknownWord("latinum".to_owned()));
    }

    #[test]
    fn test_rejects_nonzero_padding() {
        // The 24th word carries the top 8 bits of the pad byte; "zoo" sets them all.
        let mut words: Vec<String> = mnemonic_from_seed(&[0; SEED_LEN])
            .split(' ')
            .map(str::to_owned)
            .collect();
        words[KEY_WORDS - 1] = "zoo".to_owned();
        let err = seed_from_mnemonic(&words.join(" ")).unwrap_err();
        assert_eq!(err, MnemonicError::Undecodable);
    }

    #[test]
    fn test_rejects_bad_checksum() {
        let seed = [11; SEED_LEN];
        let mut words: Vec<String> = mnemonic_from_seed(&seed)
            .split(' ')
            .map(str::to_owned)
            .collect();
        let replacement = if words[KEY_WORDS] == "abandon" {
            "ability"
        } else {
            "abandon"
        };
        words[KEY_WORDS] = replacement.to_owned();
        let err = seed_from_mnemonic(&words.join(" ")).unwrap_err();
        assert_eq!(err, MnemonicError::ChecksumMismatch);
    }

    proptest! {
        #[test]
        fn proptest_phrase_decodes_to_seed(seed in any::<[u8; SEED_LEN]>()) {
            let phrase = mnemonic_from_seed(&seed);
            let decoded = seed_from_mnemonic(&phrase).unwrap();
            prop_assert_eq!(*decoded, seed);
        }
    }
}
