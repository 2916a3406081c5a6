//! compact text forms of an id
//!
//! ids are written most significant digit first over a fixed alphabet. the
//! standard base 58 alphabet drops `0`, `O`, `I`, and `l` so tokens can be
//! read back by people without confusion.
//!
//! ```rust
//! use snowdrift_flake::codec;
//!
//! let token = codec::base58().encode(4198401).unwrap();
//! assert_eq!(codec::base58().decode(&token).unwrap(), 4198401);
//!
//! let token = codec::base62().encode(4198401).unwrap();
//! assert_eq!(codec::base62().decode(&token).unwrap(), 4198401);
//! ```

use std::sync::OnceLock;

use crate::error;

/// standard base 58 alphabet
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
/// standard base 62 alphabet
pub const BASE62_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

// i64::MAX in base 2 is the longest possible output
const MAX_ENCODED_LEN: usize = 63;

/// bijective i64 <-> string codec over an alphabet of `radix` symbols
#[derive(Clone)]
pub struct Encoding {
    radix: i64,
    encode: Vec<u8>,
    decode_map: [Option<u8>; 256],
}

impl Encoding {
    /// creates a codec from the given alphabet
    ///
    /// the alphabet must be exactly `radix` ascii characters long with no
    /// repeats and `radix` must be at least 2.
    pub fn new(alphabet: &str, radix: usize) -> error::Result<Self> {
        let bytes = alphabet.as_bytes();

        // every symbol has to round trip through a single byte
        if !alphabet.is_ascii() || !(2..=128).contains(&radix) || bytes.len() != radix {
            return Err(error::Error::InvalidAlphabet { expected: radix });
        }

        let mut decode_map = [None; 256];

        for (index, byte) in bytes.iter().enumerate() {
            let slot = &mut decode_map[*byte as usize];

            if slot.is_some() {
                return Err(error::Error::InvalidAlphabet { expected: radix });
            }

            *slot = Some(index as u8);
        }

        Ok(Encoding {
            radix: radix as i64,
            encode: bytes.to_vec(),
            decode_map,
        })
    }

    /// panicking version of [`Encoding::new`] for alphabets known to be valid
    pub fn must_new(alphabet: &str, radix: usize) -> Self {
        match Self::new(alphabet, radix) {
            Ok(enc) => enc,
            Err(err) => panic!("{}", err),
        }
    }

    /// number of symbols in the alphabet
    pub fn radix(&self) -> usize {
        self.radix as usize
    }

    /// encodes a non negative id
    pub fn encode(&self, id: i64) -> error::Result<String> {
        if id < 0 {
            return Err(error::Error::NegativeId(id));
        }

        if id == 0 {
            return Ok(String::from(self.encode[0] as char));
        }

        let mut rem = id;
        let mut bin = Vec::with_capacity(MAX_ENCODED_LEN);

        while rem > 0 {
            bin.push(self.encode[(rem % self.radix) as usize]);
            rem /= self.radix;
        }

        Ok(bin.into_iter().rev().map(char::from).collect())
    }

    /// decodes a string produced by [`Encoding::encode`]
    pub fn decode(&self, s: &str) -> error::Result<i64> {
        if s.is_empty() {
            return Err(error::Error::EmptyInput);
        }

        let mut n: i64 = 0;

        for ch in s.chars() {
            let digit = u8::try_from(ch)
                .ok()
                .and_then(|b| self.decode_map[b as usize])
                .ok_or(error::Error::InvalidCharacter(ch))?;

            n = n.checked_mul(self.radix)
                .and_then(|n| n.checked_add(digit as i64))
                .ok_or(error::Error::Overflow)?;
        }

        Ok(n)
    }
}

impl std::fmt::Debug for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoding")
            .field("radix", &self.radix)
            .field("alphabet", &String::from_utf8_lossy(&self.encode))
            .finish()
    }
}

/// shared codec over [`BASE58_ALPHABET`]
pub fn base58() -> &'static Encoding {
    static BASE58: OnceLock<Encoding> = OnceLock::new();

    BASE58.get_or_init(|| Encoding::must_new(BASE58_ALPHABET, 58))
}

/// shared codec over [`BASE62_ALPHABET`]
pub fn base62() -> &'static Encoding {
    static BASE62: OnceLock<Encoding> = OnceLock::new();

    BASE62.get_or_init(|| Encoding::must_new(BASE62_ALPHABET, 62))
}
