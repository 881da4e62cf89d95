//! Strand value types for the simulated DNA alphabet.
//!
//! A strand is a fixed-length sequence of symbols drawn from `{0,1,2,3}`
//! with a Watson-Crick-style complement pairing (0↔1, 2↔3). Strands split
//! into a 5'-half and a 3'-half; hybridisation checks elsewhere in the crate
//! operate on those halves. Symbols are validated at construction, so
//! `complement` is total on any constructed value.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Number of symbols in a full vertex strand.
pub const STRAND_LEN: usize = 20;

/// Number of symbols in each strand half.
pub const HALF_LEN: usize = STRAND_LEN / 2;

/// Symbol-wise complement table: 0↔1, 2↔3. Involutive.
const COMPLEMENT: [u8; 4] = [1, 0, 3, 2];

/// Errors raised while constructing strands from untrusted input.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum StrandError {
    /// A symbol fell outside the `{0,1,2,3}` alphabet.
    #[error("symbol `{symbol}` at position {position} is outside the {{0,1,2,3}} alphabet")]
    InvalidSymbol {
        /// The offending symbol, as supplied.
        symbol: char,
        /// Zero-based position of the offending symbol.
        position: usize,
    },
    /// The input did not contain the expected number of symbols.
    #[error("expected {expected} symbols, got {got}")]
    WrongLength {
        /// Number of symbols the target type requires.
        expected: usize,
        /// Number of symbols actually supplied.
        got: usize,
    },
}

/// A fixed-length simulated oligomer over the `{0,1,2,3}` alphabet.
///
/// # Examples
/// ```
/// use anneal_core::Strand;
///
/// let strand: Strand = "01230123012301230123".parse()?;
/// assert_eq!(strand.complement().complement(), strand);
/// assert_eq!(strand.to_string(), "01230123012301230123");
/// # Ok::<(), anneal_core::StrandError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Strand([u8; STRAND_LEN]);

/// One half of a [`Strand`], either the 5' or the 3' side.
///
/// # Examples
/// ```
/// use anneal_core::{Strand, HALF_LEN};
///
/// let strand: Strand = "00000000001111111111".parse()?;
/// assert_eq!(strand.five_half().to_string(), "0000000000");
/// assert_eq!(strand.three_half().to_string(), "1111111111");
/// # Ok::<(), anneal_core::StrandError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Half([u8; HALF_LEN]);

impl Strand {
    /// Builds a strand from validated raw symbols.
    ///
    /// Callers must only pass symbols in `0..4`; the public constructors
    /// ([`Self::from_symbols`] and [`FromStr`]) enforce this.
    pub(crate) fn from_raw(symbols: [u8; STRAND_LEN]) -> Self {
        debug_assert!(symbols.iter().all(|&s| s < 4));
        Self(symbols)
    }

    /// Validates and builds a strand from a symbol slice.
    ///
    /// # Errors
    /// Returns [`StrandError::WrongLength`] unless exactly [`STRAND_LEN`]
    /// symbols are supplied, and [`StrandError::InvalidSymbol`] when a symbol
    /// falls outside `{0,1,2,3}`.
    ///
    /// # Examples
    /// ```
    /// use anneal_core::{Strand, StrandError};
    ///
    /// let strand = Strand::from_symbols(&[1; 20])?;
    /// assert_eq!(strand.to_string(), "11111111111111111111");
    /// assert!(matches!(
    ///     Strand::from_symbols(&[4; 20]),
    ///     Err(StrandError::InvalidSymbol { position: 0, .. })
    /// ));
    /// # Ok::<(), StrandError>(())
    /// ```
    pub fn from_symbols(symbols: &[u8]) -> Result<Self, StrandError> {
        let symbols: [u8; STRAND_LEN] =
            symbols
                .try_into()
                .map_err(|_| StrandError::WrongLength {
                    expected: STRAND_LEN,
                    got: symbols.len(),
                })?;
        if let Some(position) = symbols.iter().position(|&s| s >= 4) {
            return Err(StrandError::InvalidSymbol {
                symbol: (b'0' + symbols[position]) as char,
                position,
            });
        }
        Ok(Self(symbols))
    }

    /// Joins a 5'-half and a 3'-half back into a full strand.
    ///
    /// # Examples
    /// ```
    /// use anneal_core::Strand;
    ///
    /// let strand: Strand = "01010101012323232323".parse()?;
    /// let rejoined = Strand::from_halves(strand.five_half(), strand.three_half());
    /// assert_eq!(rejoined, strand);
    /// # Ok::<(), anneal_core::StrandError>(())
    /// ```
    #[must_use]
    pub fn from_halves(five: Half, three: Half) -> Self {
        let mut symbols = [0u8; STRAND_LEN];
        symbols[..HALF_LEN].copy_from_slice(&five.0);
        symbols[HALF_LEN..].copy_from_slice(&three.0);
        Self(symbols)
    }

    /// Returns the first [`HALF_LEN`] symbols (the 5'-half).
    #[must_use]
    pub fn five_half(&self) -> Half {
        let mut half = [0u8; HALF_LEN];
        half.copy_from_slice(&self.0[..HALF_LEN]);
        Half(half)
    }

    /// Returns the last [`HALF_LEN`] symbols (the 3'-half).
    #[must_use]
    pub fn three_half(&self) -> Half {
        let mut half = [0u8; HALF_LEN];
        half.copy_from_slice(&self.0[HALF_LEN..]);
        Half(half)
    }

    /// Applies the symbol-wise complement pairing.
    ///
    /// The pairing is involutive: applying it twice returns the original
    /// strand.
    ///
    /// # Examples
    /// ```
    /// use anneal_core::Strand;
    ///
    /// let strand: Strand = "00112233001122330011".parse()?;
    /// assert_eq!(strand.complement().to_string(), "11003322110033221100");
    /// # Ok::<(), anneal_core::StrandError>(())
    /// ```
    #[must_use]
    pub fn complement(&self) -> Self {
        let mut symbols = self.0;
        for symbol in &mut symbols {
            *symbol = COMPLEMENT[*symbol as usize];
        }
        Self(symbols)
    }

    /// Returns the raw symbols in 5'→3' order.
    #[must_use]
    pub fn symbols(&self) -> &[u8] {
        &self.0
    }
}

impl Half {
    /// Applies the symbol-wise complement pairing to this half.
    #[must_use]
    pub fn complement(&self) -> Self {
        let mut symbols = self.0;
        for symbol in &mut symbols {
            *symbol = COMPLEMENT[*symbol as usize];
        }
        Self(symbols)
    }

    /// Returns the raw symbols in 5'→3' order.
    #[must_use]
    pub fn symbols(&self) -> &[u8] {
        &self.0
    }
}

fn parse_symbols(text: &str, expected: usize, out: &mut [u8]) -> Result<(), StrandError> {
    if text.chars().count() != expected {
        return Err(StrandError::WrongLength {
            expected,
            got: text.chars().count(),
        });
    }
    for (position, (slot, symbol)) in out.iter_mut().zip(text.chars()).enumerate() {
        match symbol {
            '0'..='3' => *slot = symbol as u8 - b'0',
            _ => return Err(StrandError::InvalidSymbol { symbol, position }),
        }
    }
    Ok(())
}

impl FromStr for Strand {
    type Err = StrandError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut symbols = [0u8; STRAND_LEN];
        parse_symbols(text, STRAND_LEN, &mut symbols)?;
        Ok(Self(symbols))
    }
}

impl FromStr for Half {
    type Err = StrandError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut symbols = [0u8; HALF_LEN];
        parse_symbols(text, HALF_LEN, &mut symbols)?;
        Ok(Self(symbols))
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &symbol in &self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &symbol in &self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Strand(\"{self}\")")
    }
}

impl fmt::Debug for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Half(\"{self}\")")
    }
}
