use serde::{Deserialize, Serialize};

/// A single-symbol allele call: the four nucleotides, the no-call symbol `N`,
/// and the six IUPAC two-base ambiguity codes used for heterozygous diploid
/// calls.
///
/// Every ambiguity code maps bijectively to one unordered pair of distinct
/// bases; every homozygous code pairs with itself. See [`AlleleCode::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlleleCode {
    A,
    C,
    G,
    T,
    /// No-call / masked base
    N,
    /// A/C heterozygote
    M,
    /// A/G heterozygote
    R,
    /// A/T heterozygote
    W,
    /// C/G heterozygote
    S,
    /// C/T heterozygote
    Y,
    /// G/T heterozygote
    K,
}

impl AlleleCode {
    /// Decode a symbol, case-insensitively. Anything outside the eleven
    /// recognized symbols decodes to `N`, so the conversion is total.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Self {
        match symbol.to_ascii_uppercase() {
            'A' => Self::A,
            'C' => Self::C,
            'G' => Self::G,
            'T' => Self::T,
            'M' => Self::M,
            'R' => Self::R,
            'W' => Self::W,
            'S' => Self::S,
            'Y' => Self::Y,
            'K' => Self::K,
            _ => Self::N,
        }
    }

    /// The uppercase symbol for this code.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::G => 'G',
            Self::T => 'T',
            Self::N => 'N',
            Self::M => 'M',
            Self::R => 'R',
            Self::W => 'W',
            Self::S => 'S',
            Self::Y => 'Y',
            Self::K => 'K',
        }
    }

    /// True for the six two-base ambiguity codes.
    #[must_use]
    pub fn is_het(self) -> bool {
        matches!(self, Self::M | Self::R | Self::W | Self::S | Self::Y | Self::K)
    }

    /// True for an unambiguous nucleotide (A, C, G, or T).
    #[must_use]
    pub fn is_base(self) -> bool {
        matches!(self, Self::A | Self::C | Self::G | Self::T)
    }

    /// Decompose into the unordered pair of constituent haploid bases.
    ///
    /// Homozygous codes (and `N`) decompose to themselves twice; ambiguity
    /// codes decompose to their defining pair.
    #[must_use]
    pub fn split(self) -> (Self, Self) {
        match self {
            Self::M => (Self::A, Self::C),
            Self::R => (Self::A, Self::G),
            Self::W => (Self::A, Self::T),
            Self::S => (Self::C, Self::G),
            Self::Y => (Self::C, Self::T),
            Self::K => (Self::G, Self::T),
            other => (other, other),
        }
    }

    /// The degenerate diploid code for two haploid calls at the same site.
    ///
    /// Identical calls collapse to themselves; any pairing that involves a
    /// no-call, or that cannot be expressed as a two-base ambiguity code,
    /// yields `N`; two distinct pure bases map to their unique ambiguity
    /// code.
    #[must_use]
    pub fn degenerate(a: Self, b: Self) -> Self {
        if a == b {
            return a;
        }
        if !a.is_base() || !b.is_base() {
            return Self::N;
        }
        match (a, b) {
            (Self::A, Self::C) | (Self::C, Self::A) => Self::M,
            (Self::A, Self::G) | (Self::G, Self::A) => Self::R,
            (Self::A, Self::T) | (Self::T, Self::A) => Self::W,
            (Self::C, Self::G) | (Self::G, Self::C) => Self::S,
            (Self::C, Self::T) | (Self::T, Self::C) => Self::Y,
            (Self::G, Self::T) | (Self::T, Self::G) => Self::K,
            _ => Self::N,
        }
    }

    /// All eleven codes, in symbol-table order.
    pub const ALL: [Self; 11] = [
        Self::A,
        Self::C,
        Self::G,
        Self::T,
        Self::N,
        Self::M,
        Self::R,
        Self::W,
        Self::S,
        Self::Y,
        Self::K,
    ];
}

impl std::fmt::Display for AlleleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip() {
        for code in AlleleCode::ALL {
            assert_eq!(AlleleCode::from_symbol(code.symbol()), code);
            assert_eq!(
                AlleleCode::from_symbol(code.symbol().to_ascii_lowercase()),
                code
            );
        }
    }

    #[test]
    fn test_unknown_symbols_decode_to_n() {
        assert_eq!(AlleleCode::from_symbol('X'), AlleleCode::N);
        assert_eq!(AlleleCode::from_symbol('-'), AlleleCode::N);
        assert_eq!(AlleleCode::from_symbol('n'), AlleleCode::N);
    }

    #[test]
    fn test_split_bijection() {
        // Each of the six het codes splits to the pair that re-encodes to it
        for code in AlleleCode::ALL {
            let (a, b) = code.split();
            if code.is_het() {
                assert_ne!(a, b);
                assert_eq!(AlleleCode::degenerate(a, b), code);
                assert_eq!(AlleleCode::degenerate(b, a), code);
            } else {
                assert_eq!(a, code);
                assert_eq!(b, code);
            }
        }
    }

    #[test]
    fn test_degenerate_identity() {
        for code in AlleleCode::ALL {
            assert_eq!(AlleleCode::degenerate(code, code), code);
        }
    }

    #[test]
    fn test_degenerate_no_call_paths() {
        assert_eq!(
            AlleleCode::degenerate(AlleleCode::N, AlleleCode::A),
            AlleleCode::N
        );
        assert_eq!(
            AlleleCode::degenerate(AlleleCode::T, AlleleCode::N),
            AlleleCode::N
        );
        // A het call paired with a differing base has no single-code form
        assert_eq!(
            AlleleCode::degenerate(AlleleCode::M, AlleleCode::G),
            AlleleCode::N
        );
    }

    #[test]
    fn test_degenerate_pairs() {
        assert_eq!(
            AlleleCode::degenerate(AlleleCode::C, AlleleCode::T),
            AlleleCode::Y
        );
        assert_eq!(
            AlleleCode::degenerate(AlleleCode::G, AlleleCode::T),
            AlleleCode::K
        );
        assert_eq!(
            AlleleCode::degenerate(AlleleCode::C, AlleleCode::A),
            AlleleCode::M
        );
    }
}
