//! Symbol frequency counting.

use crate::error::{FormatError, Result};

/// Occurrence counts per byte value.
///
/// Only symbols with a positive count are entries. Iteration is always in
/// ascending symbol order, which is also the order the artifact stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    distinct: usize,
}

impl FrequencyTable {
    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        let distinct = counts.iter().filter(|&&c| c > 0).count();
        Self { counts, distinct }
    }

    /// Rebuild a table from serialized `(symbol, frequency)` entries.
    ///
    /// Entries must be strictly ascending by symbol and carry non-zero
    /// frequencies.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0u64; 256];
        let mut distinct = 0;
        let mut previous: Option<u8> = None;

        for (symbol, frequency) in entries {
            if let Some(previous) = previous {
                if symbol <= previous {
                    return Err(FormatError::UnsortedTable { previous, symbol }.into());
                }
            }
            if frequency == 0 {
                return Err(FormatError::ZeroFrequency { symbol }.into());
            }
            counts[symbol as usize] = frequency;
            distinct += 1;
            previous = Some(symbol);
        }

        Ok(Self { counts, distinct })
    }

    /// Count for `symbol`, or `None` if it never occurs.
    pub fn get(&self, symbol: u8) -> Option<u64> {
        match self.counts[symbol as usize] {
            0 => None,
            count => Some(count),
        }
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts, or `None` on overflow.
    ///
    /// Tables built by [`FrequencyTable::from_bytes`] never overflow; tables
    /// read from an artifact might.
    pub fn total(&self) -> Option<u64> {
        self.iter()
            .try_fold(0u64, |acc, (_, count)| acc.checked_add(count))
    }

    /// Iterate `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Shannon entropy of the distribution in bits per symbol.
    ///
    /// This is the lower bound for any symbol-by-symbol prefix code.
    pub fn entropy(&self) -> f64 {
        let total = match self.total() {
            Some(0) | None => return 0.0,
            Some(total) => total as f64,
        };
        self.iter()
            .map(|(_, count)| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}
