//! Optional nm/THz lookup table.
//!
//! Operators can drop vendor channel plans into the data directory. Any `*.txt`
//! file whose name contains "wavelength" (case-insensitive) is scanned for
//! lines such as `1550.12 nm / 193.40 THz`. When at least one pair is found,
//! conversions pick the nearest table entry instead of using `c / λ`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use super::{light_ratio, round5, snap, GridError, STEP_6_25};

static PAIR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]+(?:[.,][0-9]+)?)\s*nm\s*/\s*([0-9]+(?:[.,][0-9]+)?)\s*thz")
        .expect("valid regex")
});

/// File name fragment that marks a lookup table
const TABLE_NAME_MARKER: &str = "wavelength";

/// Extension of lookup table files
const TABLE_EXTENSION: &str = "txt";

/// Errors raised while reading lookup tables from disk.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("Failed to read data directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read table {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A single channel plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavelengthPair {
    pub nm: Decimal,
    pub thz: Decimal,
}

/// Lookup table of wavelength/frequency pairs, sorted by wavelength.
#[derive(Debug, Clone, Default)]
pub struct WavelengthTable {
    pairs: Vec<WavelengthPair>,
}

impl WavelengthTable {
    /// Build a table from pairs, sorting them by wavelength.
    ///
    /// The sort is stable so entries with equal wavelengths keep file order.
    pub fn from_pairs(mut pairs: Vec<WavelengthPair>) -> Self {
        pairs.sort_by(|a, b| a.nm.cmp(&b.nm));
        Self { pairs }
    }

    /// Load every lookup table found in `dir`.
    ///
    /// A missing directory yields an empty table; the data mount is optional.
    pub fn load(dir: &Path) -> Result<Self, MappingError> {
        if !dir.exists() {
            tracing::debug!(dir = %dir.display(), "Data directory not present, using c/λ");
            return Ok(Self::default());
        }

        let read_dir_err = |source| MappingError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
            let path = entry.map_err(read_dir_err)?.path();
            if is_table_file(&path) {
                files.push(path);
            }
        }
        files.sort();

        let mut pairs = Vec::new();
        for path in files {
            let bytes = std::fs::read(&path).map_err(|source| MappingError::ReadFile {
                path: path.clone(),
                source,
            })?;
            let found = parse_pairs(&String::from_utf8_lossy(&bytes));
            tracing::debug!(file = %path.display(), pairs = found.len(), "Read wavelength table");
            pairs.extend(found);
        }

        Ok(Self::from_pairs(pairs))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[WavelengthPair] {
        &self.pairs
    }

    /// Entry with the closest wavelength; the first one wins a tie.
    pub fn nearest_by_nm(&self, nm: Decimal) -> Option<&WavelengthPair> {
        self.pairs.iter().min_by_key(|p| distance(p.nm, nm))
    }

    /// Entry with the closest frequency; the first one wins a tie.
    pub fn nearest_by_thz(&self, thz: Decimal) -> Option<&WavelengthPair> {
        self.pairs.iter().min_by_key(|p| distance(p.thz, thz))
    }

    /// Wavelength to centre frequency, snapped to the 6.25 GHz grid.
    pub fn nm_to_thz(&self, nm: Decimal) -> Result<Decimal, GridError> {
        let thz = match self.nearest_by_nm(nm) {
            Some(pair) => pair.thz,
            None => light_ratio(nm, "Wavelength")?,
        };
        Ok(round5(snap(thz, STEP_6_25)?))
    }

    /// Frequency to wavelength, rounded to the reported precision.
    pub fn thz_to_nm(&self, thz: Decimal) -> Result<Decimal, GridError> {
        let nm = match self.nearest_by_thz(thz) {
            Some(pair) => pair.nm,
            None => light_ratio(thz, "Frequency")?,
        };
        Ok(round5(nm))
    }
}

fn distance(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).map(|d| d.abs()).unwrap_or(Decimal::MAX)
}

fn is_table_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let has_extension = path
        .extension()
        .map(|ext| ext == TABLE_EXTENSION)
        .unwrap_or(false);
    let has_marker = path
        .file_name()
        .map(|name| {
            name.to_string_lossy()
                .to_lowercase()
                .contains(TABLE_NAME_MARKER)
        })
        .unwrap_or(false);
    has_extension && has_marker
}

/// Extract `nm / THz` pairs, at most one per line.
pub fn parse_pairs(text: &str) -> Vec<WavelengthPair> {
    text.lines()
        .filter_map(|line| {
            let caps = PAIR_PATTERN.captures(line)?;
            let nm = parse_decimal(&caps[1])?;
            let thz = parse_decimal(&caps[2])?;
            Some(WavelengthPair { nm, thz })
        })
        .collect()
}

/// Parse a number that may use a comma as decimal separator.
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&raw.replace(',', ".")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pair(nm: Decimal, thz: Decimal) -> WavelengthPair {
        WavelengthPair { nm, thz }
    }

    #[test]
    fn test_parse_pairs_variants() {
        let text = "\
Channel plan
C21  1560.61 nm / 192.10 THz
C35 1549,32nm/193,50thz
C60 1529.55 NM /  196.00 Thz trailing
no pair here 1550 nm
";
        let pairs = parse_pairs(text);
        assert_eq!(
            pairs,
            vec![
                pair(dec!(1560.61), dec!(192.10)),
                pair(dec!(1549.32), dec!(193.50)),
                pair(dec!(1529.55), dec!(196.00)),
            ]
        );
    }

    #[test]
    fn test_load_missing_dir_is_empty() {
        let table = WavelengthTable::load(Path::new("/nonexistent/data")).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_filters_files_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("b_Wavelength_plan.txt"),
            "1530.33 nm / 195.90 THz\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("a_wavelengths.txt"),
            "1560.61 nm / 192.10 THz\n1550.12 nm / 193.40 THz\n",
        )
        .unwrap();
        // Ignored: wrong name or wrong extension
        std::fs::write(dir.path().join("channels.txt"), "1540.00 nm / 194.67 THz\n").unwrap();
        std::fs::write(dir.path().join("wavelength.csv"), "1540.00 nm / 194.67 THz\n").unwrap();
        std::fs::create_dir(dir.path().join("wavelength_dir.txt")).unwrap();

        let table = WavelengthTable::load(dir.path()).unwrap();
        let nms: Vec<Decimal> = table.pairs().iter().map(|p| p.nm).collect();
        assert_eq!(nms, vec![dec!(1530.33), dec!(1550.12), dec!(1560.61)]);
    }

    #[test]
    fn test_load_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = b"\xff\xfe header\n".to_vec();
        bytes.extend_from_slice(b"1550.12 nm / 193.40 THz\n");
        std::fs::write(dir.path().join("wavelength.txt"), bytes).unwrap();

        let table = WavelengthTable::load(dir.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let table = WavelengthTable::from_pairs(vec![
            pair(dec!(1550), dec!(193.4)),
            pair(dec!(1552), dec!(193.2)),
        ]);
        assert_eq!(table.nearest_by_nm(dec!(1551)).unwrap().nm, dec!(1550));
        assert_eq!(table.nearest_by_thz(dec!(193.3)).unwrap().nm, dec!(1550));
    }

    #[test]
    fn test_formula_conversions() {
        let table = WavelengthTable::default();
        assert_eq!(table.nm_to_thz(dec!(1550)).unwrap(), dec!(193.4125));
        assert_eq!(table.thz_to_nm(dec!(193.4125)).unwrap(), dec!(1550.01594));
        assert_eq!(table.thz_to_nm(dec!(193.1)).unwrap(), dec!(1552.52438));
    }

    #[test]
    fn test_formula_rejects_non_positive() {
        let table = WavelengthTable::default();
        assert_eq!(
            table.nm_to_thz(Decimal::ZERO),
            Err(GridError::NonPositive("Wavelength"))
        );
        assert_eq!(
            table.thz_to_nm(dec!(-193.1)),
            Err(GridError::NonPositive("Frequency"))
        );
    }

    #[test]
    fn test_table_overrides_formula() {
        let table = WavelengthTable::from_pairs(vec![
            pair(dec!(1550.12), dec!(193.40)),
            pair(dec!(1560.61), dec!(192.10)),
        ]);
        // 193.40 is already on the 6.25 GHz grid
        assert_eq!(table.nm_to_thz(dec!(1551)).unwrap(), dec!(193.4));
        assert_eq!(table.thz_to_nm(dec!(192.2)).unwrap(), dec!(1560.61));
    }

    #[test]
    fn test_table_value_is_snapped() {
        let table = WavelengthTable::from_pairs(vec![pair(dec!(1550.12), dec!(193.414))]);
        assert_eq!(table.nm_to_thz(dec!(1550)).unwrap(), dec!(193.4125));
    }
}
