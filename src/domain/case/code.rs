// src/domain/case/code.rs
use std::fmt;
use thiserror::Error;

/// Organizational suffix appended to every canonical case code.
pub const CODE_SUFFIX: &str = "DPCJM";

const MAX_SEQUENCE: u64 = 9999;
const PERIOD_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CaseCodeError {
    #[error("invalid case code format, expected NNNN/MMYY/{CODE_SUFFIX}")]
    InvalidFormat,
    #[error("case sequence number must be numeric")]
    NonNumericSequence,
    #[error("case sequence number out of range (0-9999)")]
    OutOfRange,
    #[error("case period must be exactly 4 digits (MMYY, e.g. 0126)")]
    InvalidPeriod,
}

/// A case code in canonical `NNNN/MMYY/DPCJM` form.
///
/// The only way to build one is [`CaseCode::parse`], so a `CaseCode` value is
/// always canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseCode {
    value: String,
    sequence: u16,
}

impl CaseCode {
    /// Parse a human-entered identifier such as `35/0126`, `35-0126-dpcjm`
    /// or `35 / 0126`.
    ///
    /// Dashes count as slashes and whitespace is removed before splitting, so
    /// an empty segment is an error rather than skipped. Anything after the
    /// period segment is discarded.
    pub fn parse(raw: &str) -> Result<Self, CaseCodeError> {
        let compact: String = raw
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '-' { '/' } else { c })
            .collect();
        let mut segments = compact.split('/');

        let (sequence_raw, period) = match (segments.next(), segments.next()) {
            (Some(sequence), Some(period)) => (sequence, period),
            _ => return Err(CaseCodeError::InvalidFormat),
        };

        let sequence = parse_sequence(sequence_raw)?;

        if period.len() != PERIOD_LEN || !period.chars().all(|c| c.is_ascii_digit()) {
            return Err(CaseCodeError::InvalidPeriod);
        }

        Ok(Self {
            value: format!("{sequence:04}/{period}/{CODE_SUFFIX}"),
            sequence,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Numeric sequence portion (`0035/0126/DPCJM` → 35).
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Code with path-unsafe characters replaced, suitable as a file name stem.
    pub fn file_stem(&self) -> String {
        self.value
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
                c if c.is_whitespace() || c.is_control() => '-',
                c => c,
            })
            .collect()
    }
}

fn parse_sequence(raw: &str) -> Result<u16, CaseCodeError> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(CaseCodeError::NonNumericSequence);
    }

    // All digits at this point; a parse failure can only be overflow.
    let value = raw
        .parse::<u64>()
        .map_err(|_| CaseCodeError::OutOfRange)?;
    if value > MAX_SEQUENCE {
        return Err(CaseCodeError::OutOfRange);
    }

    u16::try_from(value).map_err(|_| CaseCodeError::OutOfRange)
}

/// Normalize a raw case code to its canonical string form.
pub fn normalize(raw: &str) -> Result<String, CaseCodeError> {
    CaseCode::parse(raw).map(|code| code.value)
}

impl fmt::Display for CaseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<CaseCode> for String {
    fn from(value: CaseCode) -> Self {
        value.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_spellings_share_one_canonical_form() {
        for raw in ["35/0126", "0035/0126/DPCJM", "35-0126-dpcjm", "35 / 0126"] {
            assert_eq!(normalize(raw).unwrap(), "0035/0126/DPCJM", "input {raw:?}");
        }
    }

    #[test]
    fn surrounding_whitespace_and_case_are_ignored() {
        assert_eq!(normalize("  7/1225/dpcjm \n").unwrap(), "0007/1225/DPCJM");
    }

    #[test]
    fn sequence_bounds() {
        assert_eq!(normalize("0/0126").unwrap(), "0000/0126/DPCJM");
        assert_eq!(normalize("9999/0126").unwrap(), "9999/0126/DPCJM");
        assert_eq!(normalize("10000/0126"), Err(CaseCodeError::OutOfRange));
        assert_eq!(
            normalize("99999999999999999999999/0126"),
            Err(CaseCodeError::OutOfRange)
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(normalize(""), Err(CaseCodeError::InvalidFormat));
        assert_eq!(normalize("35"), Err(CaseCodeError::InvalidFormat));
        assert_eq!(normalize("AB/0126"), Err(CaseCodeError::NonNumericSequence));
        assert_eq!(normalize("3.5/0126"), Err(CaseCodeError::NonNumericSequence));
        assert_eq!(normalize("35/126"), Err(CaseCodeError::InvalidPeriod));
        assert_eq!(normalize("35/01A6"), Err(CaseCodeError::InvalidPeriod));
        assert_eq!(normalize("35/01260"), Err(CaseCodeError::InvalidPeriod));
    }

    #[test]
    fn trailing_segments_are_dropped() {
        assert_eq!(
            normalize("35/0126/OTHER/extra").unwrap(),
            "0035/0126/DPCJM"
        );
    }

    #[test]
    fn interior_spaces_are_removed_before_splitting() {
        assert_eq!(normalize("3 5/0126").unwrap(), "0035/0126/DPCJM");
        assert_eq!(normalize("35/01 26").unwrap(), "0035/0126/DPCJM");
    }

    #[test]
    fn empty_segments_are_not_skipped() {
        assert_eq!(normalize("35//0126"), Err(CaseCodeError::InvalidPeriod));
        assert_eq!(normalize("/35/0126"), Err(CaseCodeError::NonNumericSequence));
        assert_eq!(normalize("35/"), Err(CaseCodeError::InvalidPeriod));
        assert_eq!(normalize("35--0126"), Err(CaseCodeError::InvalidPeriod));
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["35/0126", "1-1299", "  0420 / 0325 / dpcjm"] {
            let once = normalize(raw).unwrap();
            assert_eq!(normalize(&once).unwrap(), once);
        }
    }

    #[test]
    fn sequence_and_file_stem() {
        let code = CaseCode::parse("42/0126").unwrap();
        assert_eq!(code.sequence(), 42);
        assert_eq!(code.file_stem(), "0042-0126-DPCJM");
    }
}
