//! Version string conversion between the canonical `MAJOR.MINOR.PATCH` form
//! and the formats each platform accepts.
//!
//! These functions are deliberately forgiving: they never fail on malformed
//! input. Callers validate the *output* against the platform rule (see
//! [`DomainValidator`](crate::domain::DomainValidator)) before using it.

/// Width of the minor component in an Orsay version.
pub const ORSAY_MINOR_WIDTH: usize = 2;

/// Nominal width of the revision component in an Orsay version.
///
/// NOTE: [`to_orsay_version`] truncates the revision to [`ORSAY_MINOR_WIDTH`],
/// not to this width. Existing Orsay packages were versioned that way, so the
/// behaviour is kept.
pub const ORSAY_REVISION_WIDTH: usize = 3;

/// Convert a semantic version into the Orsay `MAJOR.MMRR` format.
///
/// | Input     | Output    |
/// |-----------|-----------|
/// | `1.2.3`   | `1.0203`  |
/// | `2.10.45` | `2.1045`  |
/// | `1.2.345` | `1.0245`  |
pub fn to_orsay_version(semver: &str) -> String {
    let mut parts = semver.split('.');
    let major = parts.next().unwrap_or_default();
    let minor = last_digits(parts.next().unwrap_or_default(), ORSAY_MINOR_WIDTH);
    let revision = last_digits(parts.next().unwrap_or_default(), ORSAY_MINOR_WIDTH);
    format!("{major}.{minor}{revision}")
}

/// Suggest the next version by bumping the patch component.
///
/// Components are parsed by their leading digits; a patch without any leading
/// digits counts as `0`. Returns `None` when major or minor carry no digits.
pub fn next_revision(semver: &str) -> Option<String> {
    let mut parts = semver.split('.');
    let major = leading_number(parts.next()?)?;
    let minor = leading_number(parts.next()?)?;
    let patch = parts.next().and_then(leading_number).unwrap_or(0);
    Some(format!("{major}.{minor}.{}", patch + 1))
}

/// Left-pad with zeros and keep only the last `width` characters.
fn last_digits(part: &str, width: usize) -> String {
    let padded: Vec<char> = "0".repeat(width).chars().chain(part.chars()).collect();
    padded[padded.len() - width..].iter().collect()
}

fn leading_number(part: &str) -> Option<u64> {
    let digits: String = part
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
