/// Centralized field validation.
///
/// Every rule has the signature of a [`Validator`](crate::domain::Validator)
/// so it can be attached to a prompt field directly. Builders call the same
/// rules, so a value accepted by a prompt is accepted by the metadata it ends
/// up in.
pub struct DomainValidator;

/// Characters a webOS application name may never contain.
const WEBOS_NAME_FORBIDDEN: &[char] = &[
    '~', '!', '.', ';', '\\', '/', '|', '"', '\'', '@', '#', '$', '%', '<', '>', '^', '&', '*',
    '(', ')', '-', '=', '+', '_', '\u{2019}',
];

impl DomainValidator {
    pub fn non_empty(input: &str) -> Result<(), String> {
        if input.trim().is_empty() {
            Err("value cannot be empty".into())
        } else {
            Ok(())
        }
    }

    /// Accepts anything, including the empty string.
    pub fn any(_input: &str) -> Result<(), String> {
        Ok(())
    }

    /// Starts with an ASCII letter, then no whitespace and none of
    /// [`WEBOS_NAME_FORBIDDEN`].
    pub fn webos_name(input: &str) -> Result<(), String> {
        let mut chars = input.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {}
            _ => return Err("invalid name for webos platform: must start with a letter".into()),
        }
        if let Some(bad) = chars.find(|c| c.is_whitespace() || WEBOS_NAME_FORBIDDEN.contains(c)) {
            return Err(format!(
                "invalid name for webos platform: '{}' is not allowed",
                bad.escape_default()
            ));
        }
        Ok(())
    }

    /// `^\d+\.\d+$`
    pub fn orsay_version(input: &str) -> Result<(), String> {
        match input.split_once('.') {
            Some((major, minor)) if is_digits(major) && is_digits(minor) => Ok(()),
            _ => Err("invalid version string for orsay platform (expected MAJOR.MINOR)".into()),
        }
    }

    /// Exactly three dot-separated numeric components.
    pub fn webos_version(input: &str) -> Result<(), String> {
        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() != 3 {
            return Err(format!(
                "invalid version string for webos platform: expected 3 components, found {}",
                parts.len()
            ));
        }
        if parts.iter().all(|p| is_digits(p)) {
            Ok(())
        } else {
            Err("invalid version string for webos platform: components must be numeric".into())
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
