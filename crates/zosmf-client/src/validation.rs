//! z/OS naming rules, checked before any request is built.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::{Error, ErrorKind, Result};

/// Maximum length of a fully qualified dataset name.
pub const MAX_DATASET_NAME_LEN: usize = 44;

/// Maximum length of a partitioned dataset member name.
pub const MAX_MEMBER_NAME_LEN: usize = 8;

struct NamePatterns {
    first: Regex,
    full: Regex,
}

static NAME_PATTERNS: LazyLock<std::result::Result<NamePatterns, regex_lite::Error>> =
    LazyLock::new(|| {
        Ok(NamePatterns {
            first: Regex::new(r"^[A-Z@#$]")?,
            full: Regex::new(r"^[A-Z@#$][A-Z0-9@#$.-]*$")?,
        })
    });

fn validate_name(kind: &str, name: &str, max_len: usize) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation(format!("{kind} name cannot be empty")));
    }
    if name.len() > max_len {
        return Err(Error::validation(format!(
            "{kind} name cannot exceed {max_len} characters"
        )));
    }
    if name.starts_with('.') || name.ends_with('.') {
        return Err(Error::validation(format!(
            "{kind} name cannot start or end with a period"
        )));
    }

    let patterns = NAME_PATTERNS
        .as_ref()
        .map_err(|e| Error::new(ErrorKind::Other(format!("name pattern: {e}"))))?;

    if !patterns.first.is_match(name) {
        return Err(Error::validation(format!(
            "{kind} name must start with A-Z, @, # or $"
        )));
    }
    if !patterns.full.is_match(name) {
        return Err(Error::validation(format!(
            "{kind} name contains invalid characters"
        )));
    }
    if name.contains("..") {
        return Err(Error::validation(format!(
            "{kind} name cannot contain consecutive periods"
        )));
    }
    if name.contains("--") {
        return Err(Error::validation(format!(
            "{kind} name cannot contain consecutive hyphens"
        )));
    }
    Ok(())
}

/// Validate a fully qualified dataset name such as `IBMUSER.JCL.CNTL`.
pub fn validate_dataset_name(name: &str) -> Result<()> {
    validate_name("dataset", name, MAX_DATASET_NAME_LEN)
}

/// Validate a member name such as `IEFBR14`.
pub fn validate_member_name(name: &str) -> Result<()> {
    validate_name("member", name, MAX_MEMBER_NAME_LEN)
}

pub fn is_valid_dataset_name(name: &str) -> bool {
    validate_dataset_name(name).is_ok()
}

pub fn is_valid_member_name(name: &str) -> bool {
    validate_member_name(name).is_ok()
}

/// Percent-encode a name for use as one URL path segment.
///
/// `#`, `$` and `@` are legal in z/OS names but not safe in a URL path.
pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<()>) -> String {
        let err = result.unwrap_err();
        assert!(err.is_validation());
        err.to_string()
    }

    #[test]
    fn test_valid_dataset_names() {
        for name in [
            "IBMUSER.JCL.CNTL",
            "A",
            "$SYS.PROCLIB",
            "#TEMP.DATA",
            "@USER.X-Y.Z1",
            "SYS1.PARMLIB",
            &"A".repeat(44),
        ] {
            assert!(validate_dataset_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_dataset_name_messages() {
        assert!(message(validate_dataset_name("")).contains("cannot be empty"));
        assert!(message(validate_dataset_name(&"A".repeat(45))).contains("exceed 44"));
        assert!(message(validate_dataset_name(".ABC")).contains("period"));
        assert!(message(validate_dataset_name("ABC.")).contains("period"));
        assert!(message(validate_dataset_name("1ABC")).contains("must start with"));
        assert!(message(validate_dataset_name("ibmuser.data")).contains("must start with"));
        assert!(message(validate_dataset_name("ABC_DEF")).contains("invalid characters"));
        assert!(message(validate_dataset_name("ABC..DEF")).contains("consecutive periods"));
        assert!(message(validate_dataset_name("ABC--DEF")).contains("consecutive hyphens"));
    }

    #[test]
    fn test_member_names() {
        assert!(validate_member_name("IEFBR14").is_ok());
        assert!(validate_member_name("$MEMBER").is_ok());
        assert!(message(validate_member_name("")).contains("member name cannot be empty"));
        assert!(message(validate_member_name("TOOLONGNM")).contains("exceed 8"));
        assert!(message(validate_member_name("9ABC")).contains("must start with"));
        assert!(!is_valid_member_name("ab"));
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("IBMUSER.DATA"), "IBMUSER.DATA");
        assert_eq!(encode_path_segment("#TEMP.$X@Y"), "%23TEMP.%24X%40Y");
    }

    /// Independent statement of the naming rules used as the oracle below.
    fn reference_rules(name: &str, max_len: usize) -> bool {
        let bytes = name.as_bytes();
        let first_ok = |c: u8| c.is_ascii_uppercase() || b"@#$".contains(&c);
        let rest_ok = |c: u8| first_ok(c) || c.is_ascii_digit() || c == b'.' || c == b'-';

        !bytes.is_empty()
            && bytes.len() <= max_len
            && first_ok(bytes[0])
            && bytes[1..].iter().all(|&c| rest_ok(c))
            && !name.contains("..")
            && !name.contains("--")
            && !name.ends_with('.')
    }

    /// Every string over `alphabet` with length `0..=max_len`.
    fn enumerate(alphabet: &[char], max_len: usize) -> Vec<String> {
        let mut all = vec![String::new()];
        let mut layer = vec![String::new()];
        for _ in 0..max_len {
            let mut next = Vec::with_capacity(layer.len() * alphabet.len());
            for prefix in &layer {
                for &c in alphabet {
                    let mut s = prefix.clone();
                    s.push(c);
                    next.push(s);
                }
            }
            all.extend(next.iter().cloned());
            layer = next;
        }
        all
    }

    #[test]
    fn test_generated_names_match_reference_rules() {
        // One representative of every character class, plus a lowercase
        // letter and an underscore as outsiders.
        let alphabet = ['A', '$', '9', '.', '-', 'a', '_'];
        for name in enumerate(&alphabet, 5) {
            assert_eq!(
                is_valid_dataset_name(&name),
                reference_rules(&name, MAX_DATASET_NAME_LEN),
                "dataset name {name:?}"
            );
            assert_eq!(
                is_valid_member_name(&name),
                reference_rules(&name, MAX_MEMBER_NAME_LEN),
                "member name {name:?}"
            );
        }
    }

    #[test]
    fn test_generated_lengths_around_limit() {
        for len in 40..=48 {
            let name: String = (0..len)
                .map(|i| if i % 9 == 8 { '.' } else { 'Q' })
                .collect();
            assert_eq!(
                is_valid_dataset_name(&name),
                reference_rules(&name, MAX_DATASET_NAME_LEN),
                "length {len}: {name}"
            );
        }
    }
}
