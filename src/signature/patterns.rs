//! Line matchers for signing-tool output.
//!
//! Each extracted fact has its own matcher. Output is scanned line by line
//! and the first matching line wins. Nothing here ever fails: a line that
//! does not match simply contributes nothing.

use lazy_static::lazy_static;
use regex::Regex;

/// Literal marker gpg prints when a signature was made by a key that the
/// local trust store has not certified.
pub const TRUST_WARNING_MARKER: &str = "gpg: WARNING: ";

lazy_static! {
    /// `tree <sha1>` or `object <sha1>`, the whole line.
    static ref COMMIT_HASH_PATTERN: Regex =
        Regex::new(r"(?i)^(?:tree|object) ([a-f0-9]{40})$").unwrap();

    /// `tag <name>`, the whole line.
    static ref TAG_NAME_PATTERN: Regex = Regex::new(r"(?i)^tag (.+)$").unwrap();

    /// `gpg: ... using <algo> key <hex>`
    static ref KEY_ID_PATTERN: Regex =
        Regex::new(r"(?i)gpg:.*using .* key ([a-f0-9]+)").unwrap();

    /// `gpg: Good signature from "<identity>" [<validity>]`
    static ref SIGNER_IDENTITY_PATTERN: Regex =
        Regex::new(r#"(?i)gpg: Good signature from "(.+)" \[.*\]"#).unwrap();
}

fn lines(output: &str) -> impl Iterator<Item = &str> {
    output.split('\n').map(|line| line.trim_end_matches('\r'))
}

fn first_capture<'a>(pattern: &Regex, output: &'a str) -> Option<&'a str> {
    lines(output)
        .filter_map(|line| pattern.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|value| !value.is_empty())
}

/// Extract the 40-hex-char commit (or tagged object) hash.
pub fn extract_commit_hash(output: &str) -> Option<String> {
    first_capture(&COMMIT_HASH_PATTERN, output).map(str::to_string)
}

/// Extract the tag name from `git tag -v` output.
pub fn extract_tag_name(output: &str) -> Option<String> {
    first_capture(&TAG_NAME_PATTERN, output).map(str::to_string)
}

/// Extract the hex id of the key that made the signature.
pub fn extract_key_id(output: &str) -> Option<String> {
    first_capture(&KEY_ID_PATTERN, output).map(str::to_string)
}

/// Extract the signer identity as reported by a good signature line.
pub fn extract_signer_identity(output: &str) -> Option<String> {
    first_capture(&SIGNER_IDENTITY_PATTERN, output).map(str::to_string)
}

/// True if any line carries a gpg trust warning.
///
/// git exits 0 for a good signature from a key that is in the keyring but
/// not certified, so this scan is the only thing that tells the two apart.
pub fn has_trust_warning(output: &str) -> bool {
    lines(output).any(|line| line.contains(TRUST_WARNING_MARKER))
}
