//! A single signature check.
//!
//! A `SignatureCheck` is built once from one captured invocation of the
//! signing tool and never changes afterwards.

use std::fmt;

use super::patterns::{
    extract_commit_hash, extract_key_id, extract_signer_identity, extract_tag_name,
    has_trust_warning,
};

/// Structured facts extracted from one `git verify-commit` or `git tag -v` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCheck {
    package_name: String,
    commit_hash: Option<String>,
    tag_name: Option<String>,
    command: String,
    exit_code: i32,
    output: String,
    signing_key_id: Option<String>,
    signer_identity: Option<String>,
    signed: bool,
    trusted: bool,
}

impl SignatureCheck {
    /// Build a check from the output of verifying the current commit.
    pub fn from_commit_check(package_name: &str, command: &str, exit_code: i32, output: &str) -> Self {
        Self::build(package_name, None, command, exit_code, output)
    }

    /// Build a check from the output of verifying a tag.
    pub fn from_tag_check(package_name: &str, command: &str, exit_code: i32, output: &str) -> Self {
        Self::build(package_name, extract_tag_name(output), command, exit_code, output)
    }

    fn build(
        package_name: &str,
        tag_name: Option<String>,
        command: &str,
        exit_code: i32,
        output: &str,
    ) -> Self {
        let signing_key_id = extract_key_id(output);
        let signed = signing_key_id.is_some() && exit_code == 0;
        let trusted = signed && !has_trust_warning(output);

        Self {
            package_name: package_name.to_string(),
            commit_hash: extract_commit_hash(output),
            tag_name,
            command: command.to_string(),
            exit_code,
            output: output.to_string(),
            signing_key_id,
            signer_identity: extract_signer_identity(output),
            signed,
            trusted,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn commit_hash(&self) -> Option<&str> {
        self.commit_hash.as_deref()
    }

    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn signing_key_id(&self) -> Option<&str> {
        self.signing_key_id.as_deref()
    }

    pub fn signer_identity(&self) -> Option<&str> {
        self.signer_identity.as_deref()
    }

    /// A key id was found and the tool exited successfully.
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Signed, and gpg printed no trust warning.
    pub fn is_trusted(&self) -> bool {
        self.trusted
    }
}

/// Human-readable audit form: one summary line, then the exact command,
/// exit code and raw output.
impl fmt::Display for SignatureCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut summary = vec![
            if self.signed || self.signing_key_id.is_some() {
                "[SIGNED]".to_string()
            } else {
                "[NOT SIGNED]".to_string()
            },
            if self.trusted {
                "[VERIFIED]".to_string()
            } else {
                "[NOT VERIFIED]".to_string()
            },
        ];

        if let Some(hash) = &self.commit_hash {
            summary.push(format!("Commit #{}", hash));
        }
        if let Some(tag) = &self.tag_name {
            summary.push(format!("Tag {}", tag));
        }
        if let Some(signer) = &self.signer_identity {
            summary.push(format!("By \"{}\"", signer));
        }
        if let Some(key) = &self.signing_key_id {
            summary.push(format!("(Key {})", key));
        }

        writeln!(f, "{}", summary.join(" "))?;
        writeln!(f, "Command: {}", self.command)?;
        writeln!(f, "Exit code: {}", self.exit_code)?;
        write!(f, "Output: {}", self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const COMMAND: &str = "git --git-dir '/vendor/acme/widgets/.git' verify-commit --verbose HEAD";

    const GOOD_SIGNATURE: &str = "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904
author Mr. Magoo <magoo@example.com> 1499004011 +0200

signed commit
gpg: Signature made Sun 02 Jul 2017 16:00:11 CEST
gpg:                using RSA key 4889C20D148231DC
gpg: Good signature from \"Mr. Magoo <magoo@example.com>\" [full]";

    const UNCERTIFIED_WARNING: &str = "gpg: WARNING: This key is not certified with a trusted signature!
gpg:          There is no indication that the signature belongs to the owner.
Primary key fingerprint: 0D37 9FDB 4C8C 5D49 0F2A  4889 C20D 1482 31DC";

    #[test]
    fn test_unsigned_commit() {
        let check = SignatureCheck::from_commit_check(
            "acme/widgets",
            COMMAND,
            1,
            "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\nunsigned commit",
        );

        assert!(!check.is_signed());
        assert!(!check.is_trusted());
        assert_eq!(check.signing_key_id(), None);
        assert_eq!(
            check.commit_hash(),
            Some("4b825dc642cb6eb9a060e54bf8d69288fbee4904")
        );
    }

    #[test]
    fn test_signed_and_trusted_commit() {
        let check = SignatureCheck::from_commit_check("acme/widgets", COMMAND, 0, GOOD_SIGNATURE);

        assert!(check.is_signed());
        assert!(check.is_trusted());
        assert_eq!(check.signing_key_id(), Some("4889C20D148231DC"));
        assert_eq!(check.signer_identity(), Some("Mr. Magoo <magoo@example.com>"));
        assert_eq!(check.tag_name(), None);
    }

    #[test]
    fn test_warning_overrides_successful_exit_code() {
        let output = format!("{}\n{}", GOOD_SIGNATURE, UNCERTIFIED_WARNING);
        let check = SignatureCheck::from_commit_check("acme/widgets", COMMAND, 0, &output);

        assert!(check.is_signed());
        assert!(!check.is_trusted());
    }

    #[test]
    fn test_key_with_failing_exit_code_is_not_signed() {
        let check = SignatureCheck::from_commit_check("acme/widgets", COMMAND, 1, GOOD_SIGNATURE);

        assert!(!check.is_signed());
        assert!(!check.is_trusted());
        assert_eq!(check.signing_key_id(), Some("4889C20D148231DC"));
    }

    #[test]
    fn test_success_without_key_line_is_not_signed() {
        let check = SignatureCheck::from_commit_check("acme/widgets", COMMAND, 0, "");

        assert!(!check.is_signed());
        assert!(!check.is_trusted());
    }

    #[test]
    fn test_tag_check_extracts_tag_name() {
        let output = "object 4b825dc642cb6eb9a060e54bf8d69288fbee4904
type commit
tag v2.0.0
tagger Mr. Magoo <magoo@example.com> 1499004011 +0200

signed tag
gpg: Signature made Sun 02 Jul 2017 16:00:11 CEST
gpg:                using RSA key 4889C20D148231DC
gpg: Good signature from \"Mr. Magoo <magoo@example.com>\" [ultimate]";

        let check = SignatureCheck::from_tag_check("acme/widgets", "git tag -v 'v2.0.0'", 0, output);

        assert_eq!(check.tag_name(), Some("v2.0.0"));
        assert_eq!(
            check.commit_hash(),
            Some("4b825dc642cb6eb9a060e54bf8d69288fbee4904")
        );
        assert!(check.is_trusted());
    }

    #[test]
    fn test_commit_check_ignores_tag_lines() {
        let check = SignatureCheck::from_commit_check("acme/widgets", COMMAND, 0, "tag v1.0.0");
        assert_eq!(check.tag_name(), None);
    }

    #[test]
    fn test_human_readable_trusted() {
        let check = SignatureCheck::from_commit_check("acme/widgets", COMMAND, 0, GOOD_SIGNATURE);
        let rendered = check.to_string();
        let mut lines = rendered.lines();

        assert_eq!(
            lines.next(),
            Some("[SIGNED] [VERIFIED] Commit #4b825dc642cb6eb9a060e54bf8d69288fbee4904 By \"Mr. Magoo <magoo@example.com>\" (Key 4889C20D148231DC)")
        );
        assert_eq!(lines.next(), Some(format!("Command: {}", COMMAND).as_str()));
        assert_eq!(lines.next(), Some("Exit code: 0"));
        assert_eq!(
            lines.next(),
            Some("Output: tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904")
        );
        assert!(rendered.ends_with("[full]"));
    }

    #[test]
    fn test_human_readable_omits_absent_fields() {
        let check = SignatureCheck::from_commit_check("acme/widgets", COMMAND, 128, "fatal: bad object");

        assert_eq!(
            check.to_string(),
            format!(
                "[NOT SIGNED] [NOT VERIFIED]\nCommand: {}\nExit code: 128\nOutput: fatal: bad object",
                COMMAND
            )
        );
    }

    proptest! {
        #[test]
        fn prop_no_key_line_is_never_signed(output in "[^gG]*", exit_code in -1i32..256) {
            let check = SignatureCheck::from_commit_check("p/q", COMMAND, exit_code, &output);
            prop_assert!(!check.is_signed());
            prop_assert!(!check.is_trusted());
        }

        #[test]
        fn prop_key_line_without_warning_is_trusted(key in "[A-F0-9]{16}", noise in "[a-z ]{0,40}") {
            let output = format!("{}\ngpg:                using RSA key {}\n", noise, key);
            let check = SignatureCheck::from_commit_check("p/q", COMMAND, 0, &output);
            prop_assert!(check.is_trusted());
            prop_assert_eq!(check.signing_key_id(), Some(key.as_str()));
        }

        #[test]
        fn prop_warning_line_is_never_trusted(key in "[A-F0-9]{16}", warning in "[A-Za-z ]{0,40}") {
            let output = format!(
                "gpg:                using RSA key {}\ngpg: WARNING: {}",
                key, warning
            );
            let check = SignatureCheck::from_commit_check("p/q", COMMAND, 0, &output);
            prop_assert!(check.is_signed());
            prop_assert!(!check.is_trusted());
        }

        #[test]
        fn prop_trusted_implies_signed(output in ".*", exit_code in 0i32..2) {
            let check = SignatureCheck::from_tag_check("p/q", COMMAND, exit_code, &output);
            prop_assert!(!check.is_trusted() || check.is_signed());
        }
    }
}
