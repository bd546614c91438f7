// Version text extraction.
// Tools print their version in every imaginable shape ("v20.11.0", "Docker version
// 24.0.6, build ed223bc", "Geth\nVersion: 1.13.14-stable"). The summary wants a
// short version string, so we look for a dotted number, first on the first line
// and then on the remaining lines, and fall back to the raw first line.

use regex::Regex;
use std::sync::OnceLock;

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-[0-9A-Za-z.]+)?)").expect("valid version regex")
    })
}

fn find_version(line: &str) -> Option<String> {
    version_pattern()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extracts a version from `--version` style output. Returns `None` only when the
/// output has no non-blank line at all.
pub fn extract_version(output: &str) -> Option<String> {
    let mut lines = output.lines().map(str::trim).filter(|line| !line.is_empty());
    let first = lines.next()?;

    if let Some(version) = find_version(first) {
        return Some(version);
    }
    if let Some(version) = lines.find_map(find_version) {
        return Some(version);
    }
    Some(first.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_v() {
        assert_eq!(extract_version("v20.11.0\n").as_deref(), Some("20.11.0"));
    }

    #[test]
    fn finds_version_inside_sentence() {
        assert_eq!(
            extract_version("Docker version 24.0.6, build ed223bc").as_deref(),
            Some("24.0.6")
        );
        assert_eq!(
            extract_version("Truffle v5.11.5 (core: 5.11.5)").as_deref(),
            Some("5.11.5")
        );
    }

    #[test]
    fn keeps_prerelease_suffix() {
        assert_eq!(
            extract_version("Geth\nVersion: 1.13.14-stable\nGit Commit: 2bd6bd01").as_deref(),
            Some("1.13.14-stable")
        );
    }

    #[test]
    fn searches_later_lines_when_first_has_no_number() {
        let solc = "solc, the solidity compiler commandline interface\nVersion: 0.8.24+commit.e11b9ed9.Darwin.appleclang";
        assert_eq!(extract_version(solc).as_deref(), Some("0.8.24"));
    }

    #[test]
    fn falls_back_to_first_line() {
        assert_eq!(extract_version("\n  nightly build\n").as_deref(), Some("nightly build"));
    }

    #[test]
    fn blank_output_has_no_version() {
        assert_eq!(extract_version("  \n\n"), None);
    }
}
