// Host platform detection.
// The checklist needs to know two things about the machine: which operating system
// it runs (Homebrew prefixes and Rosetta only make sense on some of them) and which
// CPU architecture (Rosetta is an Apple Silicon concern).

use crate::{log_debug, log_warn};
use colored::Colorize;

/// Operating system and CPU architecture, normalized to `macos`/`linux`/`windows`
/// and `arm64`/`x86_64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// Builds a platform from raw names, normalizing aliases like `darwin` or `aarch64`.
    pub fn new(os: &str, arch: &str) -> Self {
        Self {
            os: normalize_os(os),
            arch: normalize_arch(arch),
        }
    }

    /// The platform this binary was compiled for, which is the platform it runs on.
    pub fn current() -> Self {
        let platform = Self::new(std::env::consts::OS, std::env::consts::ARCH);
        log_debug!(
            "[Platform] Detected OS: {}, architecture: {}",
            platform.os.cyan(),
            platform.arch.magenta()
        );
        platform
    }

    pub fn is_macos(&self) -> bool {
        self.os == "macos"
    }

    /// macOS on arm64, the only platform where Rosetta matters.
    pub fn is_apple_silicon(&self) -> bool {
        self.is_macos() && self.arch == "arm64"
    }

    /// Where Homebrew puts itself: `/opt/homebrew` on Apple Silicon, `/usr/local` on
    /// Intel Macs, and the linuxbrew prefix everywhere else.
    pub fn homebrew_prefix(&self) -> &'static str {
        if self.is_apple_silicon() {
            "/opt/homebrew"
        } else if self.is_macos() {
            "/usr/local"
        } else {
            "/home/linuxbrew/.linuxbrew"
        }
    }
}

/// Maps OS name variants onto `macos`, `linux` or `windows`. Unknown names are
/// lowercased and kept.
pub fn normalize_os(os: &str) -> String {
    match os.to_lowercase().as_str() {
        "macos" | "darwin" | "apple-darwin" | "osx" => "macos".to_string(),
        "linux" => "linux".to_string(),
        "windows" | "win32" | "win64" => "windows".to_string(),
        other => {
            log_warn!("[Platform] Unknown OS variant '{}', using as-is", other.purple());
            other.to_string()
        }
    }
}

/// Maps architecture variants onto `arm64` or `x86_64`. Unknown names are
/// lowercased and kept.
pub fn normalize_arch(arch: &str) -> String {
    match arch.to_lowercase().as_str() {
        "aarch64" | "arm64" => "arm64".to_string(),
        "x86_64" | "amd64" => "x86_64".to_string(),
        other => {
            log_warn!("[Platform] Unknown architecture '{}', using as-is", other.purple());
            other.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_aliases() {
        assert_eq!(Platform::new("Darwin", "aarch64"), Platform::new("macos", "arm64"));
        assert_eq!(normalize_arch("AMD64"), "x86_64");
        assert_eq!(normalize_os("Linux"), "linux");
    }

    #[test]
    fn homebrew_prefix_follows_platform() {
        assert_eq!(Platform::new("macos", "arm64").homebrew_prefix(), "/opt/homebrew");
        assert_eq!(Platform::new("macos", "x86_64").homebrew_prefix(), "/usr/local");
        assert_eq!(Platform::new("linux", "x86_64").homebrew_prefix(), "/home/linuxbrew/.linuxbrew");
    }

    #[test]
    fn only_arm_macs_are_apple_silicon() {
        assert!(Platform::new("macos", "arm64").is_apple_silicon());
        assert!(!Platform::new("macos", "x86_64").is_apple_silicon());
        assert!(!Platform::new("linux", "arm64").is_apple_silicon());
    }
}
