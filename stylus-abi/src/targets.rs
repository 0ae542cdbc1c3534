// Compilation targets understood by the native library.

use thiserror::Error;

pub const WAVM_TARGET_NAME: &str = "wavm";
pub const ARM64_TARGET_NAME: &str = "arm64";
pub const AMD64_TARGET_NAME: &str = "amd64";
pub const HOST_TARGET_NAME: &str = "host";

pub const ALL_TARGET_NAMES: [&str; 4] = [
    WAVM_TARGET_NAME,
    ARM64_TARGET_NAME,
    AMD64_TARGET_NAME,
    HOST_TARGET_NAME,
];

pub const LINUX_X64_DESCRIPTOR: &str = "x86_64-linux-unknown+sse4.2+lzcnt+bmi";
pub const LINUX_ARM64_DESCRIPTOR: &str = "arm64-linux-unknown+neon";
pub const MACOS_X64_DESCRIPTOR: &str = "x86_64-apple-darwin-unknown+sse4.2+lzcnt+bmi";
pub const MACOS_ARM64_DESCRIPTOR: &str = "aarch64-apple-darwin-unknown+neon";
pub const WINDOWS_GNU_X64_DESCRIPTOR: &str = "x86_64-pc-windows-gnu-unknown+sse4.2+lzcnt+bmi";
/// Empty descriptor: compile for whatever machine the engine runs on.
pub const HOST_DESCRIPTOR: &str = "";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("unsupported OS or architecture: {os} {arch}")]
    UnsupportedPlatform { os: String, arch: String },
    #[error("unsupported stylus target {0}; supported targets are: wavm, arm64, amd64, host")]
    UnsupportedTarget(String),
}

pub fn is_supported_target(name: &str) -> bool {
    ALL_TARGET_NAMES.contains(&name)
}

/// Name of the target matching the running machine.
pub fn local_target_name() -> &'static str {
    local_target_name_for(std::env::consts::ARCH)
}

pub fn local_target_name_for(arch: &str) -> &'static str {
    match arch {
        "x86_64" => AMD64_TARGET_NAME,
        "aarch64" => ARM64_TARGET_NAME,
        _ => HOST_TARGET_NAME,
    }
}

pub fn current_target_descriptor() -> Result<&'static str, TargetError> {
    target_descriptor_for(std::env::consts::OS, std::env::consts::ARCH)
}

pub fn target_descriptor_for(os: &str, arch: &str) -> Result<&'static str, TargetError> {
    match (os, arch) {
        ("linux", "x86_64") => Ok(LINUX_X64_DESCRIPTOR),
        ("linux", "aarch64") => Ok(LINUX_ARM64_DESCRIPTOR),
        ("macos", "x86_64") => Ok(MACOS_X64_DESCRIPTOR),
        ("macos", "aarch64") => Ok(MACOS_ARM64_DESCRIPTOR),
        ("windows", "x86_64") => Ok(WINDOWS_GNU_X64_DESCRIPTOR),
        _ => Err(TargetError::UnsupportedPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
        }),
    }
}
