use chrono::Utc;
use std::process::Command;

/// Embed `BUILD_HASH` (short commit, plus a build stamp when the tree is
/// dirty or git is unavailable) for `coli --version`.
fn main() {
    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string());

    let dirty = Command::new("git")
        .args(["diff", "--quiet", "HEAD"])
        .status()
        .map(|s| !s.success())
        .unwrap_or(false);

    let stamp = Utc::now().format("%Y%m%d-%H%M%S");
    let build_hash = match commit {
        Some(hash) if dirty => format!("{hash}-dirty-{stamp}"),
        Some(hash) => hash,
        None => format!("nogit-{stamp}"),
    };

    println!("cargo:rustc-env=BUILD_HASH={build_hash}");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");
}
