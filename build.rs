use std::env;
use std::process::Command;

const SHA_OVERRIDE: &str = "IDEA_FORGE_BUILD_SHA";

fn git_short_sha() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-env-changed={SHA_OVERRIDE}");
    println!("cargo:rerun-if-changed=.git/HEAD");

    // Source tarballs carry no .git; packagers pass the sha in instead.
    let sha = env::var(SHA_OVERRIDE)
        .ok()
        .or_else(git_short_sha)
        .map(|sha| sha.trim().to_string())
        .filter(|sha| !sha.is_empty())
        .unwrap_or_else(|| "dev".to_string());

    println!("cargo:rustc-env=IDEA_FORGE_GIT_SHA={sha}");
}
