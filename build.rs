use std::process::Command;

fn main() {
    let pkg = env!("CARGO_PKG_VERSION");
    let version = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| format!("{pkg} ({})", String::from_utf8_lossy(&o.stdout).trim()))
        .unwrap_or_else(|| pkg.to_string());

    println!("cargo:rustc-env=GIT_VERSION={version}");
    println!("cargo:rerun-if-changed=build.rs");
}
