use std::process::Command;

// Embeds `git describe` output as RECIPEBOX_VERSION, falling back to the
// crate version outside a git checkout.
fn main() {
    let describe = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_owned())
        .filter(|s| !s.is_empty());

    let version = match describe {
        Some(s) => s.strip_prefix('v').unwrap_or(&s).to_owned(),
        None => env!("CARGO_PKG_VERSION").to_owned(),
    };

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rustc-env=RECIPEBOX_VERSION={version}");
}
