use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=SKILLS_VERSION");

    // Release workflows pin the version through the environment; local
    // builds pick up whatever the enclosing checkout describes.
    let version = std::env::var("SKILLS_VERSION").ok().or_else(git_describe);
    if let Some(version) = version {
        println!("cargo:rustc-env=SKILLS_VERSION={version}");
    }
}

fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
