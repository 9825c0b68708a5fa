//! Embeds the commit and build date shown by `flappy --version`.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

const UNKNOWN: &str = "unknown";

/// Short commit hash: `BUILD_COMMIT` wins, then `git`, then "unknown".
fn commit() -> String {
    if let Ok(commit) = env::var("BUILD_COMMIT") {
        return commit;
    }
    let Ok(output) = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
    else {
        return UNKNOWN.to_string();
    };
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if output.status.success() && !hash.is_empty() {
        hash
    } else {
        UNKNOWN.to_string()
    }
}

fn build_date() -> String {
    env::var("BUILD_DATE").unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string())
}

fn main() {
    let out = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    let generated = format!(
        "pub const BUILD_COMMIT: &str = {:?};\npub const BUILD_DATE: &str = {:?};\n",
        commit(),
        build_date()
    );
    fs::write(out.join("build_info.rs"), generated).expect("write build_info.rs");

    for var in ["BUILD_COMMIT", "BUILD_DATE"] {
        println!("cargo:rerun-if-env-changed={}", var);
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
}
