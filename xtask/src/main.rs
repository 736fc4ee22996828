// url-culture - Build Task Runner
// Run with `cargo xtask <COMMAND>`

use anyhow::{Context, Result};
use xshell::{cmd, Shell};

fn main() -> Result<()> {
    let sh = Shell::new()?;
    let args: Vec<_> = std::env::args().skip(1).collect();
    let _dir = sh.push_dir(project_root());

    match args.first().map(|s| s.as_str()) {
        Some("build") => build(&sh, args.iter().any(|a| a == "--release")),
        Some("test") => test(&sh),
        Some("format") => format(&sh, args.iter().any(|a| a == "--check")),
        Some("clippy") => clippy(&sh),
        Some("ci") => ci(&sh),
        _ => {
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("url-culture - Build Commands:");
    println!();
    println!("Usage: cargo xtask <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  build [--release]   Build the library and CLI");
    println!("  test                Run all tests");
    println!("  format [--check]    Format code (check mode doesn't modify)");
    println!("  clippy              Run clippy checks");
    println!("  ci                  Run format check, clippy and tests");
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    if release {
        cmd!(sh, "cargo build -p url-culture --release")
            .run()
            .context("Failed to build in release mode")?;
    } else {
        cmd!(sh, "cargo build -p url-culture").run().context("Failed to build")?;
    }
    println!("✅ Build complete");
    Ok(())
}

fn test(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --workspace").run().context("Tests failed")?;
    println!("✅ All tests passed");
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    if check {
        cmd!(sh, "cargo fmt --all -- --check")
            .run()
            .context("Rust code is not formatted")?;
    } else {
        cmd!(sh, "cargo fmt --all").run().context("Failed to format Rust code")?;
    }
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets -- --deny warnings")
        .run()
        .context("Clippy checks failed")?;
    Ok(())
}

/// Format check + clippy + test
fn ci(sh: &Shell) -> Result<()> {
    println!("📝 [1/3] Checking code format...");
    format(sh, true)?;
    println!("🔍 [2/3] Running clippy checks...");
    clippy(sh)?;
    println!("🧪 [3/3] Running tests...");
    test(sh)?;
    println!("🎉 CI pipeline completed successfully!");
    Ok(())
}

fn project_root() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .map(|p| p.to_path_buf())
        .unwrap_or_default()
}
