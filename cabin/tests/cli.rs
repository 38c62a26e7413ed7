//! End-to-end scenarios against the built `cabin` binary, run against
//! throwaway `tempfile::TempDir` project fixtures. Scenarios requiring
//! a real C++ toolchain on `$PATH` are skipped (with a printed notice)
//! when one isn't available, since CI sandboxes may lack one.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn cabin() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cabin"));
    command.env("CABIN_TERM_COLOR", "never");
    command
}

fn toolchain_available() -> bool {
    which::which("make").is_ok()
        && (which::which("c++").is_ok() || which::which("g++").is_ok() || which::which("clang++").is_ok())
}

#[test]
fn new_creates_a_binary_package() {
    let dir = TempDir::new().unwrap();
    let output = cabin()
        .current_dir(dir.path())
        .arg("new")
        .arg("hello_world")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let pkg = dir.path().join("hello_world");
    assert!(pkg.join(".git").is_dir());
    assert!(pkg.join(".gitignore").is_file());
    assert!(pkg.join("cabin.toml").is_file());
    assert!(pkg.join("src/main.cc").is_file());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Created binary (application) `hello_world` package"));
}

#[test]
fn new_lib_creates_an_include_dir() {
    let dir = TempDir::new().unwrap();
    let output = cabin()
        .current_dir(dir.path())
        .arg("new")
        .arg("--lib")
        .arg("hello_world")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(dir.path().join("hello_world/include").is_dir());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Created library `hello_world` package"));
}

#[test]
fn new_without_a_name_fails() {
    let dir = TempDir::new().unwrap();
    let output = cabin().current_dir(dir.path()).arg("new").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: package name must not be empty"));
}

#[test]
fn remove_warns_on_missing_dep_and_removes_the_rest() {
    let dir = TempDir::new().unwrap();
    let pkg = dir.path().join("pkg");
    std::fs::create_dir(&pkg).unwrap();
    std::fs::create_dir(pkg.join("src")).unwrap();
    std::fs::write(pkg.join("src/main.cc"), "int main() { return 0; }\n").unwrap();
    std::fs::write(
        pkg.join("cabin.toml"),
        "[package]\nname = \"pkg\"\nedition = \"20\"\nversion = \"0.1.0\"\n\n\
         [dependencies]\ntbb = { system = true, version = \"^2021\" }\n\
         toml11 = { git = \"https://example.com/toml11\" }\n",
    )
    .unwrap();

    let output = cabin()
        .current_dir(&pkg)
        .arg("remove")
        .arg("tbb")
        .arg("mydep")
        .arg("toml11")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Warning: Dependency `mydep` not found in"));
    assert!(stderr.contains("Removed tbb, toml11 from"));

    let manifest = std::fs::read_to_string(pkg.join("cabin.toml")).unwrap();
    assert!(!manifest.contains("tbb"));
    assert!(!manifest.contains("toml11"));
}

#[test]
fn run_builds_and_executes_a_fresh_package() {
    if !toolchain_available() {
        eprintln!("skipping run_builds_and_executes_a_fresh_package: no C++ toolchain on PATH");
        return;
    }

    let dir = TempDir::new().unwrap();
    assert!(cabin()
        .current_dir(dir.path())
        .arg("new")
        .arg("hello_world")
        .status()
        .unwrap()
        .success());

    let pkg = dir.path().join("hello_world");
    let output = cabin().current_dir(&pkg).arg("run").output().unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello, world!\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Compiling hello_world v0.1.0"));
    assert!(stderr.contains("Finished `dev` profile [unoptimized + debuginfo]"));
    assert!(binary_exists(&pkg, "hello_world"));
}

fn binary_exists(pkg: &Path, name: &str) -> bool {
    pkg.join("cabin-out").join("dev").join(name).is_file()
}

#[test]
fn version_reports_a_stable_line_regardless_of_flag_order() {
    let with_vv = cabin().arg("-vV").output().unwrap();
    let with_vv_swapped = cabin().arg("-Vv").output().unwrap();
    assert_eq!(with_vv.stdout, with_vv_swapped.stdout);
}
