//! Scratch product workspace with a scripted stand-in for cargo.
//!
//! The fake cargo answers `metadata` from a canned JSON document, writes a
//! binary to `<target>/<triple>/release/` for `build`, writes the `--output`
//! file for `wix`, and appends every invocation to `cargo.log`.

#![allow(dead_code)]

use std::{
    cell::Cell,
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

/// How the fake `cargo build` behaves.
#[derive(Clone, Copy, Debug)]
pub enum BuildMode {
    /// Writes the release binary and exits 0
    Succeed,
    /// Exits 0 without writing a binary
    NoBinary,
    /// Prints a compiler error and exits 101
    Fail,
}

/// How the fake `cargo wix` behaves once past `--version`.
#[derive(Clone, Copy, Debug)]
pub enum WixMode {
    /// Writes the `--output` installer and exits 0
    Succeed,
    /// Exits 0 without writing the installer
    NoOutput,
    /// Prints a WiX compiler error and exits 1
    Fail,
}

pub struct FakeWorkspace {
    dir: TempDir,
    build_mode: Cell<BuildMode>,
    wix_mode: Cell<WixMode>,
}

impl FakeWorkspace {
    /// Workspace holding one `report-builder` 1.2.0 package.
    pub fn new() -> Self {
        Self::with_packages(&[("report-builder", "1.2.0")])
    }

    /// Workspace whose metadata lists exactly `packages`.
    pub fn with_packages(packages: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Self {
            dir,
            build_mode: Cell::new(BuildMode::Succeed),
            wix_mode: Cell::new(WixMode::Succeed),
        };

        fs::write(
            workspace.manifest_path(),
            "[package]\nname = \"report-builder\"\nversion = \"1.2.0\"\nedition = \"2021\"\n",
        )
        .unwrap();

        let packages: Vec<_> = packages
            .iter()
            .map(|(name, version)| serde_json::json!({ "name": name, "version": version }))
            .collect();
        let metadata = serde_json::json!({
            "packages": packages,
            "target_directory": workspace.target_dir(),
            "workspace_root": workspace.root(),
            "version": 1,
        });
        fs::write(workspace.metadata_path(), metadata.to_string()).unwrap();

        workspace.write_cargo();
        workspace
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root().join("Cargo.toml")
    }

    pub fn target_dir(&self) -> PathBuf {
        self.root().join("target")
    }

    pub fn cargo(&self) -> PathBuf {
        self.root().join("fake-cargo")
    }

    /// Where cargo-wix output lands for a target.
    pub fn installer_path(&self, target: &str) -> PathBuf {
        self.target_dir()
            .join("wix")
            .join(format!("report-builder-{target}.msi"))
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.target_dir().join("dist")
    }

    fn metadata_path(&self) -> PathBuf {
        self.root().join("metadata.json")
    }

    fn log_path(&self) -> PathBuf {
        self.root().join("cargo.log")
    }

    /// Cargo invocations so far, one argument string per line.
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    /// Rewrites the fake cargo with a different build behaviour.
    pub fn set_build_mode(&self, mode: BuildMode) {
        self.build_mode.set(mode);
        self.write_cargo();
    }

    /// Rewrites the fake cargo with a different `cargo wix` behaviour.
    pub fn set_wix_mode(&self, mode: WixMode) {
        self.wix_mode.set(mode);
        self.write_cargo();
    }

    /// Puts a `cargo-wix` executable next to the fake cargo, where
    /// subcommand discovery looks first.
    pub fn install_cargo_wix(&self) {
        write_executable(&self.root().join("cargo-wix"), "#!/bin/sh\nexit 0\n");
    }

    fn write_cargo(&self) {
        let build = match self.build_mode.get() {
            BuildMode::Succeed => format!(
                "echo '   Compiling report-builder v1.2.0' >&2\n    \
                 mkdir -p '{td}'/\"$target\"/release\n    \
                 printf 'report-builder for %s' \"$target\" > '{td}'/\"$target\"/release/\"$bin$ext\"",
                td = self.target_dir().display()
            ),
            BuildMode::NoBinary => "echo '    Finished release profile' >&2".to_string(),
            BuildMode::Fail => "echo \"error[E0463]: can't find crate for \\`std\\`\" >&2\n    \
                 echo \"  = note: the \\`$target\\` target may not be installed\" >&2\n    \
                 exit 101"
                .to_string(),
        };

        let wix = match self.wix_mode.get() {
            WixMode::Succeed => "mkdir -p \"$(dirname \"$output\")\"\n    \
                 printf 'msi for %s' \"$target\" > \"$output\""
                .to_string(),
            WixMode::NoOutput => "echo 'candle.exe finished' >&2".to_string(),
            WixMode::Fail => "echo 'error CNDL0104 : Not a valid source file' >&2\n    \
                 echo 'error: candle.exe exited with 1' >&2\n    \
                 exit 1"
                .to_string(),
        };

        let script = format!(
            r#"#!/bin/sh
PATH=/bin:/usr/bin
echo "$@" >> '{log}'
cmd="$1"
target=""
bin=""
output=""
prev=""
for arg in "$@"; do
  case "$prev" in
    --target) target="$arg" ;;
    --bin) bin="$arg" ;;
    --output) output="$arg" ;;
  esac
  prev="$arg"
done
case "$target" in
  *windows*) ext=.exe ;;
  *) ext= ;;
esac
case "$cmd" in
  metadata)
    cat '{metadata}'
    ;;
  build)
    {build}
    ;;
  wix)
    if [ "$2" = "--version" ]; then
      echo "cargo-wix 0.3.8"
      exit 0
    fi
    {wix}
    ;;
  *)
    echo "error: no such command: \`$cmd\`" >&2
    exit 101
    ;;
esac
"#,
            log = self.log_path().display(),
            metadata = self.metadata_path().display(),
        );

        write_executable(&self.cargo(), &script);
    }
}

fn write_executable(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Names of the entries in a `.tar.gz`, without trailing slashes.
pub fn archive_entries(archive: &Path) -> Vec<String> {
    let file = fs::File::open(archive).unwrap();
    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(file));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            entry
                .unwrap()
                .path()
                .unwrap()
                .to_string_lossy()
                .trim_end_matches('/')
                .to_string()
        })
        .collect()
}
