//! Board platform fixtures.
//!
//! A [`PlatformFixture`] describes an installed board package: platform
//! tree, core, variant, and a GCC install root. It populates a
//! [`MockFileSystem`] and renders the matching property dump.

use std::path::{Path, PathBuf};

use super::MockFileSystem;
use crate::util::fs::to_slash;

/// An installed board platform.
#[derive(Debug, Clone)]
pub struct PlatformFixture {
    /// `build.arch` value.
    pub arch: String,
    /// Core directory name.
    pub core: String,
    /// Variant directory name.
    pub variant: String,
    /// Compiler driver command name.
    pub compiler_cmd: String,
    /// Target-triple directories under the toolchain root that carry `include/`.
    pub triples: Vec<String>,
    /// Whether `<toolchain>/lib/gcc` exists.
    pub compiler_family_dir: bool,
    /// Whether the compiler binary exists.
    pub compiler_binary: bool,
    /// Whether `Arduino.h` exists in the core.
    pub root_header: bool,
    /// Whether the platform ships a `libraries/` directory.
    pub platform_libraries: bool,
    /// Optional `build.mcu`.
    pub mcu: Option<String>,
    /// Optional `build.board`.
    pub board: Option<String>,
    /// Optional `build.f_cpu`.
    pub f_cpu: Option<String>,
}

impl PlatformFixture {
    /// Classic AVR board (Uno).
    pub fn avr() -> Self {
        PlatformFixture {
            arch: "avr".to_string(),
            core: "arduino".to_string(),
            variant: "standard".to_string(),
            compiler_cmd: "avr-g++".to_string(),
            triples: vec!["avr".to_string()],
            compiler_family_dir: true,
            compiler_binary: true,
            root_header: true,
            platform_libraries: true,
            mcu: Some("atmega328p".to_string()),
            board: Some("AVR_UNO".to_string()),
            f_cpu: Some("16000000L".to_string()),
        }
    }

    /// ESP32 board with an Xtensa toolchain.
    pub fn esp32() -> Self {
        PlatformFixture {
            arch: "esp32".to_string(),
            core: "esp32".to_string(),
            variant: "esp32".to_string(),
            compiler_cmd: "xtensa-esp32-elf-g++".to_string(),
            triples: vec!["xtensa-esp32-elf".to_string()],
            compiler_family_dir: false,
            compiler_binary: true,
            root_header: true,
            platform_libraries: false,
            mcu: None,
            board: Some("ESP32_DEV".to_string()),
            f_cpu: Some("240000000L".to_string()),
        }
    }

    /// Root of the platform package.
    pub fn platform_dir(&self, base: &Path) -> PathBuf {
        base.join("hardware").join(&self.arch)
    }

    /// Root of the compiler install.
    pub fn toolchain_dir(&self, base: &Path) -> PathBuf {
        base.join("tools").join(format!("{}-gcc", self.arch))
    }

    /// Path of the compiler driver.
    pub fn compiler_path(&self, base: &Path) -> PathBuf {
        self.toolchain_dir(base).join("bin").join(&self.compiler_cmd)
    }

    /// Core directory.
    pub fn core_dir(&self, base: &Path) -> PathBuf {
        self.platform_dir(base).join("cores").join(&self.core)
    }

    /// Variant directory.
    pub fn variant_dir(&self, base: &Path) -> PathBuf {
        self.platform_dir(base).join("variants").join(&self.variant)
    }

    /// Render the property dump arduino-cli would print for this board.
    pub fn properties(&self, base: &Path) -> String {
        let mut out = String::new();
        out.push_str(&format!("build.arch={}\n", self.arch.to_uppercase()));
        out.push_str(&format!("build.core={}\n", self.core));
        out.push_str(&format!("build.variant={}\n", self.variant));
        out.push_str(&format!(
            "runtime.platform.path={}\n",
            to_slash(&self.platform_dir(base))
        ));
        out.push_str(&format!(
            "compiler.path={}/\n",
            to_slash(&self.toolchain_dir(base).join("bin"))
        ));
        out.push_str(&format!("compiler.cpp.cmd={}\n", self.compiler_cmd));
        if let Some(ref mcu) = self.mcu {
            out.push_str(&format!("build.mcu={}\n", mcu));
        }
        if let Some(ref board) = self.board {
            out.push_str(&format!("build.board={}\n", board));
        }
        if let Some(ref f_cpu) = self.f_cpu {
            out.push_str(&format!("build.f_cpu={}\n", f_cpu));
        }
        out.push_str("recipe.cpp.o.pattern=\"{compiler.path}{compiler.cpp.cmd}\" -c -DX=1\n");
        out
    }

    /// Directories and files making up the fixture.
    fn layout(&self, base: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let mut dirs = vec![
            self.core_dir(base),
            self.variant_dir(base),
            self.toolchain_dir(base).join("bin"),
        ];
        let mut files = Vec::new();

        if self.platform_libraries {
            dirs.push(self.platform_dir(base).join("libraries"));
        }
        for triple in &self.triples {
            dirs.push(self.toolchain_dir(base).join(triple).join("include"));
        }
        if self.compiler_family_dir {
            dirs.push(self.toolchain_dir(base).join("lib").join("gcc"));
        }
        if self.compiler_binary {
            files.push(self.compiler_path(base));
        }
        if self.root_header {
            files.push(self.core_dir(base).join("Arduino.h"));
        }

        (dirs, files)
    }

    /// Add the fixture to a mock filesystem under `base`.
    pub fn populate(&self, fs: &mut MockFileSystem, base: &Path) {
        let (dirs, files) = self.layout(base);
        for dir in dirs {
            fs.add_dir(dir);
        }
        for file in files {
            fs.add_file(file, "");
        }
    }
}
