//! The analysis configuration descriptor (`c_cpp_properties.json`).

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::builder::include::{existing_or_empty, IncludeCandidate};
use crate::core::mode::AnalysisMode;
use crate::core::paths::ResolvedPaths;
use crate::core::properties::{keys, BuildPropertySet};
use crate::util::fs::FileSystem;

/// Name of the single configuration entry.
pub const CONFIGURATION_NAME: &str = "Arduino";

/// `version` field of the descriptor document.
pub const FORMAT_VERSION: u32 = 4;

/// C language standard.
pub const C_STANDARD: &str = "c11";

/// C++ language standard.
pub const CPP_STANDARD: &str = "c++17";

/// IDE protocol version marker.
pub const PROTOCOL_VERSION_DEFINE: &str = "ARDUINO=10815";

/// Board define used when `build.board` is missing.
pub const BOARD_PLACEHOLDER_DEFINE: &str = "ARDUINO_BOARD";

/// Clock frequency used when `build.f_cpu` is missing.
pub const DEFAULT_F_CPU: &str = "16000000L";

/// Native USB capability marker.
pub const COMMS_DEFINE: &str = "USBCON";

/// Synthesized analysis configuration for one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Compiler driver, empty if it does not exist.
    pub compiler_path: String,
    pub compiler_args: Vec<String>,
    pub mode: AnalysisMode,
    /// Existing include directories, in precedence order.
    pub include_path: Vec<IncludeCandidate>,
    /// Zero or one forced header.
    pub forced_include: Vec<String>,
    pub defines: Vec<String>,
    pub c_standard: &'static str,
    pub cpp_standard: &'static str,
}

impl AnalysisConfig {
    /// Assemble the configuration from resolved paths and filtered includes.
    pub fn synthesize(
        props: &BuildPropertySet,
        paths: &ResolvedPaths,
        mode: AnalysisMode,
        include_path: Vec<IncludeCandidate>,
        files: &dyn FileSystem,
    ) -> Self {
        let compiler_path = existing_or_empty(&paths.compiler_executable_path, files);
        if compiler_path.is_empty() {
            tracing::debug!(
                "compiler `{}` not found, leaving compilerPath empty",
                paths.compiler_executable_path
            );
        }

        // A present MCU property always yields the flag, even when empty.
        let compiler_args = props
            .get(keys::MCU)
            .map(|mcu| vec![format!("-mmcu={}", mcu)])
            .unwrap_or_default();

        let forced_include = if paths.header_entry_point_path.is_empty() {
            Vec::new()
        } else {
            vec![paths.header_entry_point_path.clone()]
        };

        AnalysisConfig {
            compiler_path,
            compiler_args,
            mode,
            include_path,
            forced_include,
            defines: defines(props),
            c_standard: C_STANDARD,
            cpp_standard: CPP_STANDARD,
        }
    }

    /// The serializable configuration entry.
    pub fn to_entry(&self) -> ConfigurationEntry {
        ConfigurationEntry {
            name: CONFIGURATION_NAME.to_string(),
            compiler_path: self.compiler_path.clone(),
            compiler_args: self.compiler_args.clone(),
            intelli_sense_mode: self.mode.intellisense_mode().to_string(),
            include_path: self.include_path.iter().map(IncludeCandidate::entry).collect(),
            forced_include: self.forced_include.clone(),
            defines: self.defines.clone(),
            c_standard: self.c_standard.to_string(),
            cpp_standard: self.cpp_standard.to_string(),
        }
    }

    /// Render the full descriptor document.
    pub fn to_document_string(&self) -> Result<String> {
        let doc = CppProperties {
            configurations: vec![self.to_entry()],
            version: FORMAT_VERSION,
        };
        let mut json = serde_json::to_string_pretty(&doc)?;
        json.push('\n');
        Ok(json)
    }
}

/// Preprocessor defines for a board.
pub fn defines(props: &BuildPropertySet) -> Vec<String> {
    let board = props
        .get_non_empty(keys::BOARD)
        .map(|b| format!("ARDUINO_{}", b))
        .unwrap_or_else(|| BOARD_PLACEHOLDER_DEFINE.to_string());
    let f_cpu = props.get_non_empty(keys::F_CPU).unwrap_or(DEFAULT_F_CPU);

    vec![
        PROTOCOL_VERSION_DEFINE.to_string(),
        board,
        format!("F_CPU={}", f_cpu),
        COMMS_DEFINE.to_string(),
    ]
}

/// Top-level descriptor document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CppProperties {
    pub configurations: Vec<ConfigurationEntry>,
    pub version: u32,
}

/// One configuration entry as the editor reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationEntry {
    pub name: String,
    pub compiler_path: String,
    pub compiler_args: Vec<String>,
    pub intelli_sense_mode: String,
    pub include_path: Vec<String>,
    pub forced_include: Vec<String>,
    pub defines: Vec<String>,
    pub c_standard: String,
    pub cpp_standard: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::include::CandidateOrigin;
    use crate::test_support::MockFileSystem;

    fn paths() -> ResolvedPaths {
        ResolvedPaths {
            platform_path: "/hw/avr".to_string(),
            core_path: "/hw/avr/cores/arduino".to_string(),
            variant_path: "/hw/avr/variants/standard".to_string(),
            compiler_executable_path: "/opt/avr/bin/avr-g++".to_string(),
            header_entry_point_path: "/hw/avr/cores/arduino/Arduino.h".to_string(),
        }
    }

    #[test]
    fn test_defines_from_properties() {
        let props: BuildPropertySet = [("build.board", "AVR_UNO"), ("build.f_cpu", "8000000L")]
            .into_iter()
            .collect();
        assert_eq!(
            defines(&props),
            vec!["ARDUINO=10815", "ARDUINO_AVR_UNO", "F_CPU=8000000L", "USBCON"]
        );
    }

    #[test]
    fn test_defines_fallbacks() {
        assert_eq!(
            defines(&BuildPropertySet::new()),
            vec!["ARDUINO=10815", "ARDUINO_BOARD", "F_CPU=16000000L", "USBCON"]
        );
    }

    #[test]
    fn test_compiler_args_from_mcu() {
        let fs = MockFileSystem::new();
        let props: BuildPropertySet = [("build.mcu", "atmega328p")].into_iter().collect();

        let config = AnalysisConfig::synthesize(&props, &paths(), AnalysisMode::EmbeddedAvr, vec![], &fs);
        assert_eq!(config.compiler_args, vec!["-mmcu=atmega328p"]);

        let none = AnalysisConfig::synthesize(
            &BuildPropertySet::new(),
            &paths(),
            AnalysisMode::EmbeddedAvr,
            vec![],
            &fs,
        );
        assert!(none.compiler_args.is_empty());
    }

    #[test]
    fn test_empty_mcu_still_emits_flag() {
        let fs = MockFileSystem::new();
        let props: BuildPropertySet = [("build.mcu", "")].into_iter().collect();

        let config = AnalysisConfig::synthesize(&props, &paths(), AnalysisMode::EmbeddedAvr, vec![], &fs);
        assert_eq!(config.compiler_args, vec!["-mmcu="]);
    }

    #[test]
    fn test_missing_compiler_is_empty_not_omitted() {
        let fs = MockFileSystem::new();
        let config = AnalysisConfig::synthesize(
            &BuildPropertySet::new(),
            &paths(),
            AnalysisMode::EmbeddedAvr,
            vec![],
            &fs,
        );
        assert_eq!(config.compiler_path, "");

        let doc: serde_json::Value =
            serde_json::from_str(&config.to_document_string().unwrap()).unwrap();
        assert_eq!(doc["configurations"][0]["compilerPath"], "");
    }

    #[test]
    fn test_existing_compiler_kept() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/opt/avr/bin/avr-g++", "");
        let config = AnalysisConfig::synthesize(
            &BuildPropertySet::new(),
            &paths(),
            AnalysisMode::EmbeddedAvr,
            vec![],
            &fs,
        );
        assert_eq!(config.compiler_path, "/opt/avr/bin/avr-g++");
    }

    #[test]
    fn test_document_shape() {
        let fs = MockFileSystem::new();
        let config = AnalysisConfig::synthesize(
            &BuildPropertySet::new(),
            &paths(),
            AnalysisMode::EmbeddedArm,
            vec![IncludeCandidate::recursive("/work", CandidateOrigin::Workspace)],
            &fs,
        );

        let doc: CppProperties = serde_json::from_str(&config.to_document_string().unwrap()).unwrap();
        assert_eq!(doc.version, 4);
        assert_eq!(doc.configurations.len(), 1);

        let entry = &doc.configurations[0];
        assert_eq!(entry.name, "Arduino");
        assert_eq!(entry.intelli_sense_mode, "gcc-arm");
        assert_eq!(entry.include_path, vec!["/work/**"]);
        assert_eq!(entry.forced_include, vec!["/hw/avr/cores/arduino/Arduino.h"]);
        assert_eq!(entry.c_standard, "c11");
        assert_eq!(entry.cpp_standard, "c++17");
    }

    #[test]
    fn test_document_uses_editor_field_names() {
        let fs = MockFileSystem::new();
        let config = AnalysisConfig::synthesize(
            &BuildPropertySet::new(),
            &ResolvedPaths::default(),
            AnalysisMode::GenericX64,
            vec![],
            &fs,
        );
        let text = config.to_document_string().unwrap();

        for field in [
            "\"name\"",
            "\"compilerPath\"",
            "\"compilerArgs\"",
            "\"intelliSenseMode\"",
            "\"includePath\"",
            "\"forcedInclude\"",
            "\"defines\"",
            "\"cStandard\"",
            "\"cppStandard\"",
            "\"version\"",
        ] {
            assert!(text.contains(field), "missing {}", field);
        }
        assert!(text.contains("\"forcedInclude\": []"));
    }
}
