/// Configuration document read by the workflow.
///
/// The document is a set of named sections, one per tool of the pipeline. It is created from
/// the template embedded in the binary, or loaded back from an earlier project, and written
/// once into the working directory as `config.json`. Every section rejects unknown fields on
/// load, so a reused document is either reproduced as is or refused.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::configs::Kingdom;
use crate::errors::DenovoError;

/// File name of the configuration document inside a working directory
pub const CONFIG_FILE: &str = "config.json";

const TEMPLATE: &str = include_str!("../pipeline/config.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSection {
    pub directory: String,
    pub pattern: String,
    pub readtag: String,
}

/// digital normalisation (khmer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizationSection {
    #[serde(rename = "do")]
    pub enabled: bool,
    pub ksize: u32,
    pub cutoff: u32,
    /// bytes
    pub max_memory_usage: f64,
    pub threads: u32,
    pub options: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resources {
    pub mem: String,
}

/// spades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssemblerSection {
    /// Gb
    pub memory: u32,
    pub threads: u32,
    pub k: String,
    pub options: String,
    pub resources: Resources,
}

/// quast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceComparisonSection {
    pub reference: String,
    pub threads: u32,
    pub options: String,
}

/// prokka
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationSection {
    #[serde(rename = "do")]
    pub enabled: bool,
    pub kingdom: Kingdom,
    pub threads: u32,
    pub options: String,
}

/// sequana_coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverageSection {
    #[serde(rename = "do")]
    pub enabled: bool,
    pub circular: bool,
    pub window_size: u32,
    pub double_threshold: f64,
    pub high_threshold: f64,
    pub low_threshold: f64,
}

/// freebayes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantCallerSection {
    #[serde(rename = "do")]
    pub enabled: bool,
    pub ploidy: u32,
    pub options: String,
}

/// checkm and busco
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaxonomySection {
    #[serde(rename = "do")]
    pub enabled: bool,
    pub taxon_rank: String,
    pub taxon_name: String,
    pub lineage: String,
    pub threads: u32,
}

/// The whole document, one field per section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DenovoConfig {
    pub input: InputSection,
    pub normalization: NormalizationSection,
    pub assembler: AssemblerSection,
    #[serde(rename = "reference-comparison")]
    pub reference_comparison: ReferenceComparisonSection,
    pub annotation: AnnotationSection,
    pub coverage: CoverageSection,
    #[serde(rename = "variant-caller")]
    pub variant_caller: VariantCallerSection,
    #[serde(rename = "taxonomy-classification")]
    pub taxonomy: TaxonomySection,
}

impl DenovoConfig {
    /// Fresh document from the embedded template
    pub fn template() -> Result<Self, DenovoError> {
        serde_json::from_str(TEMPLATE).map_err(|source| DenovoError::Config {
            path: PathBuf::from("pipeline/config.json"),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, DenovoError> {
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader).map_err(|source| DenovoError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the document of an earlier project, given either its directory or the file itself
    pub fn from_project(project: &Path) -> Result<Self, DenovoError> {
        let path = if project.is_dir() {
            project.join(CONFIG_FILE)
        } else {
            project.to_path_buf()
        };

        if !path.is_file() {
            return Err(DenovoError::MissingProjectConfig(project.to_path_buf()));
        }

        info!("Reusing configuration from {}", path.display());
        Self::load(&path)
    }

    pub fn save(&self, path: &Path) -> Result<(), DenovoError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| DenovoError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_documented_defaults() {
        let cfg = DenovoConfig::template().unwrap();
        assert_eq!(cfg.input.pattern, "*fastq.gz");
        assert_eq!(cfg.assembler.memory, 64);
        assert_eq!(cfg.assembler.resources.mem, "64G");
        assert_eq!(cfg.normalization.max_memory_usage, 4e9);
        assert_eq!(cfg.reference_comparison.reference, "");
        assert_eq!(cfg.annotation.kingdom, Kingdom::Bacteria);
        assert!(cfg.annotation.enabled);
        assert!(!cfg.coverage.circular);
        assert_eq!(cfg.variant_caller.ploidy, 1);
        assert!(!cfg.taxonomy.enabled);
        assert_eq!(cfg.taxonomy.taxon_rank, "genus");
    }

    #[test]
    fn saved_document_loads_back_equal() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);

        let mut cfg = DenovoConfig::template().unwrap();
        cfg.annotation.kingdom = Kingdom::Viruses;
        cfg.taxonomy.taxon_name = "Escherichia".to_string();
        cfg.save(&path).unwrap();

        assert_eq!(DenovoConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn section_names_are_kept_on_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        DenovoConfig::template().unwrap().save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        for section in [
            "input",
            "normalization",
            "assembler",
            "reference-comparison",
            "annotation",
            "coverage",
            "variant-caller",
            "taxonomy-classification",
        ] {
            assert!(raw.get(section).is_some(), "missing section {section}");
        }
        assert_eq!(raw["annotation"]["do"], serde_json::Value::Bool(true));
        assert_eq!(raw["assembler"]["resources"]["mem"], "64G");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);

        let mut raw: serde_json::Value = serde_json::from_str(TEMPLATE).unwrap();
        raw["coverage"]["mystery"] = serde_json::Value::Bool(true);
        std::fs::write(&path, raw.to_string()).unwrap();

        assert!(matches!(
            DenovoConfig::load(&path),
            Err(DenovoError::Config { .. })
        ));
    }

    #[test]
    fn project_lookup_accepts_directory_or_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        let cfg = DenovoConfig::template().unwrap();
        cfg.save(&path).unwrap();

        assert_eq!(DenovoConfig::from_project(tmp.path()).unwrap(), cfg);
        assert_eq!(DenovoConfig::from_project(&path).unwrap(), cfg);
    }

    #[test]
    fn project_without_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            DenovoConfig::from_project(tmp.path()),
            Err(DenovoError::MissingProjectConfig(_))
        ));
    }
}
