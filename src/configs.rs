use clap::ValueEnum;
use glob::Pattern;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::DenovoError;

/// Annotation kingdom accepted by prokka
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum Kingdom {
    #[value(name = "Archaea")]
    Archaea,
    #[value(name = "Mitochondria")]
    Mitochondria,
    #[value(name = "Viruses")]
    Viruses,
    #[default]
    #[value(name = "Bacteria")]
    Bacteria,
}

/// Where the launch script sends the jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Profile {
    #[default]
    Local,
    Slurm,
}

/// Pipeline options of one invocation, already typed and defaulted by the parser
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSet {
    pub input_directory: PathBuf,
    pub input_pattern: String,
    pub input_readtag: String,
    pub freebayes_ploidy: u32,
    pub quast_reference: Option<PathBuf>,
    pub skip_prokka: bool,
    pub prokka_kingdom: Kingdom,
    pub checkm_rank: Option<String>,
    pub checkm_name: Option<String>,
    pub busco_lineage: Option<String>,
    pub sequana_coverage_circular: bool,
    pub spades_memory: u32,
    pub digital_normalisation_max_memory_usage: f64,
}

impl OptionSet {
    /// Option set with the command-line defaults and the given input directory
    #[cfg(test)]
    pub fn with_input_directory<P: Into<PathBuf>>(input_directory: P) -> Self {
        Self {
            input_directory: input_directory.into(),
            input_pattern: "*fastq.gz".to_string(),
            input_readtag: "_R[12]_".to_string(),
            freebayes_ploidy: 1,
            quast_reference: None,
            skip_prokka: false,
            prokka_kingdom: Kingdom::Bacteria,
            checkm_rank: None,
            checkm_name: None,
            busco_lineage: None,
            sequana_coverage_circular: false,
            spades_memory: 64,
            digital_normalisation_max_memory_usage: 4e9,
        }
    }

    /// Check the input directory before anything is written
    pub fn check(&self) -> Result<(), DenovoError> {
        let dir = &self.input_directory;
        if !dir.exists() {
            return Err(DenovoError::InvalidInput(format!(
                "input directory {:?} does not exist",
                dir
            )));
        }
        if !dir.is_dir() {
            return Err(DenovoError::InvalidInput(format!(
                "input directory {:?} is not a directory",
                dir
            )));
        }

        if count_matching_files(dir, &self.input_pattern)? == 0 {
            warn!(
                "No file in {:?} matches the pattern {}. The workflow will have no sample.",
                dir, self.input_pattern
            );
        }

        Ok(())
    }
}

/// Count the regular files of `dir` whose name matches the glob pattern
pub fn count_matching_files(dir: &Path, pattern: &str) -> Result<usize, DenovoError> {
    let pattern = Pattern::new(pattern).map_err(|e| {
        DenovoError::InvalidInput(format!("invalid input pattern {:?}: {}", pattern, e))
    })?;

    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            count += 1;
        }
    }
    Ok(count)
}

/// Settings of the working directory scaffolding, never written into the configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerConfig {
    pub working_directory: PathBuf,
    pub force: bool,
    pub jobs: u32,
    pub use_apptainer: bool,
    pub apptainer_prefix: Option<PathBuf>,
    pub apptainer_args: String,
    pub profile: Profile,
    pub slurm_queue: String,
    pub slurm_memory: String,
    pub from_project: Option<PathBuf>,
}

impl ManagerConfig {
    #[cfg(test)]
    pub fn new<P: Into<PathBuf>>(working_directory: P) -> Self {
        Self {
            working_directory: working_directory.into(),
            force: false,
            jobs: 40,
            use_apptainer: false,
            apptainer_prefix: None,
            apptainer_args: String::new(),
            profile: Profile::Local,
            slurm_queue: "common".to_string(),
            slurm_memory: "4G".to_string(),
            from_project: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn check_rejects_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let options = OptionSet::with_input_directory(tmp.path().join("nope"));
        assert!(matches!(options.check(), Err(DenovoError::InvalidInput(_))));
    }

    #[test]
    fn check_rejects_regular_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("reads_R1_.fastq.gz");
        File::create(&file).unwrap();
        let options = OptionSet::with_input_directory(&file);
        assert!(matches!(options.check(), Err(DenovoError::InvalidInput(_))));
    }

    #[test]
    fn check_accepts_directory_without_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let options = OptionSet::with_input_directory(tmp.path());
        assert!(options.check().is_ok());
    }

    #[test]
    fn matching_files_follow_glob_rules() {
        let tmp = tempfile::tempdir().unwrap();
        File::create(tmp.path().join("A_R1_.fq.gz")).unwrap();
        File::create(tmp.path().join("B_R1_.fastq.gz.bak")).unwrap();

        assert_eq!(count_matching_files(tmp.path(), "*_R[12]_.fq.gz").unwrap(), 1);
        assert_eq!(count_matching_files(tmp.path(), "?_R1_.fq.gz").unwrap(), 1);
        assert_eq!(count_matching_files(tmp.path(), "*fastq.gz*").unwrap(), 1);
        assert_eq!(count_matching_files(tmp.path(), "*fastq.gz").unwrap(), 0);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            count_matching_files(tmp.path(), "[abc"),
            Err(DenovoError::InvalidInput(_))
        ));

        let mut options = OptionSet::with_input_directory(tmp.path());
        options.input_pattern = "reads[".to_string();
        assert!(matches!(options.check(), Err(DenovoError::InvalidInput(_))));
    }

    #[test]
    fn matching_files_skip_directories() {
        let tmp = tempfile::tempdir().unwrap();
        File::create(tmp.path().join("A_R1_.fastq.gz")).unwrap();
        File::create(tmp.path().join("A_R2_.fastq.gz")).unwrap();
        File::create(tmp.path().join("notes.txt")).unwrap();
        std::fs::create_dir(tmp.path().join("sub.fastq.gz")).unwrap();

        assert_eq!(count_matching_files(tmp.path(), "*fastq.gz").unwrap(), 2);
        assert_eq!(count_matching_files(tmp.path(), "*.txt").unwrap(), 1);
        assert_eq!(count_matching_files(tmp.path(), "*").unwrap(), 3);
    }
}
