use clap::{Args, Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use crate::configs::{Kingdom, ManagerConfig, OptionSet, Profile};
use crate::errors::DenovoError;

#[derive(Parser, Debug)]
#[command(name = "denovo", version, about = "Configure and launch a de novo genome assembly workflow (spades, quast, prokka, sequana_coverage, freebayes, checkm, busco)")]
pub struct Cli {

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(flatten)]
    pub completeness: CompletenessArgs,

    #[command(flatten)]
    pub snakemake: SnakemakeArgs,

    #[command(flatten)]
    pub slurm: SlurmArgs,

    #[command(flatten)]
    pub general: GeneralArgs,
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Input")]
pub struct InputArgs {

    /// Directory holding the input reads
    #[arg(long, value_name = "PATH", required_unless_present_any = ["from_project", "deps"])]
    pub input_directory: Option<PathBuf>,

    /// Pattern of the read files inside the input directory
    #[arg(long, default_value = "*fastq.gz")]
    pub input_pattern: String,

    /// Tag telling read 1 from read 2 in paired-end file names
    #[arg(long, default_value = "_R[12]_")]
    pub input_readtag: String,
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Pipeline Specific")]
pub struct PipelineArgs {

    /// Reference genome given to quast
    #[arg(long, value_name = "PATH")]
    pub quast_reference: Option<PathBuf>,

    /// Do not annotate the assembly with prokka
    #[arg(long)]
    pub skip_prokka: bool,

    /// Kingdom used by prokka
    #[arg(long, value_enum, default_value_t = Kingdom::Bacteria)]
    pub prokka_kingdom: Kingdom,

    /// Tell sequana_coverage the genome is circular
    #[arg(long)]
    pub sequana_coverage_circular: bool,

    /// Ploidy used by freebayes
    #[arg(long, default_value_t = 1)]
    pub freebayes_ploidy: u32,

    /// Max memory used by spades, in Gb
    #[arg(long, default_value_t = 64)]
    pub spades_memory: u32,

    /// Max memory used by the digital normalisation, in bytes
    #[arg(long, default_value_t = 4e9)]
    pub digital_normalisation_max_memory_usage: f64,
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Pipeline Specific Completeness")]
pub struct CompletenessArgs {

    /// Taxonomic rank for checkm: domain, phylum, class, order, family, genus or species.
    /// checkm only runs when --checkm-name is set too. [template default: genus]
    #[arg(long)]
    pub checkm_rank: Option<String>,

    /// Taxon name for checkm (see `checkm taxon_list`)
    #[arg(long)]
    pub checkm_name: Option<String>,

    /// Lineage, or path to a lineage file, for BUSCO (version 5 lineages only)
    #[arg(long)]
    pub busco_lineage: Option<String>,
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Snakemake")]
pub struct SnakemakeArgs {

    /// Where the configuration, workflow and launch script are written
    #[arg(long, value_name = "PATH", default_value = "denovo")]
    pub working_directory: PathBuf,

    /// Overwrite an existing working directory
    #[arg(long)]
    pub force: bool,

    /// Number of jobs run at the same time
    #[arg(long, default_value_t = 40)]
    pub jobs: u32,

    /// Run the tools inside apptainer containers
    #[arg(long)]
    pub use_apptainer: bool,

    /// Directory where the apptainer images are stored
    #[arg(long, value_name = "PATH")]
    pub apptainer_prefix: Option<PathBuf>,

    /// Extra arguments given to apptainer
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub apptainer_args: String,
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Slurm")]
pub struct SlurmArgs {

    /// Run locally or submit the jobs to slurm
    #[arg(long, value_enum, default_value_t = Profile::Local)]
    pub profile: Profile,

    /// Slurm partition
    #[arg(long, default_value = "common")]
    pub slurm_queue: String,

    /// Default memory of a slurm job
    #[arg(long, default_value = "4G")]
    pub slurm_memory: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => LevelFilter::Debug,
            Level::Info => LevelFilter::Info,
            Level::Warning => LevelFilter::Warn,
            Level::Error => LevelFilter::Error,
        }
    }
}

#[derive(Args, Debug)]
#[command(next_help_heading = "General")]
pub struct GeneralArgs {

    /// Logging level
    #[arg(long, value_enum, default_value_t = Level::Info)]
    pub level: Level,

    /// Reuse the configuration of an existing project (directory or config file).
    /// The pipeline options are then ignored.
    #[arg(long, value_name = "PATH")]
    pub from_project: Option<PathBuf>,

    /// List the external tools needed by the workflow and exit
    #[arg(long)]
    pub deps: bool,

    /// Launch the workflow once the working directory is ready
    #[arg(long)]
    pub run: bool,
}

impl Cli {

    /// Collect the pipeline options. None when the configuration comes from an earlier project.
    pub fn option_set(&self) -> Result<Option<OptionSet>, DenovoError> {
        if self.general.from_project.is_some() {
            return Ok(None);
        }

        let input_directory = self.input.input_directory.clone().ok_or_else(|| {
            DenovoError::InvalidInput(
                "--input-directory is required unless --from-project is given".to_string(),
            )
        })?;

        Ok(Some(OptionSet {
            input_directory,
            input_pattern: self.input.input_pattern.clone(),
            input_readtag: self.input.input_readtag.clone(),
            freebayes_ploidy: self.pipeline.freebayes_ploidy,
            quast_reference: self.pipeline.quast_reference.clone(),
            skip_prokka: self.pipeline.skip_prokka,
            prokka_kingdom: self.pipeline.prokka_kingdom,
            checkm_rank: self.completeness.checkm_rank.clone(),
            checkm_name: self.completeness.checkm_name.clone(),
            busco_lineage: self.completeness.busco_lineage.clone(),
            sequana_coverage_circular: self.pipeline.sequana_coverage_circular,
            spades_memory: self.pipeline.spades_memory,
            digital_normalisation_max_memory_usage: self
                .pipeline
                .digital_normalisation_max_memory_usage,
        }))
    }
}

impl From<&Cli> for ManagerConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            working_directory: cli.snakemake.working_directory.clone(),
            force: cli.snakemake.force,
            jobs: cli.snakemake.jobs,
            use_apptainer: cli.snakemake.use_apptainer,
            apptainer_prefix: cli.snakemake.apptainer_prefix.clone(),
            apptainer_args: cli.snakemake.apptainer_args.clone(),
            profile: cli.slurm.profile,
            slurm_queue: cli.slurm.slurm_queue.clone(),
            slurm_memory: cli.slurm.slurm_memory.clone(),
            from_project: cli.general.from_project.clone(),
        }
    }
}
