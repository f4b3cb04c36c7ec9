/// Workflow manager module
/// creates the working directory, writes the configuration, the workflow and the launch script,
/// and optionally runs the script

use log::{debug, info};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::Command;

use crate::configs::{ManagerConfig, Profile};
use crate::document::{DenovoConfig, CONFIG_FILE};
use crate::errors::DenovoError;
use crate::format::{write_styled, Tone};
use crate::utils::absolute;

pub const NAME: &str = "denovo";
pub const WORKFLOW_FILE: &str = "denovo.smk";
pub const SCRIPT_FILE: &str = "denovo.sh";
pub const INFO_DIR: &str = ".denovo";

const WORKFLOW: &str = include_str!("../pipeline/denovo.smk");

pub struct PipelineManager {
    settings: ManagerConfig,
    config: DenovoConfig,
}

impl PipelineManager {

    /// Load the document from the template, or from the project given with --from-project
    pub fn new(settings: ManagerConfig) -> Result<Self, DenovoError> {
        let config = match &settings.from_project {
            Some(project) => DenovoConfig::from_project(project)?,
            None => DenovoConfig::template()?,
        };
        Ok(Self { settings, config })
    }

    pub fn working_directory(&self) -> &Path {
        &self.settings.working_directory
    }

    pub fn config(&self) -> &DenovoConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DenovoConfig {
        &mut self.config
    }

    /// Create the working directory, refusing an existing one unless --force was given
    pub fn setup(&self) -> Result<(), DenovoError> {
        let wd = self.working_directory();
        if wd.exists() {
            if !self.settings.force {
                return Err(DenovoError::WorkingDirectoryExists(wd.to_path_buf()));
            }
            info!("Working directory {} exists, overwriting (--force)", wd.display());
        }

        fs::create_dir_all(wd.join(INFO_DIR))?;
        debug!("Manager settings: {:?}", self.settings);
        Ok(())
    }

    /// Write the document, the workflow, the launch script and the invocation record
    pub fn teardown(&self) -> Result<(), DenovoError> {
        let wd = self.working_directory();

        self.config.save(&wd.join(CONFIG_FILE))?;
        fs::write(wd.join(WORKFLOW_FILE), WORKFLOW)?;

        let script = wd.join(SCRIPT_FILE);
        fs::write(&script, self.launch_script())?;
        make_executable(&script)?;

        let command_line: Vec<String> = std::env::args().collect();
        let record = format!(
            "{} version: {}\ncommand: {}\n",
            NAME,
            env!("CARGO_PKG_VERSION"),
            command_line.join(" ")
        );
        fs::write(wd.join(INFO_DIR).join("info.txt"), record)?;

        info!("Configuration, workflow and launch script written to {}", wd.display());

        let stdout = io::stdout();
        let color = stdout.is_terminal();
        let mut out = stdout.lock();
        write_styled(
            &mut out,
            color,
            Tone::Hint,
            &format!(
                "Check the script in {} and then launch the pipeline with: cd {}; sh {}",
                script.display(),
                wd.display(),
                SCRIPT_FILE
            ),
        )?;

        Ok(())
    }

    /// Snakemake command of the working directory
    pub fn launch_script(&self) -> String {
        let s = &self.settings;
        let mut command = vec![
            "snakemake".to_string(),
            format!("-s {}", WORKFLOW_FILE),
            format!("--configfile {}", CONFIG_FILE),
            format!("--jobs {}", s.jobs),
            "--printshellcmds".to_string(),
            "--rerun-incomplete".to_string(),
            "--keep-going".to_string(),
        ];

        if s.use_apptainer {
            command.push("--use-apptainer".to_string());
            if let Some(prefix) = &s.apptainer_prefix {
                command.push(format!("--apptainer-prefix {}", absolute(prefix).display()));
            }
            if !s.apptainer_args.is_empty() {
                command.push(format!(
                    "--apptainer-args \"{}\"",
                    double_quote_escape(&s.apptainer_args)
                ));
            }
        }

        if s.profile == Profile::Slurm {
            command.push("--executor slurm".to_string());
            command.push(format!(
                "--default-resources slurm_partition={} mem={}",
                s.slurm_queue, s.slurm_memory
            ));
        }

        command.push("\"$@\"".to_string());

        format!(
            "#!/bin/bash\n# generated by {} {}\n\n{}\n",
            NAME,
            env!("CARGO_PKG_VERSION"),
            command.join(" \\\n    ")
        )
    }

    /// Run the launch script inside the working directory
    pub fn launch(&self) -> Result<(), DenovoError> {
        info!("Launching {} in {}", SCRIPT_FILE, self.working_directory().display());
        let status = Command::new("sh")
            .arg(SCRIPT_FILE)
            .current_dir(self.working_directory())
            .status()?;

        if !status.success() {
            return Err(DenovoError::LaunchFailed(status));
        }
        info!("Workflow finished");
        Ok(())
    }
}

/// Escape the characters that keep their meaning inside a double-quoted shell word
fn double_quote_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '$' | '`' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
