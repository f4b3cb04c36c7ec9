/// External tools used by the workflow, reported by --deps

use std::env;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::format::{write_styled, Tone};

pub const TOOLS: [&str; 11] = [
    "snakemake",
    "normalize-by-median.py",
    "spades.py",
    "quast.py",
    "prokka",
    "bwa",
    "samtools",
    "sequana_coverage",
    "freebayes",
    "checkm",
    "busco",
];

/// First executable called `tool` in the given search path
pub fn find_in<P: AsRef<OsStr>>(tool: &str, search_path: P) -> Option<PathBuf> {
    env::split_paths(&search_path)
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file())
}

/// Print each tool and where it was found on PATH
pub fn report<W: Write>(out: &mut W, color: bool) -> io::Result<usize> {
    let search_path = env::var_os("PATH").unwrap_or_default();
    let mut missing = 0;

    for tool in TOOLS {
        match find_in(tool, &search_path) {
            Some(path) => {
                write_styled(out, color, Tone::Info, &format!("{:<24} {}", tool, path.display()))?
            }
            None => {
                missing += 1;
                write_styled(out, color, Tone::Warning, &format!("{:<24} not found", tool))?
            }
        }
    }

    Ok(missing)
}
