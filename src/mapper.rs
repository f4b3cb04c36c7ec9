/// Option mapping module
/// writes the pipeline options of one invocation into the configuration document

use log::warn;

use crate::configs::OptionSet;
use crate::document::DenovoConfig;
use crate::utils::absolute;

/// Apply the options to the document, field by field. Fields without a rule keep their value.
pub fn apply_options(cfg: &mut DenovoConfig, options: &OptionSet) {

    // input
    cfg.input.directory = absolute(&options.input_directory).display().to_string();
    cfg.input.pattern = options.input_pattern.clone();
    cfg.input.readtag = options.input_readtag.clone();

    // freebayes
    cfg.variant_caller.ploidy = options.freebayes_ploidy;

    // quast, the template reference stays when none is given
    if let Some(reference) = &options.quast_reference {
        cfg.reference_comparison.reference = absolute(reference).display().to_string();
    }

    // prokka, always written
    cfg.annotation.enabled = !options.skip_prokka;
    cfg.annotation.kingdom = options.prokka_kingdom;

    // checkm needs both the rank and the name
    match (&options.checkm_rank, &options.checkm_name) {
        (Some(rank), Some(name)) => {
            cfg.taxonomy.enabled = true;
            cfg.taxonomy.taxon_rank = rank.clone();
            cfg.taxonomy.taxon_name = name.clone();
        }
        (None, None) => {}
        (rank, name) => {
            warn!(
                "checkm needs both --checkm-rank and --checkm-name (got rank={:?}, name={:?}); checkm stays disabled",
                rank, name
            );
        }
    }

    // busco
    if let Some(lineage) = &options.busco_lineage {
        cfg.taxonomy.lineage = lineage.clone();
    }

    // sequana_coverage, only ever switched on
    if options.sequana_coverage_circular {
        cfg.coverage.circular = true;
    }

    // spades
    cfg.assembler.memory = options.spades_memory;
    cfg.assembler.resources.mem = format!("{}G", options.spades_memory);

    // digital normalisation
    cfg.normalization.max_memory_usage = options.digital_normalisation_max_memory_usage;
}
