//! `memconn paths` — list every master-to-memory-map route.
//!
//! 1. Load the tool configuration
//! 2. Load, lower, and search every topology file in parallel
//! 3. Print the routes per file, grouped into sets when `[output] path_sets`
//!    is enabled

use crate::analysis::{analyze_files, load_tool_config, partition_results, search_options};
use crate::report::{text_lines, to_json, FileReport};
use crate::{GlobalArgs, ReportFormat, SearchArgs};

/// Runs the `memconn paths` command.
///
/// Returns exit code 0 if every file was analyzed, 1 otherwise.
pub fn run(args: &SearchArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_tool_config(global)?;
    let options = search_options(args.max_depth, &config);
    let format = args.format.unwrap_or_else(|| config.output.format.into());
    let with_sets = config.output.path_sets;

    let (analyses, failed) = partition_results(analyze_files(&args.files, Some(&options)));

    match format {
        ReportFormat::Text => {
            for analysis in &analyses {
                if !global.quiet {
                    eprintln!(
                        "   Analyzed {} ({} path(s))",
                        analysis.file.display(),
                        analysis.paths.len()
                    );
                }
                for line in text_lines(analysis, with_sets) {
                    println!("{line}");
                }
            }
        }
        ReportFormat::Json => {
            let reports: Vec<FileReport> = analyses
                .iter()
                .map(|a| FileReport::new(a, with_sets))
                .collect();
            println!("{}", to_json(&reports));
        }
    }

    Ok(if failed { 1 } else { 0 })
}
