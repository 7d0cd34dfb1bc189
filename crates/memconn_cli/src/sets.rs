//! `memconn sets` — group routes by the memory they share.

use crate::analysis::{analyze_files, load_tool_config, partition_results, search_options};
use crate::report::{text_lines, to_json, FileReport};
use crate::{GlobalArgs, ReportFormat, SearchArgs};

/// Runs the `memconn sets` command.
///
/// Returns exit code 0 if every file was analyzed, 1 otherwise.
pub fn run(args: &SearchArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_tool_config(global)?;
    let options = search_options(args.max_depth, &config);
    let format = args.format.unwrap_or_else(|| config.output.format.into());

    let (analyses, failed) = partition_results(analyze_files(&args.files, Some(&options)));

    match format {
        ReportFormat::Text => {
            for analysis in &analyses {
                if !global.quiet {
                    eprintln!("   Grouped {}", analysis.file.display());
                }
                for line in text_lines(analysis, true) {
                    println!("{line}");
                }
            }
        }
        ReportFormat::Json => {
            let reports: Vec<FileReport> =
                analyses.iter().map(|a| FileReport::new(a, true)).collect();
            println!("{}", to_json(&reports));
        }
    }

    Ok(if failed { 1 } else { 0 })
}
