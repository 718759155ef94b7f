//! `revert` command: Shaper Origin SVG -> Affinity Designer layer names.

use std::path::PathBuf;

use anyhow::{Result, bail};

use super::RevertArgs;
use super::batch::{Job, OutputTarget, is_converted, is_svg, plan_jobs, rewrite_file, run_batch};
use crate::config::Config;
use crate::shaper::revert_document;
use crate::{debug, log};

/// Entry point of `shaper-svg revert`.
///
/// A single input is handled strictly; with several inputs missing or broken
/// files are logged and skipped.
pub fn run_revert(args: &RevertArgs, config: &Config) -> Result<()> {
    let suffix = &config.output.suffix;
    let target = if args.inputs.len() > 1 {
        OutputTarget::batch(args.output.as_deref())?
    } else {
        OutputTarget::single(args.output.as_deref())
    };

    let svgs: Vec<PathBuf> = args
        .inputs
        .iter()
        .filter(|path| {
            let svg = is_svg(path);
            if !svg {
                debug!("revert"; "skipping {}: not an SVG file", path.display());
            }
            svg
        })
        .cloned()
        .collect();
    if svgs.is_empty() {
        bail!("no SVG files in input");
    }

    let inputs: Vec<PathBuf> = svgs
        .into_iter()
        .filter(|path| {
            let converted = is_converted(path, suffix);
            if converted {
                log!("revert"; "skipping {}: already converted", path.display());
            }
            !converted
        })
        .collect();

    let jobs = plan_jobs(&inputs, &target, suffix);
    match jobs.as_slice() {
        [] => Ok(()),
        [job] if args.inputs.len() == 1 => {
            let reverted = revert_file(job)?;
            log!("revert"; "wrote {} ({} elements)", job.output.display(), reverted);
            Ok(())
        }
        jobs => {
            let report = run_batch("revert", jobs, |job| {
                if !job.input.is_file() {
                    bail!("input file `{}` does not exist", job.input.display());
                }
                revert_file(job).map(|_| ())
            });
            log!("revert"; "{} reverted, {} failed", report.done, report.failed);
            Ok(())
        }
    }
}

fn revert_file(job: &Job) -> Result<usize> {
    rewrite_file(job, revert_document)
}
