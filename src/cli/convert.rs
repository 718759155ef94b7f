//! `convert` command: Affinity Designer export -> Shaper Origin SVG.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use super::ConvertArgs;
use super::batch::{
    Job, OutputTarget, expand_glob, has_glob_meta, is_converted, is_svg, plan_jobs, rewrite_file,
    run_batch,
};
use crate::config::Config;
use crate::shaper::{ConvertOptions, ConvertStats, convert_document};
use crate::{debug, log};

/// Entry point of `shaper-svg convert`.
pub fn run_convert(args: &ConvertArgs, config: &Config) -> Result<()> {
    for token in &args.attrs {
        token.warn_if_unknown("`--attr`");
    }
    let options = convert_options(args, config);

    if has_glob_meta(&args.input) {
        convert_glob(args, config, &options)
    } else {
        convert_single(args, config, &options)
    }
}

/// CLI tokens first, then those from `[convert] attrs`.
fn convert_options(args: &ConvertArgs, config: &Config) -> ConvertOptions {
    let global = args
        .attrs
        .iter()
        .chain(&config.convert.attrs)
        .cloned()
        .collect();
    ConvertOptions {
        global,
        stroke_width: config.convert.stroke_width.clone(),
    }
}

fn convert_single(args: &ConvertArgs, config: &Config, options: &ConvertOptions) -> Result<()> {
    let input = PathBuf::from(&args.input);
    if !is_svg(&input) {
        bail!("`{}` is not an SVG file", input.display());
    }

    let output = OutputTarget::single(args.output.as_deref()).resolve(&input, &config.output.suffix);
    let job = Job { input, output };

    log!("convert"; "{}", job.input.display());
    let stats = convert_file(&job, options)?;
    log!(
        "convert";
        "wrote {} ({} elements, {} groups)",
        job.output.display(),
        stats.drawables,
        stats.groups
    );
    Ok(())
}

fn convert_glob(args: &ConvertArgs, config: &Config, options: &ConvertOptions) -> Result<()> {
    let suffix = &config.output.suffix;
    let target = OutputTarget::batch(args.output.as_deref())?;

    let inputs: Vec<PathBuf> = expand_glob(&args.input)?
        .into_iter()
        .filter(|path| is_svg(path))
        .filter(|path| {
            let converted = is_converted(path, suffix);
            if converted {
                debug!("convert"; "skipping {}: already converted", path.display());
            }
            !converted
        })
        .collect();

    if inputs.is_empty() {
        bail!("no SVG files match `{}`", args.input);
    }

    let jobs = plan_jobs(&inputs, &target, suffix);
    let report = run_batch("convert", &jobs, |job| convert_file(job, options).map(|_| ()));

    log!("convert"; "{} converted, {} failed", report.done, report.failed);
    Ok(())
}

fn convert_file(job: &Job, options: &ConvertOptions) -> Result<ConvertStats> {
    let stats = rewrite_file(job, |doc| convert_document(doc, options))?;
    if stats.unmapped > 0 {
        log!(
            "warning";
            "{}: {} element(s) without a cut type",
            display_name(&job.input),
            stats.unmapped
        );
    }
    Ok(stats)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaper::ShaperToken;
    use std::fs;
    use tempfile::TempDir;

    const DRAWING: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:serif="http://www.serif.com/"><rect serif:id="Lid shaper:cutDepth=15mm" style="fill:rgb(255,255,255)"/></svg>"#;

    fn temp_dir() -> TempDir {
        tempfile::Builder::new().prefix("convert").tempdir().unwrap()
    }

    fn args(input: impl Into<String>, output: Option<PathBuf>) -> ConvertArgs {
        ConvertArgs {
            input: input.into(),
            output,
            attrs: Vec::new(),
        }
    }

    #[test]
    fn test_glob_converts_svgs_and_ignores_other_files() {
        let dir = temp_dir();
        for name in ["a.svg", "b.svg", "c.svg"] {
            fs::write(dir.path().join(name), DRAWING).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "not xml").unwrap();

        let pattern = format!("{}/*", dir.path().display());
        run_convert(&args(pattern, None), &Config::default()).unwrap();

        for stem in ["a", "b", "c"] {
            let out = fs::read_to_string(dir.path().join(format!("{stem}-converted.svg"))).unwrap();
            assert!(out.contains(r#"shaper:cutDepth="15mm""#));
            assert!(out.contains(r#"shaper:cutType="inside""#));
        }
        assert!(!dir.path().join("notes-converted.txt").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 7);
    }

    #[test]
    fn test_glob_skips_converted_files() {
        let dir = temp_dir();
        fs::write(dir.path().join("a.svg"), DRAWING).unwrap();
        fs::write(dir.path().join("a-converted.svg"), DRAWING).unwrap();

        let pattern = format!("{}/*.svg", dir.path().display());
        run_convert(&args(pattern, None), &Config::default()).unwrap();

        assert!(!dir.path().join("a-converted-converted.svg").exists());
    }

    #[test]
    fn test_glob_without_match_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        let pattern = format!("{}/*", dir.path().display());
        assert!(run_convert(&args(pattern, None), &Config::default()).is_err());
    }

    #[test]
    fn test_glob_output_must_be_directory() {
        let dir = temp_dir();
        fs::write(dir.path().join("a.svg"), DRAWING).unwrap();
        let pattern = format!("{}/*.svg", dir.path().display());
        let output = Some(dir.path().join("out.svg"));
        assert!(run_convert(&args(pattern, output), &Config::default()).is_err());
    }

    #[test]
    fn test_glob_into_directory_survives_bad_file() {
        let dir = temp_dir();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::write(dir.path().join("good.svg"), DRAWING).unwrap();
        fs::write(dir.path().join("bad.svg"), "<svg><g></svg>").unwrap();

        let pattern = format!("{}/*.svg", dir.path().display());
        run_convert(&args(pattern, Some(out.clone())), &Config::default()).unwrap();

        assert!(out.join("good-converted.svg").exists());
        assert!(!out.join("bad-converted.svg").exists());
    }

    #[test]
    fn test_single_file_with_explicit_output() {
        let dir = temp_dir();
        let input = dir.path().join("lid.svg");
        let output = dir.path().join("cut.svg");
        fs::write(&input, DRAWING).unwrap();

        let mut args = args(input.display().to_string(), Some(output.clone()));
        args.attrs = vec![ShaperToken::new("toolDia", "6mm")];
        let mut config = Config::default();
        config.convert.stroke_width = "0.2".into();
        config.convert.attrs = vec![
            ShaperToken::new("toolDia", "3mm"),
            ShaperToken::new("cutOffset", "0mm"),
        ];

        run_convert(&args, &config).unwrap();

        let out = fs::read_to_string(&output).unwrap();
        assert!(out.contains(r#"shaper:toolDia="6mm""#));
        assert!(out.contains(r#"shaper:cutOffset="0mm""#));
        assert!(out.contains(r#"stroke-width="0.2""#));
    }

    #[test]
    fn test_single_file_errors_are_fatal() {
        let dir = temp_dir();
        let txt = dir.path().join("a.txt");
        fs::write(&txt, DRAWING).unwrap();
        assert!(run_convert(&args(txt.display().to_string(), None), &Config::default()).is_err());

        let missing = dir.path().join("missing.svg");
        assert!(
            run_convert(&args(missing.display().to_string(), None), &Config::default()).is_err()
        );

        let broken = dir.path().join("broken.svg");
        fs::write(&broken, "<svg>").unwrap();
        assert!(run_convert(&args(broken.display().to_string(), None), &Config::default()).is_err());
    }

    #[test]
    fn test_custom_suffix() {
        let dir = temp_dir();
        let input = dir.path().join("lid.svg");
        fs::write(&input, DRAWING).unwrap();

        let mut config = Config::default();
        config.output.suffix = "_origin".into();
        run_convert(&args(input.display().to_string(), None), &config).unwrap();

        assert!(dir.path().join("lid_origin.svg").exists());
    }
}
