//! Input expansion, output naming and the per-file loop shared by commands.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use globset::GlobBuilder;
use jwalk::WalkDir;

use crate::{debug, log, logger::ProgressLine, svg::Document};

/// Characters that make an input a glob pattern
const GLOB_META: &[char] = &['*', '?', '[', '{'];

// ============================================================================
// Input
// ============================================================================

/// Whether the path has an `.svg` extension (any case).
pub fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Whether the file name marks an output of an earlier run.
pub fn is_converted(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().contains(suffix))
}

pub fn has_glob_meta(input: &str) -> bool {
    input.contains(GLOB_META)
}

/// Expand a glob pattern into the sorted list of matching files.
///
/// `*` and `?` stay within one path component, `**` crosses directories.
/// Only the directory below the pattern's literal prefix is walked.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid glob pattern `{pattern}`"))?
        .compile_matcher();

    let base = literal_prefix(pattern);
    let relative = base.as_os_str().is_empty();
    let root = if relative { Path::new(".") } else { base.as_path() };

    let mut walker = WalkDir::new(root);
    if !pattern.contains("**") {
        let depth = Path::new(pattern).components().count() - base.components().count();
        walker = walker.max_depth(depth);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .map(|path| {
            if relative {
                // `./a.svg` -> `a.svg`, so relative patterns match
                path.strip_prefix(".").map(Path::to_path_buf).unwrap_or(path)
            } else {
                path
            }
        })
        .filter(|path| matcher.is_match(path))
        .collect();
    files.sort();

    debug!("glob"; "`{}` matched {} file(s) under {}", pattern, files.len(), root.display());
    Ok(files)
}

/// Leading components without glob metacharacters.
fn literal_prefix(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .take_while(|c| !has_glob_meta(&c.as_os_str().to_string_lossy()))
        .collect()
}

// ============================================================================
// Output
// ============================================================================

/// Where generated files go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// `<stem><suffix>.svg` next to the input
    Sibling,
    /// `<stem><suffix>.svg` inside an existing directory
    Directory(PathBuf),
    /// Exactly this path (single input only)
    File(PathBuf),
}

impl OutputTarget {
    /// Target for one input: a directory if `output` is one, else a file.
    pub fn single(output: Option<&Path>) -> Self {
        match output {
            None => Self::Sibling,
            Some(path) if path.is_dir() => Self::Directory(path.to_path_buf()),
            Some(path) => Self::File(path.to_path_buf()),
        }
    }

    /// Target for several inputs: `output` must be an existing directory.
    pub fn batch(output: Option<&Path>) -> Result<Self> {
        match output {
            None => Ok(Self::Sibling),
            Some(path) if path.is_dir() => Ok(Self::Directory(path.to_path_buf())),
            Some(path) => bail!(
                "output `{}` must be an existing directory when processing several files",
                path.display()
            ),
        }
    }

    pub fn resolve(&self, input: &Path, suffix: &str) -> PathBuf {
        match self {
            Self::Sibling => input.with_file_name(converted_name(input, suffix)),
            Self::Directory(dir) => dir.join(converted_name(input, suffix)),
            Self::File(path) => path.clone(),
        }
    }
}

/// `drawing.svg` -> `drawing<suffix>.svg`
fn converted_name(input: &Path, suffix: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|s| s.to_string_lossy())
        .unwrap_or("svg".into());
    format!("{stem}{suffix}.{ext}")
}

// ============================================================================
// Processing
// ============================================================================

/// One input/output pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Pair every input with its output path.
pub fn plan_jobs(inputs: &[PathBuf], target: &OutputTarget, suffix: &str) -> Vec<Job> {
    inputs
        .iter()
        .map(|input| Job {
            output: target.resolve(input, suffix),
            input: input.clone(),
        })
        .collect()
}

/// Read, parse, transform and write one file.
pub fn rewrite_file<T>(job: &Job, transform: impl FnOnce(&mut Document) -> T) -> Result<T> {
    let Job { input, output } = job;
    let content = fs::read_to_string(input)
        .with_context(|| format!("failed to read `{}`", input.display()))?;
    let mut doc = Document::parse(&content)
        .with_context(|| format!("failed to parse `{}`", input.display()))?;

    let result = transform(&mut doc);

    let xml = doc
        .to_xml()
        .with_context(|| format!("failed to serialize `{}`", input.display()))?;
    fs::write(output, xml).with_context(|| format!("failed to write `{}`", output.display()))?;
    Ok(result)
}

/// Outcome of a batch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub done: usize,
    pub failed: usize,
}

/// Run `process` over every job. Failures are logged and the loop goes on.
pub fn run_batch(
    module: &'static str,
    jobs: &[Job],
    mut process: impl FnMut(&Job) -> Result<()>,
) -> BatchReport {
    let mut report = BatchReport::default();
    let progress = ProgressLine::new(module, "svg", jobs.len());

    for job in jobs {
        match process(job) {
            Ok(()) => {
                debug!(module; "{} -> {}", job.input.display(), job.output.display());
                report.done += 1;
            }
            Err(err) => {
                log!("error"; "{:#}", err);
                report.failed += 1;
            }
        }
        progress.inc();
    }

    progress.finish();
    report
}
