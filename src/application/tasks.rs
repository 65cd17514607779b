//! Layer-dependent asset tasks.
//!
//! Every task receives the layer explicitly. A layer without path mappings
//! makes the task print guidance and return `Skipped` without touching any
//! processor.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    resolve_path, AppError, Configuration, Layer, PathKind, ResolvedPath, Result, TaskName,
};
use crate::infrastructure::{Diagnostics, Processors};

use super::reporter::Reporter;

/// What a task run amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The task did its work.
    Completed,
    /// A validator ran and rejected the input.
    Rejected,
    /// No usable layer; nothing was run.
    Skipped,
}

impl From<&Diagnostics> for TaskOutcome {
    fn from(diagnostics: &Diagnostics) -> Self {
        if diagnostics.passed {
            Self::Completed
        } else {
            Self::Rejected
        }
    }
}

/// Configuration and collaborators shared by all tasks of a run.
#[derive(Clone, Copy)]
pub struct TaskEnv<'a> {
    pub config: &'a Configuration,
    pub processors: &'a Processors,
}

/// Saved result of a CSS validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub layer: String,
    pub source: String,
    pub validated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub diagnostics: Diagnostics,
}

/// Resolve `kind`, or print guidance for `task` when the layer has no paths.
fn resolve_or_guide<W: Write>(
    env: TaskEnv<'_>,
    task: TaskName,
    kind: PathKind,
    layer: Layer,
    reporter: &mut Reporter<W>,
) -> Result<Option<ResolvedPath>> {
    match resolve_path(kind, layer, env.config) {
        Ok(path) => {
            tracing::debug!(%task, %layer, kind = kind.label(), path = %path, "Resolved path");
            Ok(Some(path))
        }
        Err(e) => {
            tracing::debug!(%task, error = %e, "Layer not resolvable");
            reporter.layer_guidance(task, env.config)?;
            Ok(None)
        }
    }
}

/// Validate the layer's main HTML view.
///
/// # Errors
/// Returns error if the HTML validator could not run.
pub fn validate_html<W: Write>(
    env: TaskEnv<'_>,
    layer: Layer,
    reporter: &mut Reporter<W>,
) -> Result<TaskOutcome> {
    let Some(path) =
        resolve_or_guide(env, TaskName::ValidateHtml, PathKind::HtmlView, layer, reporter)?
    else {
        return Ok(TaskOutcome::Skipped);
    };

    reporter.line(path.as_str())?;

    let diagnostics = env.processors.html.validate_html(path.as_path())?;
    reporter.diagnostics(path.as_str(), &diagnostics)?;

    Ok(TaskOutcome::from(&diagnostics))
}

/// Compile the layer's Sass entry point into its target folder.
///
/// # Errors
/// Returns error if compilation, prefixing, or writing the output fails.
pub fn compile_css<W: Write>(
    env: TaskEnv<'_>,
    layer: Layer,
    reporter: &mut Reporter<W>,
) -> Result<TaskOutcome> {
    let Some(source) =
        resolve_or_guide(env, TaskName::CompileCss, PathKind::SassSource, layer, reporter)?
    else {
        return Ok(TaskOutcome::Skipped);
    };
    let folder = resolve_path(PathKind::CssTargetFolder, layer, env.config)?;
    let output = resolve_path(PathKind::CssOutputFile, layer, env.config)?;

    let settings = &env.config.processors;
    let css = env.processors.sass.compile(source.as_path(), settings.sass)?;
    let css = env.processors.prefixer.prefix(&css, &settings.browsers)?;

    fs::create_dir_all(folder.as_path())
        .map_err(|e| AppError::io(format!("Failed to create {folder}"), e))?;
    fs::write(output.as_path(), css)
        .map_err(|e| AppError::io(format!("Failed to write {output}"), e))?;

    tracing::info!(%layer, source = %source, output = %output, "Compiled stylesheet");
    reporter.success(&format!("{source} → {output}"))?;

    Ok(TaskOutcome::Completed)
}

/// Validate the layer's compiled stylesheet and save the report.
///
/// Reads the file `compile_css` writes; running it without a prior compile
/// validates whatever is on disk.
///
/// # Errors
/// Returns error if the compiled CSS cannot be read, the validator could not
/// run, or the report cannot be written.
pub fn validate_css<W: Write>(
    env: TaskEnv<'_>,
    layer: Layer,
    reporter: &mut Reporter<W>,
) -> Result<TaskOutcome> {
    let Some(path) =
        resolve_or_guide(env, TaskName::ValidateCss, PathKind::CssOutputFile, layer, reporter)?
    else {
        return Ok(TaskOutcome::Skipped);
    };

    let css = fs::read_to_string(path.as_path())
        .map_err(|e| AppError::io(format!("Failed to read compiled CSS {path}"), e))?;

    let diagnostics = env.processors.css.validate_css(&css, path.as_path())?;
    reporter.diagnostics(path.as_str(), &diagnostics)?;

    let report_path = write_report(env.config, layer, &path, &diagnostics)?;
    reporter.line(&format!("Report written to {report_path}"))?;

    Ok(TaskOutcome::from(&diagnostics))
}

/// Write a validation report into the validator-results folder.
fn write_report(
    config: &Configuration,
    layer: Layer,
    source: &ResolvedPath,
    diagnostics: &Diagnostics,
) -> Result<String> {
    let folder = &config.folders.validator_results;
    let stem = source
        .as_path()
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("styles");
    let report_path = format!("{folder}{layer}-{stem}.json");

    let report = ValidationReport {
        layer: layer.to_string(),
        source: source.to_string(),
        validated_at: Utc::now(),
        diagnostics: diagnostics.clone(),
    };
    let json = serde_json::to_string_pretty(&report).map_err(AppError::json_parse)?;

    fs::create_dir_all(Path::new(folder))
        .map_err(|e| AppError::io(format!("Failed to create {folder}"), e))?;
    fs::write(&report_path, json)
        .map_err(|e| AppError::io(format!("Failed to write {report_path}"), e))?;

    tracing::info!(path = %report_path, passed = diagnostics.passed, "Validation report saved");

    Ok(report_path)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use tempfile::{tempdir, TempDir};

    use crate::domain::{ColorScheme, SassOptions, Stage};
    use crate::infrastructure::processors::PassthroughPrefixer;
    use crate::infrastructure::remover::FsRemover;
    use crate::infrastructure::processors::{CssValidator, HtmlValidator, Prefixer, SassCompiler};

    /// Records processor calls in order.
    pub type CallLog = Rc<RefCell<Vec<String>>>;

    pub struct FakeHtml {
        pub log: CallLog,
        pub result: Diagnostics,
    }

    impl HtmlValidator for FakeHtml {
        fn validate_html(&self, path: &Path) -> Result<Diagnostics> {
            self.log.borrow_mut().push(format!("html {}", path.display()));
            Ok(self.result.clone())
        }
    }

    pub struct FakeSass {
        pub log: CallLog,
        pub fail: bool,
    }

    impl SassCompiler for FakeSass {
        fn compile(&self, path: &Path, options: SassOptions) -> Result<String> {
            self.log.borrow_mut().push(format!(
                "sass {} {:?} {}",
                path.display(),
                options.output_style,
                options.precision
            ));
            if self.fail {
                Err(AppError::processor(Stage::Sass, "Undefined variable"))
            } else {
                Ok(format!("/* {} */\n", path.display()))
            }
        }
    }

    pub struct FakePrefixer {
        pub log: CallLog,
    }

    impl Prefixer for FakePrefixer {
        fn prefix(&self, css: &str, browsers: &[String]) -> Result<String> {
            self.log
                .borrow_mut()
                .push(format!("prefix {}", browsers.join(",")));
            Ok(format!("{css}/* prefixed */\n"))
        }
    }

    pub struct FakeCss {
        pub log: CallLog,
        pub result: Diagnostics,
    }

    impl CssValidator for FakeCss {
        fn validate_css(&self, css: &str, origin: &Path) -> Result<Diagnostics> {
            self.log
                .borrow_mut()
                .push(format!("css {} {}", origin.display(), css.lines().count()));
            Ok(self.result.clone())
        }
    }

    /// A project tree in a temp dir with fake processors.
    pub struct Fixture {
        pub dir: TempDir,
        pub config: Configuration,
        pub processors: Processors,
        pub log: CallLog,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self::with(Diagnostics::passed(), false)
        }

        pub fn with(diagnostics: Diagnostics, sass_fails: bool) -> Self {
            let dir = tempdir().unwrap();
            let root = format!("{}/", dir.path().display());

            let mut config = Configuration::default();
            config.folders.development = format!("{root}development/");
            config.folders.validator_results = format!("{root}validator-results/");
            config.colors = ColorScheme {
                red: "normal".into(),
                green: "normal".into(),
                yellow: "normal".into(),
                default: "normal".into(),
            };

            for layer in ["content-layer", "settings-layer"] {
                let folder = dir.path().join("development").join(layer);
                fs::create_dir_all(&folder).unwrap();
                fs::write(folder.join("index.html"), "<!doctype html>").unwrap();
                fs::write(folder.join("main.scss"), "a { b: c; }").unwrap();
            }

            let log = CallLog::default();
            let processors = Processors {
                html: Box::new(FakeHtml {
                    log: Rc::clone(&log),
                    result: diagnostics.clone(),
                }),
                sass: Box::new(FakeSass {
                    log: Rc::clone(&log),
                    fail: sass_fails,
                }),
                prefixer: Box::new(FakePrefixer {
                    log: Rc::clone(&log),
                }),
                css: Box::new(FakeCss {
                    log: Rc::clone(&log),
                    result: diagnostics,
                }),
                remover: Box::new(FsRemover),
            };

            Self {
                dir,
                config,
                processors,
                log,
            }
        }

        pub const fn env(&self) -> TaskEnv<'_> {
            TaskEnv {
                config: &self.config,
                processors: &self.processors,
            }
        }

        pub fn reporter(&self) -> Reporter<Vec<u8>> {
            Reporter::new(Vec::new(), &self.config.colors)
        }

        pub fn calls(&self) -> Vec<String> {
            self.log.borrow().clone()
        }

        pub fn path(&self, relative: &str) -> std::path::PathBuf {
            self.dir.path().join(relative)
        }
    }

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_validate_html_feeds_resolved_path() {
        let fixture = Fixture::new();
        let mut reporter = fixture.reporter();

        let outcome = validate_html(fixture.env(), Layer::Settings, &mut reporter).unwrap();

        assert_eq!(outcome, TaskOutcome::Completed);
        let expected = fixture.path("development/settings-layer/index.html");
        assert_eq!(fixture.calls(), vec![format!("html {}", expected.display())]);
        assert!(output(reporter).starts_with(&expected.display().to_string()));
    }

    #[test]
    fn test_unresolved_layers_skip_without_processors() {
        for layer in [Layer::Unset, Layer::Backend] {
            let fixture = Fixture::new();
            let mut reporter = fixture.reporter();

            assert_eq!(
                validate_html(fixture.env(), layer, &mut reporter).unwrap(),
                TaskOutcome::Skipped
            );
            assert_eq!(
                compile_css(fixture.env(), layer, &mut reporter).unwrap(),
                TaskOutcome::Skipped
            );
            assert_eq!(
                validate_css(fixture.env(), layer, &mut reporter).unwrap(),
                TaskOutcome::Skipped
            );

            assert!(fixture.calls().is_empty());
            let out = output(reporter);
            assert_eq!(out.matches("has not been set").count(), 3);
            assert!(out.contains("setLayerToSettings"));
        }
    }

    #[test]
    fn test_rejected_html_is_reported() {
        let fixture = Fixture::with(Diagnostics::failed(vec!["error: bad nesting".into()]), false);
        let mut reporter = fixture.reporter();

        let outcome = validate_html(fixture.env(), Layer::Content, &mut reporter).unwrap();

        assert_eq!(outcome, TaskOutcome::Rejected);
        let out = output(reporter);
        assert!(out.contains("error: bad nesting"));
        assert!(out.contains("has problems"));
    }

    #[test]
    fn test_compile_css_uses_fixed_options_and_writes_target() {
        let fixture = Fixture::new();
        let mut reporter = fixture.reporter();

        let outcome = compile_css(fixture.env(), Layer::Content, &mut reporter).unwrap();

        assert_eq!(outcome, TaskOutcome::Completed);
        let source = fixture.path("development/content-layer/main.scss");
        assert_eq!(
            fixture.calls(),
            vec![
                format!("sass {} Expanded 10", source.display()),
                "prefix last 2 versions".to_string(),
            ]
        );

        let written =
            fs::read_to_string(fixture.path("development/content-layer/main.css")).unwrap();
        assert!(written.ends_with("/* prefixed */\n"));
    }

    #[test]
    fn test_compile_error_propagates() {
        let fixture = Fixture::with(Diagnostics::passed(), true);
        let mut reporter = fixture.reporter();

        let err = compile_css(fixture.env(), Layer::Settings, &mut reporter).unwrap_err();

        assert!(matches!(
            err,
            AppError::Processor {
                stage: Stage::Sass,
                ..
            }
        ));
        assert!(!fixture.path("development/settings-layer/main.css").exists());
    }

    #[test]
    fn test_validate_css_reads_compile_output() {
        let fixture = Fixture::new();
        let mut reporter = fixture.reporter();

        compile_css(fixture.env(), Layer::Content, &mut reporter).unwrap();
        let outcome = validate_css(fixture.env(), Layer::Content, &mut reporter).unwrap();

        assert_eq!(outcome, TaskOutcome::Completed);
        let compiled = fixture.path("development/content-layer/main.css");
        assert_eq!(
            fixture.calls().last().unwrap(),
            &format!("css {} 2", compiled.display())
        );

        let report =
            fs::read_to_string(fixture.path("validator-results/content-main.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(json["layer"], "content");
        assert_eq!(json["passed"], true);
        assert!(json["validated_at"].is_string());
    }

    #[test]
    fn test_validate_css_without_compile_reads_same_path() {
        let fixture = Fixture::new();
        let mut reporter = fixture.reporter();

        let err = validate_css(fixture.env(), Layer::Settings, &mut reporter).unwrap_err();

        let expected = resolve_path(PathKind::CssOutputFile, Layer::Settings, &fixture.config)
            .unwrap();
        match err {
            AppError::Io { message, source } => {
                assert!(message.contains(expected.as_str()));
                assert_eq!(source.unwrap().kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(fixture.calls().is_empty());
    }

    #[test]
    fn test_passthrough_prefixer_keeps_compiled_css() {
        let mut fixture = Fixture::new();
        fixture.processors.prefixer = Box::new(PassthroughPrefixer);
        let mut reporter = fixture.reporter();

        compile_css(fixture.env(), Layer::Settings, &mut reporter).unwrap();

        let written =
            fs::read_to_string(fixture.path("development/settings-layer/main.css")).unwrap();
        assert!(!written.contains("prefixed"));
    }
}
