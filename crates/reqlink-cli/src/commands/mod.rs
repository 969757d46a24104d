pub mod check;
pub mod config;
pub mod explain;
pub mod resolve;
pub mod scan;
pub mod version;

use reqlink_core::{Config, Error, ResolutionContext, ResolveSettings};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Exit code when a specifier (or a project check) did not resolve.
pub const EXIT_NOT_FOUND: i32 = 1;

/// Exit code for configuration and manifest errors.
pub const EXIT_ERROR: i32 = 2;

/// Settings and validated context for one invocation.
pub struct Session {
    pub root: PathBuf,
    pub settings: ResolveSettings,
    pub ctx: ResolutionContext,
}

impl Session {
    pub fn load(config: &Config) -> Result<Self, Error> {
        let root = config.project_root();
        let settings = ResolveSettings::load(&root, config.config_file.as_deref())?;
        let ctx = ResolutionContext::from_settings(&root, &settings)?;
        Ok(Self {
            root,
            settings,
            ctx,
        })
    }

    /// [`Session::load`], exiting with a diagnostic on failure.
    pub fn load_or_exit(config: &Config, json: bool) -> Self {
        Self::load(config).unwrap_or_else(|e| fail(&e, json))
    }
}

/// Directory a `--from` argument stands for.
///
/// A file means its parent directory; anything else is taken as a
/// directory. Relative paths are relative to `cwd`.
pub fn requesting_dir(cwd: &Path, from: Option<&Path>) -> PathBuf {
    let Some(from) = from else {
        return cwd.to_path_buf();
    };
    let from = if from.is_absolute() {
        from.to_path_buf()
    } else {
        cwd.join(from)
    };

    if from.is_file() {
        from.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf)
    } else {
        from
    }
}

#[derive(Serialize)]
struct ErrorOutput {
    ok: bool,
    error: ErrorInfo,
}

#[derive(Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl From<&Error> for ErrorInfo {
    fn from(err: &Error) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
            path: err.manifest_path().map(Path::to_path_buf),
        }
    }
}

/// Report `err` and exit with [`EXIT_ERROR`].
pub fn fail(err: &Error, json: bool) -> ! {
    if json {
        let out = ErrorOutput {
            ok: false,
            error: ErrorInfo::from(err),
        };
        if let Ok(s) = serde_json::to_string_pretty(&out) {
            println!("{s}");
        }
    } else {
        let report = match err.manifest_path() {
            Some(path) => miette::miette!(
                code = err.code(),
                help = format!("fix or remove {}", path.display()),
                "{err}"
            ),
            None => miette::miette!(code = err.code(), "{err}"),
        };
        eprintln!("{report:?}");
    }
    std::process::exit(EXIT_ERROR)
}
