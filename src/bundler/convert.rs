//! Notebook conversion through an external `nbconvert` process.
//!
//! The converter is opaque: it receives a template search path, a template
//! name and a target format, and prints the rendered document on stdout.
//! Anything it prints on stderr is treated as a failure, whatever its exit
//! code.

use crate::{
    bail,
    bundler::error::{Error, Result},
};
use std::{
    collections::BTreeMap,
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::Stdio,
};

/// Template used when the caller does not name one.
pub const DEFAULT_TEMPLATE: &str = "thebe.tpl";

/// Template used to render PHP dashboard apps.
pub const PHP_TEMPLATE: &str = "index.php.tpl";

/// Default converter command.
pub const DEFAULT_COMMAND: &[&str] = &["jupyter", "nbconvert"];

/// Runs the external notebook converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converter {
    program: String,
    args: Vec<String>,
    template_dir: PathBuf,
}

impl Converter {
    /// Creates a converter from a command line and the default template directory.
    ///
    /// `command` is the program followed by any leading arguments.
    pub fn new(command: Vec<String>, template_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut command = command.into_iter();
        let Some(program) = command.next() else {
            bail!("converter command is empty");
        };
        Ok(Self {
            program,
            args: command.collect(),
            template_dir: template_dir.into(),
        })
    }

    /// Converter configured from `DASHBOARDS_NBCONVERT` and `DASHBOARDS_TEMPLATE_DIR`.
    pub fn from_env() -> Self {
        let command: Vec<String> = std::env::var("DASHBOARDS_NBCONVERT")
            .ok()
            .map(|cmd| cmd.split_whitespace().map(String::from).collect::<Vec<_>>())
            .filter(|cmd| !cmd.is_empty())
            .unwrap_or_else(|| DEFAULT_COMMAND.iter().map(|s| s.to_string()).collect());

        let template_dir = std::env::var_os("DASHBOARDS_TEMPLATE_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|d| d.join("jupyter/dashboards_bundlers/templates")))
            .unwrap_or_else(|| PathBuf::from("templates"));

        let mut command = command.into_iter();
        Self {
            program: command.next().unwrap_or_else(|| DEFAULT_COMMAND[0].to_string()),
            args: command.collect(),
            template_dir,
        }
    }

    /// Directory holding the bundled templates.
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Template search path and template name for a conversion.
    ///
    /// The caller's template directory comes first so its templates win.
    fn template_lookup(&self, template: Option<&Path>) -> (Vec<String>, String) {
        let mut search = Vec::new();
        let name = match template {
            Some(path) => {
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    search.push(dir.to_string_lossy().into_owned());
                }
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string())
            }
            None => DEFAULT_TEMPLATE.to_string(),
        };

        let default_dir = self.template_dir.to_string_lossy().into_owned();
        if !search.contains(&default_dir) {
            search.push(default_dir);
        }
        (search, name)
    }

    /// Arguments passed after the configured command.
    pub fn conversion_args(
        &self,
        notebook_path: &Path,
        format: &str,
        template: Option<&Path>,
    ) -> Result<Vec<OsString>> {
        let (search, name) = self.template_lookup(template);
        let search = serde_json::to_string(&search)?;

        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.extend(
            [
                "--log-level".to_string(),
                "ERROR".to_string(),
                "--stdout".to_string(),
                format!("--TemplateExporter.template_path={search}"),
                "--template".to_string(),
                name,
                "--to".to_string(),
                format.to_string(),
            ]
            .into_iter()
            .map(OsString::from),
        );
        args.push(notebook_path.as_os_str().to_owned());
        Ok(args)
    }

    /// Converts a notebook and returns the converter's stdout.
    ///
    /// The child only sees `env_overrides` plus this process's `PATH`.
    pub async fn render(
        &self,
        notebook_path: &Path,
        env_overrides: &BTreeMap<String, String>,
        format: &str,
        working_dir: &Path,
        template: Option<&Path>,
    ) -> Result<Vec<u8>> {
        let program = which::which(&self.program).map_err(|e| Error::CommandFailed {
            command: self.program.clone(),
            error: io::Error::new(io::ErrorKind::NotFound, e.to_string()),
        })?;
        let args = self.conversion_args(notebook_path, format, template)?;
        log::debug!("Running {} {:?}", program.display(), args);

        let mut command = tokio::process::Command::new(&program);
        command
            .args(&args)
            .current_dir(working_dir)
            .env_clear()
            .envs(env_overrides)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(path) = std::env::var_os("PATH") {
            command.env("PATH", path);
        }

        let output = command.output().await.map_err(|e| Error::CommandFailed {
            command: self.program.clone(),
            error: e,
        })?;

        if !output.stderr.is_empty() {
            return Err(Error::ConverterStderr {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        if !output.status.success() {
            log::warn!(
                "{} exited with {:?} without writing to stderr",
                self.program,
                output.status.code()
            );
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(script: &str, template_dir: &Path) -> Converter {
        Converter::new(
            vec!["sh".into(), "-c".into(), script.into(), "nbconvert".into()],
            template_dir,
        )
        .unwrap()
    }

    #[test]
    fn caller_template_dir_comes_first() {
        let conv = Converter::new(vec!["jupyter".into(), "nbconvert".into()], "/tpl").unwrap();
        let args = conv
            .conversion_args(Path::new("/nb/a.ipynb"), "html", Some(Path::new("/mine/x.tpl")))
            .unwrap();
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();

        assert_eq!(
            args,
            vec![
                "nbconvert",
                "--log-level",
                "ERROR",
                "--stdout",
                r#"--TemplateExporter.template_path=["/mine","/tpl"]"#,
                "--template",
                "x.tpl",
                "--to",
                "html",
                "/nb/a.ipynb",
            ]
        );
    }

    #[test]
    fn default_template_when_none_given() {
        let conv = Converter::new(vec!["nbconvert".into()], "/tpl").unwrap();
        let args = conv
            .conversion_args(Path::new("a.ipynb"), "html", None)
            .unwrap();
        assert!(args.contains(&OsString::from(r#"--TemplateExporter.template_path=["/tpl"]"#)));
        assert!(args.contains(&OsString::from(DEFAULT_TEMPLATE)));
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(Converter::new(Vec::new(), "/tpl").is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout() {
        let tmp = tempfile::tempdir().unwrap();
        let conv = shell(r#"printf '%s|%s|%s' "$6" "$8" "$9""#, tmp.path());
        let out = conv
            .render(
                Path::new("/nb/a.ipynb"),
                &BTreeMap::new(),
                "html",
                tmp.path(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "thebe.tpl|html|/nb/a.ipynb");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn environment_is_overrides_plus_path() {
        let tmp = tempfile::tempdir().unwrap();
        let conv = shell(r#"printf '%s:%s' "$FOO" "${HOME:-unset}""#, tmp.path());
        let env = BTreeMap::from([("FOO".to_string(), "bar".to_string())]);
        let out = conv
            .render(Path::new("a.ipynb"), &env, "html", tmp.path(), None)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "bar:unset");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn any_stderr_fails_even_on_success() {
        let tmp = tempfile::tempdir().unwrap();
        let conv = shell("echo '<html/>'; echo 'template not found' >&2; exit 0", tmp.path());
        let err = conv
            .render(Path::new("a.ipynb"), &BTreeMap::new(), "html", tmp.path(), None)
            .await
            .unwrap_err();
        match err {
            Error::ConverterStderr { stderr } => assert!(stderr.contains("template not found")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_program_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let conv = Converter::new(vec!["definitely-not-a-converter-xyz".into()], tmp.path()).unwrap();
        let err = conv
            .render(Path::new("a.ipynb"), &BTreeMap::new(), "html", tmp.path(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }
}
