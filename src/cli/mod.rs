//! Command line interface for the dashboards bundlers.
//!
//! The binary plays the part of a notebook server: it builds a
//! [`RecordingHandler`] from the flags, runs one bundler and then reports the
//! recorded response.

mod args;

pub use args::Args;

use crate::{
    bundler::{
        BUNDLERS, BundlerTools, FileReferenceTools, RecordingHandler, RequestInfo,
        SettingsBuilder, find_bundler,
    },
    error::{CliError, Result},
};
use std::{io::Write, sync::Arc};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Runs the command described by `args`.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    if args.list {
        let mut stdout = std::io::stdout().lock();
        for entry in BUNDLERS {
            writeln!(stdout, "{:<28} {:<9} {}", entry.name, entry.group, entry.label)?;
        }
        return Ok(0);
    }

    let name = args.bundler.as_deref().ok_or_else(|| CliError::MissingArgument {
        argument: "--bundler".into(),
    })?;
    let notebook = args.notebook.as_deref().ok_or_else(|| CliError::MissingArgument {
        argument: "--notebook".into(),
    })?;
    let entry = find_bundler(name).ok_or_else(|| CliError::UnknownBundler {
        name: name.to_string(),
    })?;

    let mut builder = SettingsBuilder::new()
        .root_dir(&args.notebook_dir)
        .base_url(&args.base_url);
    if !args.data_dirs.is_empty() {
        builder = builder.extension_roots(args.data_dirs.clone());
    }
    let settings = builder.build()?;

    let tools: Option<Arc<dyn BundlerTools>> = if args.no_references {
        None
    } else {
        Some(Arc::new(FileReferenceTools))
    };
    let mut handler = RecordingHandler::new(
        settings,
        RequestInfo::new(&args.host, &args.protocol),
        tools,
    );

    entry.kind.bundle(&mut handler, notebook).await?;

    let saved = match &args.output {
        Some(path) if handler.finished => {
            tokio::fs::write(path, &handler.body).await?;
            log::info!("Wrote {} bytes to {}", handler.body.len(), path.display());
            true
        }
        _ => false,
    };

    let mut stdout = std::io::stdout().lock();
    write_response(&mut stdout, &handler, saved)?;
    Ok(0)
}

/// Prints the redirect and, unless the body was saved to a file, the body.
fn write_response(
    out: &mut impl Write,
    handler: &RecordingHandler,
    saved: bool,
) -> std::io::Result<()> {
    if let Some(location) = &handler.location {
        writeln!(out, "{location}")?;
    }
    if !handler.finished {
        return Ok(());
    }
    if saved {
        if let Some(disposition) = handler.header("Content-Disposition") {
            writeln!(out, "{disposition}")?;
        }
    } else {
        out.write_all(&handler.body)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::RequestHandler;

    fn recorded() -> RecordingHandler {
        let settings = SettingsBuilder::new().root_dir("/srv").build().unwrap();
        RecordingHandler::new(settings, RequestInfo::new("h:1", "http"), None)
    }

    #[test]
    fn redirect_is_printed_alone() {
        let mut handler = recorded();
        handler.redirect("/files/local_dashboards/nb/index.html");

        let mut out = Vec::new();
        write_response(&mut out, &handler, false).unwrap();
        assert_eq!(out, b"/files/local_dashboards/nb/index.html\n");
    }

    #[test]
    fn saved_body_prints_disposition() {
        let mut handler = recorded();
        handler.set_header("Content-Disposition", "attachment; filename=\"nb.zip\"");
        handler.write(b"PK");
        handler.finish();

        let mut out = Vec::new();
        write_response(&mut out, &handler, true).unwrap();
        assert_eq!(out, b"attachment; filename=\"nb.zip\"\n");

        let mut out = Vec::new();
        write_response(&mut out, &handler, false).unwrap();
        assert_eq!(out, b"PK");
    }
}
