//! Zip archive creation.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Zips the contents of `src_dir` into `dest`.
///
/// Entry names are relative to `src_dir` with `/` separators and no leading
/// prefix. Directory entries are included and symlinks are stored as the
/// contents they point to.
pub async fn zip_dir(src_dir: &Path, dest: &Path) -> Result<PathBuf> {
    let src_dir = src_dir.to_path_buf();
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<PathBuf> {
        write_archive(&src_dir, &dest)?;
        Ok(dest)
    })
    .await
    .map_err(|e| Error::GenericError(format!("zip task failed: {e}")))?
}

fn write_archive(src_dir: &Path, dest: &Path) -> Result<()> {
    let file = File::create(dest).fs_context("creating archive", dest)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(src_dir)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let name = entry_name(entry.path().strip_prefix(src_dir)?);

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else {
            zip.start_file(name, options)?;
            let mut reader = File::open(entry.path()).fs_context("opening file", entry.path())?;
            io::copy(&mut reader, &mut zip).fs_context("archiving file", entry.path())?;
        }
    }

    zip.finish()?;
    Ok(())
}

fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    #[tokio::test]
    async fn entries_are_relative_to_source() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("bundle");
        std::fs::create_dir_all(src.join("data/nested")).unwrap();
        std::fs::write(src.join("index.ipynb"), "{}").unwrap();
        std::fs::write(src.join("data/nested/values.csv"), "a,b").unwrap();
        let dest = tmp.path().join("bundle.zip");

        let written = zip_dir(&src, &dest).await.unwrap();
        assert_eq!(written, dest);

        let archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec!["data/", "data/nested/", "data/nested/values.csv", "index.ipynb"]
        );
    }

    #[tokio::test]
    async fn file_contents_survive() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("bundle");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("some.csv"), "x,y\n1,2\n").unwrap();
        let dest = tmp.path().join("out.zip");

        zip_dir(&src, &dest).await.unwrap();

        let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut contents = String::new();
        io::Read::read_to_string(&mut archive.by_name("some.csv").unwrap(), &mut contents).unwrap();
        assert_eq!(contents, "x,y\n1,2\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinked_directories_are_archived_as_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("bundle");
        std::fs::create_dir_all(tmp.path().join("real")).unwrap();
        std::fs::write(tmp.path().join("real/lib.js"), "x").unwrap();
        std::fs::create_dir_all(&src).unwrap();
        std::os::unix::fs::symlink("../real", src.join("lib")).unwrap();
        let dest = tmp.path().join("out.zip");

        zip_dir(&src, &dest).await.unwrap();

        let archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["lib/", "lib/lib.js"]);
    }
}
