//! Shared fixtures for integration tests.

#![allow(dead_code)]

use dashboards_bundlers::bundler::{
    Converter, RecordingHandler, RequestInfo, SettingsBuilder,
    assets::statics::{COMPONENT_DIRS, COMPONENT_FILES, DASHBOARDS_EXTENSION},
    FileReferenceTools,
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Directory holding the test notebooks.
pub fn resources() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/resources")
}

/// Copies the test notebooks into `dst`.
pub fn copy_resources(dst: &Path) {
    std::fs::create_dir_all(dst).unwrap();
    for entry in std::fs::read_dir(resources()).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), dst.join(entry.file_name())).unwrap();
    }
}

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "x").unwrap();
}

/// Installs fake dashboards and declarative widgets extensions below `data_dir`.
pub fn install_extensions(data_dir: &Path) {
    let nbextensions = data_dir.join("nbextensions");

    let dashboards = nbextensions.join(DASHBOARDS_EXTENSION);
    for file in COMPONENT_FILES {
        touch(&dashboards.join(file));
    }
    for dir in COMPONENT_DIRS {
        touch(&dashboards.join(dir).join("asset.css"));
    }

    let widgets = nbextensions.join("declarativewidgets");
    touch(&widgets.join("js/main.js"));
    touch(&widgets.join("urth_components/urth-core-import/urth-core-import.html"));
}

/// Converter that prints the template name it was given instead of converting.
pub fn fake_converter(template_dir: &Path) -> Converter {
    Converter::new(
        vec![
            "sh".into(),
            "-c".into(),
            r#"printf '<html data-template="%s" data-format="%s"></html>' "$6" "$8""#.into(),
            "nbconvert".into(),
        ],
        template_dir,
    )
    .unwrap()
}

/// Handler rooted at `root_dir` with extensions from `data_dir`.
pub fn handler(root_dir: &Path, data_dir: &Path) -> RecordingHandler {
    let settings = SettingsBuilder::new()
        .root_dir(root_dir)
        .base_url("/")
        .extension_roots(vec![data_dir.to_path_buf()])
        .converter(fake_converter(&data_dir.join("templates")))
        .build()
        .unwrap();
    RecordingHandler::new(
        settings,
        RequestInfo::new("fake-host:5555", "http"),
        Some(Arc::new(FileReferenceTools)),
    )
}

/// Sorted entry names of a zip archive.
pub fn zip_entries(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}
