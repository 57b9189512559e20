use craft::config::Config;
use craft::error::Error;
use craft::fs::OsFs;
use craft::generate::{Generator, Options};
use craft::handler::{self, Handler};
use craft::metadata::{GoFacts, Language, Metadata};
use craft::renderer::{Delimiters, MiniJinjaRenderer};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MARKER: &str = "# Code generated by craft; DO NOT EDIT.";

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}

fn metadata() -> Metadata {
    let mut metadata = Metadata::new(Config::default());
    metadata.project_name = "demo".to_string();
    metadata
}

fn run(name: &str, templates: &Path, metadata: &Metadata, options: &Options) -> craft::error::Result<()> {
    let fs = OsFs::new(templates);
    let renderer = MiniJinjaRenderer::new();
    let handlers: Vec<Handler> = handler::defaults();
    Generator::new(name, &fs, &renderer, &handlers, metadata, options)?.run()
}

#[test]
fn test_renders_templates_and_copies_static_files() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(templates.path(), "name.txt.tmpl", &format!("{MARKER}\n{{{{ project_name | pascalcase }}}}\n"));
    write(templates.path(), "assets/raw.txt", &format!("{MARKER}\n{{{{ not rendered }}}}\n"));

    run("generic", templates.path(), &metadata(), &Options::new(dest.path())).unwrap();

    assert_eq!(read(dest.path(), "name.txt"), format!("{MARKER}\nDemo\n"));
    assert_eq!(read(dest.path(), "assets/raw.txt"), format!("{MARKER}\n{{{{ not rendered }}}}\n"));
    assert!(!dest.path().join("name.txt.tmpl").exists());
}

#[cfg(unix)]
#[test]
fn test_shell_scripts_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(templates.path(), "run.sh.tmpl", &format!("#!/bin/sh\n{MARKER}\necho {{{{ project_name }}}}\n"));
    write(templates.path(), "data.txt.tmpl", &format!("{MARKER}\n"));

    run("generic", templates.path(), &metadata(), &Options::new(dest.path())).unwrap();

    let mode = fs::metadata(dest.path().join("run.sh")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
    let mode = fs::metadata(dest.path().join("data.txt")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

#[test]
fn test_parts_are_composed() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(
        templates.path(),
        "Makefile.tmpl",
        &format!("{MARKER}\n{{% for name in [\"a\", \"b\", \"c\"] %}}\n{{% include \"Makefile-\" ~ name ~ \".part.tmpl\" ignore missing %}}\n{{% endfor %}}\n"),
    );
    write(templates.path(), "Makefile-a.part.tmpl", "a:\n");
    write(templates.path(), "Makefile-b.part.tmpl", "b:\n");

    run("generic", templates.path(), &metadata(), &Options::new(dest.path())).unwrap();

    assert_eq!(read(dest.path(), "Makefile"), format!("{MARKER}\na:\nb:\n"));
    assert!(!dest.path().join("Makefile-a.part").exists());
    assert!(!dest.path().join("Makefile-a.part.tmpl").exists());
}

#[test]
fn test_custom_delimiters_for_unclaimed_files() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(templates.path(), "value.txt.tmpl", "[% set greeting = project_name %]\n[[ greeting ]] {{ kept }}\n");

    let mut options = Options::new(dest.path());
    options.delimiters = Delimiters::new("[[", "]]");
    run("generic", templates.path(), &metadata(), &options).unwrap();

    assert_eq!(read(dest.path(), "value.txt"), "demo {{ kept }}\n");
}

#[test]
fn test_reserved_directories_are_gated() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), "shared.txt.tmpl", "shared {{ generator }}\n");
    write(templates.path(), "golang/go.txt.tmpl", "go {{ lang.go_version }}\n");
    write(templates.path(), "node/node.txt.tmpl", "node\n");
    write(templates.path(), "helm/values.txt.tmpl", "helm\n");

    let mut metadata = metadata();
    metadata.add_language(Language::Golang(GoFacts {
        module: "github.com/acme/demo".to_string(),
        go_version: "1.22".to_string(),
        toolchain: None,
    }));

    let dest = TempDir::new().unwrap();
    run("helm", templates.path(), &metadata, &Options::new(dest.path())).unwrap();
    assert_eq!(read(dest.path(), "values.txt"), "helm\n");
    assert!(!dest.path().join("shared.txt").exists());
    assert!(!dest.path().join("go.txt").exists());

    let dest = TempDir::new().unwrap();
    run("golang", templates.path(), &metadata, &Options::new(dest.path())).unwrap();
    assert_eq!(read(dest.path(), "shared.txt"), "shared golang\n");
    assert_eq!(read(dest.path(), "go.txt"), "go 1.22\n");
    assert!(!dest.path().join("golang").exists());
    assert!(!dest.path().join("node.txt").exists());
    assert!(!dest.path().join("values.txt").exists());
}

#[test]
fn test_hand_written_file_is_kept() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(templates.path(), "main.go.tmpl", "// Code generated by craft; DO NOT EDIT.\npackage main\n");
    write(dest.path(), "main.go", "package main // mine\n");

    run("generic", templates.path(), &metadata(), &Options::new(dest.path())).unwrap();
    assert_eq!(read(dest.path(), "main.go"), "package main // mine\n");
}

#[test]
fn test_directory_in_place_of_file_is_kept() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(templates.path(), "Makefile.tmpl", "# Code generated by craft; DO NOT EDIT.\nall:\n");
    write(dest.path(), "Makefile/mine.txt", "mine\n");

    run("generic", templates.path(), &metadata(), &Options::new(dest.path())).unwrap();
    assert_eq!(read(dest.path(), "Makefile/mine.txt"), "mine\n");

    let mut options = Options::new(dest.path());
    options.force_all = true;
    assert!(run("generic", templates.path(), &metadata(), &options).is_err());
    assert_eq!(read(dest.path(), "Makefile/mine.txt"), "mine\n");
}

#[test]
fn test_generated_file_is_regenerated() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(templates.path(), "main.go.tmpl", "// Code generated by craft; DO NOT EDIT.\npackage main\n");
    write(dest.path(), "main.go", "// Code generated by X; DO NOT EDIT.\npackage old\n");

    run("generic", templates.path(), &metadata(), &Options::new(dest.path())).unwrap();
    assert_eq!(read(dest.path(), "main.go"), "// Code generated by craft; DO NOT EDIT.\npackage main\n");
}

#[test]
fn test_forced_regeneration() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), "main.go.tmpl", "// Code generated by craft; DO NOT EDIT.\npackage main\n");
    write(templates.path(), "other.txt.tmpl", "other\n");

    let dest = TempDir::new().unwrap();
    write(dest.path(), "main.go", "package main // mine\n");
    write(dest.path(), "other.txt", "mine\n");
    let mut options = Options::new(dest.path());
    options.force = vec!["main.go".to_string()];
    run("generic", templates.path(), &metadata(), &options).unwrap();
    assert_eq!(read(dest.path(), "main.go"), "// Code generated by craft; DO NOT EDIT.\npackage main\n");
    assert_eq!(read(dest.path(), "other.txt"), "mine\n");

    let mut options = Options::new(dest.path());
    options.force_all = true;
    run("generic", templates.path(), &metadata(), &options).unwrap();
    assert_eq!(read(dest.path(), "other.txt"), "other\n");
}

#[test]
fn test_disabled_feature_is_removed() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(templates.path(), "Makefile.tmpl", &format!("{MARKER}\n"));
    write(templates.path(), "scripts/mk/help.mk.tmpl", &format!("{MARKER}\n"));
    write(templates.path(), "helm/chart/Chart.yaml.tmpl", "name: << project_name >>\n");
    write(dest.path(), "Makefile", "all:\n\t@echo mine\n");
    write(dest.path(), "scripts/mk/help.mk", "help:\n");
    write(dest.path(), "chart/templates/mine.yaml", "kind: Secret\n");

    let mut metadata = metadata();
    metadata.config.no_makefile = true;
    metadata.config.no_chart = true;

    run("generic", templates.path(), &metadata, &Options::new(dest.path())).unwrap();
    run("helm", templates.path(), &metadata, &Options::new(dest.path())).unwrap();

    assert!(!dest.path().join("Makefile").exists());
    assert!(!dest.path().join("scripts/mk/help.mk").exists());
    assert!(!dest.path().join("chart").exists());
}

#[test]
fn test_chart_uses_chevron_delimiters() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(
        templates.path(),
        "helm/chart/templates/service.yaml.tmpl",
        "name: << project_name >>\nport: {{ .Values.port }}\n",
    );

    run("helm", templates.path(), &metadata(), &Options::new(dest.path())).unwrap();
    assert_eq!(
        read(dest.path(), "chart/templates/service.yaml"),
        "name: demo\nport: {{ .Values.port }}\n"
    );
}

#[test]
fn test_file_errors_are_collected() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(templates.path(), "bad.txt.tmpl", "{% if %}\n");
    write(templates.path(), "broken.txt.tmpl", "{% for %}\n");
    write(templates.path(), "good.txt.tmpl", "good\n");

    let err = run("generic", templates.path(), &metadata(), &Options::new(dest.path())).unwrap_err();

    assert_eq!(err.count(), 2);
    assert!(matches!(err, Error::Multiple(_)));
    let message = err.to_string();
    assert!(message.contains("bad.txt"), "{message}");
    assert!(message.contains("broken.txt"), "{message}");
    assert_eq!(read(dest.path(), "good.txt"), "good\n");
}

#[test]
fn test_second_run_is_idempotent() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), "Makefile.tmpl", &format!("{MARKER}\n{{% include \"Makefile-a.part.tmpl\" %}}"));
    write(templates.path(), "Makefile-a.part.tmpl", "a:\n");
    write(templates.path(), "README.md.tmpl", "# {{ project_name }}\n");
    write(templates.path(), "conf/app.yaml.tmpl", &format!("{MARKER}\nname: {{{{ project_name }}}}\n"));

    let once = TempDir::new().unwrap();
    let twice = TempDir::new().unwrap();
    run("generic", templates.path(), &metadata(), &Options::new(once.path())).unwrap();
    run("generic", templates.path(), &metadata(), &Options::new(twice.path())).unwrap();
    run("generic", templates.path(), &metadata(), &Options::new(twice.path())).unwrap();

    assert!(!dir_diff::is_different(once.path(), twice.path()).unwrap());
}
