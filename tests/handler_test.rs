use craft::config::{Ci, CiName, CiOption, Config, Docker};
use craft::fs::{EmbedFs, TemplateFs};
use craft::generate::logical_name;
use craft::handler::{self, resolve, Handler};
use craft::metadata::Metadata;
use craft::renderer::Delimiters;
use std::path::{Path, PathBuf};

/// Collects every entry of the embedded template tree, directories included.
fn template_paths(fs: &dyn TemplateFs, dir: &Path, paths: &mut Vec<(PathBuf, bool)>) {
    for entry in fs.read_dir(dir).unwrap() {
        let path = dir.join(&entry.name);
        paths.push((path.clone(), entry.is_dir));
        if entry.is_dir {
            template_paths(fs, &path, paths);
        }
    }
}

fn claimants(handlers: &[Handler], src: &Path, name: &str) -> usize {
    let dest = Path::new("out").join(name);
    handlers.iter().filter(|handler| handler(src, &dest, name).is_some()).count()
}

#[test]
fn test_handlers_are_mutually_exclusive() {
    let handlers = handler::defaults();
    let fs = EmbedFs::new();
    let mut paths = Vec::new();
    template_paths(&fs, Path::new(""), &mut paths);
    assert!(!paths.is_empty());

    for (src, is_dir) in paths {
        let file_name = src.file_name().unwrap().to_str().unwrap();
        let name = if is_dir { file_name } else { logical_name(file_name).0 };
        let count = claimants(&handlers, &src, name);
        assert!(count <= 1, "'{}' is claimed by {count} handlers", src.display());
    }
}

#[test]
fn test_handlers_are_mutually_exclusive_on_samples() {
    let handlers = handler::defaults();
    let samples = [
        ("Makefile.tmpl", "Makefile"),
        ("scripts/mk/help.mk.tmpl", "help.mk"),
        ("Dockerfile.tmpl", "Dockerfile"),
        ("launcher.sh.tmpl", "launcher.sh"),
        (".github/labeler.yml.tmpl", "labeler.yml"),
        (".github/workflows/labeler.yml.tmpl", "labeler.yml"),
        (".github/workflows/release.yml.tmpl", "release.yml"),
        (".gitlab-ci.yml.tmpl", ".gitlab-ci.yml"),
        (".gitlab/issue.md", "issue.md"),
        ("helm/chart/Chart.yaml.tmpl", "Chart.yaml"),
        ("README.md.tmpl", "README.md"),
        ("notes.txt.tmpl", "notes.txt"),
    ];
    for (src, name) in samples {
        assert!(claimants(&handlers, Path::new(src), name) <= 1, "{src}");
    }
    assert_eq!(claimants(&handlers, Path::new("notes.txt.tmpl"), "notes.txt"), 0);
}

#[test]
fn test_resolve_first_match() {
    let handlers = handler::defaults();
    let result = resolve(&handlers, Path::new("helm/chart"), Path::new("out/chart"), "chart").unwrap();
    assert_eq!(result.delimiters, Delimiters::chevron());

    assert!(resolve(&handlers, Path::new("golang"), Path::new("out"), "golang").is_none());
}

fn docker_metadata(binaries: &[&str]) -> Metadata {
    let mut metadata = Metadata::new(Config {
        docker: Some(Docker::default()),
        ..Default::default()
    });
    for binary in binaries {
        metadata.add_binary(*binary);
    }
    metadata
}

#[test]
fn test_docker_with_two_binaries() {
    let metadata = docker_metadata(&["api", "worker-mail"]);
    let dockerfile = handler::docker(Path::new("Dockerfile.tmpl"), Path::new("out/Dockerfile"), "Dockerfile").unwrap();
    let launcher = handler::docker(Path::new("launcher.sh.tmpl"), Path::new("out/launcher.sh"), "launcher.sh").unwrap();

    assert!(!dockerfile.should_remove(&metadata));
    assert!(!launcher.should_remove(&metadata));
}

#[test]
fn test_docker_with_one_binary() {
    let metadata = docker_metadata(&["api"]);
    let dockerfile = handler::docker(Path::new("Dockerfile.tmpl"), Path::new("out/Dockerfile"), "Dockerfile").unwrap();
    let launcher = handler::docker(Path::new("launcher.sh.tmpl"), Path::new("out/launcher.sh"), "launcher.sh").unwrap();

    assert!(!dockerfile.should_remove(&metadata));
    assert!(launcher.should_remove(&metadata));
}

#[test]
fn test_docker_disabled() {
    let mut metadata = docker_metadata(&["api", "worker-mail"]);
    metadata.config.docker = None;
    let dockerfile = handler::docker(Path::new("Dockerfile.tmpl"), Path::new("out/Dockerfile"), "Dockerfile").unwrap();
    assert!(dockerfile.should_remove(&metadata));
}

#[test]
fn test_ci_options() {
    let handlers = handler::defaults();
    let mut metadata = Metadata::default();
    let codecov = resolve(&handlers, Path::new(".codecov.yml.tmpl"), Path::new("out/.codecov.yml"), ".codecov.yml").unwrap();
    assert!(codecov.should_remove(&metadata));

    metadata.config.ci = Some(Ci {
        name: CiName::Gitlab,
        options: vec![CiOption::Codecov],
        release: None,
        static_site: None,
    });
    assert!(!codecov.should_remove(&metadata));
}

#[test]
fn test_readme_written_once() {
    let dir = tempfile::TempDir::new().unwrap();
    let dest = dir.path().join("README.md");
    let readme = handler::readme(Path::new("README.md.tmpl"), &dest, "README.md").unwrap();
    assert!(readme.should_generate(&Metadata::default()));

    std::fs::write(&dest, "# Code generated by craft; DO NOT EDIT.\n").unwrap();
    let readme = handler::readme(Path::new("README.md.tmpl"), &dest, "README.md").unwrap();
    assert!(!readme.should_generate(&Metadata::default()));
}
