use clap::Parser;
use craft::cli::{Args, Command};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("craft")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_generate_defaults() {
    let parsed = Args::try_parse_from(make_args(&["generate"])).unwrap();
    assert!(!parsed.verbose);

    let Command::Generate(args) = parsed.command else {
        panic!("Expected the generate command");
    };
    assert_eq!(args.dest, PathBuf::from("."));
    assert!(args.templates.is_none());
    assert!(args.force.is_empty());
    assert!(!args.force_all);
    assert_eq!(args.start_delim, "{{");
    assert_eq!(args.end_delim, "}}");
}

#[test]
fn test_generate_all_flags() {
    let parsed = Args::try_parse_from(make_args(&[
        "generate",
        "--verbose",
        "--dest",
        "./project",
        "--templates",
        "./templates",
        "--force",
        "Makefile",
        "--force",
        "Dockerfile",
        "--force-all",
        "--start-delim",
        "[[",
        "--end-delim",
        "]]",
    ]))
    .unwrap();
    assert!(parsed.verbose);

    let Command::Generate(args) = parsed.command else {
        panic!("Expected the generate command");
    };
    assert_eq!(args.dest, PathBuf::from("./project"));
    assert_eq!(args.templates, Some(PathBuf::from("./templates")));
    assert_eq!(args.force, ["Makefile", "Dockerfile"]);
    assert!(args.force_all);
    assert_eq!(args.start_delim, "[[");
    assert_eq!(args.end_delim, "]]");
}

#[test]
fn test_init() {
    let parsed = Args::try_parse_from(make_args(&["-v", "init", "-d", "./project"])).unwrap();
    assert!(parsed.verbose);
    match parsed.command {
        Command::Init { dest } => assert_eq!(dest, PathBuf::from("./project")),
        other => panic!("Expected the init command, got {other:?}"),
    }
}

#[test]
fn test_missing_command() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_unknown_command() {
    assert!(Args::try_parse_from(make_args(&["bake"])).is_err());
}
