use super::*;


fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_command_is_menu() {
    let cli = parse(&["batchrun"]);
    assert!(cli.command.is_none());
    assert!(cli.output_dir.is_none());
    assert!(cli.workers.is_none());
}

#[test]
fn cli_parse_menu() {
    match parse(&["batchrun", "menu"]).command {
        Some(CliCommand::Menu) => {}
        other => panic!("expected Menu, got {other:?}"),
    }
}

#[test]
fn cli_parse_download_multiple_and_comma_separated() {
    match parse(&[
        "batchrun",
        "download",
        "http://a.example/1.txt,http://b.example/2.txt",
        "http://c.example/3.txt",
    ])
    .command
    {
        Some(CliCommand::Download { urls, json }) => {
            assert_eq!(
                urls,
                [
                    "http://a.example/1.txt",
                    "http://b.example/2.txt",
                    "http://c.example/3.txt"
                ]
            );
            assert!(!json);
        }
        other => panic!("expected Download, got {other:?}"),
    }
}

#[test]
fn cli_parse_download_requires_url() {
    assert!(Cli::try_parse_from(["batchrun", "download"]).is_err());
}

#[test]
fn cli_parse_filter_json() {
    match parse(&["batchrun", "filter", "a.json", "--json"]).command {
        Some(CliCommand::Filter { files, json }) => {
            assert_eq!(files, ["a.json"]);
            assert!(json);
        }
        other => panic!("expected Filter, got {other:?}"),
    }
}

#[test]
fn cli_parse_report() {
    let data = r#"[{"ID": 1, "Name": "Task1", "Status": "Done"}]"#;
    match parse(&["batchrun", "report", data]).command {
        Some(CliCommand::Report { records, json }) => {
            assert_eq!(records, data);
            assert!(!json);
        }
        other => panic!("expected Report, got {other:?}"),
    }
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = parse(&[
        "batchrun",
        "filter",
        "x.json",
        "--workers",
        "2",
        "--output-dir",
        "/tmp/out",
        "--config",
        "/tmp/cfg.toml",
    ]);
    assert_eq!(cli.workers, Some(2));
    assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/cfg.toml")));
}

#[test]
fn resolve_config_applies_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "workers = 3\noutput_dir = \"from-file\"\n").unwrap();
    let cfg_arg = cfg_path.to_string_lossy().into_owned();

    let cli = parse(&["batchrun", "--config", &cfg_arg]);
    let cfg = cli.resolve_config().unwrap();
    assert_eq!(cfg.workers, 3);
    assert_eq!(cfg.output_dir, PathBuf::from("from-file"));

    let cli = parse(&["batchrun", "--config", &cfg_arg, "--workers", "7", "--output-dir", "cli-dir"]);
    let cfg = cli.resolve_config().unwrap();
    assert_eq!(cfg.workers, 7);
    assert_eq!(cfg.output_dir, PathBuf::from("cli-dir"));
}

#[test]
fn json_output_only_for_json_flagged_commands() {
    assert!(!CliCommand::Menu.json_output());
    assert!(parse(&["batchrun", "report", "[]", "--json"]).command.unwrap().json_output());
    assert!(parse(&["batchrun", "download", "--json", "http://a.example/x"]).command.unwrap().json_output());
    assert!(!parse(&["batchrun", "filter", "a.json"]).command.unwrap().json_output());
}
