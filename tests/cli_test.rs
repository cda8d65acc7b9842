//! Tests for argument parsing, settings overrides and exit codes

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use steamloc::application::ApplicationError;
use steamloc::cli::commands::load_settings;
use steamloc::cli::{Cli, CliError};
use steamloc::config::Settings;
use steamloc::domain::{CityIdParsing, DomainError, LookupError};
use steamloc::exitcode;
use steamloc::infrastructure::di::ServiceContainer;
use steamloc::infrastructure::traits::RealFileSystem;
use steamloc::infrastructure::InfraError;
use steamloc::util::testing::{init_test_setup, resource_path};

fn empty_config(dir: &TempDir) -> String {
    let path = dir.path().join("steamloc.toml");
    std::fs::write(&path, "").unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn given_three_positionals_when_parsing_then_keeps_them_in_order() {
    let cli = Cli::try_parse_from(["steamloc", "US", "CA", "3325"]).unwrap();

    assert_eq!(cli.positional(), ["US", "CA", "3325"]);
    assert_eq!(cli.verbose, 0);
    assert!(!cli.strict);
}

#[test]
fn given_empty_codes_when_parsing_then_accepts_them() {
    let cli = Cli::try_parse_from(["steamloc", "US", "", ""]).unwrap();
    assert_eq!(cli.positional(), ["US", "", ""]);
}

#[test]
fn given_negative_city_id_when_parsing_then_reads_it_as_value() {
    let cli = Cli::try_parse_from(["steamloc", "US", "CA", "-5"]).unwrap();
    assert_eq!(cli.city_id, "-5");
}

#[test]
fn given_options_when_parsing_then_sets_flags() {
    let cli = Cli::try_parse_from([
        "steamloc", "-vv", "--strict", "--pretty", "--dataset", "/tmp/d.json", "US", "CA", "5",
    ])
    .unwrap();

    assert_eq!(cli.verbose, 2);
    assert!(cli.strict);
    assert!(cli.pretty);
    assert_eq!(cli.dataset, Some(PathBuf::from("/tmp/d.json")));
}

#[rstest]
#[case(&["steamloc"])]
#[case(&["steamloc", "US"])]
#[case(&["steamloc", "US", "CA"])]
#[case(&["steamloc", "US", "CA", "5", "extra"])]
fn given_wrong_positional_count_when_parsing_then_fails(#[case] argv: &[&str]) {
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn given_flags_when_loading_settings_then_flags_win() {
    let temp = TempDir::new().unwrap();
    let config = empty_config(&temp);
    let cli = Cli::try_parse_from([
        "steamloc", "--config", config.as_str(), "--strict", "--pretty", "--dataset", "/tmp/d.json", "US", "CA", "5",
    ])
    .unwrap();

    let settings = load_settings(&cli).unwrap();

    assert_eq!(settings.dataset, PathBuf::from("/tmp/d.json"));
    assert_eq!(settings.city_id_parsing(), CityIdParsing::Strict);
    assert!(settings.pretty);
}

#[test]
fn given_empty_dataset_flag_when_parsing_then_fails() {
    assert!(Cli::try_parse_from(["steamloc", "--dataset", "", "US", "CA", "5"]).is_err());
}

// ============================================================
// Wiring through the service container
// ============================================================

fn fixture_container() -> ServiceContainer {
    init_test_setup();
    let settings = Settings {
        dataset: resource_path("steam_countries.json"),
        ..Settings::default()
    };
    ServiceContainer::with_deps(settings, Arc::new(RealFileSystem))
}

#[test]
fn given_fixture_dataset_when_running_then_prints_map_search_string() {
    let service = fixture_container().location_service().unwrap();
    let mut out = Vec::new();

    service.run(&["US", "WA", "3961"], &mut out).unwrap();

    let line = String::from_utf8(out).unwrap();
    let record: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(record["map_search_string"], "Seattle, Washington, United States");
    assert_eq!(line.matches('\n').count(), 1);
}

#[test]
fn given_missing_dataset_when_building_service_then_exit_code_is_noinput() {
    let settings = Settings {
        dataset: PathBuf::from("/nonexistent/steam_countries.json"),
        ..Settings::default()
    };
    let container = ServiceContainer::with_deps(settings, Arc::new(RealFileSystem));

    let err = CliError::from(container.location_service().err().expect("missing dataset"));

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
    assert!(err.to_string().contains("/nonexistent/steam_countries.json"));
}

// ============================================================
// Exit codes
// ============================================================

#[rstest]
#[case(ApplicationError::Domain(DomainError::MissingArgument("city_id")), exitcode::USAGE)]
#[case(ApplicationError::Domain(DomainError::InvalidCityId("x".into())), exitcode::USAGE)]
#[case(ApplicationError::Lookup(LookupError::UnknownCountry("ZZ".into())), exitcode::NOMATCH)]
#[case(
    ApplicationError::Lookup(LookupError::UnknownState { country: "US".into(), state: "XX".into() }),
    exitcode::NOMATCH
)]
#[case(
    ApplicationError::Lookup(LookupError::UnknownCity { country: "US".into(), state: "CA".into(), city_id: 77 }),
    exitcode::NOMATCH
)]
#[case(ApplicationError::Lookup(LookupError::Unavailable("down".into())), exitcode::UNAVAILABLE)]
#[case(ApplicationError::Config { message: "bad".into() }, exitcode::CONFIG)]
fn given_application_error_when_mapping_then_returns_exit_code(
    #[case] error: ApplicationError,
    #[case] expected: i32,
) {
    assert_eq!(CliError::from(error).exit_code(), expected);
}

#[test]
fn given_serialization_error_when_mapping_then_exit_code_is_software() {
    let source = serde_json::from_str::<u8>("x").unwrap_err();
    let err = CliError::from(ApplicationError::Serialization(source));
    assert_eq!(err.exit_code(), exitcode::SOFTWARE);
}

#[test]
fn given_malformed_dataset_when_mapping_then_exit_code_is_dataerr() {
    let err = CliError::from(InfraError::Dataset {
        path: PathBuf::from("steam_countries.json"),
        message: "expected value".into(),
    });
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}
