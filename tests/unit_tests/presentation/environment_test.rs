use subweave::presentation::Environment;
use subweave::presentation::config::UnknownEnvironment;

#[test]
fn given_known_names_when_parsing_then_environment_is_recognised() {
    assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
    assert_eq!("TEST".parse::<Environment>(), Ok(Environment::Test));
    assert_eq!(" production ".parse::<Environment>(), Ok(Environment::Prod));
}

#[test]
fn given_unknown_name_when_parsing_then_error_lists_expected_values() {
    let error = "staging".parse::<Environment>().unwrap_err();

    assert_eq!(error, UnknownEnvironment("staging".to_string()));
    assert!(error.to_string().contains("local, test, or prod"));
}

#[test]
fn given_environment_when_naming_settings_file_then_uses_lowercase_suffix() {
    assert_eq!(Environment::Prod.settings_file(), "subweave.prod");
    assert_eq!(Environment::default(), Environment::Local);
}
