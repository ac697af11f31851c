//! End-to-end resolution behaviour through the public API.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use stencil_application::variable_resolver::standard_commands;
use stencil_application::{
    ApplicationError, DelimitedTransformer, NotFoundPolicy, RegexTransformer, ReplacerConfig,
    VariableReplacer,
};
use stencil_domain::{DomainError, InsertPolicy, Value};

fn replacer(bindings: &[(&str, &str)]) -> VariableReplacer {
    let mut config = ReplacerConfig::new();
    config
        .add_variables(bindings.iter().map(|(k, v)| (*k, *v)))
        .unwrap();
    config.build().unwrap()
}

#[test]
fn test_plain_text_is_unchanged() {
    let replacer = replacer(&[("Name", "Al")]);
    for source in ["", "plain text", "$ ( Name )", "$(", "$()", "$(Name", "Name)", "100% $5"] {
        assert_eq!(replacer.replace_variables(source).unwrap(), source);
    }
}

#[test]
fn test_repeated_references_expand_each_time() {
    let replacer = replacer(&[("Name", "Al")]);
    assert_eq!(
        replacer.replace_variables("$(Name)-$(Name)-$(Name)").unwrap(),
        "Al-Al-Al"
    );
    // A second call sees no state left over from the first.
    assert_eq!(replacer.replace_variables("$(Name)").unwrap(), "Al");
}

#[test]
fn test_recursive_expansion() {
    let replacer = replacer(&[
        ("FirstName", "Al"),
        ("LastName", "Jones"),
        ("FullName", "$(FirstName) $(LastName)"),
    ]);
    assert_eq!(
        replacer.replace_variables("Hello $(FullName).").unwrap(),
        "Hello Al Jones."
    );
}

#[test]
fn test_cycle_detection() {
    let replacer = replacer(&[("A", "$(B)"), ("B", "$(A)")]);
    assert_eq!(
        replacer.replace_variables("$(A)").unwrap_err(),
        ApplicationError::CyclicDependency {
            path: vec!["A".into(), "B".into(), "A".into()],
        }
    );
}

#[test]
fn test_cycle_error_leaves_replacer_usable() {
    let replacer = replacer(&[("A", "$(B)"), ("B", "$(A)"), ("C", "ok")]);
    assert!(replacer.replace_variables("$(A)").is_err());
    assert_eq!(replacer.replace_variables("$(C)").unwrap(), "ok");
}

#[test]
fn test_not_found_marker() {
    let replacer = ReplacerConfig::new().build().unwrap();
    assert_eq!(replacer.replace_variables("$(X)").unwrap(), "NOTFOUND:X");
}

#[test]
fn test_not_found_custom_policy() {
    let replacer = ReplacerConfig::new()
        .when_variable_not_found(NotFoundPolicy::custom(|name| Ok(format!("<{name}>"))))
        .build()
        .unwrap();
    assert_eq!(replacer.replace_variables("$(X) $(Y)").unwrap(), "<X> <Y>");
}

#[test]
fn test_trim_command() {
    let mut config = ReplacerConfig::new()
        .with_default_transformer("$(", ")", Arc::new(standard_commands))
        .unwrap();
    config.add_variable("Name", "   Al   ").unwrap();
    let replacer = config.build().unwrap();

    assert_eq!(replacer.replace_variables("$(Name:trim)").unwrap(), "Al");
}

#[test]
fn test_invalid_names_block_construction() {
    let mut config = ReplacerConfig::new();
    config
        .add_variables([("Good", "1"), ("bad name", "2"), ("also-bad", "3")])
        .unwrap();

    match config.build().unwrap_err() {
        ApplicationError::InvalidVariableNames { problems, .. } => {
            let names: Vec<&str> = problems.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["bad name", "also-bad"]);
            assert!(problems.iter().all(|p| !p.message.is_empty()));
        }
        other => panic!("expected InvalidVariableNames, got {other:?}"),
    }
}

#[test]
fn test_transformer_without_validator_accepts_any_name() {
    let mut config = ReplacerConfig::new().with_transformer(DelimitedTransformer::default());
    config.add_variable("any name at all", "ok").unwrap();
    let replacer = config.build().unwrap();
    assert_eq!(replacer.replace_variables("%any name at all%").unwrap(), "ok");
}

#[test]
fn test_duplicate_policy() {
    let mut config = ReplacerConfig::new();
    config.add_variable("Name", "first").unwrap();
    assert_eq!(
        config.add_variable("Name", "second").unwrap_err(),
        DomainError::DuplicateVariable("Name".into())
    );

    let mut config = ReplacerConfig::new().with_insert_policy(InsertPolicy::Overwrite);
    config.add_variable("Name", "first").unwrap();
    config.add_variable("Name", "second").unwrap();
    let replacer = config.build().unwrap();
    assert_eq!(replacer.replace_variables("$(Name)").unwrap(), "second");
}

#[test]
fn test_typed_values_are_formatted() {
    let mut config = ReplacerConfig::new();
    config
        .add_variable("Age", 12)
        .unwrap()
        .add_variable("Codes", true)
        .unwrap()
        .add_variable("Nothing", Value::Null)
        .unwrap();
    let replacer = config.build().unwrap();

    assert_eq!(
        replacer
            .replace_variables("$(Age)|$(Codes)|[$(Nothing)]")
            .unwrap(),
        "12|true|[]"
    );
}

#[test]
fn test_clone_and_configure_is_independent() {
    let original = replacer(&[("Name", "Al")]);
    let extended = original
        .clone_and_configure(|mut config| {
            config.add_variable("Greeting", "Hi $(Name)")?;
            Ok(config)
        })
        .unwrap();

    assert_eq!(extended.replace_variables("$(Greeting)").unwrap(), "Hi Al");
    assert_eq!(
        original.replace_variables("$(Greeting)").unwrap(),
        "NOTFOUND:Greeting"
    );
}

#[test]
fn test_custom_delimiters_escape_regex_metacharacters() {
    let transformer = RegexTransformer::builder()
        .prefix("[[")
        .suffix("]]")
        .build()
        .unwrap();
    let mut config = ReplacerConfig::new().with_transformer(transformer);
    config.add_variable("a.b", "x").unwrap();
    let replacer = config.build().unwrap();

    assert_eq!(replacer.replace_variables("[[a.b]] [a.b]").unwrap(), "x [a.b]");
}

#[test]
fn test_long_chain_stops_at_max_depth() {
    let mut config = ReplacerConfig::new();
    for i in 0..2_000 {
        config
            .add_variable(format!("v{i}"), format!("$(v{})", i + 1))
            .unwrap();
    }
    let replacer = config.build().unwrap();

    assert!(matches!(
        replacer.replace_variables("$(v0)"),
        Err(ApplicationError::ResolutionTooDeep { max_depth: 256, .. })
    ));
}
