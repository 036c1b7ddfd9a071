use crate::*;
use std::collections::HashMap;

fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn scenario_schema() -> Schema {
    Schema::new()
        .var("A", Entry::new())
        .var("B", Entry::new().with_default("x"))
        .var(
            "C",
            Entry::new().parse_with(|raw: &str| raw.parse::<i64>().map_err(|_| "not a number")),
        )
}

#[test]
fn test_scenario_success() {
    let validation = aggregate(&scenario_schema(), &source(&[("A", "A"), ("C", "7")]));

    let Validation::Success { env, printable } = validation else {
        panic!("expected success");
    };
    assert_eq!(env.get("A"), Some(&Value::from("A")));
    assert_eq!(env.get("B"), Some(&Value::from("x")));
    assert_eq!(env.get("C"), Some(&Value::Int(7)));
    assert_eq!(env.len(), 3);
    insta::assert_snapshot!(printable.to_inline(), @r#"A="A", B="x" (default), C=7"#);
}

#[test]
fn test_scenario_parser_failure_keeps_siblings() {
    let validation = aggregate(&scenario_schema(), &source(&[("A", "A"), ("C", "abc")]));

    assert!(!validation.is_success());
    assert!(validation.env().is_none());
    let printable = validation.printable();
    assert_eq!(printable.get("C"), Some(r#"<parser: "not a number">"#));
    assert_eq!(printable.get("A"), Some(r#""A""#));
    assert_eq!(printable.get("B"), Some(r#""x" (default)"#));
}

#[test]
fn test_every_name_printed_once_in_schema_order() {
    let schema = Schema::new()
        .var("ZETA", Entry::new())
        .var("ALPHA", Entry::new().mask(true))
        .var("MID", Entry::new().parser(parsers::int()))
        .var("ALPHA", Entry::new().mask(true).with_default("a"));

    let validation = aggregate(&schema, &source(&[("MID", "nope")]));
    let names: Vec<&str> = validation.printable().iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["ZETA", "ALPHA", "MID"]);
    insta::assert_snapshot!(validation.printable().to_lines(), @r#"
    ZETA = <missing>
    ALPHA = <masked> (default)
    MID = <parser: "not an integer: nope">
    "#);
}

#[test]
fn test_failure_messages_are_never_masked() {
    let schema = Schema::new()
        .var("PARSE", Entry::new().parser(parsers::port()).mask(true))
        .var(
            "MASK",
            Entry::new().mask(Mask::with(|_: &Value| Err::<String, _>("mask exploded"))),
        )
        .var("MISSING", Entry::new().mask(true));

    let validation = aggregate(
        &schema,
        &source(&[("PARSE", "99999"), ("MASK", "secret")]),
    );
    insta::assert_snapshot!(
        validation.printable().to_inline(),
        @r#"PARSE=<parser: "not a valid port: 99999">, MASK=<mask: "mask exploded">, MISSING=<missing>"#
    );
}

#[test]
fn test_masked_values_do_not_leak() {
    let schema = Schema::new()
        .var("TOKEN", Entry::new().mask(true))
        .var("FALLBACK", Entry::new().mask(true).with_default("hunter2"))
        .var(
            "DATABASE_URL",
            Entry::new()
                .parser(parsers::url())
                .mask(mask_url([UrlPart::Password])),
        );

    let validation = aggregate(
        &schema,
        &source(&[
            ("TOKEN", "hunter2"),
            ("DATABASE_URL", "postgres://app:hunter2@db/app"),
        ]),
    );
    assert!(validation.is_success());
    for (_, printable) in validation.printable().iter() {
        assert!(!printable.contains("hunter2"), "{printable}");
    }
    assert_eq!(
        validation.printable().get("DATABASE_URL"),
        Some(r#"<masked: "postgres://app:*****@db/app">"#)
    );

    // The typed value itself is untouched.
    let env = validation.into_result().unwrap();
    assert_eq!(
        env.get("DATABASE_URL")
            .and_then(Value::downcast_ref::<url::Url>)
            .and_then(url::Url::password),
        Some("hunter2")
    );
}

#[test]
fn test_blank_values_use_default() {
    let schema = Schema::new()
        .var("PORT", Entry::new().parser(parsers::port()).with_default(8080))
        .var("HOST", Entry::new());

    let validation = aggregate(&schema, &source(&[("PORT", "  "), ("HOST", "")]));
    assert_eq!(validation.printable().get("PORT"), Some("8080 (default)"));
    assert_eq!(validation.printable().get("HOST"), Some("<missing>"));
}

#[test]
fn test_closure_source_and_names() {
    let lookup = |name: &str| (name == "HOME").then(|| "/root".to_string());

    let validation = aggregate_names(["HOME"], &lookup);
    assert_eq!(
        validation.env().and_then(|env| env.get("HOME")),
        Some(&Value::from("/root"))
    );

    let validation = aggregate_names(vec!["HOME".to_string(), "SHELL".to_string()], &lookup);
    assert_eq!(validation.printable().to_inline(), r#"HOME="/root", SHELL=<missing>"#);
}

#[test]
fn test_into_result_reports_everything() {
    let validation = aggregate(&scenario_schema(), &source(&[("C", "7")]));
    let err = validation.into_result().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"
    Invalid environment variables:
    A = <missing>
    B = "x" (default)
    C = 7
    "#);
}

#[test]
fn test_group_over_env() {
    let schema = Schema::new()
        .var("SMTP_USER", Entry::new().with_default(Value::Null))
        .var("SMTP_PASSWORD", Entry::new().with_default(Value::Null))
        .var("SMTP_TLS", Entry::new().parser(parsers::boolean()));

    let env = aggregate(&schema, &source(&[("SMTP_TLS", "false")]))
        .into_result()
        .unwrap();
    assert_eq!(env.group(&["SMTP_USER", "SMTP_PASSWORD"]).unwrap(), None);

    let env = aggregate(
        &schema,
        &source(&[("SMTP_USER", "mailer"), ("SMTP_TLS", "false")]),
    )
    .into_result()
    .unwrap();
    let err = env.group(&["SMTP_USER", "SMTP_PASSWORD", "SMTP_TLS"]).unwrap_err();
    assert_eq!(err.present, ["SMTP_USER", "SMTP_TLS"]);
    assert_eq!(err.absent, ["SMTP_PASSWORD"]);

    let group = env.group(&["SMTP_USER", "SMTP_TLS"]).unwrap().unwrap();
    assert_eq!(
        group,
        vec![
            ("SMTP_USER".to_string(), Value::from("mailer")),
            ("SMTP_TLS".to_string(), Value::Bool(false)),
        ]
    );
}
