use parley::{
    ArgParser, Data, Flag, GroupKind, Key, ParserFinished, PositionalArg, ToolSpec, UsageError,
    Value,
    accept::{Integer, OneOf},
    handler::Handler,
};
use rstest::{fixture, rstest};

fn key(name: &'static str) -> Key {
    Key::from(name)
}

fn finished<'t>(tool: &'t ToolSpec, tokens: &[&str]) -> ArgParser<'t, ToolSpec> {
    let mut parser = ArgParser::new(tool, Data::new());
    parser
        .add_all(tokens.iter().copied())
        .and_then(|parser| parser.finish())
        .unwrap();
    parser
}

#[fixture]
fn verbose_version() -> ToolSpec {
    let mut tool = ToolSpec::new(["tool"]);
    tool.add_flag(Flag::new("verbose", ["--verbose"]).unwrap())
        .unwrap()
        .add_flag(Flag::new("version", ["--version"]).unwrap())
        .unwrap();
    tool
}

#[rstest]
fn prefix_resolves_to_unique_flag(verbose_version: ToolSpec) {
    let parser = finished(&verbose_version, &["--verb"]);

    assert!(parser.errors().is_empty());
    assert_eq!(parser.data()[&key("verbose")], Value::Bool(true));
    assert_eq!(parser.data().get(&key("version")), None);
}

#[rstest]
fn ambiguous_prefix_lists_every_match(verbose_version: ToolSpec) {
    let parser = finished(&verbose_version, &["--ver"]);

    assert_eq!(
        parser.errors(),
        [UsageError::FlagAmbiguous {
            value: "--ver".to_owned(),
            suggestions: vec!["--verbose".to_owned(), "--version".to_owned()],
        }]
    );
    assert_eq!(parser.unmatched_flags(), ["--ver"]);
    assert!(parser.seen_flag_keys().is_empty());
}

#[test]
fn prefix_of_two_strings_of_one_flag_is_ambiguous() {
    let mut tool = ToolSpec::new(["tool"]);
    tool.add_flag(Flag::new("output", ["--output FILE", "--outfile FILE"]).unwrap())
        .unwrap();

    let parser = finished(&tool, &["--out", "x"]);

    assert_eq!(
        parser.errors()[0],
        UsageError::FlagAmbiguous {
            value: "--out".to_owned(),
            suggestions: vec!["--output".to_owned(), "--outfile".to_owned()],
        }
    );
    assert_eq!(parser.data().get(&key("output")), None);
}

#[rstest]
#[case(&["--flag"], true)]
#[case(&["--no-flag"], false)]
#[case(&["--flag", "--no-flag"], false)]
#[case(&["--no-flag", "--flag"], true)]
fn negatable_flag(#[case] tokens: &[&str], #[case] expected: bool) {
    let mut tool = ToolSpec::new(["tool"]);
    tool.add_flag(Flag::new("flag", ["--[no-]flag"]).unwrap())
        .unwrap();

    let parser = finished(&tool, tokens);

    assert!(parser.errors().is_empty());
    assert_eq!(parser.data()[&key("flag")], Value::Bool(expected));
}

#[test]
fn summing_handler() {
    let sum = Handler::new(|value, previous| {
        Value::Int(value.as_int().unwrap_or(0) + previous.as_int().unwrap_or(0))
    });

    let mut tool = ToolSpec::new(["tool"]);
    tool.add_flag(
        Flag::new("count", ["--count VALUE"])
            .unwrap()
            .with_acceptor(Integer)
            .with_handler(sum),
    )
    .unwrap();

    let parser = finished(&tool, &["--count", "3", "--count", "4"]);

    assert!(parser.errors().is_empty());
    assert_eq!(parser.data()[&key("count")], Value::Int(7));
}

#[test]
fn separator_disables_flags() {
    let mut tool = ToolSpec::new(["tool"]);
    tool.add_flag(Flag::new("b", ["-b"]).unwrap())
        .unwrap()
        .add_positional(PositionalArg::remaining("args"))
        .unwrap();

    let parser = finished(&tool, &["a", "--", "-b", "--"]);

    assert!(parser.errors().is_empty());
    assert!(!parser.flags_allowed());
    assert_eq!(parser.data()[&key("args")], Value::strings(["a", "-b", "--"]));
    assert_eq!(parser.data().get(&key("b")), None);
}

#[test]
fn short_cluster_with_trailing_value() {
    let mut tool = ToolSpec::new(["tool"]);
    tool.add_flag(Flag::new("a", ["-a"]).unwrap())
        .unwrap()
        .add_flag(Flag::new("b", ["-b"]).unwrap())
        .unwrap()
        .add_flag(Flag::new("c", ["-c VALUE"]).unwrap())
        .unwrap();

    let parser = finished(&tool, &["-abc", "value"]);

    assert!(parser.errors().is_empty());
    assert_eq!(parser.data()[&key("a")], Value::Bool(true));
    assert_eq!(parser.data()[&key("b")], Value::Bool(true));
    assert_eq!(parser.data()[&key("c")], Value::from("value"));
    assert_eq!(parser.seen_flag_keys(), [key("a"), key("b"), key("c")]);
}

#[fixture]
fn hub() -> ToolSpec {
    let mut tool = ToolSpec::new(["git", "remote"]);
    tool.add_subtool("add")
        .add_subtool("remove")
        .add_subtool("rename")
        .set_runnable(false);
    tool
}

#[rstest]
fn unknown_subtool(hub: ToolSpec) {
    let parser = finished(&hub, &["bogus"]);

    assert_eq!(
        parser.errors(),
        [UsageError::ToolUnrecognized {
            values: vec!["git".to_owned(), "remote".to_owned(), "bogus".to_owned()],
            suggestions: Vec::new(),
        }]
    );
    assert_eq!(parser.extra_args(), ["bogus"]);
}

#[rstest]
fn misspelled_subtool_gets_suggestion(hub: ToolSpec) {
    let parser = finished(&hub, &["renmae", "origin"]);

    assert_eq!(
        parser.errors()[0].to_string(),
        r#"Tool not found: "git remote renmae". Did you mean "rename"?"#
    );
}

#[test]
fn extra_arguments_once_a_flag_matched() {
    let mut tool = ToolSpec::new(["tool"]);
    tool.add_flag(Flag::new("quiet", ["-q"]).unwrap())
        .unwrap()
        .set_runnable(false);

    let parser = finished(&tool, &["-q", "bogus", "more"]);

    assert_eq!(
        parser.errors(),
        [UsageError::ExtraArguments {
            values: vec!["bogus".to_owned(), "more".to_owned()],
        }]
    );
}

#[fixture]
fn name_and_rest() -> ToolSpec {
    let mut tool = ToolSpec::new(["tool"]);
    tool.add_positional(PositionalArg::required("name"))
        .unwrap()
        .add_positional(PositionalArg::remaining("rest"))
        .unwrap();
    tool
}

#[rstest]
fn remaining_collects_the_tail(name_and_rest: ToolSpec) {
    let parser = finished(&name_and_rest, &["x", "y", "z"]);

    assert!(parser.errors().is_empty());
    assert_eq!(parser.data()[&key("name")], Value::from("x"));
    assert_eq!(parser.data()[&key("rest")], Value::strings(["y", "z"]));
    assert!(parser.extra_args().is_empty());
}

#[rstest]
fn missing_required_positional(name_and_rest: ToolSpec) {
    let parser = finished(&name_and_rest, &[]);

    assert_eq!(
        parser.errors(),
        [UsageError::ArgMissing {
            name: "NAME".to_owned()
        }]
    );
    assert_eq!(parser.data()[&key("rest")], Value::List(Vec::new()));
}

#[rstest]
fn finishing_twice(name_and_rest: ToolSpec) {
    let mut parser = ArgParser::new(&name_and_rest, Data::new());
    parser.add("x").unwrap().finish().unwrap();
    let data = parser.data().clone();

    assert_eq!(parser.finish().err(), Some(ParserFinished));
    assert_eq!(parser.add("y").err(), Some(ParserFinished));
    assert!(parser.is_finished());
    assert_eq!(*parser.data(), data);
}

#[test]
fn inline_value_on_boolean_flag() {
    let mut tool = ToolSpec::new(["tool"]);
    tool.add_flag(Flag::new("color", ["--[no-]color"]).unwrap())
        .unwrap();

    let parser = finished(&tool, &["--no-color=always"]);

    assert_eq!(parser.data()[&key("color")], Value::Bool(false));
    assert_eq!(
        parser.errors(),
        [UsageError::FlagValueNotAllowed {
            name: "--no-color".to_owned()
        }]
    );
}

#[fixture]
fn formats() -> ToolSpec {
    let mut tool = ToolSpec::new(["tool"]);
    tool.add_flag(Flag::new("json", ["--json"]).unwrap())
        .unwrap()
        .add_flag(Flag::new("yaml", ["--yaml"]).unwrap())
        .unwrap()
        .add_flag_group(GroupKind::ExactlyOne, None, ["json", "yaml"])
        .unwrap();
    tool
}

#[rstest]
#[case(&[], Some("but none were provided."))]
#[case(&["--json"], None)]
#[case(&["--json", "--json"], None)]
#[case(&["--json", "--yaml"], Some(r#"but 2 were provided: "--json", "--yaml"."#))]
fn exactly_one_group(
    formats: ToolSpec,
    #[case] tokens: &[&str],
    #[case] expected: Option<&str>,
) {
    let parser = finished(&formats, tokens);

    match expected {
        None => assert!(parser.errors().is_empty()),
        Some(fragment) => match parser.errors() {
            [UsageError::FlagGroupConstraint { message }] => {
                assert!(message.starts_with(r#"Exactly one flag out of group "--json, --yaml""#));
                assert!(message.ends_with(fragment), "{message}");
            }
            other => panic!("expected a single group error, got {other:?}"),
        },
    }
}

#[test]
fn flags_before_args() {
    let mut tool = ToolSpec::new(["exec"]);
    tool.add_flag(Flag::new("env", ["-e NAME"]).unwrap())
        .unwrap()
        .add_positional(PositionalArg::remaining("command"))
        .unwrap()
        .enforce_flags_before_args();

    let parser = finished(&tool, &["-e", "PATH", "ls", "-e", "-l"]);

    assert!(parser.errors().is_empty());
    assert_eq!(parser.data()[&key("env")], Value::from("PATH"));
    assert_eq!(parser.data()[&key("command")], Value::strings(["ls", "-e", "-l"]));
}

#[test]
fn disabled_argument_parsing() {
    let mut tool = ToolSpec::new(["wrapper"]);
    tool.add_flag(Flag::new("help", ["--help"]).unwrap())
        .unwrap()
        .disable_argument_parsing();

    let tokens = ["--help", "-x", "--", "plain"];
    let parser = finished(&tool, &tokens);

    assert!(parser.errors().is_empty());
    assert!(parser.seen_flag_keys().is_empty());
    assert_eq!(parser.raw_args(), tokens);
    assert_eq!(parser.data()[&Key::Args], Value::strings(tokens));
    assert_eq!(parser.data().get(&key("help")), None);
}

#[test]
fn errors_in_discovery_order() {
    let mut tool = ToolSpec::new(["tool"]);
    tool.add_flag(
        Flag::new("mode", ["--mode=MODE"])
            .unwrap()
            .with_acceptor(OneOf::new(["fast", "slow"])),
    )
    .unwrap()
    .add_flag(Flag::new("out", ["-o FILE"]).unwrap())
    .unwrap()
    .add_positional(PositionalArg::required("input"))
    .unwrap();

    let tokens = ["--mdoe=fast", "--mode=fsat", "-z", "-o"];

    let first = finished(&tool, &tokens);
    let second = finished(&tool, &tokens);

    assert_eq!(first.errors(), second.errors());
    assert_eq!(
        first
            .errors()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        [
            r#"Flag "--mdoe" is not recognized. Did you mean "--mode"?"#,
            r#"Unacceptable value "fsat" for flag "--mode". Did you mean "fast"?"#,
            r#"Flag "-z" is not recognized."#,
            r#"Flag "-o" is missing a value."#,
            r#"Required positional argument "INPUT" is missing."#,
        ]
    );
    assert_eq!(
        first.data()[&Key::UsageErrors],
        Value::Errors(first.errors().to_vec())
    );
}
