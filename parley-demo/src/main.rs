mod error;

use std::{
    io::{self, Write as _},
    process::ExitCode,
};

use parley::{
    ArgParser, Flag, GroupKind, Key, PositionalArg, ToolSpec,
    accept::{Integer, IntRange, OneOf},
    handler::Handler,
    printers::write_usage_errors,
};
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::DemoError;

fn tool() -> Result<ToolSpec, DemoError> {
    let mut tool = ToolSpec::new(["parley-demo"]);

    let verbosity =
        Flag::new(Key::Verbosity, ["-v", "--[no-]verbose"])?.with_handler(Handler::count());

    tool.add_flag(verbosity)?
        .add_flag(
            Flag::new("jobs", ["-j JOBS", "--jobs=JOBS"])?
                .with_acceptor(IntRange::new(1..=64))
                .with_default(1),
        )?
        .add_flag(
            Flag::new("format", ["-f FORMAT", "--format=FORMAT"])?
                .with_acceptor(OneOf::new(["json", "yaml", "text"])),
        )?
        .add_flag(Flag::new("json", ["--json"])?)?
        .add_flag(Flag::new("color", ["--color[=WHEN]"])?)?
        .add_flag(
            Flag::new("retry", ["-r [COUNT]", "--retry [COUNT]"])?
                .with_acceptor(Integer)
                .with_handler(Handler::push()),
        )?
        .add_flag(Flag::new("dry-run", ["-n", "--dry-run"])?)?
        .add_positional(PositionalArg::required("source"))?
        .add_positional(PositionalArg::optional("dest"))?
        .add_positional(PositionalArg::remaining("rest"))?
        .add_flag_group(GroupKind::AtMostOne, Some("output format"), ["format", "json"])?;

    Ok(tool)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let tool = tool()?;
    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());

    let mut parser = ArgParser::new(&tool, Default::default());
    parser
        .add_all(args)
        .and_then(|parser| parser.finish())
        .map_err(DemoError::from)?;

    tracing::debug!(
        tokens = parser.raw_args().len(),
        errors = parser.errors().len(),
        "parsed command line"
    );

    if !parser.errors().is_empty() {
        write_usage_errors(&mut io::stderr().lock(), parser.errors()).map_err(DemoError::from)?;
        return Ok(ExitCode::from(2));
    }

    let mut data: Vec<_> = parser.into_data().into_iter().collect();
    data.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut out = io::stdout().lock();
    for (key, value) in data {
        writeln!(out, "{key}: {value}")?;
    }

    Ok(ExitCode::SUCCESS)
}
