/*!
An incremental, error-accumulating command-line arguments parser, driven by
tool declarations built at runtime.

A tool is declared as a [`ToolSpec`]: its [`Flag`]s (spelled with
declaration strings like `-o FILE` or `--[no-]color`), its
[`PositionalArg`]s, and any [flag groups][group] constraining which flags may
appear together. An [`ArgParser`] is then fed the command line one token at a
time. Instead of stopping at the first problem, it keeps going and collects
every [`UsageError`] it finds, so that a tool can report all of them at once
(see [`printers::write_usage_errors`]).

Values flow through a small pipeline on their way into the parsed [`Data`]:
an [acceptor][accept] validates and converts the raw string, and a
[handler] folds the result into whatever was already bound to the key. This
is how repeated flags turn into lists or counts.

Long flags may be abbreviated to any unambiguous prefix, so `--verb` works
for `--verbose` as long as nothing else starts with `--verb`.
*/

pub mod accept;
pub mod error;
pub mod flag;
pub mod group;
pub mod handler;
pub mod parser;
pub mod positional;
pub mod printers;
pub mod resolve;
pub mod suggest;
pub mod syntax;
pub mod tool;
pub mod value;

mod pipeline;

pub use error::{DefinitionError, ParserFinished, UsageError};
pub use flag::{Flag, FlagKind};
pub use group::{FlagGroup, GroupKind};
pub use parser::ArgParser;
pub use positional::{Arity, PositionalArg};
pub use syntax::ValueRequirement;
pub use tool::{Tool, ToolSpec};
pub use value::{Data, Key, Value};
