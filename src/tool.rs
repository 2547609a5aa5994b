/*!
Tool declarations: the flags, positional arguments, groups and policies a
parser consults.

[`ArgParser`][crate::parser::ArgParser] works against the [`Tool`] trait, so
a tool can come from anywhere. [`ToolSpec`] is the implementation most
callers want, built up one declaration at a time:

```
use parley::{Flag, GroupKind, PositionalArg, Tool, ToolSpec};

let mut tool = ToolSpec::new(["git", "commit"]);
tool.add_flag(Flag::new("all", ["-a", "--all"])?)?
    .add_flag(Flag::new("message", ["-m MESSAGE", "--message=MESSAGE"])?)?
    .add_flag(Flag::new("amend", ["--amend"])?)?
    .add_positional(PositionalArg::remaining("paths"))?
    .add_flag_group(GroupKind::AtMostOne, None, ["message", "amend"])?;

assert_eq!(tool.full_name(), ["git", "commit"]);
# Ok::<(), parley::DefinitionError>(())
```
*/

use crate::{
    error::DefinitionError,
    flag::Flag,
    group::{FlagGroup, GroupKind},
    positional::{Arity, PositionalArg},
    resolve::{self, FlagResolution},
    value::{Data, Key},
};

/// Everything the parser needs to know about the tool whose command line it's
/// parsing.
pub trait Tool {
    /// Positional arguments, in the order they're filled
    fn positional_args(&self) -> &[PositionalArg];

    /// Look up a flag (including its dashes) as it appeared on the command
    /// line
    fn resolve_flag(&self, name: &str) -> FlagResolution<'_>;

    /// Every registered flag string. Unrecognized long flags are compared
    /// against these to suggest corrections.
    fn used_flags(&self) -> Vec<&str>;

    /// Names of this tool's subtools, used to suggest corrections when a
    /// leftover positional looks like a misspelled subtool
    fn subtool_names(&self) -> &[String] {
        &[]
    }

    /// The tool's name, preceded by the names of its parent tools
    fn full_name(&self) -> &[String];

    /// If true, tokens are stored verbatim and nothing is parsed
    fn argument_parsing_disabled(&self) -> bool {
        false
    }

    /// If true, the first positional argument ends flag parsing, as though
    /// it had been preceded by `--`
    fn flags_before_args_enforced(&self) -> bool {
        false
    }

    /// Whether the tool does something by itself, rather than only hosting
    /// subtools
    fn is_runnable(&self) -> bool {
        true
    }

    fn flag_groups(&self) -> &[FlagGroup] {
        &[]
    }

    /// The data a parse starts with, before the caller's seed is applied
    fn default_data(&self) -> Data;
}

/// A tool declared at runtime.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    full_name: Vec<String>,
    flags: Vec<Flag>,
    positionals: Vec<PositionalArg>,
    groups: Vec<FlagGroup>,
    subtools: Vec<String>,
    runnable: bool,
    parsing_disabled: bool,
    flags_before_args: bool,
}

impl ToolSpec {
    /// Create a runnable tool with no flags or arguments. `full_name` is the
    /// chain of tool names leading to this one, like `["git", "remote"]`.
    pub fn new<I>(full_name: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            full_name: full_name.into_iter().map(Into::into).collect(),
            runnable: true,
            ..Self::default()
        }
    }

    /// Declare a flag. Fails if any of its flag strings is already in use.
    pub fn add_flag(&mut self, flag: Flag) -> Result<&mut Self, DefinitionError> {
        let mut used = self.used_flags();

        for flag_string in flag.flags() {
            if used.contains(&flag_string) {
                return Err(DefinitionError::DuplicateFlag {
                    flag: flag_string.to_owned(),
                });
            }

            used.push(flag_string);
        }

        self.flags.push(flag);
        Ok(self)
    }

    /**
    Declare the next positional argument.

    Nothing may follow a [remaining][Arity::Remaining] argument, and a
    required argument can't follow an optional one.
    */
    pub fn add_positional(&mut self, arg: PositionalArg) -> Result<&mut Self, DefinitionError> {
        if self
            .positionals
            .last()
            .is_some_and(|last| last.arity() == Arity::Remaining)
        {
            return Err(DefinitionError::ArgAfterRemaining {
                name: arg.display_name().to_owned(),
            });
        }

        if arg.arity() == Arity::Required
            && self
                .positionals
                .iter()
                .any(|prior| prior.arity() == Arity::Optional)
        {
            return Err(DefinitionError::RequiredAfterOptional {
                name: arg.display_name().to_owned(),
            });
        }

        self.positionals.push(arg);
        Ok(self)
    }

    /// Constrain a set of already-declared flags, identified by key.
    pub fn add_flag_group<I>(
        &mut self,
        kind: GroupKind,
        description: Option<&str>,
        keys: I,
    ) -> Result<&mut Self, DefinitionError>
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        let members = keys
            .into_iter()
            .map(|key| {
                let key = key.into();
                self.flags
                    .iter()
                    .find(|flag| *flag.key() == key)
                    .ok_or(DefinitionError::UnknownGroupKey { key })
            })
            .collect::<Result<Vec<&Flag>, _>>()?;

        let group = FlagGroup::new(kind, members);
        self.groups.push(match description {
            Some(description) => group.with_description(description),
            None => group,
        });

        Ok(self)
    }

    pub fn add_subtool(&mut self, name: impl Into<String>) -> &mut Self {
        self.subtools.push(name.into());
        self
    }

    /// Mark whether the tool can run by itself. Tools that only host
    /// subtools should set this to false, so that a leftover positional is
    /// reported as an unknown subtool.
    pub fn set_runnable(&mut self, runnable: bool) -> &mut Self {
        self.runnable = runnable;
        self
    }

    pub fn disable_argument_parsing(&mut self) -> &mut Self {
        self.parsing_disabled = true;
        self
    }

    pub fn enforce_flags_before_args(&mut self) -> &mut Self {
        self.flags_before_args = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }
}

impl Tool for ToolSpec {
    #[inline]
    fn positional_args(&self) -> &[PositionalArg] {
        &self.positionals
    }

    fn resolve_flag(&self, name: &str) -> FlagResolution<'_> {
        resolve::resolve(&self.flags, name)
    }

    fn used_flags(&self) -> Vec<&str> {
        self.flags.iter().flat_map(|flag| flag.flags()).collect()
    }

    #[inline]
    fn subtool_names(&self) -> &[String] {
        &self.subtools
    }

    #[inline]
    fn full_name(&self) -> &[String] {
        &self.full_name
    }

    #[inline]
    fn argument_parsing_disabled(&self) -> bool {
        self.parsing_disabled
    }

    #[inline]
    fn flags_before_args_enforced(&self) -> bool {
        self.flags_before_args
    }

    #[inline]
    fn is_runnable(&self) -> bool {
        self.runnable
    }

    #[inline]
    fn flag_groups(&self) -> &[FlagGroup] {
        &self.groups
    }

    fn default_data(&self) -> Data {
        let flag_defaults = self
            .flags
            .iter()
            .filter_map(|flag| Some((flag.key(), flag.default_value()?)));

        let positional_defaults = self
            .positionals
            .iter()
            .filter_map(|arg| Some((arg.key(), arg.default_value()?)));

        flag_defaults
            .chain(positional_defaults)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
