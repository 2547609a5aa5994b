/*!
Flag resolution: matching a flag as it appears on the command line against the
flags a tool declares.

An exact match always wins. Otherwise, a long flag may be abbreviated to any
prefix of exactly one registered flag string, so `--verb` finds `--verbose`
unless some other registered string also starts with `--verb`.
*/

use crate::{flag::Flag, syntax::FlagStyle, syntax::FlagSyntax};

/// A flag string on the command line that resolved to a single declared flag
#[derive(Debug, Clone, Copy)]
pub struct FlagMatch<'t> {
    pub flag: &'t Flag,

    /// The declaration that matched
    pub syntax: &'t FlagSyntax,

    /// True if the negative form (`--no-color`) matched, in which case a
    /// boolean flag should be bound to `false`
    pub negative: bool,
}

impl<'t> FlagMatch<'t> {
    /// The registered flag string that matched
    #[must_use]
    pub fn flag_string(&self) -> &'t str {
        match self.negative {
            true => self.syntax.negative_flag().unwrap_or(self.syntax.positive_flag()),
            false => self.syntax.positive_flag(),
        }
    }
}

/// The outcome of resolving a flag string
#[derive(Debug, Clone)]
pub enum FlagResolution<'t> {
    /// Nothing matched, not even as a prefix
    NotFound,

    /// Exactly one flag matched
    Unique(FlagMatch<'t>),

    /// The string is a prefix of several long flags; these are their
    /// registered strings
    Ambiguous { candidates: Vec<String> },
}

impl<'t> FlagResolution<'t> {
    #[inline]
    #[must_use]
    pub fn unique(&self) -> Option<&FlagMatch<'t>> {
        match self {
            FlagResolution::Unique(found) => Some(found),
            _ => None,
        }
    }
}

/**
Resolve `name` (including its dashes) against `flags`.

Prefix matching only applies to long flags. Every registered string counts
separately: a flag declared as both `--output` and `--outfile` makes `--out`
ambiguous, even though both strings lead to the same flag.
*/
#[must_use]
pub fn resolve<'t>(flags: &'t [Flag], name: &str) -> FlagResolution<'t> {
    let mut prefixed: Vec<(FlagMatch<'t>, &'t str)> = Vec::new();

    for flag in flags {
        for syntax in flag.syntaxes() {
            let forms = [
                Some((syntax.positive_flag(), false)),
                syntax.negative_flag().map(|negative| (negative, true)),
            ];

            for (flag_string, negative) in forms.into_iter().flatten() {
                let found = FlagMatch {
                    flag,
                    syntax,
                    negative,
                };

                if flag_string == name {
                    return FlagResolution::Unique(found);
                }

                if syntax.style() == FlagStyle::Long
                    && name.len() > 2
                    && flag_string.starts_with(name)
                {
                    prefixed.push((found, flag_string));
                }
            }
        }
    }

    match prefixed.as_slice() {
        [] => FlagResolution::NotFound,
        [(found, _)] => FlagResolution::Unique(*found),
        candidates => FlagResolution::Ambiguous {
            candidates: candidates
                .iter()
                .map(|&(_, flag_string)| flag_string.to_owned())
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::value::Key;

    fn flags() -> Vec<Flag> {
        vec![
            Flag::new("verbose", ["-v", "--verbose"]).unwrap(),
            Flag::new("version", ["--version"]).unwrap(),
            Flag::new("color", ["--[no-]color"]).unwrap(),
            Flag::new("output", ["-o FILE", "--output FILE", "--out FILE"]).unwrap(),
        ]
    }

    fn unique_key(resolution: &FlagResolution<'_>) -> Option<(Key, bool)> {
        resolution
            .unique()
            .map(|found| (found.flag.key().clone(), found.negative))
    }

    #[rstest]
    #[case("--verbose", "verbose", false)]
    #[case("--verb", "verbose", false)]
    #[case("-v", "verbose", false)]
    #[case("--vers", "version", false)]
    #[case("--no-color", "color", true)]
    #[case("--no", "color", true)]
    #[case("--col", "color", false)]
    fn unique(#[case] name: &str, #[case] key: &'static str, #[case] negative: bool) {
        let flags = flags();
        assert_eq!(unique_key(&resolve(&flags, name)), Some((key.into(), negative)));
    }

    #[test]
    fn exact_match_beats_prefix() {
        let flags = flags();
        let resolution = resolve(&flags, "--out");

        assert_eq!(resolution.unique().map(|found| found.flag_string()), Some("--out"));
    }

    #[rstest]
    #[case("--ver", &["--verbose", "--version"])]
    #[case("--ou", &["--output", "--out"])]
    fn ambiguous_prefix(#[case] name: &str, #[case] expected: &[&str]) {
        let flags = flags();

        match resolve(&flags, name) {
            FlagResolution::Ambiguous { candidates } => assert_eq!(candidates, expected),
            other => panic!("expected an ambiguous resolution, got {other:?}"),
        }
    }

    #[test]
    fn strings_of_one_flag_are_still_ambiguous() {
        let flags = [Flag::new("output", ["--output FILE", "--outfile FILE"]).unwrap()];

        match resolve(&flags, "--out") {
            FlagResolution::Ambiguous { candidates } => {
                assert_eq!(candidates, ["--output", "--outfile"])
            }
            other => panic!("expected an ambiguous resolution, got {other:?}"),
        }
    }

    #[rstest]
    #[case("-x")]
    #[case("--verbsoe")]
    #[case("--colour")]
    fn not_found(#[case] name: &str) {
        let flags = flags();
        assert!(matches!(resolve(&flags, name), FlagResolution::NotFound));
    }
}
