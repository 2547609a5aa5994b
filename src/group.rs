/*!
Flag groups: constraints on which flags may appear together.

Groups are checked once, after every token has been parsed, against the list
of flag keys that were seen. A violation becomes a
[`FlagGroupConstraint`][crate::error::UsageError::FlagGroupConstraint] error.
*/

use joinery::JoinableIterator;

use crate::{flag::Flag, value::Key};

/// The constraint a [`FlagGroup`] enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// No constraint; the group only exists for organizing flags
    Optional,

    /// Every flag in the group must be given
    Required,

    /// Exactly one flag in the group must be given
    ExactlyOne,

    /// At most one flag in the group may be given
    AtMostOne,

    /// At least one flag in the group must be given
    AtLeastOne,
}

#[derive(Debug, Clone)]
struct Member {
    key: Key,
    display_name: String,
}

/// A set of flags subject to a [`GroupKind`] constraint.
#[derive(Debug, Clone)]
pub struct FlagGroup {
    kind: GroupKind,
    description: Option<String>,
    members: Vec<Member>,
}

impl FlagGroup {
    /// Create a group from the flags it constrains
    pub fn new<'a>(kind: GroupKind, flags: impl IntoIterator<Item = &'a Flag>) -> Self {
        Self {
            kind,
            description: None,
            members: flags
                .into_iter()
                .map(|flag| Member {
                    key: flag.key().clone(),
                    display_name: flag.display_name().to_owned(),
                })
                .collect(),
        }
    }

    /// Describe the group in messages, rather than listing its flags
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// The keys of the flags in this group
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.members.iter().map(|member| &member.key)
    }

    /// How the group is named in messages
    #[must_use]
    pub fn summary(&self) -> String {
        match self.description {
            Some(ref description) => description.clone(),
            None => self
                .members
                .iter()
                .map(|member| member.display_name.as_str())
                .join_with(", ")
                .to_string(),
        }
    }

    /**
    Check the constraint against the flag keys that appeared on the command
    line, returning a message for each violation.

    `seen` may contain duplicates; a flag given twice still only counts once.
    */
    #[must_use]
    pub fn validation_errors(&self, seen: &[Key]) -> Vec<String> {
        let given: Vec<&str> = self
            .members
            .iter()
            .filter(|member| seen.contains(&member.key))
            .map(|member| member.display_name.as_str())
            .collect();

        let list = || given.iter().map(|name| format!("{name:?}")).join_with(", ");

        match (self.kind, given.len()) {
            (GroupKind::Required, _) => self
                .members
                .iter()
                .filter(|member| !seen.contains(&member.key))
                .map(|member| format!("Flag {:?} is required.", member.display_name))
                .collect(),
            (GroupKind::ExactlyOne, 0) => vec![format!(
                "Exactly one flag out of group {:?} is required, but none were provided.",
                self.summary()
            )],
            (GroupKind::ExactlyOne, 1) => Vec::new(),
            (GroupKind::ExactlyOne, count) => vec![format!(
                "Exactly one flag out of group {:?} is required, but {count} were provided: {}.",
                self.summary(),
                list()
            )],
            (GroupKind::AtMostOne, count) if count > 1 => vec![format!(
                "At most one flag out of group {:?} is allowed, but {count} were provided: {}.",
                self.summary(),
                list()
            )],
            (GroupKind::AtLeastOne, 0) => vec![format!(
                "At least one flag out of group {:?} is required, but none were provided.",
                self.summary()
            )],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn flags() -> [Flag; 3] {
        [
            Flag::new("json", ["--json"]).unwrap(),
            Flag::new("yaml", ["--yaml"]).unwrap(),
            Flag::new("toml", ["-t", "--toml"]).unwrap(),
        ]
    }

    fn keys(keys: &[&'static str]) -> Vec<Key> {
        keys.iter().copied().map(Key::from).collect()
    }

    #[rstest]
    #[case(GroupKind::Optional, &[], 0)]
    #[case(GroupKind::Required, &["json"], 2)]
    #[case(GroupKind::Required, &["json", "yaml", "toml"], 0)]
    #[case(GroupKind::ExactlyOne, &[], 1)]
    #[case(GroupKind::ExactlyOne, &["yaml", "yaml"], 0)]
    #[case(GroupKind::ExactlyOne, &["yaml", "json"], 1)]
    #[case(GroupKind::AtMostOne, &[], 0)]
    #[case(GroupKind::AtMostOne, &["toml", "json"], 1)]
    #[case(GroupKind::AtLeastOne, &[], 1)]
    #[case(GroupKind::AtLeastOne, &["toml"], 0)]
    fn violation_counts(
        #[case] kind: GroupKind,
        #[case] seen: &[&'static str],
        #[case] expected: usize,
    ) {
        let flags = flags();
        let group = FlagGroup::new(kind, &flags);

        assert_eq!(group.validation_errors(&keys(seen)).len(), expected);
    }

    #[test]
    fn at_most_one_message() {
        let flags = flags();
        let group = FlagGroup::new(GroupKind::AtMostOne, &flags);

        assert_eq!(
            group.validation_errors(&keys(&["toml", "json"])),
            [concat!(
                r#"At most one flag out of group "--json, --yaml, --toml" is allowed, "#,
                r#"but 2 were provided: "--json", "--toml"."#
            )]
        );
    }

    #[test]
    fn described_group() {
        let flags = flags();
        let group = FlagGroup::new(GroupKind::AtLeastOne, &flags).with_description("formats");

        assert_eq!(
            group.validation_errors(&[]),
            [r#"At least one flag out of group "formats" is required, but none were provided."#]
        );
    }

    #[test]
    fn required_names_each_missing_flag() {
        let flags = flags();
        let group = FlagGroup::new(GroupKind::Required, &flags);

        assert_eq!(
            group.validation_errors(&keys(&["yaml"])),
            [r#"Flag "--json" is required."#, r#"Flag "--toml" is required."#]
        );
    }
}
