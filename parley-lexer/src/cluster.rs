/**
A cluster of single-character flags, such as the `abc` in `-abc`.

Flags are peeled off the front one at a time with [`Iterator::next`]. If the
flag that was just peeled takes a value, the caller can instead claim the
rest of the cluster with [`take_remainder`][ShortCluster::take_remainder];
this handles things like `-ovalue`, which is equivalent to `-o value`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortCluster<'a> {
    rest: &'a str,
}

impl<'a> ShortCluster<'a> {
    /// Create a new cluster from the characters following the dash. Returns
    /// [`None`] if there are no characters.
    #[inline]
    #[must_use]
    pub fn new(chars: &'a str) -> Option<Self> {
        match chars.is_empty() {
            true => None,
            false => Some(Self { rest: chars }),
        }
    }

    /// The characters that haven't been peeled yet
    #[inline]
    #[must_use]
    pub fn remainder(&self) -> &'a str {
        self.rest
    }

    /// Claim everything that hasn't been peeled yet as a single value.
    /// Returns [`None`] if the cluster is exhausted.
    #[inline]
    pub fn take_remainder(&mut self) -> Option<&'a str> {
        match core::mem::take(&mut self.rest) {
            "" => None,
            rest => Some(rest),
        }
    }
}

impl Iterator for ShortCluster<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let mut chars = self.rest.chars();
        let option = chars.next()?;
        self.rest = chars.as_str();
        Some(option)
    }
}

#[cfg(test)]
mod tests {
    use super::ShortCluster;

    #[test]
    fn empty_cluster_is_none() {
        assert!(ShortCluster::new("").is_none());
    }

    #[test]
    fn peel_then_take() {
        let mut cluster = ShortCluster::new("aovalue").unwrap();

        assert_eq!(cluster.next(), Some('a'));
        assert_eq!(cluster.next(), Some('o'));
        assert_eq!(cluster.take_remainder(), Some("value"));
        assert_eq!(cluster.next(), None);
        assert_eq!(cluster.take_remainder(), None);
    }

    #[test]
    fn multibyte_characters() {
        let mut cluster = ShortCluster::new("éx").unwrap();

        assert_eq!(cluster.next(), Some('é'));
        assert_eq!(cluster.remainder(), "x");
    }
}
