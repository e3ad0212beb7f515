/// Token syntax and sentinel values used by one [`Registry`](crate::Registry).
///
/// Each registry owns its own conventions, so grammars with different
/// prefixes or sentinels can coexist in one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    /// Leading character marking option-like tokens.
    pub prefix: char,
    /// Characters separating `name` from `value` in `-o:value` / `-o=value`.
    pub delimiters: String,
    /// Value recorded for a flag that was given.
    pub flag_given: String,
    /// Value recorded for a flag that was not given.
    pub flag_not_given: String,
    /// Report unrecognized tokens as errors instead of skipping them.
    pub error_on_unknown: bool,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            prefix: '-',
            delimiters: ":=".to_string(),
            flag_given: "true".to_string(),
            flag_not_given: "false".to_string(),
            error_on_unknown: true,
        }
    }
}

impl Conventions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: char) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn delimiters(mut self, delimiters: impl Into<String>) -> Self {
        self.delimiters = delimiters.into();
        self
    }

    pub fn flag_sentinels(
        mut self,
        given: impl Into<String>,
        not_given: impl Into<String>,
    ) -> Self {
        self.flag_given = given.into();
        self.flag_not_given = not_given.into();
        self
    }

    pub fn error_on_unknown(mut self, enabled: bool) -> Self {
        self.error_on_unknown = enabled;
        self
    }

    pub(crate) fn is_option_like(&self, token: &str) -> bool {
        token.starts_with(self.prefix)
    }

    /// Split `name<delim>value` at the first delimiter character.
    ///
    /// Both sides must be non-empty.
    pub(crate) fn split_delimited<'t>(&self, token: &'t str) -> Option<(&'t str, &'t str)> {
        let idx = token.find(|c: char| self.delimiters.contains(c))?;
        let name = &token[..idx];
        let delim_len = token[idx..].chars().next().map_or(1, char::len_utf8);
        let value = &token[idx + delim_len..];
        if name.is_empty() || value.is_empty() {
            return None;
        }
        Some((name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::Conventions;

    #[test]
    fn split_uses_first_delimiter() {
        let c = Conventions::default();
        assert_eq!(c.split_delimited("-o:out.txt"), Some(("-o", "out.txt")));
        assert_eq!(c.split_delimited("-o=a:b"), Some(("-o", "a:b")));
        assert_eq!(c.split_delimited("-D:k=v"), Some(("-D", "k=v")));
    }

    #[test]
    fn split_requires_both_sides() {
        let c = Conventions::default();
        assert_eq!(c.split_delimited("-f:"), None);
        assert_eq!(c.split_delimited(":val"), None);
        assert_eq!(c.split_delimited("-f"), None);
    }

    #[test]
    fn custom_delimiters() {
        let c = Conventions::new().prefix('/').delimiters("#");
        assert_eq!(c.split_delimited("/o#x"), Some(("/o", "x")));
        assert_eq!(c.split_delimited("/o:x"), None);
        assert!(c.is_option_like("/o"));
        assert!(!c.is_option_like("-o"));
    }
}
