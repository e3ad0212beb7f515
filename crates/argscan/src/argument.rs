//! Declared grammar elements.
//!
//! Each value here describes one element of a command line grammar. Values are
//! plain data: nothing is validated until the argument is handed to
//! [`Registry::add`](crate::Registry::add).

/// A value identified by its position in the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positional {
    name: String,
    description: String,
    optional: bool,
    repeated: bool,
    key: String,
}

impl Positional {
    /// A required, single-occurrence positional stored under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            description: String::new(),
            optional: false,
            repeated: false,
        }
    }

    /// Store values under `key` instead of the positional's name.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Allow the positional to be absent.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Bind every remaining positional token to this argument.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.description
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    pub fn value_key(&self) -> &str {
        &self.key
    }
}

/// A named option: either a boolean flag or an option that takes a value.
///
/// The primary name is mandatory, so the name list is never empty. Aliases are
/// appended in order; an alias equal to an existing name is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionArg {
    names: Vec<String>,
    value_name: Option<String>,
    description: String,
    default: Option<String>,
    key: String,
}

impl OptionArg {
    /// A boolean flag such as `-v`.
    pub fn flag(primary: impl Into<String>) -> Self {
        let primary = primary.into();
        Self {
            key: default_key(&primary),
            names: vec![primary],
            value_name: None,
            description: String::new(),
            default: None,
        }
    }

    /// An option consuming a value, such as `-o OUT` or `-o:OUT`.
    pub fn value(primary: impl Into<String>, value_name: impl Into<String>) -> Self {
        Self::flag(primary).value_name(value_name)
    }

    /// Add another name matching this option.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.names.iter().any(|n| n == &name) {
            self.names.push(name);
        }
        self
    }

    /// Turn a flag into a value option (or rename the value placeholder).
    pub fn value_name(mut self, value_name: impl Into<String>) -> Self {
        self.value_name = Some(value_name.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Value recorded when the option is not given.
    ///
    /// Only meaningful for value options; flags always resolve to the
    /// registry's flag sentinels.
    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The first declared name, used in diagnostics.
    pub fn primary_name(&self) -> &str {
        // `names` always holds the primary name at index 0.
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.value_name.as_deref()
    }

    pub fn takes_value(&self) -> bool {
        self.value_name.is_some()
    }

    pub fn help(&self) -> &str {
        &self.description
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn value_key(&self) -> &str {
        &self.key
    }

    pub(crate) fn shares_name_with(&self, other: &OptionArg) -> Option<&str> {
        self.names
            .iter()
            .find(|n| other.names.contains(n))
            .map(String::as_str)
    }
}

fn default_key(primary: &str) -> String {
    let trimmed = primary.trim_start_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        primary.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Display-only text placed between arguments in usage output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator {
    text: String,
}

impl Separator {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One declared grammar element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Positional(Positional),
    Option(OptionArg),
    Separator(Separator),
}

impl Argument {
    /// Short label for logs and diagnostics.
    pub fn label(&self) -> &str {
        match self {
            Self::Positional(p) => p.name(),
            Self::Option(o) => o.primary_name(),
            Self::Separator(s) => s.text(),
        }
    }
}

impl From<Positional> for Argument {
    fn from(p: Positional) -> Self {
        Self::Positional(p)
    }
}

impl From<OptionArg> for Argument {
    fn from(o: OptionArg) -> Self {
        Self::Option(o)
    }
}

impl From<Separator> for Argument {
    fn from(s: Separator) -> Self {
        Self::Separator(s)
    }
}
