//! JSON description of an argscan grammar.
//!
//! The types here mirror [`argscan::Argument`] and [`argscan::Conventions`] as
//! plain serde records. [`GrammarSpec::build`] replays every declared argument
//! through [`Registry::add`], so a grammar file is validated exactly like a
//! grammar built in code.

use std::io::Read;

use argscan::{Argument, Conventions, GrammarError, OptionArg, Positional, Registry, Separator};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid grammar file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize grammar: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("argument #{index}: option declares no names")]
    EmptyNames { index: usize },

    #[error("argument #{index} ('{name}'): a flag cannot declare a default")]
    FlagDefault { index: usize, name: String },

    #[error("argument #{index} ('{label}'): {source}")]
    Grammar {
        index: usize,
        label: String,
        #[source]
        source: GrammarError,
    },
}

/// Parser conventions; unset fields keep the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ConventionsSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_given: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_not_given: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_on_unknown: Option<bool>,
}

impl ConventionsSpec {
    pub fn resolve(&self) -> Conventions {
        let defaults = Conventions::default();
        Conventions {
            prefix: self.prefix.unwrap_or(defaults.prefix),
            delimiters: self.delimiters.clone().unwrap_or(defaults.delimiters),
            flag_given: self.flag_given.clone().unwrap_or(defaults.flag_given),
            flag_not_given: self
                .flag_not_given
                .clone()
                .unwrap_or(defaults.flag_not_given),
            error_on_unknown: self.error_on_unknown.unwrap_or(defaults.error_on_unknown),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct PositionalSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub repeated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct OptionSpec {
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Only valid together with `value-name`; flags always resolve to the
    /// flag sentinels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SeparatorSpec {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ArgumentSpec {
    Positional(PositionalSpec),
    Option(OptionSpec),
    Separator(SeparatorSpec),
}

impl ArgumentSpec {
    fn label(&self) -> &str {
        match self {
            Self::Positional(p) => &p.name,
            Self::Option(o) => o.names.first().map(String::as_str).unwrap_or_default(),
            Self::Separator(s) => &s.text,
        }
    }

    fn to_argument(&self, index: usize) -> Result<Argument, SchemaError> {
        let argument = match self {
            Self::Positional(spec) => {
                let mut p =
                    Positional::new(spec.name.as_str()).description(spec.description.as_str());
                if spec.optional {
                    p = p.optional();
                }
                if spec.repeated {
                    p = p.repeated();
                }
                if let Some(key) = &spec.key {
                    p = p.key(key.as_str());
                }
                Argument::Positional(p)
            }
            Self::Option(spec) => {
                let (primary, aliases) = spec
                    .names
                    .split_first()
                    .ok_or(SchemaError::EmptyNames { index })?;
                let mut o = aliases
                    .iter()
                    .fold(OptionArg::flag(primary.as_str()), |o, alias| {
                        o.alias(alias.as_str())
                    })
                    .description(spec.description.as_str());
                if let Some(value_name) = &spec.value_name {
                    o = o.value_name(value_name.as_str());
                }
                if let Some(default) = &spec.default {
                    if !o.takes_value() {
                        return Err(SchemaError::FlagDefault {
                            index,
                            name: primary.clone(),
                        });
                    }
                    o = o.default(default.as_str());
                }
                if let Some(key) = &spec.key {
                    o = o.key(key.as_str());
                }
                Argument::Option(o)
            }
            Self::Separator(spec) => Argument::Separator(Separator::new(spec.text.as_str())),
        };
        Ok(argument)
    }
}

/// A complete grammar file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct GrammarSpec {
    pub program: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default)]
    pub conventions: ConventionsSpec,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentSpec>,
}

impl GrammarSpec {
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SchemaError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        serde_json::to_string_pretty(self).map_err(SchemaError::Serialize)
    }

    /// Build a registry, stopping at the first argument the grammar rejects.
    pub fn build(&self) -> Result<Registry, SchemaError> {
        let mut registry = Registry::with_conventions(self.conventions.resolve());
        for (index, spec) in self.arguments.iter().enumerate() {
            let argument = spec.to_argument(index)?;
            registry
                .add(argument)
                .map_err(|source| SchemaError::Grammar {
                    index,
                    label: spec.label().to_string(),
                    source,
                })?;
        }
        tracing::debug!(
            program = %self.program,
            arguments = registry.arguments().len(),
            "built registry from grammar file"
        );
        Ok(registry)
    }
}
