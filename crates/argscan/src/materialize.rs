//! Typed access to parse results.
//!
//! The parser only produces raw strings. [`Values`] converts them with
//! [`FromStr`], and [`Command`] ties a grammar to the function that turns a
//! successful parse into the caller's configuration type.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::conventions::Conventions;
use crate::error::ParseErrors;
use crate::registry::Registry;
use crate::values::ValueMap;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterializeError {
    #[error("no value recorded for '{0}'")]
    Missing(String),

    #[error("invalid value '{value}' for '{key}': {message}")]
    Convert {
        key: String,
        value: String,
        message: String,
    },
}

/// A [`ValueMap`] read through the conventions of the registry that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Values<'a> {
    map: &'a ValueMap,
    conventions: &'a Conventions,
}

impl<'a> Values<'a> {
    pub fn new(map: &'a ValueMap, conventions: &'a Conventions) -> Self {
        Self { map, conventions }
    }

    pub fn raw(&self) -> &'a ValueMap {
        self.map
    }

    /// Whether the flag stored under `key` was given.
    ///
    /// The last recorded value is compared with the "flag given" sentinel.
    pub fn flag(&self, key: &str) -> Result<bool, MaterializeError> {
        let value = self
            .map
            .last(key)
            .ok_or_else(|| MaterializeError::Missing(key.to_string()))?;
        if value == self.conventions.flag_given {
            Ok(true)
        } else if value == self.conventions.flag_not_given {
            Ok(false)
        } else {
            Err(MaterializeError::Convert {
                key: key.to_string(),
                value: value.to_string(),
                message: format!(
                    "expected '{}' or '{}'",
                    self.conventions.flag_given, self.conventions.flag_not_given
                ),
            })
        }
    }

    /// Convert the last value stored under `key`.
    pub fn one<T>(&self, key: &str) -> Result<T, MaterializeError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.optional(key)?
            .ok_or_else(|| MaterializeError::Missing(key.to_string()))
    }

    /// Like [`one`](Self::one), but an absent key (or an empty list) is `None`.
    pub fn optional<T>(&self, key: &str) -> Result<Option<T>, MaterializeError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.map.last(key).map(|v| convert(key, v)).transpose()
    }

    /// Convert every value stored under `key`, in order. Absent keys yield an empty list.
    pub fn many<T>(&self, key: &str) -> Result<Vec<T>, MaterializeError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.map
            .get(key)
            .unwrap_or_default()
            .iter()
            .map(|v| convert(key, v))
            .collect()
    }
}

fn convert<T>(key: &str, value: &str) -> Result<T, MaterializeError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|e| MaterializeError::Convert {
        key: key.to_string(),
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// Failure of [`Command::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{0}")]
    Parse(ParseErrors),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

impl From<ParseErrors> for CommandError {
    fn from(errors: ParseErrors) -> Self {
        Self::Parse(errors)
    }
}

type MaterializeFn<T> = dyn Fn(&Values<'_>) -> Result<T, MaterializeError> + Send + Sync;

/// A grammar plus the function building `T` from a successful parse.
pub struct Command<T> {
    registry: Registry,
    materialize: Box<MaterializeFn<T>>,
}

impl<T> Command<T> {
    pub fn new<F>(registry: Registry, materialize: F) -> Self
    where
        F: Fn(&Values<'_>) -> Result<T, MaterializeError> + Send + Sync + 'static,
    {
        Self {
            registry,
            materialize: Box::new(materialize),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parse `tokens`; the materializer runs once, and only if parsing found no errors.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<T, CommandError> {
        let map = self.registry.parse(tokens)?;
        let values = Values::new(&map, self.registry.conventions());
        Ok((self.materialize)(&values)?)
    }
}

impl<T> fmt::Debug for Command<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::argument::{OptionArg, Positional};
    use crate::error::ParseError;

    #[derive(Debug, PartialEq)]
    struct Config {
        verbose: bool,
        jobs: u32,
        output: Option<PathBuf>,
        inputs: Vec<PathBuf>,
    }

    fn registry() -> Registry {
        let mut r = Registry::new();
        r.add(OptionArg::flag("-v").key("verbose")).unwrap();
        r.add(OptionArg::value("-j", "N").key("jobs").default("1"))
            .unwrap();
        r.add(OptionArg::value("-o", "FILE").key("output").default(""))
            .unwrap();
        r.add(Positional::new("inputs").optional().repeated())
            .unwrap();
        r
    }

    fn build(v: &Values<'_>) -> Result<Config, MaterializeError> {
        let output: String = v.one("output")?;
        Ok(Config {
            verbose: v.flag("verbose")?,
            jobs: v.one("jobs")?,
            output: (!output.is_empty()).then(|| PathBuf::from(output)),
            inputs: v.many("inputs")?,
        })
    }

    #[test]
    fn materializes_typed_config() {
        let cmd = Command::new(registry(), build);
        let cfg = cmd.parse(&["-v", "-j=4", "a.txt", "b.txt"]).unwrap();
        assert_eq!(
            cfg,
            Config {
                verbose: true,
                jobs: 4,
                output: None,
                inputs: vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")],
            }
        );

        let cfg = cmd.parse::<&str>(&[]).unwrap();
        assert!(!cfg.verbose);
        assert_eq!(cfg.jobs, 1);
        assert!(cfg.inputs.is_empty());
    }

    #[test]
    fn conversion_failure_names_the_key() {
        let cmd = Command::new(registry(), build);
        let err = cmd.parse(&["-j", "many"]).unwrap_err();
        match err {
            CommandError::Materialize(MaterializeError::Convert { key, value, .. }) => {
                assert_eq!(key, "jobs");
                assert_eq!(value, "many");
            }
            other => panic!("expected Convert, got: {other:?}"),
        }
    }

    #[test]
    fn materializer_skipped_on_parse_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cmd = Command::new(registry(), move |v| {
            counter.fetch_add(1, Ordering::SeqCst);
            build(v)
        });

        let err = cmd.parse(&["--nope"]).unwrap_err();
        match err {
            CommandError::Parse(errors) => assert_eq!(
                errors.as_slice(),
                [ParseError::UnknownArgument("--nope".to_string())]
            ),
            other => panic!("expected Parse, got: {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        cmd.parse(&["x"]).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn flag_respects_custom_sentinels() {
        let conventions = Conventions::new().flag_sentinels("on", "off");
        let map: ValueMap = [("a", ["on"]), ("b", ["off"]), ("c", ["maybe"])]
            .into_iter()
            .collect();
        let v = Values::new(&map, &conventions);
        assert_eq!(v.flag("a"), Ok(true));
        assert_eq!(v.flag("b"), Ok(false));
        assert!(matches!(v.flag("c"), Err(MaterializeError::Convert { .. })));
        assert_eq!(
            v.flag("d"),
            Err(MaterializeError::Missing("d".to_string()))
        );
    }

    #[test]
    fn optional_and_many_on_absent_keys() {
        let conventions = Conventions::default();
        let map = ValueMap::default();
        let v = Values::new(&map, &conventions);
        assert_eq!(v.optional::<u8>("x"), Ok(None));
        assert_eq!(v.many::<u8>("x"), Ok(Vec::new()));
        assert_eq!(
            v.one::<u8>("x"),
            Err(MaterializeError::Missing("x".to_string()))
        );
    }
}
