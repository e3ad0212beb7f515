use crate::argument::{Argument, OptionArg, Positional};
use crate::conventions::Conventions;
use crate::error::{GrammarError, OrderingViolation, ParseErrors};
use crate::parser;
use crate::values::ValueMap;

/// Ordered, append-only collection of declared arguments.
///
/// Every [`add`](Self::add) enforces the grammar shape
/// `Option* Positional(required)* Positional(optional)* Positional(repeated)?`.
/// Once built, the registry is only read; [`parse`](Self::parse) takes `&self`
/// and keeps all scratch state local to the call.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    conventions: Conventions,
    arguments: Vec<Argument>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conventions(conventions: Conventions) -> Self {
        Self {
            conventions,
            arguments: Vec::new(),
        }
    }

    /// Append `argument` after checking it against everything already declared.
    ///
    /// A rejected argument leaves the registry unchanged.
    pub fn add(&mut self, argument: impl Into<Argument>) -> Result<&mut Self, GrammarError> {
        let argument = argument.into();
        self.check(&argument)?;
        tracing::trace!(argument = argument.label(), "declared argument");
        self.arguments.push(argument);
        Ok(self)
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, argument: impl Into<Argument>) -> Result<Self, GrammarError> {
        self.add(argument)?;
        Ok(self)
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Every declared argument, separators included, in declaration order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn option_arguments(&self) -> impl Iterator<Item = &OptionArg> {
        self.arguments.iter().filter_map(|a| match a {
            Argument::Option(o) => Some(o),
            _ => None,
        })
    }

    pub fn positional_arguments(&self) -> impl Iterator<Item = &Positional> {
        self.arguments.iter().filter_map(|a| match a {
            Argument::Positional(p) => Some(p),
            _ => None,
        })
    }

    /// Scan `tokens` against this grammar.
    ///
    /// Returns every detectable problem at once; the scan never stops early.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ValueMap, ParseErrors> {
        parser::parse(self, tokens)
    }

    fn check(&self, argument: &Argument) -> Result<(), GrammarError> {
        if let Some(repeated) = self.positional_arguments().find(|p| p.is_repeated()) {
            return Err(GrammarError::InvalidOrdering(
                OrderingViolation::AfterRepeated {
                    name: argument.label().to_string(),
                    repeated: repeated.name().to_string(),
                },
            ));
        }

        match argument {
            Argument::Positional(p) => self.check_positional(p),
            Argument::Option(o) => self.check_option(o),
            Argument::Separator(_) => Ok(()),
        }
    }

    fn check_positional(&self, positional: &Positional) -> Result<(), GrammarError> {
        if self
            .positional_arguments()
            .any(|p| p.name() == positional.name())
        {
            return Err(GrammarError::DuplicateArgument {
                name: positional.name().to_string(),
            });
        }
        if !positional.is_optional() && self.positional_arguments().any(Positional::is_optional) {
            return Err(GrammarError::InvalidOrdering(
                OrderingViolation::RequiredAfterOptional {
                    name: positional.name().to_string(),
                },
            ));
        }
        Ok(())
    }

    fn check_option(&self, option: &OptionArg) -> Result<(), GrammarError> {
        if self.positional_arguments().next().is_some() {
            return Err(GrammarError::InvalidOrdering(
                OrderingViolation::OptionAfterPositional {
                    name: option.primary_name().to_string(),
                },
            ));
        }
        for existing in self.option_arguments() {
            if let Some(name) = option.shares_name_with(existing) {
                return Err(GrammarError::DuplicateArgument {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::Separator;

    fn assert_ordering(err: GrammarError) -> OrderingViolation {
        match err {
            GrammarError::InvalidOrdering(v) => v,
            other => panic!("expected InvalidOrdering, got: {other:?}"),
        }
    }

    #[test]
    fn required_after_optional_is_rejected() {
        let mut r = Registry::new();
        r.add(Positional::new("a")).unwrap();
        r.add(Positional::new("b").optional()).unwrap();
        let err = r.add(Positional::new("c")).unwrap_err();
        assert_eq!(
            assert_ordering(err),
            OrderingViolation::RequiredAfterOptional {
                name: "c".to_string()
            }
        );
        // Still accepts further optional positionals.
        r.add(Positional::new("d").optional()).unwrap();
        assert_eq!(r.positional_arguments().count(), 3);
    }

    #[test]
    fn option_after_positional_is_rejected() {
        let mut r = Registry::new();
        r.add(OptionArg::flag("-v")).unwrap();
        r.add(Positional::new("infile")).unwrap();
        let err = r.add(OptionArg::value("-o", "OUT")).unwrap_err();
        assert!(matches!(
            assert_ordering(err),
            OrderingViolation::OptionAfterPositional { name } if name == "-o"
        ));
        assert_eq!(r.arguments().len(), 2);
    }

    #[test]
    fn shared_alias_is_a_duplicate() {
        let mut r = Registry::new();
        r.add(OptionArg::flag("-v").alias("--verbose")).unwrap();
        let err = r
            .add(OptionArg::value("--level", "N").alias("--verbose"))
            .unwrap_err();
        assert_eq!(
            err,
            GrammarError::DuplicateArgument {
                name: "--verbose".to_string()
            }
        );
        assert_eq!(r.option_arguments().count(), 1);
    }

    #[test]
    fn duplicate_positional_name_is_rejected() {
        let mut r = Registry::new();
        r.add(Positional::new("file")).unwrap();
        let err = r.add(Positional::new("file").key("other")).unwrap_err();
        assert!(matches!(err, GrammarError::DuplicateArgument { name } if name == "file"));
    }

    #[test]
    fn nothing_follows_a_repeated_positional() {
        let mut r = Registry::new();
        r.add(Positional::new("files").optional().repeated())
            .unwrap();

        for arg in [
            Argument::from(Positional::new("more").optional()),
            Argument::from(OptionArg::flag("-x")),
            Argument::from(Separator::new("--- trailing ---")),
        ] {
            let err = r.add(arg).unwrap_err();
            assert!(matches!(
                assert_ordering(err),
                OrderingViolation::AfterRepeated { repeated, .. } if repeated == "files"
            ));
        }
    }

    #[test]
    fn separators_do_not_affect_ordering() {
        let r = Registry::new()
            .with(Separator::new("Options"))
            .and_then(|r| r.with(OptionArg::flag("-v")))
            .and_then(|r| r.with(Separator::new("Inputs")))
            .and_then(|r| r.with(Positional::new("infile")))
            .unwrap();
        assert_eq!(r.arguments().len(), 4);
        assert_eq!(r.option_arguments().count(), 1);
        assert_eq!(r.positional_arguments().count(), 1);
    }

    #[test]
    fn chained_add() {
        let mut r = Registry::new();
        let chained = r
            .add(OptionArg::flag("-a"))
            .and_then(|r| r.add(OptionArg::flag("-b")))
            .and_then(|r| r.add(Positional::new("x")));
        assert!(chained.is_ok());
        let names: Vec<_> = r.arguments().iter().map(Argument::label).collect();
        assert_eq!(names, ["-a", "-b", "x"]);
    }
}
