//! Token scanner.
//!
//! A single left-to-right pass with no backtracking. At each position the
//! first matching rule wins:
//!
//! 1. value option followed by a non-option token (`-o out.txt`)
//! 2. value option in delimited form (`-o:out.txt`, `-o=out.txt`)
//! 3. flag (`-v`)
//! 4. positional (any token without the option prefix, while a positional remains)
//! 5. unknown token
//!
//! Defaults and missing-argument errors are resolved after the scan.

use std::collections::HashMap;

use crate::argument::{OptionArg, Positional};
use crate::error::{ParseError, ParseErrors};
use crate::registry::Registry;
use crate::values::ValueMap;

/// Per-call scan state. Built fresh for every parse and never shared.
struct Scan<'r> {
    options: Vec<&'r OptionArg>,
    positionals: Vec<&'r Positional>,
    options_by_name: HashMap<&'r str, usize>,
    flags_by_name: HashMap<&'r str, usize>,
    found: Vec<bool>,
    // Index of the positional the next bare token binds to.
    cursor: usize,
    matched: Vec<usize>,
    values: ValueMap,
    errors: Vec<ParseError>,
}

impl<'r> Scan<'r> {
    fn new(registry: &'r Registry) -> Self {
        let options: Vec<&OptionArg> = registry.option_arguments().collect();
        let positionals: Vec<&Positional> = registry.positional_arguments().collect();

        let mut options_by_name = HashMap::new();
        let mut flags_by_name = HashMap::new();
        for (idx, opt) in options.iter().copied().enumerate() {
            let table = if opt.takes_value() {
                &mut options_by_name
            } else {
                &mut flags_by_name
            };
            for name in opt.names() {
                table.insert(name.as_str(), idx);
            }
        }

        Self {
            found: vec![false; options.len()],
            matched: vec![0; positionals.len()],
            options,
            positionals,
            options_by_name,
            flags_by_name,
            cursor: 0,
            values: ValueMap::default(),
            errors: Vec::new(),
        }
    }

    fn record_option(&mut self, idx: usize, value: &str) {
        self.values.push(self.options[idx].value_key(), value);
        self.found[idx] = true;
    }

    fn bind_positional(&mut self, token: &str) {
        let positional = self.positionals[self.cursor];
        self.values.push(positional.value_key(), token);
        self.matched[self.cursor] += 1;
        if !positional.is_repeated() {
            self.cursor += 1;
        }
    }
}

pub(crate) fn parse<S: AsRef<str>>(
    registry: &Registry,
    tokens: &[S],
) -> Result<ValueMap, ParseErrors> {
    let conventions = registry.conventions();
    let mut scan = Scan::new(registry);

    let mut i = 0usize;
    while i < tokens.len() {
        let token = tokens[i].as_ref();

        // -o value
        if let Some(&idx) = scan.options_by_name.get(token) {
            let next = tokens.get(i + 1).map(|t| t.as_ref());
            if let Some(next) = next.filter(|n| !conventions.is_option_like(n)) {
                tracing::trace!(option = token, value = next, "matched value option");
                scan.record_option(idx, next);
                i += 2;
                continue;
            }
        }

        // -o:value / -o=value
        if let Some((name, value)) = conventions.split_delimited(token) {
            if let Some(&idx) = scan.options_by_name.get(name) {
                tracing::trace!(option = name, value, "matched delimited option");
                scan.record_option(idx, value);
                i += 1;
                continue;
            }
        }

        if let Some(&idx) = scan.flags_by_name.get(token) {
            tracing::trace!(flag = token, "matched flag");
            scan.record_option(idx, &conventions.flag_given);
            i += 1;
            continue;
        }

        if !conventions.is_option_like(token) && scan.cursor < scan.positionals.len() {
            tracing::trace!(
                positional = scan.positionals[scan.cursor].name(),
                value = token,
                "matched positional"
            );
            scan.bind_positional(token);
            i += 1;
            continue;
        }

        if conventions.error_on_unknown {
            scan.errors.push(ParseError::UnknownArgument(token.to_string()));
        } else {
            tracing::debug!(token, "ignoring unrecognized token");
        }
        i += 1;
    }

    resolve(&mut scan, &conventions.flag_not_given);

    tracing::debug!(
        tokens = tokens.len(),
        keys = scan.values.len(),
        errors = scan.errors.len(),
        "parsed arguments"
    );

    match ParseErrors::new(scan.errors) {
        Some(errors) => Err(errors),
        None => Ok(scan.values),
    }
}

/// Apply defaults and report missing arguments once the scan is done.
///
/// Sentinels and defaults only fill keys that are still empty, so options
/// sharing a key never bury a value given on the command line.
fn resolve(scan: &mut Scan<'_>, flag_not_given: &str) {
    for (idx, opt) in scan.options.iter().enumerate() {
        if opt.takes_value() || scan.found[idx] || scan.values.contains_key(opt.value_key()) {
            continue;
        }
        scan.values.push(opt.value_key(), flag_not_given);
    }

    for (idx, opt) in scan.options.iter().enumerate() {
        if !opt.takes_value() || scan.found[idx] || scan.values.contains_key(opt.value_key()) {
            continue;
        }
        if let Some(default) = opt.default_value() {
            scan.values.push(opt.value_key(), default);
        }
    }

    for (idx, positional) in scan.positionals.iter().enumerate().skip(scan.cursor) {
        // A repeated positional keeps the cursor once it has matched.
        if scan.matched[idx] > 0 {
            continue;
        }
        if positional.is_optional() && positional.is_repeated() {
            scan.values.touch(positional.value_key());
        } else if !positional.is_optional() {
            scan.errors.push(ParseError::MissingPositional(positional.name().to_string()));
        }
    }

    for (idx, opt) in scan.options.iter().enumerate() {
        if opt.takes_value() && !scan.found[idx] && opt.default_value().is_none() {
            scan.errors.push(ParseError::MissingOption(opt.primary_name().to_string()));
        }
    }
}
