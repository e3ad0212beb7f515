use crate::argument::{Argument, OptionArg, Positional};
use crate::error::ParseErrors;
use crate::registry::Registry;

fn format_positional(p: &Positional) -> String {
    match (p.is_optional(), p.is_repeated()) {
        (false, false) => format!("<{}>", p.name()),
        (true, false) => format!("[{}]", p.name()),
        (false, true) => format!("<{}>...", p.name()),
        (true, true) => format!("[{}]...", p.name()),
    }
}

fn format_option_left(o: &OptionArg) -> String {
    let mut out = o.names().join(", ");
    if let Some(value_name) = o.placeholder() {
        out.push_str(&format!(" <{value_name}>"));
    }
    out
}

fn format_option_help(o: &OptionArg) -> String {
    let mut out = o.help().trim().to_string();
    if let Some(default_value) = o.default_value().filter(|_| o.takes_value()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("[default: {default_value}]"));
    }
    out
}

enum Row {
    Heading(String),
    Entry(String, String),
}

// A separator directly above a section replaces its default heading.
fn push_heading(rows: &mut Vec<Row>, text: &str) {
    if !matches!(rows.last(), Some(Row::Heading(_))) {
        rows.push(Row::Heading(text.to_string()));
    }
}

impl Registry {
    /// One-line synopsis: `Usage: prog [OPTIONS] <in> [rest]...`.
    pub fn synopsis(&self, program: &str) -> String {
        let mut out = format!("Usage: {program}");
        if self.option_arguments().next().is_some() {
            out.push_str(" [OPTIONS]");
        }
        for p in self.positional_arguments() {
            out.push(' ');
            out.push_str(&format_positional(p));
        }
        out
    }

    /// Render a help message listing every declared argument.
    ///
    /// Rows keep declaration order; separators print their text verbatim.
    pub fn usage(&self, program: &str) -> String {
        let mut rows: Vec<Row> = Vec::new();
        let mut seen_option = false;
        let mut seen_positional = false;
        for arg in self.arguments() {
            match arg {
                Argument::Option(o) => {
                    if !seen_option {
                        seen_option = true;
                        push_heading(&mut rows, "Options:");
                    }
                    rows.push(Row::Entry(format_option_left(o), format_option_help(o)));
                }
                Argument::Positional(p) => {
                    if !seen_positional {
                        seen_positional = true;
                        push_heading(&mut rows, "Arguments:");
                    }
                    rows.push(Row::Entry(
                        format_positional(p),
                        p.help().trim().to_string(),
                    ));
                }
                Argument::Separator(s) => rows.push(Row::Heading(s.text().to_string())),
            }
        }

        let width = rows
            .iter()
            .filter_map(|r| match r {
                Row::Entry(left, _) => Some(left.len()),
                Row::Heading(_) => None,
            })
            .max()
            .unwrap_or(0);

        let mut out = self.synopsis(program);
        out.push('\n');
        for row in rows {
            match row {
                Row::Heading(text) => {
                    out.push('\n');
                    out.push_str(&text);
                    out.push('\n');
                }
                Row::Entry(left, help) => {
                    if help.is_empty() {
                        out.push_str(&format!("  {left}\n"));
                    } else {
                        out.push_str(&format!("  {left:width$}  {help}\n"));
                    }
                }
            }
        }
        out
    }

    /// Usage text followed by one `error:` line per parse error.
    pub fn render_failure(&self, program: &str, errors: &ParseErrors) -> String {
        let mut out = self.usage(program);
        out.push('\n');
        for err in errors {
            out.push_str(&format!("error: {err}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::argument::{OptionArg, Positional, Separator};
    use crate::registry::Registry;

    fn registry() -> Registry {
        let mut r = Registry::new();
        r.add(
            OptionArg::flag("-v")
                .alias("--verbose")
                .description("Verbose output"),
        )
        .unwrap();
        r.add(
            OptionArg::value("-o", "OUT")
                .description("Output file")
                .default("a.out"),
        )
        .unwrap();
        r.add(Separator::new("Inputs:")).unwrap();
        r.add(Positional::new("infile").description("File to read"))
            .unwrap();
        r.add(Positional::new("rest").optional().repeated())
            .unwrap();
        r
    }

    #[test]
    fn synopsis_lists_positionals() {
        assert_eq!(
            registry().synopsis("copy"),
            "Usage: copy [OPTIONS] <infile> [rest]..."
        );
        assert_eq!(Registry::new().synopsis("x"), "Usage: x");
    }

    #[test]
    fn usage_layout() {
        let text = registry().usage("copy");
        let expected = "\
Usage: copy [OPTIONS] <infile> [rest]...

Options:
  -v, --verbose  Verbose output
  -o <OUT>       Output file [default: a.out]

Inputs:
  <infile>       File to read
  [rest]...
";
        assert_eq!(text, expected);
    }

    #[test]
    fn failure_lists_every_error() {
        let r = registry();
        let errors = r.parse(&["--bogus"]).unwrap_err();
        let text = r.render_failure("copy", &errors);
        assert!(text.starts_with("Usage: copy"));
        assert!(text.ends_with(
            "error: unknown argument: --bogus\nerror: missing required argument: <infile>\n"
        ));
    }
}
