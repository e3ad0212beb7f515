use argscan::{Argument, Registry, ValueMap};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GrammarSummary {
    pub program: String,
    pub value_options: usize,
    pub flags: usize,
    pub positionals: usize,
    pub separators: usize,
}

impl GrammarSummary {
    pub fn new(program: String, registry: &Registry) -> Self {
        let mut summary = Self {
            program,
            value_options: 0,
            flags: 0,
            positionals: 0,
            separators: 0,
        };
        for arg in registry.arguments() {
            match arg {
                Argument::Option(o) if o.takes_value() => summary.value_options += 1,
                Argument::Option(_) => summary.flags += 1,
                Argument::Positional(_) => summary.positionals += 1,
                Argument::Separator(_) => summary.separators += 1,
            }
        }
        summary
    }

    pub fn line(&self) -> String {
        format!(
            "ok: {} ({} options, {} flags, {} positionals)",
            self.program, self.value_options, self.flags, self.positionals
        )
    }
}

/// One `key=value` line per key; multiple values are joined with `,`.
pub fn values_as_lines(values: &ValueMap) -> String {
    let mut out = String::new();
    for (key, vs) in values.iter() {
        out.push_str(&format!("{key}={}\n", vs.join(",")));
    }
    out
}

/// JSON object mapping every key to its array of values.
pub fn values_as_json(values: &ValueMap) -> Value {
    let map: Map<String, Value> = values
        .iter()
        .map(|(key, vs)| {
            let arr = vs.iter().cloned().map(Value::String).collect();
            (key.to_string(), Value::Array(arr))
        })
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argscan::{OptionArg, Positional};

    fn registry() -> Registry {
        let mut r = Registry::new();
        r.add(OptionArg::flag("-v").key("verbose")).unwrap();
        r.add(OptionArg::value("-o", "OUT").default("a.out"))
            .unwrap();
        r.add(Positional::new("files").optional().repeated())
            .unwrap();
        r
    }

    #[test]
    fn lines_join_repeated_values() {
        let m = registry().parse(&["a", "b"]).unwrap();
        let text = values_as_lines(&m);
        assert!(text.contains("files=a,b\n"));
        assert!(text.contains("verbose=false\n"));
        assert!(text.contains("o=a.out\n"));
    }

    #[test]
    fn json_is_object_of_arrays() {
        let m = registry().parse(&["-v"]).unwrap();
        let json = values_as_json(&m);
        assert_eq!(json["verbose"], serde_json::json!(["true"]));
        assert_eq!(json["files"], serde_json::json!([]));
    }

    #[test]
    fn summary_counts_kinds() {
        let s = GrammarSummary::new("p".to_string(), &registry());
        assert_eq!((s.value_options, s.flags, s.positionals), (1, 1, 1));
        assert_eq!(s.line(), "ok: p (1 options, 1 flags, 1 positionals)");
    }
}
