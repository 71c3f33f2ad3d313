use anyhow::{anyhow, Context, Result};
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Compile `filter_src` once and run it over every input, passing each
/// output (decoded back to JSON) to `apply`.
pub fn run_jaq_each<'i, I>(filter_src: &str, inputs: I, mut apply: impl FnMut(Value) -> Result<()>) -> Result<()>
where
    I: IntoIterator<Item = &'i Value>,
{
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    for input in inputs {
        let jq_inputs = RcIter::new(core::iter::empty());
        let mut it = filter.run((Ctx::new([], &jq_inputs), Val::from(input.clone())));
        while let Some(item) = it.next() {
            let v = item.map_err(|e| anyhow!("jq runtime error: {e:?}"))?;
            let text = v.to_string();
            let value = serde_json::from_str::<Value>(&text)
                .with_context(|| format!("jq produced non-JSON output `{text}`"))?;
            apply(value)?;
        }
    }
    Ok(())
}

fn format_parse_errors(
    errs: Vec<(load::File<&str, ()>, load::Error<&str>)>,
) -> anyhow::Error {
    let lines: Vec<String> = errs
        .into_iter()
        .map(|(file, err)| format!("jq parse error: {err:?} in `{}`", file.code))
        .collect();
    anyhow!(lines.join("\n"))
}

fn format_undefined_errors(
    errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>,
) -> anyhow::Error {
    let mut lines = Vec::new();
    for (file, list) in errs {
        for (name, undef) in list {
            lines.push(format!("jq undefined `{name}`: {undef:?} in `{}`", file.code));
        }
    }
    anyhow!(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(expr: &str, inputs: &[Value]) -> Result<Vec<Value>> {
        let mut out = Vec::new();
        run_jaq_each(expr, inputs, |v| {
            out.push(v);
            Ok(())
        })?;
        Ok(out)
    }

    #[test]
    fn filter_fans_out_per_input() {
        let out = run(".items[]", &[json!({"items": [1, 2]}), json!({"items": ["a"]})]).unwrap();
        assert_eq!(out, vec![json!(1), json!(2), json!("a")]);
    }

    #[test]
    fn bad_filter_is_an_error() {
        assert!(run(".[", &[json!(1)]).is_err());
        assert!(run("no_such_function_here", &[json!(1)]).is_err());
    }
}
