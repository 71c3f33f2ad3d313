//! Declaration text from a normalized [`Shape`].
//!
//! ```text
//! export type Data = {
//!   id: number,
//!   tags?: string[]
//! };
//! ```
use once_cell::sync::Lazy;
use regex::Regex;

use crate::inference::{ArrC, INDEX_KEY, ObjC, Shape};

static IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Name in `export type <name> = ...;`
    pub type_name: String,
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { type_name: "Data".to_string(), indent: 2 }
    }
}

pub fn declaration(u: &Shape, opts: &RenderOptions) -> String {
    format!("export type {} = {};", opts.type_name, render(u, 1, opts))
}

/// Render one type. `level` is the nesting depth of object properties that
/// would be emitted for it (1 at the top).
pub fn render(u: &Shape, level: usize, opts: &RenderOptions) -> String {
    render_inner(u, level, opts, false)
}

fn render_inner(u: &Shape, level: usize, opts: &RenderOptions, strip_undefined: bool) -> String {
    let mut pieces: Vec<String> = Vec::new();

    let leaves = [
        (u.number, "number"),
        (u.string, "string"),
        (u.boolean, "boolean"),
        (u.null, "null"),
        (u.undefined && !strip_undefined, "undefined"),
        (u.unknown, "any"),
    ];
    let leaves: Vec<&str> = leaves.iter().filter(|(on, _)| *on).map(|(_, name)| *name).collect();
    if !leaves.is_empty() {
        pieces.push(leaves.join(" | "));
    }

    if let Some(obj) = &u.obj {
        pieces.push(render_object(obj, level, opts));
    }
    if let Some(arr) = &u.arr {
        pieces.push(render_array(arr, level, opts));
    }

    if pieces.is_empty() {
        // only reachable for a property that was nothing but `undefined`
        return "any".to_string();
    }
    pieces.join(" | ")
}

fn render_object(obj: &ObjC, level: usize, opts: &RenderOptions) -> String {
    let pad = " ".repeat(opts.indent * level);
    let close = " ".repeat(opts.indent * level.saturating_sub(1));
    let props: Vec<String> = obj.fields.iter().map(|(name, ty)| {
        let index = name == INDEX_KEY;
        let mark = if ty.undefined && !index { "?" } else { "" };
        let key = if index { name.clone() } else { property_name(name) };
        format!("{pad}{key}{mark}: {}", render_inner(ty, level + 1, opts, true))
    }).collect();
    format!("{{\n{}\n{close}}}", props.join(",\n"))
}

fn render_array(arr: &ArrC, level: usize, opts: &RenderOptions) -> String {
    let elems: Vec<String> = arr.items.iter().map(|t| render(t, level, opts)).collect();
    let union = elems.len() > 1 || arr.items.first().is_some_and(|t| kind_count(t) > 1);
    if union {
        format!("({})[]", elems.join(" | "))
    } else {
        format!("{}[]", elems.concat())
    }
}

fn kind_count(u: &Shape) -> usize {
    [u.number, u.string, u.boolean, u.null, u.undefined, u.unknown, u.obj.is_some(), u.arr.is_some()]
        .iter()
        .filter(|on| **on)
        .count()
}

/// Identifiers stay bare; anything else is quoted.
fn property_name(name: &str) -> String {
    if IDENT.is_match(name) {
        name.to_string()
    } else {
        serde_json::Value::String(name.to_string()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_shape;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn declare(samples: Value) -> String {
        let u = infer_shape(samples.as_array().unwrap()).unwrap();
        declaration(&u, &RenderOptions::default())
    }

    #[test]
    fn nested_objects_indent_per_level() {
        let out = declare(json!([{"a": 1, "b": {"c": "x", "d": [true]}}]));
        assert_eq!(out, [
            "export type Data = {",
            "  a: number,",
            "  b: {",
            "    c: string,",
            "    d: boolean[]",
            "  }",
            "};",
        ].join("\n"));
    }

    #[test]
    fn array_of_objects_renders_at_same_level() {
        let out = declare(json!([{"xs": [{"id": 1}]}, {"xs": [{"id": 2, "tag": "t"}]}]));
        assert_eq!(out, [
            "export type Data = {",
            "  xs: {",
            "    id: number,",
            "    tag?: string",
            "  }[]",
            "};",
        ].join("\n"));
    }

    #[test]
    fn optional_containers_get_question_mark() {
        let out = declare(json!([{"o": {"k": 1}, "l": [1]}, {}]));
        assert_eq!(out, [
            "export type Data = {",
            "  o?: {",
            "    k: number",
            "  },",
            "  l?: number[],",
            "  [k:string]: any",
            "};",
        ].join("\n"));
    }

    #[test]
    fn empty_object_is_an_index_signature() {
        assert_eq!(declare(json!([{}])), "export type Data = {\n  [k:string]: any\n};");
    }

    #[test]
    fn mixed_element_arrays_are_parenthesized() {
        assert_eq!(declare(json!([[1, "a"]])), "export type Data = (number | string)[];");
        assert_eq!(declare(json!([[[]]])), "export type Data = any[][];");
    }

    #[test]
    fn top_level_unions_join_pieces() {
        let out = declare(json!([1, null, [true]]));
        assert_eq!(out, "export type Data = number | null | boolean[];");
    }

    #[test]
    fn optional_nullable_property() {
        let out = declare(json!([{"a": null}, {}]));
        assert!(out.contains("  a?: null,"), "{out}");
    }

    #[test]
    fn non_identifier_names_are_quoted() {
        let out = declare(json!([{"content-type": "x", "$ok": 1, "2d": true}]));
        assert!(out.contains("  \"content-type\": string,"), "{out}");
        assert!(out.contains("  $ok: number,"), "{out}");
        assert!(out.contains("  \"2d\": boolean"), "{out}");
    }

    #[test]
    fn options_change_name_and_indent() {
        let u = infer_shape(json!([{"a": 1}]).as_array().unwrap()).unwrap();
        let opts = RenderOptions { type_name: "Payload".into(), indent: 4 };
        assert_eq!(declaration(&u, &opts), "export type Payload = {\n    a: number\n};");
    }

    #[test]
    fn placeholder_renders_as_any() {
        assert_eq!(render(&Shape::unknown(), 1, &RenderOptions::default()), "any");
        assert_eq!(render(&Shape::default(), 1, &RenderOptions::default()), "any");
    }
}
