//! Infer a TypeScript-style type declaration from sample JSON values.
//!
//! Pipeline: every sample is observed into a [`Shape`], the shapes are folded
//! left-to-right with [`inference::merge`], the result is normalized and then
//! rendered by [`render::declaration`].
pub mod error;
pub mod inference;
pub mod render;
pub mod sample;

pub use error::{InferError, Result};
pub use inference::{Inference, Shape, infer_shape};
pub use render::RenderOptions;
pub use sample::{Kind, Sample};

/// Run the whole pipeline with default render options
/// (`export type Data = ...;`).
pub fn infer_declaration<'a, S, I>(samples: I) -> Result<String>
where
    S: Sample + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let shape = infer_shape(samples)?;
    Ok(render::declaration(&shape, &RenderOptions::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn declare(samples: Value) -> String {
        infer_declaration(samples.as_array().unwrap()).unwrap()
    }

    #[test]
    fn mixed_primitive_property_is_a_required_union() {
        let out = declare(json!([{"a": 1}, {"a": "x"}]));
        assert!(out.contains("a: number | string"), "{out}");
        assert!(!out.contains("a?"), "{out}");
    }

    #[test]
    fn disjoint_keys_become_optional() {
        let out = declare(json!([{"a": 1}, {"b": 2}]));
        assert!(out.contains("a?: number"), "{out}");
        assert!(out.contains("b?: number"), "{out}");
    }

    #[test]
    fn empty_array_placeholder_is_eliminated() {
        assert_eq!(declare(json!([[], [1, 2]])), "export type Data = number[];");
    }

    #[test]
    fn null_only_property_degrades_to_any() {
        let out = declare(json!([{"a": null}, {"a": null}]));
        assert!(out.contains("a: any"), "{out}");
    }

    #[test]
    fn no_samples_declares_any() {
        let samples: Vec<Value> = Vec::new();
        assert_eq!(infer_declaration(&samples).unwrap(), "export type Data = any;");
    }
}
