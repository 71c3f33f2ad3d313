//! Classification of concrete values into the kinds the interpreter knows.
//!
//! The interpreter never matches on a concrete value type directly; anything
//! implementing [`Sample`] can be observed.

/// Runtime kind of one value, with borrowed children for containers.
#[derive(Debug)]
pub enum Kind<'a, V: ?Sized> {
    Null,
    Boolean,
    Number,
    String,
    Array(Vec<&'a V>),
    Object(Vec<(String, &'a V)>),
    /// No structural mapping exists; the payload describes the value.
    Unsupported(String),
}

pub trait Sample {
    fn classify(&self) -> Kind<'_, Self>;
}

impl Sample for serde_json::Value {
    fn classify(&self) -> Kind<'_, Self> {
        use serde_json::Value;
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(xs) => Kind::Array(xs.iter().collect()),
            Value::Object(m) => Kind::Object(m.iter().map(|(k, v)| (k.clone(), v)).collect()),
        }
    }
}

impl Sample for serde_yaml::Value {
    fn classify(&self) -> Kind<'_, Self> {
        use serde_yaml::Value;
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(n) => match n.as_f64() {
                Some(f) if !f.is_finite() => Kind::Unsupported(format!("non-finite number {n}")),
                _ => Kind::Number,
            },
            Value::String(_) => Kind::String,
            Value::Sequence(xs) => Kind::Array(xs.iter().collect()),
            Value::Mapping(m) => {
                let mut pairs = Vec::with_capacity(m.len());
                for (k, v) in m {
                    let key = match k {
                        Value::String(s) => s.clone(),
                        Value::Number(n) => n.to_string(),
                        Value::Bool(b) => b.to_string(),
                        other => {
                            return Kind::Unsupported(format!("mapping key {}", yaml_kind_name(other)));
                        }
                    };
                    pairs.push((key, v));
                }
                Kind::Object(pairs)
            }
            Value::Tagged(tagged) => Kind::Unsupported(format!("tagged value {}", tagged.tag)),
        }
    }
}

fn yaml_kind_name(v: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}
