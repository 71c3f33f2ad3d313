//! Structural type inference over sample values.
//!
//! Every sample is observed into a [`Shape`], a record of kind markers where
//! each present marker means "at least one sample looked like this". Shapes
//! are folded pairwise with [`merge`] (least upper bound), then [`normalize`]
//! degrades leaves that never carried information into the `unknown`
//! placeholder.
//!
//! Equality on [`Shape`] is structural: object properties match by key
//! regardless of order, array element sets match as unordered sets.
pub mod arr;
pub mod obj;

use tracing::debug;

use crate::error::{InferError, Result};
use crate::sample::{Kind, Sample};

pub use arr::ArrC;
pub use obj::ObjC;

/// Synthetic key standing in for "any string key" on an empty object.
pub const INDEX_KEY: &str = "[k:string]";

// ------------------------------ Type model -------------------------------- //

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shape {
    pub string: bool,
    pub number: bool,
    pub boolean: bool,
    pub null: bool,
    pub undefined: bool,
    pub unknown: bool,
    pub obj: Option<ObjC>,
    pub arr: Option<ArrC>,
}

impl Shape {
    pub fn unknown() -> Self { Self { unknown: true, ..Self::default() } }
    pub fn undefined() -> Self { Self { undefined: true, ..Self::default() } }
    pub fn null() -> Self { Self { null: true, ..Self::default() } }

    /// The placeholder used for empty collections.
    pub fn is_placeholder(&self) -> bool { *self == Self::unknown() }

    pub fn is_only_null(&self) -> bool { *self == Self::null() }
    pub fn is_only_undefined(&self) -> bool { *self == Self::undefined() }

    /// Any kind that says something about the value's shape.
    pub fn has_concrete(&self) -> bool {
        self.string || self.number || self.boolean || self.null
            || self.obj.is_some() || self.arr.is_some()
    }

    /// Mark as possibly absent.
    pub fn optional(mut self) -> Self {
        self.undefined = true;
        self
    }
}

/// Structural equivalence. Same as `a == b`.
pub fn compare(a: &Shape, b: &Shape) -> bool { a == b }

// ------------------------------ Observe ---------------------------------- //

pub fn observe_value<S: Sample + ?Sized>(v: &S) -> Result<Shape> {
    observe_at(v, &mut String::new())
}

/// `None` is a slot that was never populated.
pub fn observe_slot<S: Sample + ?Sized>(slot: Option<&S>) -> Result<Shape> {
    match slot {
        None => Ok(Shape::undefined()),
        Some(v) => observe_value(v),
    }
}

fn observe_at<S: Sample + ?Sized>(v: &S, path: &mut String) -> Result<Shape> {
    match v.classify() {
        Kind::Null => Ok(Shape::null()),
        Kind::Boolean => Ok(Shape { boolean: true, ..Shape::default() }),
        Kind::Number => Ok(Shape { number: true, ..Shape::default() }),
        Kind::String => Ok(Shape { string: true, ..Shape::default() }),
        Kind::Array(xs) => observe_array(&xs, path),
        Kind::Object(pairs) => observe_object(pairs, path),
        Kind::Unsupported(found) => Err(InferError::UnsupportedValueKind {
            path: if path.is_empty() { "(root)".to_string() } else { path.clone() },
            found,
        }),
    }
}

fn observe_array<S: Sample + ?Sized>(xs: &[&S], path: &mut String) -> Result<Shape> {
    let mut items = Vec::with_capacity(xs.len());
    for (i, el) in xs.iter().enumerate() {
        let len = path.len();
        push_segment(path, &i.to_string());
        items.push(observe_at(*el, path)?);
        path.truncate(len);
    }
    let mut items = dedupe(items);
    if items.is_empty() {
        items.push(Shape::unknown());
    }
    Ok(Shape { arr: Some(ArrC { items }), ..Shape::default() })
}

fn observe_object<S: Sample + ?Sized>(pairs: Vec<(String, &S)>, path: &mut String) -> Result<Shape> {
    let mut obj = ObjC::default();
    for (k, v) in pairs {
        let len = path.len();
        push_segment(path, &k);
        let ty = observe_at(v, path)?;
        path.truncate(len);
        obj.fields.insert(k, ty);
    }
    if obj.fields.is_empty() {
        obj.fields.insert(INDEX_KEY.to_string(), Shape::unknown());
    }
    Ok(Shape { obj: Some(obj), ..Shape::default() })
}

/// JSON-pointer segment (`~` → `~0`, `/` → `~1`).
fn push_segment(path: &mut String, seg: &str) {
    path.push('/');
    path.push_str(&seg.replace('~', "~0").replace('/', "~1"));
}

// ------------------------------- Dedupe ----------------------------------- //

/// Drop later shapes equivalent to an earlier one; first-seen order is kept.
pub fn dedupe<I: IntoIterator<Item = Shape>>(shapes: I) -> Vec<Shape> {
    let mut out: Vec<Shape> = Vec::new();
    for s in shapes {
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

// -------------------------------- Merge (⊔) ------------------------------- //

pub fn merge(a: &Shape, b: &Shape) -> Result<Shape> {
    if a == b {
        return Ok(a.clone());
    }

    let mut out = Shape {
        string: a.string || b.string,
        number: a.number || b.number,
        boolean: a.boolean || b.boolean,
        null: a.null || b.null,
        undefined: a.undefined || b.undefined,
        unknown: a.unknown || b.unknown,
        obj: None,
        arr: None,
    };

    out.obj = match (&a.obj, &b.obj) {
        (None, None) => None,
        (Some(x), None) | (None, Some(x)) => Some(x.clone()),
        (Some(x), Some(y)) => Some(ObjC::merge(x, y)?),
    };

    out.arr = match (&a.arr, &b.arr) {
        (None, None) => None,
        (Some(x), None) | (None, Some(x)) => Some(x.clone()),
        (Some(x), Some(y)) => Some(ArrC::merge(x, y)?),
    };

    // the placeholder only survives while nothing concrete is known
    if out.unknown && out.has_concrete() {
        out.unknown = false;
    }

    Ok(out)
}

// ------------------------------- Normalize -------------------------------- //

/// Leaves that were only ever null, or only ever absent, become `unknown`.
pub fn normalize(u: &mut Shape) {
    if u.is_only_null() || u.is_only_undefined() {
        *u = Shape::unknown();
        return;
    }
    if let Some(obj) = &mut u.obj {
        for ty in obj.fields.values_mut() {
            normalize(ty);
        }
    }
    if let Some(arr) = &mut u.arr {
        for ty in &mut arr.items {
            normalize(ty);
        }
        arr.items = dedupe(std::mem::take(&mut arr.items));
    }
}

// ------------------------------- Front API -------------------------------- //

/// Left fold over samples in observation order.
#[derive(Debug, Default)]
pub struct Inference {
    state: Option<Shape>,
    samples: usize,
}

impl Inference {
    pub fn new() -> Self { Self::default() }

    pub fn observe<S: Sample + ?Sized>(&mut self, v: &S) -> Result<()> {
        let obs = observe_value(v)?;
        self.absorb(obs)
    }

    /// Record a sample whose slot was absent.
    pub fn observe_missing(&mut self) -> Result<()> {
        self.absorb(Shape::undefined())
    }

    fn absorb(&mut self, obs: Shape) -> Result<()> {
        let next = match &self.state {
            None => obs,
            Some(st) => merge(st, &obs)?,
        };
        self.state = Some(next);
        self.samples += 1;
        debug!(samples = self.samples, "observed sample");
        Ok(())
    }

    pub fn samples(&self) -> usize { self.samples }

    /// Normalized copy of the folded shape; `unknown` when nothing was observed.
    pub fn solve(&self) -> Shape {
        let mut u = self.state.clone().unwrap_or_else(Shape::unknown);
        normalize(&mut u);
        debug!(samples = self.samples, "solved shape");
        u
    }
}

pub fn infer_shape<'a, S, I>(values: I) -> Result<Shape>
where
    S: Sample + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let mut inf = Inference::new();
    for v in values {
        inf.observe(v)?;
    }
    Ok(inf.solve())
}

// ------------------------------- Tests ------------------------------------ //
