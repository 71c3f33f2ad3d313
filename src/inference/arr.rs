use tracing::trace;

use super::{dedupe, merge, Shape};
use crate::error::Result;

/// Array kind: the set of element types seen. Never empty; an empty array
/// holds the `unknown` placeholder.
#[derive(Clone, Debug, Default)]
pub struct ArrC {
    pub items: Vec<Shape>,
}

impl PartialEq for ArrC {
    /// Set equality: each side contains every element of the other.
    fn eq(&self, other: &Self) -> bool {
        self.items.iter().all(|t| other.items.contains(t))
            && other.items.iter().all(|t| self.items.contains(t))
    }
}

impl Eq for ArrC {}

impl ArrC {
    pub(super) fn merge(a: &Self, b: &Self) -> Result<Self> {
        let pooled = dedupe(
            a.items.iter()
                .chain(&b.items)
                .filter(|t| !t.is_placeholder())
                .cloned()
        );
        if pooled.is_empty() {
            return Ok(Self { items: vec![Shape::unknown()] });
        }

        // fold all object elements into one, same for nested arrays;
        // each collapsed element sits where its first member was seen
        let mut items: Vec<Shape> = Vec::with_capacity(pooled.len());
        let mut obj_at: Option<usize> = None;
        let mut arr_at: Option<usize> = None;
        for t in pooled {
            let slot = if t.obj.is_some() {
                &mut obj_at
            } else if t.arr.is_some() {
                &mut arr_at
            } else {
                items.push(t);
                continue;
            };
            match *slot {
                Some(i) => items[i] = merge(&items[i], &t)?,
                None => {
                    *slot = Some(items.len());
                    items.push(t);
                }
            }
        }
        trace!(elements = items.len(), "merged arrays");

        Ok(Self { items })
    }
}
