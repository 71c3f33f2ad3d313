use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use super::{merge, Shape};
use crate::error::{InferError, Result};

/// Object kind: property name → type, in first-seen order.
/// Equality ignores property order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjC {
    pub fields: IndexMap<String, Shape>,
}

impl ObjC {
    pub(super) fn merge(a: &Self, b: &Self) -> Result<Self> {
        let shared: IndexSet<&str> = a.fields.keys()
            .filter(|k| b.fields.contains_key(k.as_str()))
            .map(String::as_str)
            .collect();
        trace!(shared = shared.len(), left = a.fields.len(), right = b.fields.len(), "merging objects");

        let mut out = Self::default();

        // shared keys merge; keys only in `a` become optional
        for (k, ta) in &a.fields {
            let ty = if shared.contains(k.as_str()) {
                let tb = b.fields.get(k).ok_or_else(|| {
                    InferError::InternalInvariantViolation(format!(
                        "shared key `{k}` missing from right-hand object"
                    ))
                })?;
                merge(ta, tb)?
            } else {
                ta.clone().optional()
            };
            out.fields.insert(k.clone(), ty);
        }
        // keys only in `b`
        for (k, tb) in &b.fields {
            if !shared.contains(k.as_str()) {
                out.fields.insert(k.clone(), tb.clone().optional());
            }
        }

        Ok(out)
    }
}
