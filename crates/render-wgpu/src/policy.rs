use framekit_common::ShaderPolicy;
use framekit_render::{ShaderError, ShaderKind};
use std::collections::BTreeMap;

/// Compiled programs plus the substitutions made for the ones that failed.
///
/// The flat program is always present, so every kind resolves to a module.
#[derive(Debug)]
pub struct ShaderRoster<M> {
    flat: M,
    others: BTreeMap<ShaderKind, M>,
    degraded: Vec<ShaderKind>,
}

impl<M> ShaderRoster<M> {
    /// The program actually used for records asking for `kind`.
    pub fn effective(&self, kind: ShaderKind) -> ShaderKind {
        if kind == ShaderKind::Flat || self.others.contains_key(&kind) {
            kind
        } else {
            ShaderKind::Flat
        }
    }

    pub fn module(&self, kind: ShaderKind) -> &M {
        self.others.get(&kind).unwrap_or(&self.flat)
    }

    pub fn degraded(&self) -> Vec<ShaderKind> {
        self.degraded.clone()
    }
}

/// Apply `policy` to compile results.
///
/// `FailFast` returns the first failure. `Degrade` swaps failed programs for
/// the flat one; a failing flat program is fatal under either policy.
pub fn resolve_shaders<M>(
    compiled: Vec<(ShaderKind, Result<M, ShaderError>)>,
    policy: ShaderPolicy,
) -> Result<ShaderRoster<M>, ShaderError> {
    let mut flat = None;
    let mut others = BTreeMap::new();
    let mut degraded = Vec::new();

    for (kind, result) in compiled {
        match result {
            Ok(module) if kind == ShaderKind::Flat => flat = Some(module),
            Ok(module) => {
                others.insert(kind, module);
            }
            Err(err) if policy == ShaderPolicy::Degrade && kind != ShaderKind::Flat => {
                tracing::warn!(shader = %kind, error = %err, "substituting flat shader");
                degraded.push(kind);
            }
            Err(err) => {
                tracing::error!(shader = %kind, error = %err, "shader compilation failed");
                return Err(err);
            }
        }
    }

    let flat = flat.ok_or_else(|| ShaderError::Compile {
        kind: ShaderKind::Flat,
        diagnostic: "flat program missing".to_string(),
    })?;
    Ok(ShaderRoster {
        flat,
        others,
        degraded,
    })
}
