//! Policy tree to flat bag.
//!
//! Every record, list element and variant leaves at least one entry behind
//! (an empty-text marker at its own path when it has nothing else), so the
//! decoder can tell present-but-empty from absent and infer list lengths.

use pixelpolicy_model::{FieldVisitor, Fields, Node, Policy, Record, Result, Scalar, ScalarVariable};

use crate::bag::{join, FlatBag, FlatValue};

/// Encode a policy, writing tagged-union nodes down to `depth` levels.
pub(crate) fn encode_policy(policy: &Policy, depth: usize) -> Result<FlatBag> {
    // Visiting needs `&mut`; one clone covers the whole tree.
    let mut policy = policy.clone();
    let mut bag = FlatBag::new();
    policy.visit_fields(&mut FlatEncoder {
        bag: &mut bag,
        prefix: String::new(),
        depth,
    })?;
    Ok(bag)
}

struct FlatEncoder<'a> {
    bag: &'a mut FlatBag,
    prefix: String,
    depth: usize,
}

impl FlatEncoder<'_> {
    fn path(&self, name: &str) -> String {
        join(&self.prefix, name)
    }

    /// Visit `fields` under `path`, marking the path if nothing was written.
    fn nested<F: Fields>(&mut self, path: String, depth: usize, fields: &mut F) -> Result<()> {
        fields.visit_fields(&mut FlatEncoder {
            bag: &mut *self.bag,
            prefix: path.clone(),
            depth,
        })?;
        self.mark(path);
        Ok(())
    }

    fn encode_node<N: Node>(&mut self, path: &str, node: &mut N) -> Result<()> {
        let sub = join(path, node.variant().slot);
        node.visit_variant(&mut FlatEncoder {
            bag: &mut *self.bag,
            prefix: sub.clone(),
            depth: self.depth - 1,
        })?;
        self.mark(sub);
        Ok(())
    }

    /// Leave a marker at `path` unless something non-empty already sits
    /// below it, so the decoder sees the record or variant as present.
    fn mark(&mut self, path: String) {
        if !self.bag.is_populated(&path) {
            self.bag.insert(path, FlatValue::Text(String::new()));
        }
    }
}

impl FieldVisitor for FlatEncoder<'_> {
    fn scalar<T: Scalar>(
        &mut self,
        name: &'static str,
        slot: &mut Option<ScalarVariable<T>>,
    ) -> Result<()> {
        if let Some(sv) = slot {
            let path = self.path(name);
            if let Some(value) = &sv.value {
                self.bag.insert(path.clone(), value.to_text());
            }
            self.bag
                .insert(format!("{path}_var"), sv.name.clone().unwrap_or_default());
        }
        Ok(())
    }

    fn literal<T: Scalar>(&mut self, name: &'static str, slot: &mut Option<T>) -> Result<()> {
        if let Some(value) = slot {
            let path = self.path(name);
            self.bag.insert(path, value.to_text());
        }
        Ok(())
    }

    fn required<T: Scalar>(&mut self, name: &'static str, slot: &mut T) -> Result<()> {
        let path = self.path(name);
        self.bag.insert(path, slot.to_text());
        Ok(())
    }

    fn list<T: Scalar>(&mut self, name: &'static str, slot: &mut Vec<T>) -> Result<()> {
        let path = self.path(name);
        for (i, value) in slot.iter().enumerate() {
            self.bag.insert(join(&path, i), value.to_text());
        }
        Ok(())
    }

    fn record<R: Record>(&mut self, name: &'static str, slot: &mut Option<R>) -> Result<()> {
        if let Some(record) = slot {
            let path = self.path(name);
            self.nested(path, self.depth, record)?;
        }
        Ok(())
    }

    fn records<R: Record>(&mut self, name: &'static str, slot: &mut Vec<R>) -> Result<()> {
        let path = self.path(name);
        for (i, record) in slot.iter_mut().enumerate() {
            self.nested(join(&path, i), self.depth, record)?;
        }
        Ok(())
    }

    fn node<N: Node>(&mut self, name: &'static str, slot: &mut Option<Box<N>>) -> Result<()> {
        if self.depth == 0 {
            return Ok(());
        }
        if let Some(node) = slot {
            let path = self.path(name);
            self.encode_node(&path, node.as_mut())?;
        }
        Ok(())
    }

    fn nodes<N: Node>(&mut self, name: &'static str, slot: &mut Vec<N>) -> Result<()> {
        if self.depth == 0 {
            return Ok(());
        }
        let path = self.path(name);
        for (i, node) in slot.iter_mut().enumerate() {
            self.encode_node(&join(&path, i), node)?;
        }
        Ok(())
    }
}
