//! Flat bag to policy tree.

use pixelpolicy_model::{
    Error, FieldVisitor, Fields, Node, Policy, Record, Result, Scalar, ScalarVariable,
};
use tracing::debug;

use crate::bag::{join, FlatBag};

/// Decode a policy, reading tagged-union nodes down to `depth` levels.
pub(crate) fn decode_policy(bag: &FlatBag, depth: usize) -> Result<Policy> {
    let mut policy = Policy::default();
    policy.visit_fields(&mut FlatDecoder::new(bag, String::new(), depth))?;
    Ok(policy)
}

/// Reads one record or variant whose fields live under `prefix`.
struct FlatDecoder<'a> {
    bag: &'a FlatBag,
    prefix: String,
    /// Node levels still readable below this point.
    depth: usize,
}

impl<'a> FlatDecoder<'a> {
    fn new(bag: &'a FlatBag, prefix: String, depth: usize) -> Self {
        Self { bag, prefix, depth }
    }

    fn path(&self, name: &str) -> String {
        join(&self.prefix, name)
    }
}

fn parse<T: Scalar>(raw: String, path: &str) -> Result<T> {
    match T::parse_text(&raw) {
        Some(v) => Ok(v),
        None => Err(Error::malformed(path, T::EXPECTED, raw)),
    }
}

fn decode_record<R: Record>(bag: &FlatBag, path: String, depth: usize) -> Result<R> {
    let mut record = R::default();
    record.visit_fields(&mut FlatDecoder::new(bag, path, depth))?;
    Ok(record)
}

/// Whether the node at `path` carries anything: a non-empty entry, or the
/// marker of one of its variants.
fn node_present<N: Node>(bag: &FlatBag, path: &str) -> bool {
    bag.is_populated(path)
        || N::VARIANTS
            .iter()
            .any(|info| bag.is_populated(&join(path, info.slot)))
}

/// Decode the node at `path`, which the caller has found present.
///
/// Variants are probed in declaration order and the first populated one
/// wins. A variant whose entries are all empty text is not populated.
fn decode_node<N: Node>(bag: &FlatBag, path: &str, depth: usize) -> Result<N> {
    let mut populated = N::VARIANTS
        .iter()
        .filter(|info| bag.is_populated(&join(path, info.slot)));

    let Some(chosen) = populated.next() else {
        return Err(Error::unsupported(N::KIND, unresolved_path(bag, path)));
    };

    let ignored: Vec<&str> = populated.map(|info| info.slot).collect();
    if !ignored.is_empty() {
        debug!(
            path,
            chosen = chosen.slot,
            ignored = ?ignored,
            "several {} variants populated, using the first in probe order",
            N::KIND
        );
    }

    let sub = join(path, chosen.slot);
    let mut decoder = FlatDecoder::new(bag, sub.clone(), depth - 1);
    N::build(chosen.slot, &mut decoder)?.ok_or_else(|| Error::unsupported(N::KIND, sub))
}

/// The path naming the unrecognised slot under `path`.
fn unresolved_path(bag: &FlatBag, path: &str) -> String {
    match bag.first_populated_key_under(path) {
        Some(key) => {
            let rest = &key[path.len() + 1..];
            let slot = rest.split('.').next().unwrap_or(rest);
            join(path, slot)
        }
        None => path.to_string(),
    }
}

impl FieldVisitor for FlatDecoder<'_> {
    fn scalar<T: Scalar>(
        &mut self,
        name: &'static str,
        slot: &mut Option<ScalarVariable<T>>,
    ) -> Result<()> {
        let path = self.path(name);
        let value = match self.bag.text(&path) {
            Some(raw) => Some(parse(raw, &path)?),
            None => None,
        };
        let reference = self.bag.text(&format!("{path}_var"));
        *slot = ScalarVariable::from_parts(value, reference);
        Ok(())
    }

    fn literal<T: Scalar>(&mut self, name: &'static str, slot: &mut Option<T>) -> Result<()> {
        let path = self.path(name);
        *slot = match self.bag.text(&path) {
            Some(raw) => Some(parse(raw, &path)?),
            None => None,
        };
        Ok(())
    }

    fn required<T: Scalar>(&mut self, name: &'static str, slot: &mut T) -> Result<()> {
        let path = self.path(name);
        match self.bag.get(&path) {
            Some(value) => {
                *slot = parse(value.to_text(), &path)?;
                Ok(())
            }
            None => Err(Error::missing(path)),
        }
    }

    fn list<T: Scalar>(&mut self, name: &'static str, slot: &mut Vec<T>) -> Result<()> {
        let path = self.path(name);
        slot.clear();
        for i in 0.. {
            let item = join(&path, i);
            let Some(value) = self.bag.get(&item) else {
                break;
            };
            slot.push(parse(value.to_text(), &item)?);
        }
        Ok(())
    }

    fn record<R: Record>(&mut self, name: &'static str, slot: &mut Option<R>) -> Result<()> {
        let path = self.path(name);
        *slot = if self.bag.is_populated(&path) {
            Some(decode_record(self.bag, path, self.depth)?)
        } else {
            None
        };
        Ok(())
    }

    fn records<R: Record>(&mut self, name: &'static str, slot: &mut Vec<R>) -> Result<()> {
        let path = self.path(name);
        slot.clear();
        for i in 0.. {
            let item = join(&path, i);
            if !self.bag.is_populated(&item) {
                break;
            }
            slot.push(decode_record(self.bag, item, self.depth)?);
        }
        Ok(())
    }

    fn node<N: Node>(&mut self, name: &'static str, slot: &mut Option<Box<N>>) -> Result<()> {
        let path = self.path(name);
        *slot = if self.depth > 0 && node_present::<N>(self.bag, &path) {
            Some(Box::new(decode_node(self.bag, &path, self.depth)?))
        } else {
            None
        };
        Ok(())
    }

    fn nodes<N: Node>(&mut self, name: &'static str, slot: &mut Vec<N>) -> Result<()> {
        let path = self.path(name);
        slot.clear();
        if self.depth == 0 {
            return Ok(());
        }
        for i in 0.. {
            let item = join(&path, i);
            if !node_present::<N>(self.bag, &item) {
                break;
            }
            slot.push(decode_node(self.bag, &item, self.depth)?);
        }
        Ok(())
    }
}
