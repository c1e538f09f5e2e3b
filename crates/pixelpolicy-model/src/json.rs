//! Canonical JSON document codec.
//!
//! The document form uses camelCase field names, a discriminator key per
//! tagged union (`"transformation"` for both transformation families,
//! `"type"` for images, none for shapes) and the two-slot
//! `{"name": .., "value": ..}` object for every [`ScalarVariable`].
//!
//! Decoding is lenient where the document form is ambiguous in practice:
//! `null` is the same as absent, unknown keys are ignored, a bare literal
//! is accepted wherever a ScalarVariable is expected, and a tagged-union
//! node may also be written externally tagged (`{"maxColors": {...}}`).
//! Error paths are JSON pointers into the input document.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::policy::Policy;
use crate::scalar::{Scalar, ScalarVariable};
use crate::visit::{camel_case, FieldVisitor, Fields, Node, Record};

/// Parse a JSON document into a policy.
pub fn decode_json(doc: &str) -> Result<Policy> {
    let value: Value = serde_json::from_str(doc)?;
    policy_from_value(&value)
}

/// Render a policy as a compact JSON document.
pub fn encode_json(policy: &Policy) -> Result<String> {
    Ok(policy_to_value(policy)?.to_string())
}

/// Render a policy as an indented JSON document.
pub fn encode_json_pretty(policy: &Policy) -> Result<String> {
    Ok(serde_json::to_string_pretty(&policy_to_value(policy)?)?)
}

/// Read a policy from an already parsed JSON value.
pub fn policy_from_value(value: &Value) -> Result<Policy> {
    let obj = expect_object(value, "")?;
    let mut policy = Policy::default();
    policy.visit_fields(&mut JsonDecoder::new(obj, String::new()))?;
    Ok(policy)
}

/// Render a policy as a JSON value.
pub fn policy_to_value(policy: &Policy) -> Result<Value> {
    // Visiting needs `&mut`; one clone up front covers the whole tree.
    let mut policy = policy.clone();
    encode_record(&mut policy)
}

fn expect_object<'a>(value: &'a Value, pointer: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        Error::document(format!("expected an object at '{pointer}', found {}", json_type(value)))
    })
}

fn expect_array<'a>(value: &'a Value, pointer: &str) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| {
        Error::document(format!("expected an array at '{pointer}', found {}", json_type(value)))
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Fills fields from one JSON object.
struct JsonDecoder<'a> {
    obj: &'a Map<String, Value>,
    pointer: String,
}

impl<'a> JsonDecoder<'a> {
    fn new(obj: &'a Map<String, Value>, pointer: String) -> Self {
        Self { obj, pointer }
    }

    /// The value under `name`, with `null` folded into absent.
    fn get(&self, name: &str) -> (Option<&'a Value>, String) {
        let key = camel_case(name);
        let pointer = format!("{}/{}", self.pointer, key);
        let value = self.obj.get(&key).filter(|v| !v.is_null());
        (value, pointer)
    }
}

fn parse_literal<T: Scalar>(value: &Value, pointer: &str) -> Result<T> {
    T::from_json(value).ok_or_else(|| Error::malformed(pointer, T::EXPECTED, value.to_string()))
}

fn decode_record<R: Record>(value: &Value, pointer: String) -> Result<R> {
    let obj = expect_object(value, &pointer)?;
    let mut record = R::default();
    record.visit_fields(&mut JsonDecoder::new(obj, pointer))?;
    Ok(record)
}

/// Decode one tagged-union node.
fn decode_node<N: Node>(value: &Value, pointer: String) -> Result<N> {
    let obj = expect_object(value, &pointer)?;

    if let Some(tag) = N::TAG {
        if let Some(raw) = obj.get(tag).filter(|v| !v.is_null()) {
            let api = raw.as_str().unwrap_or_default();
            let info = N::variant_by_api(api)
                .ok_or_else(|| Error::unsupported(N::KIND, format!("{pointer}/{tag}")))?;
            return build_variant(info.slot, obj, pointer);
        }
    }

    // Externally tagged: a single key naming the variant.
    if obj.len() == 1 {
        if let Some((key, inner)) = obj.iter().next() {
            if let Some(info) = N::VARIANTS.iter().find(|v| camel_case(v.slot) == *key) {
                let inner_pointer = format!("{pointer}/{key}");
                let inner_obj = expect_object(inner, &inner_pointer)?;
                return build_variant(info.slot, inner_obj, inner_pointer);
            }
        }
    }

    if N::TAG.is_none() {
        // Untagged: the first variant in probe order owning a non-null key,
        // then, for a variant written with every field empty, any key.
        let mut named = Vec::with_capacity(N::VARIANTS.len());
        for info in N::VARIANTS {
            named.push((info.slot, field_names::<N>(info.slot)?));
        }
        let owns = |names: &[String], non_null: bool| {
            names
                .iter()
                .any(|n| obj.get(n).is_some_and(|v| !(non_null && v.is_null())))
        };
        let chosen = named
            .iter()
            .find(|(_, names)| owns(names, true))
            .or_else(|| named.iter().find(|(_, names)| owns(names, false)));
        if let Some((slot, _)) = chosen {
            return build_variant(slot, obj, pointer);
        }
    }

    Err(Error::unsupported(N::KIND, pointer))
}

fn build_variant<N: Node>(slot: &str, obj: &Map<String, Value>, pointer: String) -> Result<N> {
    let mut decoder = JsonDecoder::new(obj, pointer.clone());
    N::build(slot, &mut decoder)?.ok_or_else(|| Error::unsupported(N::KIND, pointer))
}

impl FieldVisitor for JsonDecoder<'_> {
    fn scalar<T: Scalar>(
        &mut self,
        name: &'static str,
        slot: &mut Option<ScalarVariable<T>>,
    ) -> Result<()> {
        let (value, pointer) = self.get(name);
        *slot = match value {
            Some(v) => ScalarVariable::from_json(v, &pointer)?,
            None => None,
        };
        Ok(())
    }

    fn literal<T: Scalar>(&mut self, name: &'static str, slot: &mut Option<T>) -> Result<()> {
        let (value, pointer) = self.get(name);
        *slot = value.map(|v| parse_literal(v, &pointer)).transpose()?;
        Ok(())
    }

    fn required<T: Scalar>(&mut self, name: &'static str, slot: &mut T) -> Result<()> {
        let (value, pointer) = self.get(name);
        let value = value.ok_or_else(|| Error::missing(pointer.clone()))?;
        *slot = parse_literal(value, &pointer)?;
        Ok(())
    }

    fn list<T: Scalar>(&mut self, name: &'static str, slot: &mut Vec<T>) -> Result<()> {
        let (value, pointer) = self.get(name);
        slot.clear();
        if let Some(value) = value {
            for (i, item) in expect_array(value, &pointer)?.iter().enumerate() {
                slot.push(parse_literal(item, &format!("{pointer}/{i}"))?);
            }
        }
        Ok(())
    }

    fn record<R: Record>(&mut self, name: &'static str, slot: &mut Option<R>) -> Result<()> {
        let (value, pointer) = self.get(name);
        *slot = value.map(|v| decode_record(v, pointer)).transpose()?;
        Ok(())
    }

    fn records<R: Record>(&mut self, name: &'static str, slot: &mut Vec<R>) -> Result<()> {
        let (value, pointer) = self.get(name);
        slot.clear();
        if let Some(value) = value {
            for (i, item) in expect_array(value, &pointer)?.iter().enumerate() {
                slot.push(decode_record(item, format!("{pointer}/{i}"))?);
            }
        }
        Ok(())
    }

    fn node<N: Node>(&mut self, name: &'static str, slot: &mut Option<Box<N>>) -> Result<()> {
        let (value, pointer) = self.get(name);
        *slot = value
            .map(|v| decode_node(v, pointer).map(Box::new))
            .transpose()?;
        Ok(())
    }

    fn nodes<N: Node>(&mut self, name: &'static str, slot: &mut Vec<N>) -> Result<()> {
        let (value, pointer) = self.get(name);
        slot.clear();
        if let Some(value) = value {
            for (i, item) in expect_array(value, &pointer)?.iter().enumerate() {
                slot.push(decode_node(item, format!("{pointer}/{i}"))?);
            }
        }
        Ok(())
    }
}

/// The camelCase field names of the variant at `slot`.
fn field_names<N: Node>(slot: &str) -> Result<Vec<String>> {
    let mut names = FieldNames::default();
    N::build(slot, &mut names)?;
    Ok(names.0)
}

/// Collects the camelCase names of a variant's fields.
#[derive(Default)]
struct FieldNames(Vec<String>);

impl FieldNames {
    fn push(&mut self, name: &str) -> Result<()> {
        self.0.push(camel_case(name));
        Ok(())
    }
}

impl FieldVisitor for FieldNames {
    fn scalar<T: Scalar>(&mut self, name: &'static str, _: &mut Option<ScalarVariable<T>>) -> Result<()> {
        self.push(name)
    }

    fn literal<T: Scalar>(&mut self, name: &'static str, _: &mut Option<T>) -> Result<()> {
        self.push(name)
    }

    fn required<T: Scalar>(&mut self, name: &'static str, _: &mut T) -> Result<()> {
        self.push(name)
    }

    fn list<T: Scalar>(&mut self, name: &'static str, _: &mut Vec<T>) -> Result<()> {
        self.push(name)
    }

    fn record<R: Record>(&mut self, name: &'static str, _: &mut Option<R>) -> Result<()> {
        self.push(name)
    }

    fn records<R: Record>(&mut self, name: &'static str, _: &mut Vec<R>) -> Result<()> {
        self.push(name)
    }

    fn node<N: Node>(&mut self, name: &'static str, _: &mut Option<Box<N>>) -> Result<()> {
        self.push(name)
    }

    fn nodes<N: Node>(&mut self, name: &'static str, _: &mut Vec<N>) -> Result<()> {
        self.push(name)
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Writes fields into one JSON object. Empty lists and absent values are
/// omitted.
#[derive(Default)]
struct JsonEncoder {
    out: Map<String, Value>,
}

impl JsonEncoder {
    fn put(&mut self, name: &str, value: Value) -> Result<()> {
        self.out.insert(camel_case(name), value);
        Ok(())
    }
}

fn encode_record<R: Fields>(record: &mut R) -> Result<Value> {
    let mut encoder = JsonEncoder::default();
    record.visit_fields(&mut encoder)?;
    Ok(Value::Object(encoder.out))
}

fn encode_node<N: Node>(node: &mut N) -> Result<Value> {
    let mut encoder = JsonEncoder::default();
    match N::TAG {
        Some(tag) => {
            encoder
                .out
                .insert(tag.to_string(), Value::String(node.variant().api.to_string()));
            node.visit_variant(&mut encoder)?;
        }
        None => {
            node.visit_variant(&mut encoder)?;
            // Nothing else identifies an empty untagged variant, so spell
            // out its fields as nulls.
            if encoder.out.is_empty() {
                for name in field_names::<N>(node.variant().slot)? {
                    encoder.out.insert(name, Value::Null);
                }
            }
        }
    }
    Ok(Value::Object(encoder.out))
}

impl FieldVisitor for JsonEncoder {
    fn scalar<T: Scalar>(
        &mut self,
        name: &'static str,
        slot: &mut Option<ScalarVariable<T>>,
    ) -> Result<()> {
        match slot {
            Some(sv) => self.put(name, sv.to_json()),
            None => Ok(()),
        }
    }

    fn literal<T: Scalar>(&mut self, name: &'static str, slot: &mut Option<T>) -> Result<()> {
        match slot {
            Some(v) => self.put(name, v.to_json()),
            None => Ok(()),
        }
    }

    fn required<T: Scalar>(&mut self, name: &'static str, slot: &mut T) -> Result<()> {
        self.put(name, slot.to_json())
    }

    fn list<T: Scalar>(&mut self, name: &'static str, slot: &mut Vec<T>) -> Result<()> {
        if slot.is_empty() {
            return Ok(());
        }
        self.put(name, Value::Array(slot.iter().map(Scalar::to_json).collect()))
    }

    fn record<R: Record>(&mut self, name: &'static str, slot: &mut Option<R>) -> Result<()> {
        match slot {
            Some(record) => {
                let value = encode_record(record)?;
                self.put(name, value)
            }
            None => Ok(()),
        }
    }

    fn records<R: Record>(&mut self, name: &'static str, slot: &mut Vec<R>) -> Result<()> {
        if slot.is_empty() {
            return Ok(());
        }
        let items = slot.iter_mut().map(encode_record).collect::<Result<Vec<_>>>()?;
        self.put(name, Value::Array(items))
    }

    fn node<N: Node>(&mut self, name: &'static str, slot: &mut Option<Box<N>>) -> Result<()> {
        match slot {
            Some(node) => {
                let value = encode_node(node.as_mut())?;
                self.put(name, value)
            }
            None => Ok(()),
        }
    }

    fn nodes<N: Node>(&mut self, name: &'static str, slot: &mut Vec<N>) -> Result<()> {
        if slot.is_empty() {
            return Ok(());
        }
        let items = slot.iter_mut().map(encode_node).collect::<Result<Vec<_>>>()?;
        self.put(name, Value::Array(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Image, UrlImage};
    use crate::shape::{CircleShape, PointShape, PolygonShape, RectangleShape, Shape, UnionShape};
    use crate::transformation::{Composite, Crop, RegionOfInterestCrop, Transformation};
    use crate::variable::{EnumOption, Variable, VariableType};
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn encodes_discriminator_and_two_slot_scalars() {
        let policy = Policy::with_transformations(vec![Transformation::max_colors(2)]);
        let value = policy_to_value(&policy).unwrap();
        assert_eq!(
            value,
            json!({"transformations": [{"transformation": "MaxColors", "colors": {"value": 2}}]})
        );
    }

    #[test]
    fn accepts_externally_tagged_nodes() {
        let policy = decode_json(
            r#"{"transformations":[{"blur":{"sigma":{"value":5}}},{"maxColors":{"colors":{"value":3}}}]}"#,
        )
        .unwrap();
        assert_eq!(
            policy.transformations,
            vec![Transformation::blur(5.0), Transformation::max_colors(3)]
        );
    }

    #[test]
    fn bare_literals_and_nulls() {
        let policy = decode_json(
            r#"{"hosts": null, "transformations":[{"transformation":"Crop","width":300,"height":null,"gravity":{"name":"g"}}]}"#,
        )
        .unwrap();
        assert!(policy.hosts.is_empty());
        assert_matches!(&policy.transformations[0], Transformation::Crop(Crop { width, height, gravity, .. }) => {
            assert_eq!(width, &Some(ScalarVariable::literal(300)));
            assert_eq!(height, &None);
            assert_eq!(gravity, &ScalarVariable::reference("g"));
        });
    }

    #[test]
    fn images_use_type_discriminator() {
        let composite = Transformation::Composite(Composite {
            image: Some(Box::new(Image::Url(UrlImage {
                transformation: Some(Box::new(Transformation::blur(2.0))),
                url: Some(ScalarVariable::literal("https://example.com/logo.png".to_string())),
            }))),
            ..Default::default()
        });
        let policy = Policy::with_transformations(vec![composite]);
        let value = policy_to_value(&policy).unwrap();
        assert_eq!(value["transformations"][0]["image"]["type"], json!("URL"));
        assert_eq!(
            value["transformations"][0]["image"]["transformation"]["transformation"],
            json!("Blur")
        );
        assert_eq!(policy_from_value(&value).unwrap(), policy);
    }

    #[test]
    fn shapes_are_recognised_by_their_fields() {
        let crop = Transformation::RegionOfInterestCrop(RegionOfInterestCrop {
            region_of_interest: Some(Box::new(Shape::Union(UnionShape {
                shapes: vec![
                    Shape::Point(PointShape::at(1.0, 2.0)),
                    Shape::Polygon(crate::shape::PolygonShape {
                        points: vec![PointShape::at(0.0, 0.0), PointShape::at(4.0, 0.0)],
                    }),
                ],
            }))),
            ..Default::default()
        });
        let policy = Policy::with_transformations(vec![crop]);
        let value = policy_to_value(&policy).unwrap();
        let roi = &value["transformations"][0]["regionOfInterest"];
        assert!(roi.get("type").is_none());
        assert!(roi["shapes"][0].get("x").is_some());
        assert_eq!(policy_from_value(&value).unwrap(), policy);
    }

    #[test]
    fn empty_untagged_shape_is_unsupported() {
        let err = decode_json(
            r#"{"transformations":[{"transformation":"RegionOfInterestCrop","regionOfInterest":{}}]}"#,
        )
        .unwrap_err();
        assert_matches!(err, Error::UnsupportedVariant { kind: "shape", ref path } => {
            assert_eq!(path, "/transformations/0/regionOfInterest");
        });
    }

    #[test]
    fn empty_shapes_round_trip() {
        let empties = vec![
            Shape::Circle(CircleShape::default()),
            Shape::Point(PointShape::default()),
            Shape::Polygon(PolygonShape { points: vec![] }),
            Shape::Rectangle(RectangleShape::default()),
            Shape::Union(UnionShape { shapes: vec![] }),
        ];
        for shape in empties {
            let crop = Transformation::RegionOfInterestCrop(RegionOfInterestCrop {
                region_of_interest: Some(Box::new(shape)),
                ..Default::default()
            });
            let policy = Policy::with_transformations(vec![crop]);
            let doc = encode_json(&policy).unwrap();
            assert_eq!(decode_json(&doc).unwrap(), policy, "{doc}");
        }
    }

    #[test]
    fn empty_shape_spells_out_null_fields() {
        let crop = Transformation::RegionOfInterestCrop(RegionOfInterestCrop {
            region_of_interest: Some(Box::new(Shape::Union(UnionShape { shapes: vec![] }))),
            ..Default::default()
        });
        let value = policy_to_value(&Policy::with_transformations(vec![crop])).unwrap();
        assert_eq!(value["transformations"][0]["regionOfInterest"], json!({"shapes": null}));
    }

    #[test]
    fn encoding_succeeds_for_nested_policies() {
        let policy = Policy::with_transformations(vec![Transformation::compound(vec![
            Transformation::blur(1.0),
        ])]);
        let doc = encode_json(&policy).unwrap();
        let value: Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(
            value["transformations"][0]["transformations"][0],
            json!({"transformation": "Blur", "sigma": {"value": 1.0}})
        );
        assert!(encode_json_pretty(&policy).unwrap().contains('\n'));
    }

    #[test]
    fn unknown_discriminator_names_pointer() {
        let err = decode_json(r#"{"transformations":[{"transformation":"MaxColorsV9"}]}"#).unwrap_err();
        assert_eq!(
            err,
            Error::unsupported("transformation", "/transformations/0/transformation")
        );
    }

    #[test]
    fn wrong_leaf_type_is_malformed_scalar() {
        let err = decode_json(
            r#"{"transformations":[{"transformation":"Mirror","horizontal":{"value":"yes"}}]}"#,
        )
        .unwrap_err();
        assert_matches!(err, Error::MalformedScalar { expected: "boolean", ref path, .. } => {
            assert_eq!(path, "/transformations/0/horizontal/value");
        });
    }

    #[test]
    fn not_json_is_malformed_document() {
        assert_matches!(decode_json("{not json"), Err(Error::MalformedDocument(_)));
        assert_matches!(decode_json("[]"), Err(Error::MalformedDocument(_)));
    }

    #[test]
    fn variables_round_trip() {
        let mut policy = Policy::default();
        let mut var = Variable::new("fmt", VariableType::Gravity, "Center");
        var.prefix = Some("g-".into());
        var.enum_options.push(EnumOption {
            id: "c".into(),
            value: "Center".into(),
        });
        policy.variables.push(var);

        let value = policy_to_value(&policy).unwrap();
        assert_eq!(value["variables"][0]["type"], json!("gravity"));
        assert_eq!(value["variables"][0]["defaultValue"], json!("Center"));
        assert_eq!(policy_from_value(&value).unwrap(), policy);
    }

    #[test]
    fn variable_without_name_is_missing_field() {
        let err = decode_json(r#"{"variables":[{"type":"string","defaultValue":""}]}"#).unwrap_err();
        assert_eq!(err, Error::missing("/variables/0/name"));
    }
}
