//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use pixelpolicy::model::{
    BackgroundColor, Breakpoints, CircleShape, Composite, Crop, EnumOption, FieldVisitor,
    FitAndFill, ImQuery, Image, IfOrientation, Mirror, Node, Opacity, OutputImage, PointShape,
    Policy, PostBreakpointImage, PostBreakpointTransformation, RectangleShape, Record,
    RegionOfInterestCrop, Resize, Result, Rotate, Scalar, ScalarKind, ScalarVariable, Shape,
    TextImage, Transformation, UnionShape, Variable, VariableType,
};

/// A policy touching every field kind: literals, references, defaults,
/// lists, records, nested nodes, images, shapes and both pipelines.
pub fn rich_policy() -> Policy {
    let crop = Transformation::Crop(Crop {
        allow_expansion: Some(ScalarVariable::literal(true)),
        gravity: Some(ScalarVariable::with_default("Center".to_string(), "g")),
        height: ScalarVariable::reference("h"),
        width: Some(ScalarVariable::literal(300)),
        ..Default::default()
    });

    let composite = Transformation::Composite(Composite {
        image: Some(Box::new(Image::Text(TextImage {
            size: Some(ScalarVariable::literal(12.5)),
            text: Some(ScalarVariable::literal("hello".to_string())),
            transformation: Some(Box::new(Transformation::blur(1.5))),
            ..Default::default()
        }))),
        placement: Some(ScalarVariable::literal("Over".to_string())),
        x_position: Some(ScalarVariable::literal(10)),
        ..Default::default()
    });

    let orientation = Transformation::IfOrientation(IfOrientation {
        landscape: Some(Box::new(Transformation::compound(vec![
            Transformation::max_colors(8),
            Transformation::Resize(Resize {
                resize_type: Some(ScalarVariable::literal("normal".to_string())),
                width: Some(ScalarVariable::literal(100)),
                ..Default::default()
            }),
        ]))),
        portrait: Some(Box::new(Transformation::Rotate(Rotate {
            degrees: Some(ScalarVariable::literal(90.0)),
        }))),
        ..Default::default()
    });

    let region = Transformation::RegionOfInterestCrop(RegionOfInterestCrop {
        region_of_interest: Some(Box::new(Shape::Union(UnionShape {
            shapes: vec![
                Shape::Circle(CircleShape {
                    center: Some(PointShape::at(10.0, 20.0)),
                    radius: Some(ScalarVariable::literal(5.0)),
                }),
                Shape::Rectangle(RectangleShape {
                    anchor: Some(PointShape::at(0.0, 0.0)),
                    height: Some(ScalarVariable::literal(40.0)),
                    width: Some(ScalarVariable::literal(60.0)),
                }),
            ],
        }))),
        style: Some(ScalarVariable::literal("fill".to_string())),
        width: Some(ScalarVariable::literal(50)),
        ..Default::default()
    });

    let query = Transformation::ImQuery(ImQuery {
        allowed_transformations: vec!["Resize".into(), "Crop".into()],
        query: ScalarVariable::reference("q"),
    });

    let fill = Transformation::FitAndFill(FitAndFill {
        fill_transformation: Some(Box::new(Transformation::blur(10.0))),
        height: Some(ScalarVariable::literal(200)),
        width: Some(ScalarVariable::literal(200)),
    });

    let mirror = Transformation::Mirror(Mirror {
        horizontal: Some(ScalarVariable::literal(true)),
        vertical: None,
    });

    let post = vec![
        PostBreakpointTransformation::BackgroundColor(BackgroundColor {
            color: Some(ScalarVariable::literal("#ffffff".to_string())),
        }),
        PostBreakpointTransformation::Composite(Composite {
            image: Some(Box::new(PostBreakpointImage::Box(pixelpolicy::model::BoxImage {
                color: Some(ScalarVariable::literal("#000000".to_string())),
                height: Some(ScalarVariable::literal(10)),
                width: Some(ScalarVariable::literal(20)),
                transformation: Some(Box::new(PostBreakpointTransformation::Opacity(Opacity {
                    opacity: Some(ScalarVariable::literal(0.5)),
                }))),
            }))),
            ..Default::default()
        }),
    ];

    let mut gravity = Variable::new("g", VariableType::Gravity, "Center");
    gravity.enum_options = vec![
        EnumOption {
            id: "c".into(),
            value: "Center".into(),
        },
        EnumOption {
            id: "n".into(),
            value: "North".into(),
        },
    ];
    let mut q = Variable::new("q", VariableType::String, "");
    q.prefix = Some("im=".into());

    Policy {
        breakpoints: Some(Breakpoints {
            widths: vec![320, 640, 1280],
        }),
        hosts: vec!["images.example.com".into()],
        output: Some(OutputImage {
            adaptive_quality: Some(50),
            allowed_formats: vec!["webp".into(), "avif".into()],
            perceptual_quality: Some(ScalarVariable::literal("mediumHigh".to_string())),
            prefer_modern_formats: Some(true),
            ..Default::default()
        }),
        post_breakpoint_transformations: post,
        rollout_duration: Some(3600),
        serve_stale_duration: None,
        transformations: vec![crop, composite, orientation, region, query, fill, mirror],
        variables: vec![
            Variable::new("h", VariableType::Number, "100"),
            gravity,
            q,
        ],
    }
}

/// `levels` nested compounds, the innermost holding `leaf` (if any).
pub fn compound_chain(levels: usize, leaf: Option<Transformation>) -> Transformation {
    let mut node = Transformation::compound(leaf.into_iter().collect());
    for _ in 1..levels {
        node = Transformation::compound(vec![node]);
    }
    node
}

/// The variant `slot` of `N` with every field set, nesting further nodes
/// down to `depth` levels.
///
/// Child nodes cycle through their union's variants so a single tree
/// reaches many of them.
pub fn populated<N: Node>(slot: &str, depth: usize) -> N {
    let mut filler = Populate { depth, turn: 0 };
    N::build(slot, &mut filler)
        .unwrap()
        .unwrap_or_else(|| panic!("no {} variant {slot}", N::KIND))
}

/// A literal of the slot's type. String slots take "sample" unless the type
/// rejects it (variable types do), then "number".
fn sample<T: Scalar>() -> T {
    let candidates: &[&str] = match T::KIND {
        ScalarKind::Bool => &["true"],
        ScalarKind::Integer => &["7"],
        ScalarKind::Number => &["2.5"],
        ScalarKind::String => &["sample", "number"],
    };
    candidates
        .iter()
        .find_map(|raw| T::parse_text(raw))
        .unwrap_or_else(|| panic!("no sample literal for {}", T::EXPECTED))
}

struct Populate {
    depth: usize,
    turn: usize,
}

impl Populate {
    fn fill<R: Record>(&mut self) -> Result<R> {
        let mut record = R::default();
        record.visit_fields(self)?;
        Ok(record)
    }

    fn next_node<N: Node>(&mut self) -> Result<N> {
        let info = N::VARIANTS[self.turn % N::VARIANTS.len()];
        self.turn += 1;
        let mut child = Populate {
            depth: self.depth - 1,
            turn: self.turn,
        };
        let node = N::build(info.slot, &mut child)?;
        self.turn = child.turn;
        Ok(node.unwrap_or_else(|| panic!("no {} variant {}", N::KIND, info.slot)))
    }
}

impl FieldVisitor for Populate {
    fn scalar<T: Scalar>(&mut self, _: &'static str, slot: &mut Option<ScalarVariable<T>>) -> Result<()> {
        *slot = Some(ScalarVariable::with_default(sample(), "v"));
        Ok(())
    }

    fn literal<T: Scalar>(&mut self, _: &'static str, slot: &mut Option<T>) -> Result<()> {
        *slot = Some(sample());
        Ok(())
    }

    fn required<T: Scalar>(&mut self, _: &'static str, slot: &mut T) -> Result<()> {
        *slot = sample();
        Ok(())
    }

    fn list<T: Scalar>(&mut self, _: &'static str, slot: &mut Vec<T>) -> Result<()> {
        *slot = vec![sample(), sample()];
        Ok(())
    }

    fn record<R: Record>(&mut self, _: &'static str, slot: &mut Option<R>) -> Result<()> {
        *slot = Some(self.fill()?);
        Ok(())
    }

    fn records<R: Record>(&mut self, _: &'static str, slot: &mut Vec<R>) -> Result<()> {
        *slot = vec![self.fill()?, self.fill()?];
        Ok(())
    }

    fn node<N: Node>(&mut self, _: &'static str, slot: &mut Option<Box<N>>) -> Result<()> {
        *slot = if self.depth > 0 {
            Some(Box::new(self.next_node()?))
        } else {
            None
        };
        Ok(())
    }

    fn nodes<N: Node>(&mut self, _: &'static str, slot: &mut Vec<N>) -> Result<()> {
        slot.clear();
        if self.depth > 0 {
            slot.push(self.next_node()?);
            slot.push(self.next_node()?);
        }
        Ok(())
    }
}

/// Write `content` to `name` inside `dir`, returning the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    path
}
