use crate::foundation::core::{Insets, Rgba8, Size, Vec2};
use crate::foundation::error::{ScrubError, ScrubResult};
use std::fmt;

/// Interpolation contract for animated values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

impl Lerp for Insets {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Insets::new(
            <f64 as Lerp>::lerp(&a.x0, &b.x0, t),
            <f64 as Lerp>::lerp(&a.y0, &b.y0, t),
            <f64 as Lerp>::lerp(&a.x1, &b.x1, t),
            <f64 as Lerp>::lerp(&a.y1, &b.y1, t),
        )
    }
}

/// Animatable presentation property of an element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// Element opacity in `[0, 1]`.
    Opacity,
    /// Horizontal translation in px.
    TranslateX,
    /// Vertical translation in px.
    TranslateY,
    /// 2D translation in px.
    Translate,
    /// Uniform scale factor.
    Scale,
    /// Rotation in degrees.
    Rotate,
    /// Foreground color.
    Color,
    /// Background color.
    BackgroundColor,
    /// Rectangular clip inset in px (`x0` left, `y0` top, `x1` right, `y1` bottom).
    ClipInset,
}

impl PropertyKind {
    /// Value kind accepted by this property.
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Opacity | Self::TranslateX | Self::TranslateY | Self::Scale | Self::Rotate => {
                ValueKind::Scalar
            }
            Self::Translate => ValueKind::Vec2,
            Self::Color | Self::BackgroundColor => ValueKind::Color,
            Self::ClipInset => ValueKind::Inset,
        }
    }

    /// Stable snake_case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::TranslateX => "translate_x",
            Self::TranslateY => "translate_y",
            Self::Translate => "translate",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::Color => "color",
            Self::BackgroundColor => "background_color",
            Self::ClipInset => "clip_inset",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Single number.
    Scalar,
    /// 2D vector.
    Vec2,
    /// RGBA8 color.
    Color,
    /// Rectangular inset.
    Inset,
}

/// Concrete presentation value written to an element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Single number.
    Scalar(f64),
    /// 2D vector.
    Vec2(Vec2),
    /// RGBA8 color.
    Color(Rgba8),
    /// Rectangular inset.
    Inset(Insets),
}

impl Value {
    /// Shape of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Vec2(_) => ValueKind::Vec2,
            Self::Color(_) => ValueKind::Color,
            Self::Inset(_) => ValueKind::Inset,
        }
    }

    /// Return the scalar payload, if any.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Return `true` when every numeric component is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Scalar(v) => v.is_finite(),
            Self::Vec2(v) => v.is_finite(),
            Self::Color(_) => true,
            Self::Inset(i) => [i.x0, i.y0, i.x1, i.y1].iter().all(|v| v.is_finite()),
        }
    }

    /// Interpolate between two values of the same kind.
    ///
    /// Mismatched kinds are rejected when a timeline is built, so a mismatch here holds `a`.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(<f64 as Lerp>::lerp(a, b, t)),
            (Self::Vec2(a), Self::Vec2(b)) => Self::Vec2(<Vec2 as Lerp>::lerp(a, b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(<Rgba8 as Lerp>::lerp(a, b, t)),
            (Self::Inset(a), Self::Inset(b)) => Self::Inset(<Insets as Lerp>::lerp(a, b, t)),
            _ => *a,
        }
    }
}

/// Length in px or relative to the viewport.
///
/// Serialized as a bare number (px) or `{"vw": n}` / `{"vh": n}` (percent of viewport).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Length {
    /// Absolute px.
    Px(f64),
    /// Percent of viewport width.
    Vw {
        /// Percentage.
        vw: f64,
    },
    /// Percent of viewport height.
    Vh {
        /// Percentage.
        vh: f64,
    },
}

impl Length {
    /// Resolve to px against a viewport size.
    pub fn resolve(self, viewport: Size) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Vw { vw } => vw / 100.0 * viewport.width,
            Self::Vh { vh } => vh / 100.0 * viewport.height,
        }
    }
}

impl From<f64> for Length {
    fn from(v: f64) -> Self {
        Self::Px(v)
    }
}

/// Declarative inset, one [`Length`] per edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InsetDef {
    /// Top edge.
    #[serde(default = "zero")]
    pub top: Length,
    /// Right edge.
    #[serde(default = "zero")]
    pub right: Length,
    /// Bottom edge.
    #[serde(default = "zero")]
    pub bottom: Length,
    /// Left edge.
    #[serde(default = "zero")]
    pub left: Length,
}

fn zero() -> Length {
    Length::Px(0.0)
}

/// Declarative value, possibly viewport-relative, resolved when a timeline is built.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueDef {
    /// Single number or length.
    Scalar(Length),
    /// 2D vector as `[x, y]`.
    Vec2([Length; 2]),
    /// RGBA8 color.
    Color(Rgba8),
    /// Rectangular inset.
    Inset(InsetDef),
}

impl ValueDef {
    /// Resolve to a concrete [`Value`] for the given viewport size.
    pub fn resolve(&self, viewport: Size) -> ScrubResult<Value> {
        let v = match *self {
            Self::Scalar(l) => Value::Scalar(l.resolve(viewport)),
            Self::Vec2([x, y]) => Value::Vec2(Vec2::new(x.resolve(viewport), y.resolve(viewport))),
            Self::Color(c) => Value::Color(c),
            Self::Inset(i) => Value::Inset(Insets::new(
                i.left.resolve(viewport),
                i.top.resolve(viewport),
                i.right.resolve(viewport),
                i.bottom.resolve(viewport),
            )),
        };
        if !v.is_finite() {
            return Err(ScrubError::configuration(format!(
                "value {self:?} resolves to a non-finite number"
            )));
        }
        Ok(v)
    }
}

impl From<f64> for ValueDef {
    fn from(v: f64) -> Self {
        Self::Scalar(Length::Px(v))
    }
}

impl From<Rgba8> for ValueDef {
    fn from(c: Rgba8) -> Self {
        Self::Color(c)
    }
}

impl From<Value> for ValueDef {
    fn from(v: Value) -> Self {
        match v {
            Value::Scalar(s) => Self::Scalar(Length::Px(s)),
            Value::Vec2(v) => Self::Vec2([Length::Px(v.x), Length::Px(v.y)]),
            Value::Color(c) => Self::Color(c),
            Value::Inset(i) => Self::Inset(InsetDef {
                top: Length::Px(i.y0),
                right: Length::Px(i.x1),
                bottom: Length::Px(i.y1),
                left: Length::Px(i.x0),
            }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
