//! Value types carried by scene nodes: geometry, colors, paints, effects and typography.

use glam::DVec2;
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Round a value to the nearest 0.01.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Normalize negative zero so it never prints as "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a number rounded to 0.01 without trailing zeros (`12.5`, `16`, `0.33`).
pub fn format_number(value: f64) -> String {
    let rounded = round2(value);
    let text = format!("{:.2}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

/// Axis-aligned bounding box in absolute document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rect with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner.
    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Width and height as a vector.
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Origin offset of this rect relative to `parent`'s origin.
    pub fn offset_from(&self, parent: &Rect) -> DVec2 {
        self.origin() - parent.origin()
    }
}

/// An RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply the alpha channel by `opacity`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: (self.a * opacity).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Composite `self` over `dst` using standard source-over alpha blending.
    pub fn over(self, dst: Color) -> Color {
        let sa = self.a.clamp(0.0, 1.0);
        let da = dst.a.clamp(0.0, 1.0);
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Color::TRANSPARENT;
        }
        let channel = |s: f64, d: f64| (s * sa + d * da * (1.0 - sa)) / out_a;
        Color {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: out_a,
        }
    }

    /// Convert to 8-bit RGBA tuple.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (byte(self.r), byte(self.g), byte(self.b), byte(self.a))
    }

    /// Convert to hex string (e.g., "#FF5733"), alpha ignored.
    pub fn to_hex(&self) -> String {
        let (r, g, b, _) = self.to_rgba8();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// CSS color value: `#RRGGBB` when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        let alpha = round2(self.a.clamp(0.0, 1.0));
        if alpha >= 1.0 {
            self.to_hex()
        } else {
            let (r, g, b, _) = self.to_rgba8();
            format!("rgba({}, {}, {}, {})", r, g, b, format_number(alpha))
        }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Layer blend mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlendMode {
    #[default]
    PassThrough,
    Normal,
    Darken,
    Multiply,
    LinearBurn,
    ColorBurn,
    Lighten,
    Screen,
    LinearDodge,
    ColorDodge,
    Overlay,
    SoftLight,
    HardLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// Parse a document blend-mode tag such as `MULTIPLY`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "PASS_THROUGH" => Self::PassThrough,
            "NORMAL" => Self::Normal,
            "DARKEN" => Self::Darken,
            "MULTIPLY" => Self::Multiply,
            "LINEAR_BURN" => Self::LinearBurn,
            "COLOR_BURN" => Self::ColorBurn,
            "LIGHTEN" => Self::Lighten,
            "SCREEN" => Self::Screen,
            "LINEAR_DODGE" => Self::LinearDodge,
            "COLOR_DODGE" => Self::ColorDodge,
            "OVERLAY" => Self::Overlay,
            "SOFT_LIGHT" => Self::SoftLight,
            "HARD_LIGHT" => Self::HardLight,
            "DIFFERENCE" => Self::Difference,
            "EXCLUSION" => Self::Exclusion,
            "HUE" => Self::Hue,
            "SATURATION" => Self::Saturation,
            "COLOR" => Self::Color,
            "LUMINOSITY" => Self::Luminosity,
            _ => return None,
        })
    }

    /// The `mix-blend-mode` keyword, or `None` for modes that need no declaration.
    ///
    /// Linear burn/dodge have no CSS equivalent and map to their nearest relative.
    pub fn css_keyword(&self) -> Option<&'static str> {
        match self {
            Self::PassThrough | Self::Normal => None,
            Self::Darken => Some("darken"),
            Self::Multiply => Some("multiply"),
            Self::LinearBurn | Self::ColorBurn => Some("color-burn"),
            Self::Lighten => Some("lighten"),
            Self::Screen => Some("screen"),
            Self::LinearDodge | Self::ColorDodge => Some("color-dodge"),
            Self::Overlay => Some("overlay"),
            Self::SoftLight => Some("soft-light"),
            Self::HardLight => Some("hard-light"),
            Self::Difference => Some("difference"),
            Self::Exclusion => Some("exclusion"),
            Self::Hue => Some("hue"),
            Self::Saturation => Some("saturation"),
            Self::Color => Some("color"),
            Self::Luminosity => Some("luminosity"),
        }
    }
}

/// A gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientStop {
    /// Position along the gradient, `0.0..=1.0`
    pub position: f64,
    pub color: Color,
}

/// Gradient geometry family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GradientKind {
    Linear,
    Radial,
    Angular,
    Diamond,
}

/// A gradient paint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gradient {
    pub kind: GradientKind,
    /// Color stops in document order (never re-sorted)
    pub stops: Vec<GradientStop>,
    /// Handle positions in normalized node space (y down)
    pub handles: SmallVec<[DVec2; 3]>,
}

impl Gradient {
    /// Whether stop positions never decrease.
    pub fn is_monotone(&self) -> bool {
        self.stops
            .windows(2)
            .all(|pair| pair[0].position <= pair[1].position)
    }
}

/// How an image paint is scaled into its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleMode {
    #[default]
    Fill,
    Fit,
    Crop,
    Tile,
}

impl ScaleMode {
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "FILL" => Self::Fill,
            "FIT" => Self::Fit,
            "CROP" => Self::Crop,
            "TILE" => Self::Tile,
            _ => return None,
        })
    }
}

/// What a paint draws.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaintKind {
    Solid(Color),
    Gradient(Gradient),
    Image {
        reference: String,
        scale_mode: ScaleMode,
    },
    /// A paint type the compiler does not know how to map.
    Unsupported(String),
}

/// A fill or stroke entry. Lists of paints stack bottom-to-top.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paint {
    pub kind: PaintKind,
    pub opacity: f64,
    pub visible: bool,
}

impl Paint {
    /// A visible, fully opaque solid paint.
    pub fn solid(color: Color) -> Self {
        Self {
            kind: PaintKind::Solid(color),
            opacity: 1.0,
            visible: true,
        }
    }

    /// Set the paint opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn is_solid(&self) -> bool {
        matches!(self.kind, PaintKind::Solid(_))
    }
}

/// Shadow parameters shared by drop and inner shadows.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shadow {
    pub color: Color,
    pub offset: DVec2,
    pub radius: f64,
    pub spread: f64,
}

/// A visual effect.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    DropShadow(Shadow),
    InnerShadow(Shadow),
    LayerBlur { radius: f64 },
    BackgroundBlur { radius: f64 },
    /// An effect type the compiler does not know how to map.
    Unsupported(String),
}

/// An effect entry, in document order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    pub visible: bool,
}

/// Corner rounding of a frame or shape.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CornerRadius {
    Uniform(f64),
    /// Top-left, top-right, bottom-right, bottom-left
    PerCorner([f64; 4]),
}

impl CornerRadius {
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Uniform(r) => *r == 0.0,
            Self::PerCorner(radii) => radii.iter().all(|r| *r == 0.0),
        }
    }
}

impl Default for CornerRadius {
    fn default() -> Self {
        Self::Uniform(0.0)
    }
}

/// Auto-layout direction of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Per-axis sizing behavior of an auto-layout frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizingMode {
    #[default]
    Fixed,
    Auto,
}

/// Distribution of children along the layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimaryAlign {
    #[default]
    Min,
    Center,
    Max,
    SpaceBetween,
}

/// Alignment of children on the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CounterAlign {
    #[default]
    Min,
    Center,
    Max,
    Baseline,
}

/// Padding on all sides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Create uniform padding.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.right == self.bottom && self.bottom == self.left
    }

    pub fn is_zero(&self) -> bool {
        self.is_uniform() && self.top == 0.0
    }
}

/// Line height of a text style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineHeight {
    #[default]
    Normal,
    Px(f64),
    /// Percentage of the font size
    Percent(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAlignHorizontal {
    #[default]
    Left,
    Right,
    Center,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAlignVertical {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

/// A fully specified text style.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    pub font_family: String,
    pub font_weight: f64,
    pub font_size: f64,
    pub line_height: LineHeight,
    pub letter_spacing: f64,
    pub italic: bool,
    pub align_horizontal: TextAlignHorizontal,
    pub align_vertical: TextAlignVertical,
    pub case: TextCase,
    pub decoration: TextDecoration,
}

impl TextStyle {
    /// Create a style with the required font fields and every other field defaulted.
    pub fn new(font_family: impl Into<String>, font_weight: f64, font_size: f64) -> Self {
        Self {
            font_family: font_family.into(),
            font_weight,
            font_size,
            line_height: LineHeight::default(),
            letter_spacing: 0.0,
            italic: false,
            align_horizontal: TextAlignHorizontal::default(),
            align_vertical: TextAlignVertical::default(),
            case: TextCase::default(),
            decoration: TextDecoration::default(),
        }
    }

    /// Layer an override on top of this style.
    pub fn apply(&self, over: &TextStyleOverride) -> TextStyle {
        TextStyle {
            font_family: over
                .font_family
                .clone()
                .unwrap_or_else(|| self.font_family.clone()),
            font_weight: over.font_weight.unwrap_or(self.font_weight),
            font_size: over.font_size.unwrap_or(self.font_size),
            line_height: over.line_height.unwrap_or(self.line_height),
            letter_spacing: over.letter_spacing.unwrap_or(self.letter_spacing),
            italic: over.italic.unwrap_or(self.italic),
            align_horizontal: self.align_horizontal,
            align_vertical: self.align_vertical,
            case: over.case.unwrap_or(self.case),
            decoration: over.decoration.unwrap_or(self.decoration),
        }
    }
}

/// A partial text style applied to a character range.
///
/// Paragraph-level alignment cannot be overridden per range.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyleOverride {
    pub font_family: Option<String>,
    pub font_weight: Option<f64>,
    pub font_size: Option<f64>,
    pub line_height: Option<LineHeight>,
    pub letter_spacing: Option<f64>,
    pub italic: Option<bool>,
    pub case: Option<TextCase>,
    pub decoration: Option<TextDecoration>,
    /// Replacement fills for the range
    pub fills: Option<Vec<Paint>>,
}

/// An explicit, possibly overlapping, style range over character indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleRange {
    pub start: usize,
    pub end: usize,
    pub style_id: u32,
}

/// Style override table keyed by style id. Id 0 is the base style.
pub type OverrideTable = IndexMap<u32, TextStyleOverride>;
