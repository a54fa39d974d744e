//! Viewport layouts and screen-space tiling.

use glam::IVec2;

/// Integer rectangle in surface pixels. `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IntRect {
    pub const ZERO: IntRect = IntRect::new(0, 0, 0, 0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width(), self.height())
    }

    pub fn is_zero_size(&self) -> bool {
        self.width() == 0 && self.height() == 0
    }

    /// Half-open containment: left/top inclusive, right/bottom exclusive.
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

/// Arrangement of viewports on the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewportLayout {
    Empty,
    #[default]
    Single,
    Vertical,
    Horizontal,
    Quad,
    Top1Bottom2,
    Top2Bottom1,
    Left1Right2,
    Left2Right1,
}

const LAYOUT_COUNT: usize = 9;

/// Largest number of viewports any layout holds.
pub const MAX_VIEWPORTS: usize = 4;
static_assertions::const_assert_eq!(ViewportLayout::Quad.viewport_count(), MAX_VIEWPORTS);

impl ViewportLayout {
    pub const ALL: [ViewportLayout; LAYOUT_COUNT] = [
        ViewportLayout::Empty,
        ViewportLayout::Single,
        ViewportLayout::Vertical,
        ViewportLayout::Horizontal,
        ViewportLayout::Quad,
        ViewportLayout::Top1Bottom2,
        ViewportLayout::Top2Bottom1,
        ViewportLayout::Left1Right2,
        ViewportLayout::Left2Right1,
    ];

    /// Number of viewports the layout holds.
    pub const fn viewport_count(self) -> usize {
        match self {
            ViewportLayout::Empty => 0,
            ViewportLayout::Single => 1,
            ViewportLayout::Vertical | ViewportLayout::Horizontal => 2,
            ViewportLayout::Quad => 4,
            ViewportLayout::Top1Bottom2
            | ViewportLayout::Top2Bottom1
            | ViewportLayout::Left1Right2
            | ViewportLayout::Left2Right1 => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewportLayout::Empty => "Empty",
            ViewportLayout::Single => "Single",
            ViewportLayout::Vertical => "Vertical",
            ViewportLayout::Horizontal => "Horizontal",
            ViewportLayout::Quad => "Quad",
            ViewportLayout::Top1Bottom2 => "Top1_Bottom2",
            ViewportLayout::Top2Bottom1 => "Top2_Bottom1",
            ViewportLayout::Left1Right2 => "Left1_Right2",
            ViewportLayout::Left2Right1 => "Left2_Right1",
        }
    }

    /// Split a `width` x `height` surface into this layout's rectangles.
    ///
    /// Halves are `n / 2`; the right and bottom halves absorb an odd pixel.
    /// Rectangles tile the surface exactly.
    pub fn tile(self, width: i32, height: i32) -> Vec<IntRect> {
        let (w, h) = (width.max(0), height.max(0));
        let (hw, hh) = (w / 2, h / 2);

        let full = IntRect::new(0, 0, w, h);
        let left = IntRect::new(0, 0, hw, h);
        let right = IntRect::new(hw, 0, w, h);
        let top = IntRect::new(0, 0, w, hh);
        let bottom = IntRect::new(0, hh, w, h);
        let top_left = IntRect::new(0, 0, hw, hh);
        let top_right = IntRect::new(hw, 0, w, hh);
        let bottom_left = IntRect::new(0, hh, hw, h);
        let bottom_right = IntRect::new(hw, hh, w, h);

        match self {
            ViewportLayout::Empty => Vec::new(),
            ViewportLayout::Single => vec![full],
            ViewportLayout::Vertical => vec![left, right],
            ViewportLayout::Horizontal => vec![top, bottom],
            ViewportLayout::Quad => vec![top_left, top_right, bottom_left, bottom_right],
            ViewportLayout::Top1Bottom2 => vec![top, bottom_left, bottom_right],
            ViewportLayout::Top2Bottom1 => vec![top_left, top_right, bottom],
            ViewportLayout::Left1Right2 => vec![left, top_right, bottom_right],
            ViewportLayout::Left2Right1 => vec![top_left, bottom_left, right],
        }
    }
}
