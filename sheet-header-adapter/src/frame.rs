use sheet_header::{HeaderLayout, HeaderPaint};

/// What the host should draw for the overlay this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayFrame {
    pub opacity: f64,
    pub accepts_input: bool,
}

/// Everything a host needs to render one frame of the sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetFrame {
    pub scroll_offset: f64,
    /// Published progress, after this frame's deferred tasks ran.
    pub progress: f64,
    pub layout: HeaderLayout,
    pub paint: HeaderPaint,
    /// `None` while the header is fully compact.
    pub overlay: Option<OverlayFrame>,
    /// Height of the filler masking the gap below content during bottom overscroll.
    pub fill_height: f64,
    pub dismissed: bool,
}
