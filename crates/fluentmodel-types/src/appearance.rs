//! Conditional-appearance rule and its field value types.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use std::fmt;

/// Item-type filter the rule starts with when nothing is accumulated.
pub const DEFAULT_ITEM_TYPE: &str = "ViewItem";

/// Context filter the rule starts with when nothing is accumulated.
pub const DEFAULT_CONTEXT: &str = "Any";

/// A conditional-appearance rule attached to a member descriptor.
///
/// The multi-valued filters (`appearance_item_type`, `context`,
/// `target_items`) hold `;`-joined token lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceRule {
    pub id: String,
    pub criteria: Option<String>,
    pub priority: i32,
    pub font_color: Option<String>,
    pub back_color: Option<String>,
    pub font_style: Option<FontStyle>,
    pub visibility: Option<ViewItemVisibility>,
    pub enabled: Option<bool>,
    pub appearance_item_type: String,
    pub context: String,
    pub target_items: Option<String>,
}

impl AppearanceRule {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            criteria: None,
            priority: 0,
            font_color: None,
            back_color: None,
            font_style: None,
            visibility: None,
            enabled: None,
            appearance_item_type: DEFAULT_ITEM_TYPE.to_string(),
            context: DEFAULT_CONTEXT.to_string(),
            target_items: None,
        }
    }
}

impl Default for AppearanceRule {
    fn default() -> Self {
        Self::new(String::new())
    }
}

bitflags! {
    /// Font style flags; the empty set is the regular style.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct FontStyle: u8 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKEOUT = 1 << 3;
    }
}

impl FontStyle {
    pub const REGULAR: FontStyle = FontStyle::empty();
}

/// How a view item governed by a rule is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewItemVisibility {
    Show,
    Hide,
    ShowEmptySpace,
}

/// Built-in item-type filter tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppearanceItemType {
    ViewItem,
    LayoutItem,
    Action,
}

impl fmt::Display for AppearanceItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppearanceItemType::ViewItem => write!(f, "ViewItem"),
            AppearanceItemType::LayoutItem => write!(f, "LayoutItem"),
            AppearanceItemType::Action => write!(f, "Action"),
        }
    }
}

/// Built-in context filter tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    Any,
    DetailView,
    ListView,
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewType::Any => write!(f, "Any"),
            ViewType::DetailView => write!(f, "DetailView"),
            ViewType::ListView => write!(f, "ListView"),
        }
    }
}

/// A color as written into a rule's font/back color fields.
///
/// Named colors render as their name, RGB colors as `"r, g, b"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    Named(String),
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub fn named(name: impl Into<String>) -> Self {
        Color::Named(name.into())
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(name) => write!(f, "{name}"),
            Color::Rgb { r, g, b } => write!(f, "{r}, {g}, {b}"),
        }
    }
}
