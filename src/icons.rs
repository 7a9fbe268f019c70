//! Supported service icons.
//!
//! Services store an icon as a kebab-case name (`hand-metal`). Rendering maps
//! the name through a fixed table; anything not in the table falls back to
//! `circle`.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Icon {
    Armchair,
    Axe,
    Bed,
    Brush,
    Calendar,
    Check,
    ChevronRight,
    #[default]
    Circle,
    Clock,
    Drill,
    Droplet,
    Eraser,
    Gem,
    Hammer,
    HandMetal,
    Heart,
    Home,
    Lamp,
    Layers,
    Leaf,
    Mail,
    Package,
    PaintBucket,
    PaintRoller,
    Paintbrush,
    Palette,
    Pencil,
    Phone,
    Ruler,
    Scissors,
    Settings,
    ShieldCheck,
    Sofa,
    Sparkles,
    Star,
    Sun,
    Truck,
    Wrench,
}

const TABLE: &[(Icon, &str)] = &[
    (Icon::Armchair, "armchair"),
    (Icon::Axe, "axe"),
    (Icon::Bed, "bed"),
    (Icon::Brush, "brush"),
    (Icon::Calendar, "calendar"),
    (Icon::Check, "check"),
    (Icon::ChevronRight, "chevron-right"),
    (Icon::Circle, "circle"),
    (Icon::Clock, "clock"),
    (Icon::Drill, "drill"),
    (Icon::Droplet, "droplet"),
    (Icon::Eraser, "eraser"),
    (Icon::Gem, "gem"),
    (Icon::Hammer, "hammer"),
    (Icon::HandMetal, "hand-metal"),
    (Icon::Heart, "heart"),
    (Icon::Home, "home"),
    (Icon::Lamp, "lamp"),
    (Icon::Layers, "layers"),
    (Icon::Leaf, "leaf"),
    (Icon::Mail, "mail"),
    (Icon::Package, "package"),
    (Icon::PaintBucket, "paint-bucket"),
    (Icon::PaintRoller, "paint-roller"),
    (Icon::Paintbrush, "paintbrush"),
    (Icon::Palette, "palette"),
    (Icon::Pencil, "pencil"),
    (Icon::Phone, "phone"),
    (Icon::Ruler, "ruler"),
    (Icon::Scissors, "scissors"),
    (Icon::Settings, "settings"),
    (Icon::ShieldCheck, "shield-check"),
    (Icon::Sofa, "sofa"),
    (Icon::Sparkles, "sparkles"),
    (Icon::Star, "star"),
    (Icon::Sun, "sun"),
    (Icon::Truck, "truck"),
    (Icon::Wrench, "wrench"),
];

impl Icon {
    pub fn all() -> impl Iterator<Item = Icon> {
        TABLE.iter().map(|(icon, _)| *icon)
    }

    pub fn name(&self) -> &'static str {
        TABLE
            .iter()
            .find(|(icon, _)| icon == self)
            .map(|(_, name)| *name)
            .unwrap_or("circle")
    }

    /// Exact lookup. Accepts the kebab-case name or the glyph component name (`HandMetal`).
    pub fn parse(name: &str) -> Option<Icon> {
        let normalized = to_kebab(name.trim());
        TABLE
            .iter()
            .find(|(_, n)| *n == normalized)
            .map(|(icon, _)| *icon)
    }

    /// Lookup with the deterministic fallback used when rendering.
    pub fn resolve(name: &str) -> Icon {
        Self::parse(name).unwrap_or_default()
    }

    /// Case-insensitive substring search in table order, for the icon picker.
    pub fn search(filter: &str) -> Vec<Icon> {
        let needle = filter.trim().to_lowercase();
        TABLE
            .iter()
            .filter(|(_, name)| name.contains(needle.as_str()))
            .map(|(icon, _)| *icon)
            .collect()
    }

    /// Glyph component name, `hand-metal` -> `HandMetal`.
    pub fn component(&self) -> String {
        self.name()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect()
    }
}

fn to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower_or_digit = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower_or_digit {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else {
            out.push(c);
            prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Icon as sent to a page: the stored name plus what will actually be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedIcon {
    pub requested: String,
    pub icon: Icon,
    pub component: String,
    pub fallback: bool,
}

impl ResolvedIcon {
    pub fn new(requested: &str) -> Self {
        let parsed = Icon::parse(requested);
        let icon = parsed.unwrap_or_default();
        Self {
            requested: requested.to_string(),
            icon,
            component: icon.component(),
            fallback: parsed.is_none(),
        }
    }
}
