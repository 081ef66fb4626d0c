/// Inquiry categories the service assigns.
///
/// Any label the service returns that is not listed here is shown as
/// [`Category::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    PropertyInfo,
    Pricing,
    Availability,
    #[default]
    General,
    Support,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Blue,
    Green,
    Yellow,
    Gray,
    Purple,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::PropertyInfo,
        Category::Pricing,
        Category::Availability,
        Category::General,
        Category::Support,
    ];

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Property Info" => Category::PropertyInfo,
            "Pricing" => Category::Pricing,
            "Availability" => Category::Availability,
            "Support" => Category::Support,
            _ => Category::General,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::PropertyInfo => "Property Info",
            Category::Pricing => "Pricing",
            Category::Availability => "Availability",
            Category::General => "General",
            Category::Support => "Support",
        }
    }

    pub fn badge_color(self) -> BadgeColor {
        match self {
            Category::PropertyInfo => BadgeColor::Blue,
            Category::Pricing => BadgeColor::Green,
            Category::Availability => BadgeColor::Yellow,
            Category::General => BadgeColor::Gray,
            Category::Support => BadgeColor::Purple,
        }
    }
}
