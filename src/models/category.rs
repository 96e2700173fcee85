/// Display label for expenses whose category reference does not resolve.
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Badge color for the uncategorized bucket.
pub const UNCATEGORIZED_COLOR: &str = "#cbd5e1";

#[derive(Debug, Clone)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
    pub color: String,
}

impl Category {
    pub fn new(name: String, color: String) -> Self {
        Self {
            id: None,
            name,
            color,
        }
    }

    /// The synthetic category that collects expenses with a dangling or
    /// absent category reference.
    pub fn uncategorized() -> Self {
        Self {
            id: None,
            name: UNCATEGORIZED_NAME.into(),
            color: UNCATEGORIZED_COLOR.into(),
        }
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id(categories: &[Category], id: i64) -> Option<&Category> {
        categories.iter().find(|c| c.id == Some(id))
    }

    /// Parse the `#RRGGBB` color into RGB components. Returns `None` for
    /// anything that isn't a 7-character hex specifier.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
