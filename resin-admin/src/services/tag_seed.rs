//! Default tag catalog
//!
//! Seeding is "create if the name is absent": existing tags, even edited or
//! deactivated ones, are never touched.

use serde::Serialize;
use shared::models::TagCreate;

/// One entry of a seed list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSeed {
    pub name: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

impl TagSeed {
    const fn new(name: &'static str, color: &'static str, description: &'static str) -> Self {
        Self {
            name,
            color,
            description,
        }
    }

    pub fn to_create(&self) -> TagCreate {
        TagCreate::new(self.name)
            .color(self.color)
            .description(self.description)
    }
}

/// Outcome of a seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub created: usize,
    pub existing: usize,
}

pub const DEFAULT_TAGS: &[TagSeed] = &[
    // General
    TagSeed::new("Handmade", "#10B981", "Handcrafted with care"),
    TagSeed::new("Custom", "#F59E0B", "Customizable products"),
    TagSeed::new("Gift", "#EF4444", "Perfect for gifting"),
    TagSeed::new("Popular", "#8B5CF6", "Trending items"),
    TagSeed::new("Limited Edition", "#EC4899", "Limited availability"),
    TagSeed::new("Eco-Friendly", "#22C55E", "Environmentally conscious"),
    TagSeed::new("Personalized", "#3B82F6", "Can be personalized"),
    TagSeed::new("Vintage Style", "#A855F7", "Classic vintage look"),
    TagSeed::new("Modern", "#06B6D4", "Contemporary design"),
    TagSeed::new("Artisan Made", "#F97316", "Crafted by skilled artisans"),
    // Occasions
    TagSeed::new("Wedding", "#FF6B9D", "Perfect for wedding ceremonies and celebrations"),
    TagSeed::new("Birthday", "#FFD93D", "Great for birthday gifts and parties"),
    TagSeed::new("Festivals", "#6BCF7F", "Ideal for festival decorations and gifts"),
    TagSeed::new("Romantic", "#E91E63", "Perfect for romantic occasions and gifts"),
    // Display types
    TagSeed::new("Wall", "#8E44AD", "Wall-mounted display items"),
    TagSeed::new("Desk", "#3498DB", "Desktop and tabletop items"),
    TagSeed::new("Geode", "#95A5A6", "Geode-inspired designs"),
    TagSeed::new("Theme", "#FF6B35", "Themed decorative items"),
    // Customization
    TagSeed::new("Name", "#2ECC71", "Personalized with names"),
    TagSeed::new("Messages", "#F39C12", "Custom messages and text"),
    TagSeed::new("Photo", "#E74C3C", "Photo embedding and preservation"),
    TagSeed::new("Made-to-Order", "#9B59B6", "Custom made-to-order items"),
    TagSeed::new("Glitter", "#F1C40F", "Glitter and sparkle effects"),
    TagSeed::new("Pressed-Flower", "#1ABC9C", "Real pressed flowers preserved in resin"),
    TagSeed::new("Shapes", "#E67E22", "Various shapes and forms"),
    TagSeed::new("Themes", "#34495E", "Themed designs and concepts"),
    // Jewelry
    TagSeed::new("Earrings", "#FF4081", "Earring jewelry pieces"),
    TagSeed::new("Pendants", "#7C4DFF", "Pendant necklaces"),
    TagSeed::new("Bracelets", "#00BCD4", "Bracelet jewelry"),
    TagSeed::new("Bangles", "#4CAF50", "Bangle bracelets"),
    TagSeed::new("Rings", "#FFC107", "Ring jewelry"),
    TagSeed::new("Brooches", "#9C27B0", "Decorative brooches and pins"),
    TagSeed::new("Hair-Accessories", "#FF9800", "Hair clips, bands, and accessories"),
    TagSeed::new("Sets", "#607D8B", "Jewelry sets and collections"),
    // Decor
    TagSeed::new("Decor", "#8BC34A", "Decorative items for home and office"),
    TagSeed::new("Serving", "#CDDC39", "Serving trays and functional items"),
    TagSeed::new("Ocean", "#03A9F4", "Ocean and sea-themed designs"),
];
