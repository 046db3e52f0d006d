use std::collections::HashMap;

use serde_derive::Serialize;

use super::BaseColor;

/// Descriptive psychology metadata for a base color bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPsychology {
    pub mood: &'static str,
    pub meanings: &'static [&'static str],
    pub common_uses: &'static [&'static str],
}

lazy_static::lazy_static! {
    static ref PSYCHOLOGY: HashMap<BaseColor, ColorPsychology> = {
        let mut table = HashMap::new();

        table.insert(BaseColor::Black, ColorPsychology {
            mood: "Sophisticated",
            meanings: &["Elegance", "Power", "Mystery", "Formality"],
            common_uses: &["Luxury branding", "Formal wear", "High-end electronics"],
        });
        table.insert(BaseColor::White, ColorPsychology {
            mood: "Pure",
            meanings: &["Cleanliness", "Simplicity", "Innocence", "Clarity"],
            common_uses: &["Healthcare", "Minimalist design", "Weddings"],
        });
        table.insert(BaseColor::Gray, ColorPsychology {
            mood: "Neutral",
            meanings: &["Balance", "Practicality", "Professionalism", "Calm"],
            common_uses: &["Corporate identity", "Industrial design", "Backgrounds"],
        });
        table.insert(BaseColor::Red, ColorPsychology {
            mood: "Energetic",
            meanings: &["Passion", "Urgency", "Strength", "Excitement"],
            common_uses: &["Warnings", "Food branding", "Sales and clearance"],
        });
        table.insert(BaseColor::Orange, ColorPsychology {
            mood: "Playful",
            meanings: &["Enthusiasm", "Creativity", "Warmth", "Adventure"],
            common_uses: &["Calls to action", "Sports teams", "Children's products"],
        });
        table.insert(BaseColor::Yellow, ColorPsychology {
            mood: "Cheerful",
            meanings: &["Optimism", "Happiness", "Attention", "Caution"],
            common_uses: &["Road signage", "Discount retail", "Summer campaigns"],
        });
        table.insert(BaseColor::Green, ColorPsychology {
            mood: "Refreshing",
            meanings: &["Nature", "Growth", "Health", "Prosperity"],
            common_uses: &["Environmental causes", "Finance", "Organic products"],
        });
        table.insert(BaseColor::Teal, ColorPsychology {
            mood: "Serene",
            meanings: &["Clarity", "Renewal", "Open communication", "Balance"],
            common_uses: &["Medical apps", "Spas and wellness", "Tech startups"],
        });
        table.insert(BaseColor::Blue, ColorPsychology {
            mood: "Calm",
            meanings: &["Trust", "Stability", "Intelligence", "Serenity"],
            common_uses: &["Banking", "Social networks", "Corporate software"],
        });
        table.insert(BaseColor::Purple, ColorPsychology {
            mood: "Imaginative",
            meanings: &["Royalty", "Luxury", "Spirituality", "Creativity"],
            common_uses: &["Beauty products", "Premium services", "Fantasy media"],
        });
        table.insert(BaseColor::Pink, ColorPsychology {
            mood: "Tender",
            meanings: &["Compassion", "Playfulness", "Romance", "Sweetness"],
            common_uses: &["Cosmetics", "Confectionery", "Charity campaigns"],
        });
        table.insert(BaseColor::Unknown, ColorPsychology {
            mood: "Ambiguous",
            meanings: &["Complexity", "Individuality"],
            common_uses: &["Experimental art", "Abstract design"],
        });

        table
    };
}

impl BaseColor {
    /// Psychology metadata for this bucket
    ///
    /// The table covers every variant, which `psychology_table_is_total`
    /// asserts, so the lookup cannot miss.
    pub fn psychology(self) -> &'static ColorPsychology {
        &PSYCHOLOGY[&self]
    }
}
