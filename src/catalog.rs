/// A product shown in the slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub name: &'static str,
    /// Price without the currency sign, e.g. `85,000`
    pub price: &'static str,
    pub icon: &'static str,
    pub rating: &'static str,
}

pub const CATALOG: [Product; 10] = [
    Product {
        name: "프리미엄 토트백",
        price: "85,000",
        icon: "👜",
        rating: "★★★★★ (234)",
    },
    Product {
        name: "미니 크로스백",
        price: "45,000",
        icon: "👝",
        rating: "★★★★☆ (156)",
    },
    Product {
        name: "캠퍼스 백팩",
        price: "65,000",
        icon: "🎒",
        rating: "★★★★★ (342)",
    },
    Product {
        name: "프리미엄 레더 백팩",
        price: "189,000",
        icon: "👜",
        rating: "★★★★★ (528)",
    },
    Product {
        name: "여행용 더플백",
        price: "125,000",
        icon: "🎒",
        rating: "★★★★☆ (89)",
    },
    Product {
        name: "클러치백",
        price: "35,000",
        icon: "👝",
        rating: "★★★★★ (203)",
    },
    Product {
        name: "우편배달백",
        price: "55,000",
        icon: "👜",
        rating: "★★★★☆ (167)",
    },
    Product {
        name: "백팩 미니",
        price: "39,000",
        icon: "🎒",
        rating: "★★★★★ (412)",
    },
    Product {
        name: "숄더백",
        price: "75,000",
        icon: "👜",
        rating: "★★★★☆ (278)",
    },
    Product {
        name: "핸드백",
        price: "95,000",
        icon: "👝",
        rating: "★★★★★ (521)",
    },
];

/// Rendered card text, one field per line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub icon: String,
    pub name: String,
    pub price: String,
    pub rating: String,
    /// Rendered width in columns
    pub width: usize,
}

impl Card {
    pub fn lines(&self) -> [&str; 4] {
        [
            self.icon.as_str(),
            self.name.as_str(),
            self.price.as_str(),
            self.rating.as_str(),
        ]
    }
}

/// Horizontally scrolling row of cards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub cards: Vec<Card>,
    /// Horizontal translation in columns; zero or negative
    pub translate_x: i64,
}

impl Track {
    pub fn first_card_width(&self) -> usize {
        self.cards.first().map_or(0, |card| card.width)
    }
}

/// Clears `track` and appends one card per product.
pub fn render_products(track: &mut Track, products: &[Product], card_width: usize) {
    track.cards.clear();
    track.cards.extend(products.iter().map(|product| Card {
        icon: product.icon.to_string(),
        name: product.name.to_string(),
        price: format!("₩ {}", product.price),
        rating: product.rating.to_string(),
        width: card_width,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_card_per_product() {
        let mut track = Track::default();
        render_products(&mut track, &CATALOG, 18);
        assert_eq!(track.cards.len(), 10);
        let first = &track.cards[0];
        assert_eq!(first.lines(), ["👜", "프리미엄 토트백", "₩ 85,000", "★★★★★ (234)"]);
        assert_eq!(track.first_card_width(), 18);
    }

    #[test]
    fn rendering_replaces_previous_cards() {
        let mut track = Track::default();
        render_products(&mut track, &CATALOG, 18);
        render_products(&mut track, &CATALOG[..3], 12);
        assert_eq!(track.cards.len(), 3);
        assert_eq!(track.cards[2].name, "캠퍼스 백팩");
        assert_eq!(track.first_card_width(), 12);
    }

    #[test]
    fn empty_track_measures_zero() {
        assert_eq!(Track::default().first_card_width(), 0);
    }
}
