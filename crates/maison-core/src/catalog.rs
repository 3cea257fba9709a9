//! Read-only product catalog addressed by closed keys.

use crate::error::CatalogError;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProductKey {
    Eternel,
    Elysienne,
    Nox,
    Discovery,
}

/// Outcome of the quiz. Each variant names exactly one fragrance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultKey {
    A,
    B,
    C,
}

impl ResultKey {
    pub fn product_key(self) -> ProductKey {
        match self {
            ResultKey::A => ProductKey::Eternel,
            ResultKey::B => ProductKey::Elysienne,
            ResultKey::C => ProductKey::Nox,
        }
    }

    pub fn product(self) -> &'static Product {
        self.product_key().product()
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResultKey::A => "A",
            ResultKey::B => "B",
            ResultKey::C => "C",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notes {
    pub top: &'static str,
    pub heart: &'static str,
    pub base: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub volume: &'static str,
    pub story: &'static str,
    pub notes: Notes,
    pub accent_color: &'static str,
}

impl ProductKey {
    /// Display order of the collection.
    pub const ALL: [ProductKey; 4] = [
        ProductKey::Eternel,
        ProductKey::Elysienne,
        ProductKey::Nox,
        ProductKey::Discovery,
    ];

    pub fn product(self) -> &'static Product {
        match self {
            ProductKey::Eternel => &ETERNEL,
            ProductKey::Elysienne => &ELYSIENNE,
            ProductKey::Nox => &NOX,
            ProductKey::Discovery => &DISCOVERY,
        }
    }

    pub fn from_id(id: u32) -> Result<Self, CatalogError> {
        Self::ALL
            .into_iter()
            .find(|k| k.product().id == id)
            .ok_or(CatalogError(id))
    }
}

pub fn collection() -> impl Iterator<Item = (ProductKey, &'static Product)> {
    ProductKey::ALL.into_iter().map(|k| (k, k.product()))
}

const PRICE: &str = "$145.00";
const VOLUME: &str = "70 ml ℮ / 2.4 fl. oz.";

static ETERNEL: Product = Product {
    id: 1,
    name: "ÉTERNEL",
    tagline: "The Morning Light",
    description: "Soft, luminous, warm skin and morning light. It's delicate, intimate, and quietly captivating.",
    price: PRICE,
    volume: VOLUME,
    story: "A soft veil of musk warmed by creamy woods, Eternel rests close to the skin with quiet confidence. Clean, milky, and serene, it lingers gently, always present. A scent that feels intimate and comforting, as if it has always belonged to you.",
    notes: Notes {
        top: "Bergamot, Pear Blossom, Almond Milk",
        heart: "White iris, Jasmine Sambac, Orris Butter",
        base: "Musk, Vanilla Bean, Cashmere Wood, Tonka",
    },
    accent_color: "#C5A059",
};

static ELYSIENNE: Product = Product {
    id: 2,
    name: "ÉLYSIENNE",
    tagline: "The Graceful Bloom",
    description: "Balanced, elegant, and serene. It's smooth, refined, and a graceful rose scent.",
    price: PRICE,
    volume: VOLUME,
    story: "Rose takes on a lighter touch in Elysienne. Fresh, tender, and effortlessly graceful. Subtle sweetness lifts the floral heart, while a smooth musky warmth settles beneath, creating a scent that feels delicate and romantic.",
    notes: Notes {
        top: "Lychee, Pink Pepper, Raspberry",
        heart: "Rose de Mai, Peony, Violet",
        base: "Creamy Sandalwood, Musk, White Amber",
    },
    accent_color: "#D4AF37",
};

static NOX: Product = Product {
    id: 3,
    name: "NOX",
    tagline: "The Midnight Velvet",
    description: "Deep, velvety nocturnal fragrance. A bold and magnetic presence.",
    price: PRICE,
    volume: VOLUME,
    story: "Roses and smokes emerge through a warm, ambered base, creating a scent that feels enveloping and sensual. Deep, lingering, and undeniably alluring.",
    notes: Notes {
        top: "Blackcurrant, Plum, Pink Grapefruit",
        heart: "Damask Rose, Jasmine, Patchouli",
        base: "Amber, Incense, Musk, Vetiver",
    },
    accent_color: "#8B4513",
};

static DISCOVERY: Product = Product {
    id: 4,
    name: "L'ANTHOLOGIE",
    tagline: "The Complete Journey",
    description: "Experience the full spectrum of Maison des Rêves. Three 10ml vials containing Éternel, Élysienne, and Nox.",
    price: "$85.00",
    volume: "3 × 10 ml ℮ / 0.34 fl. oz. each",
    story: "Why choose one when you can experience them all? The Anthology set is curated for the explorer, the dreamer, and the collector.",
    notes: Notes {
        top: "Variety",
        heart: "Discovery",
        base: "Experience",
    },
    accent_color: "#1c1917",
};
