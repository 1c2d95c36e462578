//! Static section content.

use crate::core::card_stack::Card;
use crate::core::segments::Segment;

/// Origins timeline events: (year, title, description).
const TIMELINE: &[(&str, &str, &str)] = &[
    (
        "1729",
        "Kolachi Village",
        "A small fishing settlement founded by Baloch families along the Arabian coast.",
    ),
    (
        "1795",
        "Under Talpur Rule",
        "Karachi grew into a modest trading port during the Talpur era.",
    ),
    (
        "1839",
        "British Arrival",
        "British troops took control of Karachi, marking the start of colonial development.",
    ),
    (
        "1869",
        "Trade Expansion",
        "The opening of the Suez Canal turned Karachi into an important seaport for Asia.",
    ),
    (
        "1947",
        "Independence",
        "Karachi became the first capital of Pakistan after independence.",
    ),
    (
        "1960",
        "New Capital Established",
        "The capital moved to Islamabad, but Karachi remained the country's business center.",
    ),
    (
        "Today",
        "Modern Karachi",
        "A diverse and dynamic city known for its culture, industry, and resilience.",
    ),
];

pub fn timeline_segments() -> Vec<Segment> {
    TIMELINE
        .iter()
        .enumerate()
        .map(|(i, (year, title, body))| Segment::new(i, *year, *title, *body))
        .collect()
}

/// Labels placed around the culture dome.
pub const DOME_LABELS: &[&str] = &[
    "Food", "People", "Festivities", "Art", "Music", "Truck Art", "Qawwali", "Biryani",
    "Clifton", "Empress Market", "Sea View", "Ajrak",
];

pub fn culture_cards() -> Vec<Card> {
    ["Food", "People", "Festivities", "Art", "Music"]
        .iter()
        .zip(1..)
        .map(|(label, id)| Card::new(id, *label))
        .collect()
}

/// City facts typed out once the globe has zoomed in.
pub const CITY_FACTS: &[&str] = &[
    "City: Karachi, the pulse of Pakistan",
    "Population: Around 20 million",
    "Area: 591 square kilometers",
    "Founded: 1729 as Kolachi village",
    "Known for: Seaport, culture, and diversity",
    "Spirit: A city that never sleeps",
];

/// One chapter of the "Then vs Now" story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryCard {
    pub title: &'static str,
    pub verse: &'static str,
    pub caption: &'static str,
    /// Photo on the left, text on the right.
    pub reverse: bool,
}

const fn story(title: &'static str, verse: &'static str, caption: &'static str, reverse: bool) -> StoryCard {
    StoryCard {
        title,
        verse,
        caption,
        reverse,
    }
}

pub const STORY: &[StoryCard] = &[
    story(
        "Once Upon a Time",
        "Green gardens swayed along the streets,\nHouses stood proud, calm, and sweet.",
        "1940s Karachi",
        false,
    ),
    story(
        "City by the Sea",
        "Wide streets stretched under open skies,\nPalm trees and buildings stood wise.",
        "Victoria Road (Abdullah Haroon Rd), Saddar - 1950s",
        true,
    ),
    story(
        "City Streets",
        "Wide roads lined with old buildings tall,\nCars and people moved along them all.",
        "II Chundrigar Road - 1962",
        false,
    ),
    story(
        "Bustling Markets",
        "Streets alive with people and cheer,\nGreen trees, bright shops, and vehicles near.",
        "Saddar area - 1965",
        true,
    ),
    story(
        "The Old Charm",
        "Buildings stood proud, tall and bright,\nStreets whispered stories in morning light.",
        "Mereweather Tower - 1970s",
        false,
    ),
    story(
        "Hearts That Stayed",
        "Wide, clean roads and greenery all around,\nThe city stood peaceful, calm without a sound.",
        "Teen Talwar - 1974",
        true,
    ),
    story(
        "A New Hope",
        "Streets are crowded, noisy, and worn,\nTrash and chaos mark the city's morn.\nYet the sun rises, bringing a chance to mend,\nThe heart of Karachi will endure and transcend.",
        "A visual story of Karachi today",
        false,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: &'static str,
    pub name: &'static str,
    pub title: &'static str,
}

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "Karachi is the city of lights, where dreams come alive and the heart of Pakistan beats the strongest.",
        name: "Ahmed Khan",
        title: "Lifelong Resident",
    },
    Testimonial {
        quote: "The food, the culture, the people - everything about Karachi is vibrant and full of life.",
        name: "Sara Ahmed",
        title: "Food Blogger",
    },
    Testimonial {
        quote: "From the beaches to the bazaars, Karachi offers a unique blend of tradition and modernity.",
        name: "Ali Raza",
        title: "Travel Enthusiast",
    },
    Testimonial {
        quote: "The city that never sleeps, where every street has a story to tell.",
        name: "Fatima Malik",
        title: "Local Historian",
    },
    Testimonial {
        quote: "Karachi's diversity is its strength - a true melting pot of cultures and traditions.",
        name: "Omar Shah",
        title: "Cultural Expert",
    },
];

/// Headline numbers under the testimonials: (value, label).
pub const CITY_STATS: &[(&str, &str)] = &[
    ("16M+", "Population"),
    ("3,780", "Area (km²)"),
    ("1729", "Year Founded"),
    ("#1", "Largest City"),
];
