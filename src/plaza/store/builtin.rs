use super::memory::StaticSource;

/// Compiled-in attractions dataset, used as the fallback when the fixture
/// file cannot be loaded. The caller decides when to reach for it.
pub fn attractions_fallback() -> StaticSource {
    StaticSource::new("builtin attractions", ATTRACTIONS)
}

const ATTRACTIONS: &str = r#"[
  {
    "id": "attr-001",
    "name": "University of Ibadan",
    "address": "University Road, Ibadan, Oyo State, Nigeria",
    "description": "Nigeria's premier university established in 1948, renowned for academic excellence and beautiful campus.",
    "image": "university-ibadan.webp",
    "imageAlt": "University of Ibadan main entrance"
  },
  {
    "id": "attr-002",
    "name": "Cocoa House",
    "address": "Dugbe, Ibadan, Oyo State, Nigeria",
    "description": "Iconic 26-storey skyscraper, the first of its kind in tropical Africa, built from cocoa export revenues.",
    "image": "cocoa-house.webp",
    "imageAlt": "Cocoa House towering over Ibadan skyline"
  },
  {
    "id": "attr-003",
    "name": "Mapo Hall",
    "address": "Mapo Hill, Ibadan, Oyo State, Nigeria",
    "description": "Historic town hall built in 1929, offering panoramic views of Ibadan and rich administrative heritage.",
    "image": "mapo-hall.webp",
    "imageAlt": "Historic Mapo Hall on the hill"
  },
  {
    "id": "attr-004",
    "name": "Agodi Gardens",
    "address": "Agodi GRA, Ibadan, Oyo State, Nigeria",
    "description": "Beautiful recreational park featuring gardens, lake, children's playground, and various wildlife.",
    "image": "agodi-gardens.webp",
    "imageAlt": "Serene lake and gardens at Agodi"
  },
  {
    "id": "attr-005",
    "name": "National Museum Ibadan",
    "address": "University of Ibadan, Ibadan, Oyo State, Nigeria",
    "description": "Extensive collection of Nigerian artifacts, traditional art, and archaeological findings.",
    "image": "national-museum.webp",
    "imageAlt": "Traditional artifacts at National Museum"
  },
  {
    "id": "attr-006",
    "name": "Trans Wonderland Amusement Park",
    "address": "Liberty Road, Challenge, Ibadan, Oyo State, Nigeria",
    "description": "Nigeria's premier amusement park with thrilling rides, water attractions, and family entertainment.",
    "image": "trans-wonderland.webp",
    "imageAlt": "Colorful rides at Trans Wonderland"
  },
  {
    "id": "attr-007",
    "name": "Bower Memorial Tower",
    "address": "Oke Are, Ibadan, Oyo State, Nigeria",
    "description": "60-foot tower built in 1936, offering spectacular 360-degree views of the ancient city.",
    "image": "bower-tower.webp",
    "imageAlt": "Bower Memorial Tower against blue sky"
  },
  {
    "id": "attr-008",
    "name": "Ibadan Golf Club",
    "address": "Jericho GRA, Ibadan, Oyo State, Nigeria",
    "description": "Historic 18-hole championship golf course established in 1932, perfect for golf enthusiasts.",
    "image": "ibadan-golf-club.webp",
    "imageAlt": "Well-maintained golf course fairways"
  }
]"#;
