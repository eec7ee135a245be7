//! Keyword tables for the default rule set.
//!
//! All keywords are single lowercase tokens; matching is whole-token.

use super::{CategoryRule, TagRule};
use crate::Category;

/// Tokens that mark a commercial site, independent of its category.
pub const BUSINESS_KEYWORDS: &[&str] = &[
    "shop",
    "store",
    "buy",
    "service",
    "services",
    "pricing",
    "order",
    "checkout",
    "cart",
    "booking",
    "hire",
    "quote",
    "shipping",
    "company",
    "customers",
];

/// Category rules in priority order. The first rule with a keyword on the
/// page wins, so food and drink venues are tested before generic retail,
/// and generic content types (forum, portfolio, blog) come last.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule::new(
        Category::Restaurant,
        &[
            "menu",
            "restaurant",
            "restaurants",
            "dining",
            "dinner",
            "lunch",
            "brunch",
            "cuisine",
            "reservation",
            "reservations",
            "bistro",
            "eatery",
            "takeout",
        ],
    ),
    CategoryRule::new(
        Category::Cafe,
        &["cafe", "café", "coffee", "espresso", "latte", "bakery", "pastries", "tearoom"],
    ),
    CategoryRule::new(
        Category::Bar,
        &["bar", "pub", "cocktail", "cocktails", "brewery", "tavern", "taproom", "nightlife"],
    ),
    CategoryRule::new(
        Category::Hotel,
        &["hotel", "motel", "hostel", "resort", "inn", "accommodation", "suites"],
    ),
    CategoryRule::new(
        Category::Grocery,
        &["grocery", "groceries", "supermarket", "butcher", "deli", "greengrocer"],
    ),
    CategoryRule::new(
        Category::Retail,
        &["shop", "store", "retail", "boutique", "cart", "checkout", "outlet"],
    ),
    CategoryRule::new(
        Category::Fashion,
        &["fashion", "clothing", "apparel", "shoes", "jewelry", "dresses"],
    ),
    CategoryRule::new(
        Category::Beauty,
        &["salon", "spa", "beauty", "hairdresser", "nails", "barber", "cosmetics", "makeup"],
    ),
    CategoryRule::new(
        Category::Fitness,
        &["gym", "fitness", "yoga", "pilates", "workout", "crossfit"],
    ),
    CategoryRule::new(
        Category::Healthcare,
        &[
            "clinic",
            "doctor",
            "dental",
            "dentist",
            "hospital",
            "medical",
            "pharmacy",
            "physician",
            "patients",
        ],
    ),
    CategoryRule::new(
        Category::Legal,
        &["lawyer", "lawyers", "attorney", "attorneys", "legal", "litigation", "notary"],
    ),
    CategoryRule::new(
        Category::Finance,
        &["bank", "banking", "finance", "insurance", "loan", "loans", "investment", "accounting"],
    ),
    CategoryRule::new(
        Category::RealEstate,
        &["realtor", "realty", "estate", "property", "properties", "listings", "mortgage"],
    ),
    CategoryRule::new(
        Category::Automotive,
        &["car", "cars", "automotive", "dealership", "mechanic", "tires", "vehicle", "vehicles"],
    ),
    CategoryRule::new(
        Category::Construction,
        &["construction", "contractor", "roofing", "plumbing", "plumber", "renovation", "electrician"],
    ),
    CategoryRule::new(
        Category::Education,
        &["school", "university", "college", "academy", "courses", "tutoring", "students"],
    ),
    CategoryRule::new(
        Category::Technology,
        &["software", "saas", "cloud", "api", "developers", "startup", "technology"],
    ),
    CategoryRule::new(
        Category::Travel,
        &["travel", "tours", "flights", "vacation", "destinations", "itinerary"],
    ),
    CategoryRule::new(
        Category::Entertainment,
        &["cinema", "movies", "theatre", "theater", "gaming", "concerts", "tickets", "festival"],
    ),
    CategoryRule::new(
        Category::Nonprofit,
        &["nonprofit", "charity", "donate", "donation", "volunteer", "volunteers"],
    ),
    CategoryRule::new(
        Category::Government,
        &["government", "municipal", "council", "ministry", "permits", "citizens"],
    ),
    CategoryRule::new(
        Category::News,
        &["news", "headlines", "breaking", "journalism", "newsroom", "editorial"],
    ),
    CategoryRule::new(
        Category::Forum,
        &["forum", "forums", "thread", "threads", "discussion", "replies"],
    ),
    CategoryRule::new(
        Category::Portfolio,
        &["portfolio", "photographer", "photography", "illustrator", "resume"],
    ),
    CategoryRule::new(
        Category::Blog,
        &["blog", "blogger", "blogging", "posts", "diary"],
    ),
];

/// Tag rules, all evaluated.
pub const TAG_RULES: &[TagRule] = &[
    TagRule::new("shop", &["shop", "store", "boutique", "cart", "checkout"]),
    TagRule::new(
        "restaurant",
        &["menu", "restaurant", "dining", "dinner", "lunch", "cuisine", "reservations"],
    ),
    TagRule::new("cafe", &["cafe", "café", "coffee", "espresso", "latte", "brewed"]),
    TagRule::new("bar", &["bar", "pub", "cocktail", "cocktails", "beer", "brewery", "wine"]),
    TagRule::new("music", &["music", "concert", "concerts", "band", "gig", "dj"]),
    TagRule::new("hotel", &["hotel", "rooms", "resort", "hostel", "accommodation"]),
    TagRule::new("travel", &["travel", "tours", "flights", "vacation"]),
    TagRule::new("food", &["food", "recipe", "recipes", "organic", "bakery"]),
    TagRule::new("fitness", &["gym", "fitness", "yoga", "workout"]),
    TagRule::new("health", &["health", "clinic", "medical", "wellness", "therapy"]),
    TagRule::new("beauty", &["salon", "spa", "beauty", "makeup", "nails"]),
    TagRule::new("fashion", &["fashion", "clothing", "apparel", "shoes"]),
    TagRule::new("education", &["school", "courses", "learn", "tutorials", "students"]),
    TagRule::new("tech", &["software", "app", "cloud", "api", "developers"]),
    TagRule::new("finance", &["bank", "insurance", "loans", "investment", "tax"]),
    TagRule::new("legal", &["lawyer", "attorney", "legal"]),
    TagRule::new("real-estate", &["realtor", "property", "listings", "rent"]),
    TagRule::new("events", &["events", "tickets", "festival", "calendar"]),
    TagRule::new("family", &["kids", "family", "children"]),
    TagRule::new("pets", &["pets", "dog", "dogs", "cat", "cats", "veterinary"]),
    TagRule::new("nonprofit", &["charity", "donate", "volunteer", "nonprofit"]),
    TagRule::new("news", &["news", "headlines"]),
    TagRule::new("blog", &["blog", "posts"]),
    TagRule::new("portfolio", &["portfolio", "gallery", "photography"]),
    TagRule::new("community", &["forum", "community", "members"]),
];
