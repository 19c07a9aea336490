//! Built-in tables used when no configuration file overrides them

/// Curated theme phrases that define what counts as a meaningful tag.
pub const THEME_VOCABULARY: &[&str] = &[
    // relationships
    "love stories",
    "unrequited love",
    "romance",
    "friendship",
    "family relationships",
    "fathers and sons",
    "mothers and daughters",
    "siblings",
    "marriage",
    "divorce",
    "loneliness",
    "grief",
    "loss and mourning",
    "betrayal",
    "forgiveness",
    "coming of age",
    "first love",
    "adolescence",
    "old age",
    "memory",
    "identity",
    "self-discovery",
    "mental illness",
    "depression",
    "suicide",
    // society
    "social classes",
    "poverty",
    "wealth and power",
    "racism",
    "immigration",
    "exile",
    "colonialism",
    "war",
    "world war ii",
    "postwar japan",
    "holocaust",
    "political oppression",
    "totalitarianism",
    "revolution",
    "religion and faith",
    "gender roles",
    "feminism",
    "women's rights",
    "sexuality",
    "crime and punishment",
    "justice",
    "corruption",
    "technology and society",
    "environment and nature",
    "work and labor",
    "education",
    "art and artists",
    "music",
    "death and mortality",
    "survival",
    // modes and genres
    "psychological fiction",
    "magical realism",
    "science fiction",
    "dystopia",
    "fantasy",
    "horror",
    "gothic fiction",
    "mystery and detective stories",
    "thriller",
    "historical fiction",
    "satire",
    "allegory",
    "epistolary novel",
    "bildungsroman",
    "memoir",
    "adventure",
    // settings
    "city life",
    "small town life",
    "rural life",
    "the sea",
    "travel and journeys",
    "boarding schools",
    "university life",
    "medieval europe",
    "victorian england",
    "american south",
    "the great depression",
    "cold war",
];

/// Place and period names; subjects containing one are kept as setting tags.
pub const REGION_KEYWORDS: &[&str] = &[
    "Japan",
    "Canada",
    "United States",
    "England",
    "France",
    "Germany",
    "China",
    "India",
    "Russia",
    "Italy",
    "Spain",
    "Ireland",
    "Mexico",
    "Korea",
    "Africa",
    "Tokyo",
    "London",
    "Paris",
    "New York",
    "Victorian",
    "Edwardian",
    "Medieval",
    "Renaissance",
    "20th century",
    "19th century",
    "World War, 1939-1945",
    "World War, 1914-1918",
];

/// Subjects too generic to describe a book.
pub const BLOCKLIST: &[&str] = &[
    "Fiction",
    "Literary fiction",
    "Accessible book",
    "Protected DAISY",
    "In library",
    "Fiction, general",
    "Large type books",
    "Novel",
    "Novels",
    "Literature",
    "General",
    "Open Library Staff Picks",
    "Long Now Manual for Civilization",
    "Translations into English",
    "English fiction",
    "American fiction",
    "Fiction, literary",
];
