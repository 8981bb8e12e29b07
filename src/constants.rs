/// Listing pages crawled when no configuration overrides them
pub const DEFAULT_LISTING_PAGES: [&str; 5] = [
    "http://www.milanodabere.it/milano/teatri",
    "http://www.milanodabere.it/milano/teatri/2",
    "http://www.milanodabere.it/milano/teatri/3",
    "http://www.milanodabere.it/milano/teatri/4",
    "http://www.milanodabere.it/milano/teatri/5",
];

/// Where the map front end expects to find the document
pub const DEFAULT_OUTPUT_PATH: &str = "venues.json";

// Listing page markup
pub const VENUE_CARD_SELECTOR: &str = "#mdb_lista > article";
pub const VENUE_NAME_SELECTOR: &str = "header h1 > a";
pub const MAP_LINK_SELECTOR: &str = r##"header .media-body aside a[data-target="#mdb_modal_mappa"]"##;
pub const EVENTS_LINK_SELECTOR: &str = r#".media-body aside a[href*="/eventi"]"#;

// Events page markup
pub const EVENT_CARD_SELECTOR: &str = "#mdb_lista > article";
pub const EVENT_TITLE_SELECTOR: &str = "header h1 > a, header h1 > span";
pub const EVENT_START_SELECTOR: &str = r#"[itemprop="startDate"]"#;
pub const EVENT_END_SELECTOR: &str = r#"[itemprop="endDate"]"#;
