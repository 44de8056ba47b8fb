/// Stencil version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default cosine-distance threshold for the similarity merge.
/// A starting point only; tune it with the threshold explorer.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Default minimum cluster size. 1 keeps singletons.
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 1;

/// Character n-gram range used to vectorize skeletons.
pub const DEFAULT_NGRAM_MIN: usize = 3;
pub const DEFAULT_NGRAM_MAX: usize = 5;

/// Members exposed per cluster for example extraction.
pub const DEFAULT_EXAMPLE_LIMIT: usize = 10;

/// Candidate thresholds swept by the explorer, ascending.
pub const DEFAULT_TUNING_THRESHOLDS: [f64; 10] =
    [0.3, 0.4, 0.5, 0.6, 0.7, 0.75, 0.8, 0.85, 0.9, 0.95];

/// Target cluster-count band for threshold recommendation.
pub const DEFAULT_TARGET_MIN_CLUSTERS: usize = 20;
pub const DEFAULT_TARGET_MAX_CLUSTERS: usize = 60;

/// Number of largest cluster sizes listed per threshold in a sweep.
pub const TUNING_TOP_SIZES: usize = 5;

/// Hex characters kept from the event-id digest.
pub const EVENT_ID_HEX_LEN: usize = 16;

/// Sender kept by the ingest filter unless configured otherwise.
pub const DEFAULT_SENDER: &str = "SAB";

/// Currency codes recognized by the amount rule.
pub const DEFAULT_CURRENCY_CODES: [&str; 1] = ["sar"];

/// IBAN country prefixes recognized by the IBAN rule.
pub const DEFAULT_IBAN_COUNTRIES: [&str; 1] = ["sa"];

/// Prefix of generated template ids (`SAB_007`).
pub const DEFAULT_TEMPLATE_PREFIX: &str = "SAB";

/// Report sizing.
pub const DEFAULT_REPORT_EXAMPLES: usize = 3;
pub const DEFAULT_TEMPLATE_SAMPLES: usize = 3;
pub const DEFAULT_KEY_TERMS: usize = 15;
pub const KEY_TERM_MAX_FEATURES: usize = 100;

/// Script ratio above which a text is labelled with a single language.
pub const LANGUAGE_DOMINANCE_RATIO: f64 = 0.7;

/// Default artifact locations, relative to the working directory.
pub const DEFAULT_EXPORT_PATH: &str = "data/export.txt";
pub const DEFAULT_MESSAGES_PATH: &str = "data/messages.jsonl";
pub const DEFAULT_NORMALIZED_PATH: &str = "data/messages_normalized.jsonl";
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Project config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "stencil.toml";
