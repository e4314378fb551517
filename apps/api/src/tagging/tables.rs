//! Static lookup tables for tag derivation. Keys are already in tag form
//! (lowercase, hyphenated).

use lazy_static::lazy_static;
use regex::Regex;

use crate::tagging::normalize_tag;

/// Spellings resolved before tag normalization, so that e.g. "C++" does not
/// collapse to "c".
pub const TECHNOLOGY_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("k8s", "kubernetes"),
    ("golang", "go"),
    ("c++", "cpp"),
    ("c#", "csharp"),
    ("f#", "fsharp"),
    (".net", "dotnet"),
    ("node", "nodejs"),
    ("node.js", "nodejs"),
    ("react.js", "react"),
    ("reactjs", "react"),
    ("vue.js", "vue"),
    ("vuejs", "vue"),
    ("next.js", "nextjs"),
    ("angularjs", "angular"),
    ("postgres", "postgresql"),
    ("sklearn", "scikit-learn"),
    ("amazon web services", "aws"),
    ("google cloud", "gcp"),
    ("google cloud platform", "gcp"),
    ("ruby on rails", "rails"),
    ("powerbi", "power-bi"),
    ("ci/cd", "ci-cd"),
];

/// Higher = more universally recognized. Anything absent scores [`UNKNOWN_TECHNOLOGY_SCORE`].
pub const TECHNOLOGY_PRIORITY: &[(&str, u32)] = &[
    ("python", 100),
    ("javascript", 98),
    ("typescript", 96),
    ("java", 95),
    ("react", 95),
    ("aws", 94),
    ("docker", 93),
    ("kubernetes", 92),
    ("sql", 92),
    ("go", 90),
    ("rust", 90),
    ("nodejs", 90),
    ("postgresql", 88),
    ("cpp", 88),
    ("csharp", 87),
    ("gcp", 86),
    ("azure", 86),
    ("terraform", 85),
    ("angular", 84),
    ("vue", 84),
    ("pytorch", 83),
    ("django", 82),
    ("spring", 82),
    ("kotlin", 82),
    ("swift", 82),
    ("tensorflow", 82),
    ("graphql", 80),
    ("mongodb", 80),
    ("kafka", 80),
    ("spark", 80),
    ("mysql", 80),
    ("dotnet", 80),
    ("nextjs", 80),
    ("react-native", 80),
    ("c", 80),
    ("flask", 78),
    ("redis", 78),
    ("pandas", 78),
    ("scala", 78),
    ("fastapi", 78),
    ("flutter", 78),
    ("android", 78),
    ("ios", 78),
    ("scikit-learn", 76),
    ("elasticsearch", 76),
    ("express", 76),
    ("rails", 76),
    ("airflow", 76),
    ("snowflake", 76),
    ("linux", 75),
    ("php", 75),
    ("ruby", 75),
    ("ansible", 74),
    ("dbt", 74),
    ("keras", 74),
    ("langchain", 74),
    ("jenkins", 72),
    ("figma", 72),
    ("tableau", 72),
    ("hadoop", 72),
    ("ci-cd", 72),
    ("prometheus", 72),
    ("opencv", 72),
    ("laravel", 72),
    ("symfony", 72),
    ("git", 70),
    ("r", 70),
    ("power-bi", 70),
    ("github-actions", 70),
    ("grafana", 70),
    ("rabbitmq", 70),
    ("firebase", 70),
    ("svelte", 70),
    ("nginx", 68),
    ("bash", 68),
    ("tailwind", 68),
    ("jest", 66),
    ("gitlab", 66),
    ("salesforce", 66),
    ("html", 65),
    ("css", 65),
    ("matlab", 65),
    ("selenium", 64),
    ("sap", 64),
    ("webpack", 62),
    ("excel", 60),
    ("sass", 60),
    ("wordpress", 60),
    ("bootstrap", 60),
    ("photoshop", 58),
    ("jira", 55),
    ("jquery", 55),
];

pub const UNKNOWN_TECHNOLOGY_SCORE: u32 = 50;

/// Resolves aliases and returns the tag form of a technology name.
pub fn canonical_technology(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let resolved = TECHNOLOGY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(lowered);
    normalize_tag(&resolved)
}

pub fn technology_priority(raw: &str) -> Option<u32> {
    let key = canonical_technology(raw);
    TECHNOLOGY_PRIORITY
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, score)| *score)
}

pub fn is_known_technology(raw: &str) -> bool {
    technology_priority(raw).is_some()
}

/// Industry synonym families, matched by substring on the lowercase industry string.
/// Families whose synonyms are substrings of others' ("tech" in "fintech") come last.
pub const INDUSTRY_SYNONYMS: &[(&str, &[&str])] = &[
    ("fintech", &["fintech", "payment", "paiement", "neobank", "néobanque"]),
    (
        "finance",
        &[
            "bank",
            "banque",
            "banking",
            "finance",
            "financial",
            "insurance",
            "assurance",
            "asset management",
            "investment",
        ],
    ),
    (
        "healthcare",
        &[
            "health", "santé", "sante", "medical", "médical", "pharma", "biotech", "hospital",
            "hôpital",
        ],
    ),
    (
        "e-commerce",
        &["e-commerce", "ecommerce", "retail", "marketplace", "commerce", "distribution"],
    ),
    ("consulting", &["consulting", "conseil", "advisory"]),
    (
        "education",
        &[
            "edtech",
            "education",
            "éducation",
            "university",
            "université",
            "school",
            "école",
            "enseignement",
        ],
    ),
    (
        "media",
        &[
            "media",
            "média",
            "publishing",
            "presse",
            "press",
            "entertainment",
            "gaming",
            "video game",
            "jeux vidéo",
        ],
    ),
    ("telecom", &["telecom", "télécom", "telecommunication"]),
    ("energy", &["energy", "énergie", "energie", "oil", "utilities"]),
    ("automotive", &["automotive", "automobile"]),
    ("logistics", &["logistics", "logistique", "transport", "supply chain"]),
    (
        "public-sector",
        &["government", "public sector", "secteur public", "administration"],
    ),
    ("real-estate", &["real estate", "immobilier", "proptech"]),
    (
        "hospitality",
        &["hospitality", "hôtellerie", "restauration", "tourism", "tourisme"],
    ),
    (
        "aerospace",
        &["aerospace", "aéronautique", "aeronautics", "defense", "défense"],
    ),
    (
        "saas",
        &[
            "saas",
            "software",
            "logiciel",
            "it services",
            "informatique",
            "tech",
        ],
    ),
    ("manufacturing", &["manufacturing", "industrie", "industrial"]),
];

lazy_static! {
    /// Role families, tried in order against the most recent title.
    pub static ref ROLE_PATTERNS: Vec<(&'static str, Regex)> = vec![
        (
            "engineering",
            Regex::new(r"(?i)\b(engineer|engineering|ingénieur|ingenieur|developer|développeur|developpeur|programmer|software|sre|devops|architect|architecte)\b").unwrap(),
        ),
        (
            "data",
            Regex::new(r"(?i)\b(data|analyst|analyste|analytics|machine learning|ml|scientist|bi)\b").unwrap(),
        ),
        ("product", Regex::new(r"(?i)\b(product|produit)\b").unwrap()),
        ("design", Regex::new(r"(?i)\b(designer|design|ux|ui)\b").unwrap()),
        (
            "management",
            Regex::new(r"(?i)\b(manager|management|head|director|directeur|directrice|vp|cto|ceo|cio|chief|lead|responsable)\b").unwrap(),
        ),
        (
            "marketing",
            Regex::new(r"(?i)\b(marketing|growth|seo|brand|communication)\b").unwrap(),
        ),
        (
            "sales",
            Regex::new(r"(?i)\b(sales|commercial|account executive|business development)\b").unwrap(),
        ),
        ("consulting", Regex::new(r"(?i)\b(consultant|consulting|conseil)\b").unwrap()),
        (
            "operations",
            Regex::new(r"(?i)\b(operations|opérations|project manager|chef de projet)\b").unwrap(),
        ),
        (
            "human-resources",
            Regex::new(r"(?i)\b(hr|rh|human resources|recruiter|recruteur|talent)\b").unwrap(),
        ),
        (
            "finance",
            Regex::new(r"(?i)\b(accountant|comptable|finance|financial|controller|contrôleur|auditor)\b").unwrap(),
        ),
        (
            "support",
            Regex::new(r"(?i)\b(support|customer success|helpdesk)\b").unwrap(),
        ),
    ];

    /// Titles that can upgrade a long career to principal + executive.
    pub static ref LEADERSHIP_TITLE: Regex = Regex::new(
        r"(?i)\b(lead|head|director|directeur|directrice|vp|chief|manager|principal|responsable)\b"
    )
    .unwrap();
}

/// Domain vocabularies in emission order after the frontend/backend pair.
pub const FRONTEND_KEYWORDS: &[&str] = &[
    "react", "vue", "angular", "javascript", "typescript", "html", "css", "sass", "nextjs",
    "svelte", "tailwind", "redux", "webpack", "frontend", "front-end", "jquery",
];

pub const BACKEND_KEYWORDS: &[&str] = &[
    "nodejs",
    "django",
    "flask",
    "spring",
    "express",
    "fastapi",
    "rails",
    "laravel",
    "symfony",
    "java",
    "go",
    "rust",
    "php",
    "ruby",
    "postgresql",
    "mysql",
    "graphql",
    "rest",
    "api",
    "backend",
    "back-end",
    "microservices",
    "dotnet",
    "csharp",
];

pub const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "devops",
        &[
            "docker",
            "kubernetes",
            "terraform",
            "ansible",
            "jenkins",
            "ci-cd",
            "github-actions",
            "gitlab",
            "aws",
            "azure",
            "gcp",
            "prometheus",
            "grafana",
            "devops",
            "helm",
            "nginx",
        ],
    ),
    (
        "mobile",
        &["android", "ios", "swift", "kotlin", "flutter", "react-native", "mobile", "xamarin"],
    ),
    (
        "data",
        &[
            "sql", "pandas", "spark", "hadoop", "airflow", "snowflake", "dbt", "tableau",
            "power-bi", "etl", "data", "bigquery", "kafka",
        ],
    ),
    (
        "ml",
        &[
            "tensorflow",
            "pytorch",
            "scikit-learn",
            "keras",
            "machine-learning",
            "deep-learning",
            "nlp",
            "ml",
            "opencv",
            "llm",
            "langchain",
            "computer-vision",
        ],
    ),
    (
        "security",
        &[
            "security",
            "cybersecurity",
            "cybersecurite",
            "securite",
            "owasp",
            "pentest",
            "penetration-testing",
            "siem",
            "iam",
            "cryptography",
            "firewall",
        ],
    ),
];

/// Hits needed before a domain tag is emitted.
pub const DOMAIN_THRESHOLD: usize = 2;

pub const WORK_MODE_SYNONYMS: &[(&str, &[&str])] = &[
    ("hybrid", &["hybrid", "hybride"]),
    (
        "remote",
        &["remote", "télétravail", "teletravail", "distanciel", "full remote"],
    ),
    (
        "on-site",
        &["on-site", "onsite", "office", "présentiel", "presentiel", "sur site"],
    ),
];

pub const ENVIRONMENT_SYNONYMS: &[(&str, &[&str])] = &[
    ("startup", &["startup", "start-up", "scale-up", "scaleup"]),
    (
        "corporate",
        &[
            "corporate",
            "large company",
            "enterprise",
            "grand groupe",
            "grande entreprise",
        ],
    ),
    ("agency", &["agency", "agence", "esn"]),
    ("non-profit", &["non-profit", "nonprofit", "ngo", "association"]),
    ("public-sector", &["public sector", "secteur public", "government"]),
];

/// First family whose synonym is a substring of `value` (already lowercase).
pub fn family_for<'a>(table: &'a [(&'a str, &'a [&'a str])], value: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(_, synonyms)| synonyms.iter().any(|s| value.contains(s)))
        .map(|(family, _)| *family)
}
