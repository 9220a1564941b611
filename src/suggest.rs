//! Static reference lists and suggestion matching.
//!
//! Every typeahead field filters one of these lists. Matching is
//! case-insensitive; countries use prefix matching, everything else uses
//! substring containment. Universities carry an optional nickname that is
//! matched alongside the full name.

/// One suggestible entry: a display label plus an optional alias
/// (university nickname) that also participates in matching.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub label: &'static str,
    pub alias: Option<&'static str>,
}

const fn e(label: &'static str) -> Entry {
    Entry { label, alias: None }
}

const fn ea(label: &'static str, alias: &'static str) -> Entry {
    Entry {
        label,
        alias: Some(alias),
    }
}

/// How a query is matched against an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive containment anywhere in the label (or alias).
    Substring,
    /// Case-insensitive prefix of the label (or alias).
    Prefix,
}

pub const SKILLS: &[Entry] = &[
    e("JavaScript"),
    e("React"),
    e("Node.js"),
    e("Python"),
    e("CSS"),
    e("HTML"),
    e("MongoDB"),
    e("SQL"),
    e("Git"),
    e("Docker"),
    e("Figma"),
    e("C++"),
    e("Java"),
    e("TypeScript"),
    e("Express"),
    e("Django"),
    e("Go"),
    e("Rust"),
    e("Kubernetes"),
    e("AWS"),
    e("GraphQL"),
    e("PostgreSQL"),
];

pub const LANGUAGES: &[Entry] = &[
    e("English"),
    e("Spanish"),
    e("French"),
    e("German"),
    e("Chinese"),
    e("Arabic"),
    e("Russian"),
    e("Portuguese"),
    e("Hindi"),
    e("Japanese"),
    e("Swahili"),
    e("Twi"),
];

pub const COUNTRIES: &[Entry] = &[
    e("Argentina"),
    e("Australia"),
    e("Brazil"),
    e("Canada"),
    e("China"),
    e("Egypt"),
    e("Ethiopia"),
    e("France"),
    e("Germany"),
    e("Ghana"),
    e("India"),
    e("Indonesia"),
    e("Italy"),
    e("Japan"),
    e("Kenya"),
    e("Mexico"),
    e("Morocco"),
    e("Netherlands"),
    e("Nigeria"),
    e("Norway"),
    e("Pakistan"),
    e("Philippines"),
    e("Poland"),
    e("Portugal"),
    e("Rwanda"),
    e("Senegal"),
    e("Singapore"),
    e("South Africa"),
    e("South Korea"),
    e("Spain"),
    e("Sweden"),
    e("Switzerland"),
    e("Tanzania"),
    e("Turkey"),
    e("Uganda"),
    e("United Arab Emirates"),
    e("United Kingdom"),
    e("United States"),
    e("Vietnam"),
    e("Zambia"),
    e("Zimbabwe"),
];

pub const PROGRAMS: &[Entry] = &[
    e("BSc Computer Science"),
    e("BSc Information Technology"),
    e("BSc Software Engineering"),
    e("BSc Data Science"),
    e("BSc Artificial Intelligence"),
    e("BSc Cybersecurity"),
    e("BSc Computer Engineering"),
    e("BSc Information Systems"),
    e("BSc Electrical Engineering"),
    e("BSc Mechanical Engineering"),
    e("BSc Civil Engineering"),
    e("BSc Chemical Engineering"),
    e("BSc Aerospace Engineering"),
    e("BSc Biomedical Engineering"),
    e("BBA Business Administration"),
    e("BBA International Business"),
    e("BBA Entrepreneurship"),
    e("BBA Human Resource Management"),
    e("BBA Marketing"),
    e("BBA Accounting and Finance"),
    e("BBA Supply Chain Management"),
    e("BBA Project Management"),
    e("BSc Mathematics"),
    e("BSc Statistics"),
    e("BSc Physics"),
    e("BSc Chemistry"),
    e("BSc Biology"),
    e("BSc Biochemistry"),
    e("BSc Environmental Science"),
    e("MBBS Medicine and Surgery"),
    e("BSc Nursing"),
    e("BSc Public Health"),
    e("BSc Pharmacy"),
    e("LLB Law"),
    e("BA Political Science"),
    e("BA Sociology"),
    e("BA Psychology"),
    e("BA International Relations"),
    e("BA English Literature"),
    e("BA Journalism and Mass Communication"),
    e("BA Fine Arts"),
    e("BEd Primary Education"),
    e("BEd Secondary Education"),
    e("BSc Economics"),
    e("BSc Finance"),
    e("BSc Actuarial Science"),
    e("BSc Architecture"),
    e("BSc Graphic Design"),
    e("BSc Hospitality and Tourism Management"),
    e("BSc Renewable Energy Engineering"),
];

pub const UNIVERSITIES: &[Entry] = &[
    ea("University of Ghana", "Legon"),
    ea("Kwame Nkrumah University of Science and Technology", "KNUST"),
    ea("University of Cape Coast", "UCC"),
    ea("Ghana Institute of Management and Public Administration", "GIMPA"),
    ea("Ashesi University", "Ashesi"),
    ea("University of Lagos", "UNILAG"),
    ea("University of Nairobi", "UoN"),
    ea("University of Cape Town", "UCT"),
    ea("Massachusetts Institute of Technology", "MIT"),
    ea("Stanford University", "Stanford"),
    ea("Harvard University", "Harvard"),
    ea("University of California, Berkeley", "UC Berkeley"),
    ea("University of California, Los Angeles", "UCLA"),
    ea("New York University", "NYU"),
    ea("Carnegie Mellon University", "CMU"),
    ea("University of Oxford", "Oxford"),
    ea("University of Cambridge", "Cambridge"),
    ea("Imperial College London", "Imperial"),
    ea("University College London", "UCL"),
    ea("London School of Economics", "LSE"),
    ea("University of Toronto", "UofT"),
    ea("University of British Columbia", "UBC"),
    ea("National University of Singapore", "NUS"),
    ea("Eidgenössische Technische Hochschule Zürich", "ETH Zurich"),
    ea("Technische Universität München", "TUM"),
    ea("Indian Institute of Technology Bombay", "IIT Bombay"),
    ea("University of Melbourne", "UniMelb"),
    ea("University of Tokyo", "Todai"),
];

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn starts_with_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().starts_with(&needle.to_lowercase())
}

fn entry_matches(entry: &Entry, query: &str, mode: MatchMode) -> bool {
    let hit = |text: &str| match mode {
        MatchMode::Substring => contains_ignore_case(text, query),
        MatchMode::Prefix => starts_with_ignore_case(text, query),
    };
    hit(entry.label) || entry.alias.is_some_and(hit)
}

fn entry_is_prefix_hit(entry: &Entry, query: &str) -> bool {
    starts_with_ignore_case(entry.label, query)
        || entry.alias.is_some_and(|a| starts_with_ignore_case(a, query))
}

/// Filter `list` by `query`, excluding labels already in `exclude`.
///
/// Results are ranked (prefix hits before interior hits, source order as
/// tiebreak) and deduplicated by label. An empty query yields an empty
/// list — there is no "show everything" fallback.
pub fn query(
    list: &'static [Entry],
    text: &str,
    mode: MatchMode,
    exclude: &[String],
) -> Vec<&'static Entry> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut prefix_hits: Vec<&'static Entry> = Vec::new();
    let mut interior_hits: Vec<&'static Entry> = Vec::new();
    let mut seen: Vec<&'static str> = Vec::new();

    for entry in list {
        if !entry_matches(entry, text, mode) {
            continue;
        }
        if exclude.iter().any(|x| x == entry.label) {
            continue;
        }
        if seen.contains(&entry.label) {
            continue;
        }
        seen.push(entry.label);
        if entry_is_prefix_hit(entry, text) {
            prefix_hits.push(entry);
        } else {
            interior_hits.push(entry);
        }
    }

    prefix_hits.extend(interior_hits);
    prefix_hits
}
