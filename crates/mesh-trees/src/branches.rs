//! The fixed top-level MeSH category branches.
//!
//! MeSH organizes its hierarchy under sixteen branches, each named by a
//! single letter. The set changes only between annual MeSH releases, so it
//! is carried here as a static table for offline use.

/// The sixteen top-level MeSH branches, keyed by their leading letter.
pub const BRANCHES: [(char, &str); 16] = [
    ('A', "Anatomy"),
    ('B', "Organisms"),
    ('C', "Diseases"),
    ('D', "Chemicals and Drugs"),
    (
        'E',
        "Analytical, Diagnostic and Therapeutic Techniques, and Equipment",
    ),
    ('F', "Psychiatry and Psychology"),
    ('G', "Phenomena and Processes"),
    ('H', "Disciplines and Occupations"),
    (
        'I',
        "Anthropology, Education, Sociology, and Social Phenomena",
    ),
    ('J', "Technology, Industry, and Agriculture"),
    ('K', "Humanities"),
    ('L', "Information Science"),
    ('M', "Named Groups"),
    ('N', "Health Care"),
    ('V', "Publication Characteristics"),
    ('Z', "Geographicals"),
];

/// Looks up the category name for a branch letter.
pub fn label(branch: char) -> Option<&'static str> {
    BRANCHES
        .iter()
        .find(|(letter, _)| *letter == branch)
        .map(|(_, name)| *name)
}

// ============================================================================
// Tests
// ============================================================================
