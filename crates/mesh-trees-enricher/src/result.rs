//! Enrichment results for a single identifier.

use mesh_trees::TreeNumber;

/// Delimiter joining multi-valued output cells.
const CELL_DELIMITER: &str = ";";

/// The derived values for one identifier.
///
/// The `*_cell` accessors yield the five added output columns in their
/// serialized form; multi-valued cells join their parts with `;`.
///
/// # Example
///
/// ```rust
/// use mesh_trees::TreeNumber;
/// use mesh_trees_enricher::Enrichment;
///
/// let enrichment = Enrichment {
///     label: "Diabetes Mellitus, Type 2".into(),
///     tree_numbers: vec![
///         TreeNumber::from_token("C18.452.394.750.149"),
///         TreeNumber::from_token("C19.246.300"),
///     ],
///     tree_labels: vec![
///         "Diabetes Mellitus, Type 2".into(),
///         "Diabetes Mellitus, Type 2".into(),
///     ],
///     top_codes: vec!["C18".into(), "C19".into()],
///     top_labels: vec![
///         "Nutritional and Metabolic Diseases".into(),
///         "Endocrine System Diseases".into(),
///     ],
///     via_mapping: false,
/// };
///
/// assert_eq!(
///     enrichment.tree_numbers_cell(),
///     "C18.452.394.750.149;C19.246.300"
/// );
/// assert_eq!(enrichment.top_codes_cell(), "C18;C19");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// The record's display label.
    pub label: String,
    /// Tree numbers, in service order.
    pub tree_numbers: Vec<TreeNumber>,
    /// Per-tree descriptor labels, same length as `tree_numbers`.
    pub tree_labels: Vec<String>,
    /// Deduplicated top-level codes, first-seen order.
    pub top_codes: Vec<String>,
    /// Labels for the top-level codes, same length as `top_codes`.
    pub top_labels: Vec<String>,
    /// Whether the values came from the preferred mapped descriptor.
    pub via_mapping: bool,
}

impl Enrichment {
    /// The MESH_TREE_NUMBERS cell.
    pub fn tree_numbers_cell(&self) -> String {
        join(self.tree_numbers.iter().map(TreeNumber::as_str))
    }

    /// The MESH_TREE_LABELS cell.
    pub fn tree_labels_cell(&self) -> String {
        join(self.tree_labels.iter().map(String::as_str))
    }

    /// The MESH_TREE_TOP_CODES cell.
    pub fn top_codes_cell(&self) -> String {
        join(self.top_codes.iter().map(String::as_str))
    }

    /// The MESH_TREE_TOP_LABELS cell.
    pub fn top_labels_cell(&self) -> String {
        join(self.top_labels.iter().map(String::as_str))
    }

    /// The five added cells in output column order.
    pub fn cells(&self) -> [String; 5] {
        [
            self.label.clone(),
            self.tree_numbers_cell(),
            self.tree_labels_cell(),
            self.top_codes_cell(),
            self.top_labels_cell(),
        ]
    }

    /// Whether the record carried any tree positions.
    pub fn has_tree_numbers(&self) -> bool {
        !self.tree_numbers.is_empty()
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(CELL_DELIMITER)
}
