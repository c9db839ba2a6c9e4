#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// `-` marks a descending term; `+` or no prefix is ascending
    pub fn from_prefix(term: &str) -> (SortOrder, &str) {
        if let Some(attribute) = term.strip_prefix('-') {
            (SortOrder::Descending, attribute)
        } else {
            (SortOrder::Ascending, term.strip_prefix('+').unwrap_or(term))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub attribute: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(attribute: String, order: SortOrder) -> Self {
        SortSpec { attribute, order }
    }

    /// Parse a space-joined sort directive such as `"name -age"`
    pub fn parse_directive(directive: &str) -> Vec<SortSpec> {
        directive
            .split_whitespace()
            .map(|term| {
                let (order, attribute) = SortOrder::from_prefix(term);
                SortSpec::new(attribute.to_string(), order)
            })
            .filter(|spec| !spec.attribute.is_empty())
            .collect()
    }
}

/// Turn a comma-separated parameter (`sort_by`, `select`) into the space-joined form the
/// query builder expects. Terms are kept verbatim, including any `-` prefix.
pub fn comma_list_to_directive(value: &str) -> String {
    value.split(',').collect::<Vec<_>>().join(" ")
}
