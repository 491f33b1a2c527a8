use std::collections::HashMap;

/// Reverse index from uppercased lender alias to canonical lender name.
#[derive(Debug, Clone, Default)]
pub struct LenderIndex {
    by_alias: HashMap<String, String>,
}

impl LenderIndex {
    /// Builds the reverse index, uppercasing every alias. Two lenders
    /// sharing an alias is a data error: the last insertion wins and the
    /// collision is logged, never silently dropped. Iteration order over
    /// the source map is unspecified, so the surviving entry is too.
    pub fn build(lenders: &HashMap<String, Vec<String>>) -> Self {
        let mut by_alias = HashMap::new();
        for (canonical, aliases) in lenders {
            for alias in aliases {
                let key = alias.to_uppercase();
                if let Some(previous) = by_alias.insert(key, canonical.clone()) {
                    if previous != *canonical {
                        tracing::warn!(
                            alias = %alias,
                            dropped = %previous,
                            kept = %canonical,
                            "lender alias is claimed by multiple lenders"
                        );
                    }
                }
            }
        }
        Self { by_alias }
    }

    /// Finds any alias occurring as a substring of the uppercased
    /// description. When aliases of different lenders both match, the
    /// winner follows map iteration order and is unspecified.
    pub fn find(&self, description_upper: &str) -> Option<&str> {
        self.by_alias
            .iter()
            .find(|(alias, _)| description_upper.contains(alias.as_str()))
            .map(|(_, canonical)| canonical.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenders(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(name, aliases)| {
                (
                    name.to_string(),
                    aliases.iter().map(|a| a.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn aliases_are_uppercased_at_build_time() {
        let index = LenderIndex::build(&lenders(&[("OnDeck Capital", &["OnDeck"])]));
        assert_eq!(index.find("PAYMENT TO ONDECK DAILY"), Some("OnDeck Capital"));
    }

    #[test]
    fn find_matches_substring_anywhere() {
        let index = LenderIndex::build(&lenders(&[("Rapid Finance", &["RAPID FINANCE"])]));
        assert_eq!(index.find("ACH DEBIT RAPID FINANCE 00123"), Some("Rapid Finance"));
        assert_eq!(index.find("ACH DEBIT SLOW FINANCE"), None);
    }

    #[test]
    fn every_alias_of_a_lender_resolves() {
        let index = LenderIndex::build(&lenders(&[(
            "Forward Financing",
            &["FORWARD FINANCING", "FWD FINANCING"],
        )]));
        assert_eq!(index.len(), 2);
        assert_eq!(index.find("FWD FINANCING LLC"), Some("Forward Financing"));
    }

    #[test]
    fn colliding_alias_keeps_a_single_entry() {
        let index = LenderIndex::build(&lenders(&[
            ("Lender A", &["SHARED NAME"]),
            ("Lender B", &["SHARED NAME"]),
        ]));
        assert_eq!(index.len(), 1);
        let winner = index.find("SHARED NAME PAYMENT").unwrap();
        assert!(winner == "Lender A" || winner == "Lender B");
    }

    #[test]
    fn empty_index_never_matches() {
        let index = LenderIndex::build(&HashMap::new());
        assert!(index.is_empty());
        assert_eq!(index.find("ANYTHING"), None);
    }
}
