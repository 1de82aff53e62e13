//! Product-variant combination generation.
//!
//! The admin UI lets a merchant pick a set of size labels and a set of color
//! labels; this module expands the selection into draft variant records, one
//! per (size, color) pair, skipping pairs the product already has. Drafts have
//! no identity until they are persisted.

use rand::Rng;
use std::collections::HashSet;

/// An unpersisted product variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantDraft {
    pub size: Option<String>,
    pub color: Option<String>,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
}

/// Product-level defaults applied to every generated draft.
#[derive(Debug, Clone)]
pub struct CombinationDefaults {
    /// SKU of the parent product; draft SKUs are derived from it.
    pub product_sku: String,
    /// Base price of the parent product.
    pub base_price: f64,
}

/// Expand size × color selections into variant drafts.
///
/// Rules:
/// - If both selections are empty the call is a no-op and returns nothing.
/// - An empty selection on one axis acts as a single "no value" placeholder,
///   so sizes-only input yields one draft per size with no color (and vice
///   versa).
/// - Pairs already present in `existing` are silently skipped, as are pairs
///   repeated within the selections themselves: first write wins, existing
///   variants are never overwritten.
/// - Draft name is `"{size} {color}"` trimmed; SKU is the product SKU plus a
///   random 4-character suffix; stock defaults to [`crate::DEFAULT_VARIANT_STOCK`].
pub fn generate_combinations(
    sizes: &[String],
    colors: &[String],
    existing: &[(Option<String>, Option<String>)],
    defaults: &CombinationDefaults,
) -> Vec<VariantDraft> {
    if sizes.is_empty() && colors.is_empty() {
        return Vec::new();
    }

    let size_axis: Vec<Option<&str>> = if sizes.is_empty() {
        vec![None]
    } else {
        sizes.iter().map(|s| Some(s.as_str())).collect()
    };
    let color_axis: Vec<Option<&str>> = if colors.is_empty() {
        vec![None]
    } else {
        colors.iter().map(|c| Some(c.as_str())).collect()
    };

    let mut seen: HashSet<(Option<String>, Option<String>)> = existing.iter().cloned().collect();
    let mut drafts = Vec::new();

    for size in &size_axis {
        for color in &color_axis {
            let key = (size.map(str::to_string), color.map(str::to_string));
            if !seen.insert(key.clone()) {
                continue;
            }

            let name = format!("{} {}", size.unwrap_or(""), color.unwrap_or(""))
                .trim()
                .to_string();

            drafts.push(VariantDraft {
                size: key.0,
                color: key.1,
                name,
                sku: format!("{}-{}", defaults.product_sku, random_suffix()),
                price: defaults.base_price,
                stock: crate::DEFAULT_VARIANT_STOCK,
            });
        }
    }

    drafts
}

fn random_suffix() -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();
    (0..4)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> CombinationDefaults {
        CombinationDefaults {
            product_sku: "AT-DRE-1001".to_string(),
            base_price: 450.0,
        }
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_cross_product_when_nothing_exists() {
        let drafts = generate_combinations(
            &labels(&["S", "M", "L"]),
            &labels(&["Black", "Ivory"]),
            &[],
            &defaults(),
        );
        assert_eq!(drafts.len(), 6);

        let pairs: HashSet<_> = drafts
            .iter()
            .map(|d| (d.size.clone(), d.color.clone()))
            .collect();
        assert_eq!(pairs.len(), 6, "every pair must be unique");
        assert!(pairs.contains(&(Some("M".to_string()), Some("Ivory".to_string()))));
    }

    #[test]
    fn drafts_carry_defaults() {
        let drafts = generate_combinations(&labels(&["S"]), &labels(&["Black"]), &[], &defaults());
        let draft = &drafts[0];
        assert_eq!(draft.name, "S Black");
        assert_eq!(draft.price, 450.0);
        assert_eq!(draft.stock, crate::DEFAULT_VARIANT_STOCK);
        assert!(draft.sku.starts_with("AT-DRE-1001-"));
        assert_eq!(draft.sku.len(), "AT-DRE-1001-".len() + 4);
    }

    #[test]
    fn sizes_only_yields_one_draft_per_size() {
        let drafts = generate_combinations(&labels(&["S", "M"]), &[], &[], &defaults());
        assert_eq!(drafts.len(), 2);
        assert!(drafts.iter().all(|d| d.color.is_none()));
        assert_eq!(drafts[0].name, "S");
    }

    #[test]
    fn colors_only_yields_one_draft_per_color() {
        let drafts = generate_combinations(&[], &labels(&["Rose"]), &[], &defaults());
        assert_eq!(drafts.len(), 1);
        assert!(drafts[0].size.is_none());
        assert_eq!(drafts[0].name, "Rose");
    }

    #[test]
    fn empty_selection_is_a_noop() {
        assert!(generate_combinations(&[], &[], &[], &defaults()).is_empty());
    }

    #[test]
    fn existing_pairs_are_skipped() {
        let existing = vec![(Some("S".to_string()), Some("Black".to_string()))];
        let drafts = generate_combinations(
            &labels(&["S", "M"]),
            &labels(&["Black"]),
            &existing,
            &defaults(),
        );
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].size.as_deref(), Some("M"));
    }

    #[test]
    fn second_identical_call_adds_nothing() {
        let sizes = labels(&["S", "M"]);
        let colors = labels(&["Black", "Ivory"]);
        let first = generate_combinations(&sizes, &colors, &[], &defaults());
        assert_eq!(first.len(), 4);

        let existing: Vec<_> = first
            .iter()
            .map(|d| (d.size.clone(), d.color.clone()))
            .collect();
        let second = generate_combinations(&sizes, &colors, &existing, &defaults());
        assert!(second.is_empty());
    }

    #[test]
    fn duplicate_labels_in_selection_are_collapsed() {
        let drafts = generate_combinations(
            &labels(&["S", "S"]),
            &labels(&["Black"]),
            &[],
            &defaults(),
        );
        assert_eq!(drafts.len(), 1);
    }
}
