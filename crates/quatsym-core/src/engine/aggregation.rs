//! Stoichiometry summaries derived from the ordered cluster sizes.

const CLUSTER_LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Placeholder letter for clusters beyond the 26th.
pub const OVERFLOW_LETTER: char = '?';

/// Letter assigned to the cluster at `index` (`A`, `B`, ... then `?`).
pub fn cluster_letter(index: usize) -> char {
    CLUSTER_LETTERS
        .get(index)
        .map_or(OVERFLOW_LETTER, |&b| b as char)
}

/// Letter-coded stoichiometry, e.g. `[4, 2]` gives `"A4B2"`. Sizes of one are
/// written without a count.
pub fn composition_formula(sizes: &[usize]) -> String {
    let mut formula = String::with_capacity(sizes.len() * 2);
    for (index, &size) in sizes.iter().enumerate() {
        formula.push(cluster_letter(index));
        if size > 1 {
            formula.push_str(&size.to_string());
        }
    }
    formula
}

/// Every `d` in `1..=N` (with `N` the total chain count) dividing all cluster
/// sizes, ascending. Empty when there are no clusters.
pub fn folds(sizes: &[usize]) -> Vec<usize> {
    let total: usize = sizes.iter().sum();
    (1..=total)
        .filter(|d| sizes.iter().all(|size| size % d == 0))
        .collect()
}

/// Per-chain cluster index: cluster `i` repeated `sizes[i]` times.
pub fn cluster_ids(sizes: &[usize]) -> Vec<usize> {
    sizes
        .iter()
        .enumerate()
        .flat_map(|(id, &size)| std::iter::repeat_n(id, size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_omits_unit_counts() {
        assert_eq!(composition_formula(&[1, 1, 1]), "ABC");
        assert_eq!(composition_formula(&[4]), "A4");
        assert_eq!(composition_formula(&[4, 2]), "A4B2");
        assert_eq!(composition_formula(&[2, 1, 12]), "A2BC12");
        assert_eq!(composition_formula(&[]), "");
    }

    #[test]
    fn formula_uses_placeholder_past_z() {
        let formula = composition_formula(&[1; 27]);
        assert_eq!(formula.len(), 27);
        assert!(formula.starts_with("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        assert_eq!(formula.chars().nth(26), Some('?'));
        assert_eq!(composition_formula(&[1; 28]).chars().last(), Some('?'));
    }

    #[test]
    fn cluster_letters() {
        assert_eq!(cluster_letter(0), 'A');
        assert_eq!(cluster_letter(25), 'Z');
        assert_eq!(cluster_letter(26), '?');
    }

    #[test]
    fn folds_are_common_divisors_of_all_sizes() {
        assert_eq!(folds(&[4, 2]), vec![1, 2]);
        assert_eq!(folds(&[1]), vec![1]);
        assert_eq!(folds(&[6, 4]), vec![1, 2]);
        assert_eq!(folds(&[6]), vec![1, 2, 3, 6]);
        assert_eq!(folds(&[3, 3, 6]), vec![1, 3]);
        assert_eq!(folds(&[1, 1, 1]), vec![1]);
    }

    #[test]
    fn folds_of_nothing_is_empty() {
        assert!(folds(&[]).is_empty());
    }

    #[test]
    fn cluster_ids_expand_sizes_in_order() {
        assert_eq!(cluster_ids(&[2, 1, 3]), vec![0, 0, 1, 2, 2, 2]);
        assert!(cluster_ids(&[]).is_empty());
    }
}
