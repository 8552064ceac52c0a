use phf::{Map, phf_map};

/// Residue name used for residues of unknown identity.
pub const UNKNOWN_RESIDUE_NAME: &str = "UNK";

static AMINO_ACID_CODES: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    // Common protonation variants and modified residues
    "HSE" => 'H', "HSD" => 'H', "HSP" => 'H', "HID" => 'H', "HIE" => 'H', "HIP" => 'H',
    "CYX" => 'C', "ASH" => 'D', "GLH" => 'E', "LYN" => 'K',
    "MSE" => 'M', "SEC" => 'U', "PYL" => 'O',
    "UNK" => 'X',
};

/// Returns true if the residue name denotes an amino acid, including `UNK`.
pub fn is_amino_acid(residue_name: &str) -> bool {
    AMINO_ACID_CODES.contains_key(residue_name.trim())
}

pub fn is_unknown_residue(residue_name: &str) -> bool {
    residue_name.trim() == UNKNOWN_RESIDUE_NAME
}

/// One-letter code of an amino acid, `'X'` for anything unrecognized.
pub fn one_letter_code(residue_name: &str) -> char {
    AMINO_ACID_CODES
        .get(residue_name.trim())
        .copied()
        .unwrap_or('X')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_amino_acids_are_recognized() {
        for name in ["ALA", "GLY", "TRP", "VAL", " LYS "] {
            assert!(is_amino_acid(name), "{name} should be an amino acid");
        }
    }

    #[test]
    fn non_amino_acids_are_rejected() {
        for name in ["HOH", "HEM", "DA", "", "ala"] {
            assert!(!is_amino_acid(name), "{name} should not be an amino acid");
        }
    }

    #[test]
    fn unknown_residue_is_detected() {
        assert!(is_unknown_residue("UNK"));
        assert!(is_unknown_residue(" UNK"));
        assert!(!is_unknown_residue("ALA"));
    }

    #[test]
    fn one_letter_codes_map_variants_and_fallback() {
        assert_eq!(one_letter_code("ALA"), 'A');
        assert_eq!(one_letter_code("HSE"), 'H');
        assert_eq!(one_letter_code("MSE"), 'M');
        assert_eq!(one_letter_code("UNK"), 'X');
        assert_eq!(one_letter_code("HOH"), 'X');
    }
}
