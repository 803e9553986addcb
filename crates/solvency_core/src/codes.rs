//! Regulatory item-code mapping.
//!
//! Translates the numeric item codes of the transparency-exercise templates
//! into [`Field`]s. The table is fixed for one reporting exercise; any code
//! not listed here is dropped during reshaping.
//!
//! | Code    | Field               | Template      |
//! |---------|---------------------|---------------|
//! | 2520102 | `CET1_Capital`      | other         |
//! | 2520133 | `Tier1_Capital`     | other         |
//! | 2520101 | `Total_Capital`     | other         |
//! | 2520138 | `RWA_Total`         | other         |
//! | 2521010 | `Total_Assets`      | other         |
//! | 2520333 | `Net_Income`        | other         |
//! | 2520903 | `Leverage_Exposure` | other         |
//! | 2520603 | `Loans_Gross`       | credit risk   |
//! | 2520613 | `Provisions_Stock`  | credit risk   |
//! | 2520710 | `NPL_Amount`        | credit risk   |

use crate::types::Field;

/// Fixed mapping from regulatory item code to field.
pub const ITEM_CODE_MAP: [(i64, Field); 10] = [
    (2520102, Field::Cet1Capital),
    (2520133, Field::Tier1Capital),
    (2520101, Field::TotalCapital),
    (2520138, Field::RwaTotal),
    (2521010, Field::TotalAssets),
    (2520333, Field::NetIncome),
    (2520903, Field::LeverageExposure),
    (2520603, Field::LoansGross),
    (2520613, Field::ProvisionsStock),
    (2520710, Field::NplAmount),
];

/// Looks up the field fed by a regulatory item code.
///
/// # Examples
///
/// ```
/// use solvency_core::codes::field_for_code;
/// use solvency_core::types::Field;
///
/// assert_eq!(field_for_code(2520138), Some(Field::RwaTotal));
/// assert_eq!(field_for_code(9999999), None);
/// ```
#[inline]
pub fn field_for_code(code: i64) -> Option<Field> {
    ITEM_CODE_MAP
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, field)| *field)
}

/// Reverse lookup: the item code that feeds `field`, if any.
#[inline]
pub fn code_for_field(field: Field) -> Option<i64> {
    ITEM_CODE_MAP
        .iter()
        .find(|(_, f)| *f == field)
        .map(|(code, _)| *code)
}

/// Returns true if `code` is a key of the mapping.
#[inline]
pub fn is_mapped(code: i64) -> bool {
    field_for_code(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mapping_has_ten_distinct_entries() {
        let codes: HashSet<_> = ITEM_CODE_MAP.iter().map(|(c, _)| *c).collect();
        let fields: HashSet<_> = ITEM_CODE_MAP.iter().map(|(_, f)| *f).collect();
        assert_eq!(codes.len(), 10);
        assert_eq!(fields.len(), 10);
    }

    #[test]
    fn test_reverse_lookup_consistent() {
        for (code, field) in ITEM_CODE_MAP {
            assert_eq!(code_for_field(field), Some(code));
            assert_eq!(field_for_code(code), Some(field));
        }
    }

    #[test]
    fn test_unmapped_proxy_inputs() {
        assert_eq!(code_for_field(Field::ExposureValue), None);
        assert_eq!(code_for_field(Field::HqlaAmount), None);
    }

    #[test]
    fn test_is_mapped() {
        assert!(is_mapped(2520710));
        assert!(!is_mapped(2520601));
    }
}
