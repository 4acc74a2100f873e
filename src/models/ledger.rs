//! Benefits ledger row model.

/// One raw row from the benefits ledger worksheet.
///
/// The ledger is semi-structured: rows are positional and any field can be
/// blank, so every field is optional. The parser decides which rows carry
/// usable data; unreadable rows are skipped, not reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerRow {
    /// Requester's full name.
    pub full_name: Option<String>,
    /// Requester's email; rows without one never contribute hours.
    pub email: Option<String>,
    /// Date the benefit was requested, as written in the sheet.
    pub request_date: Option<String>,
    /// Benefit type label, matched against the recognized keyword set.
    pub benefit_type: Option<String>,
    /// Date the request was resolved, as written in the sheet.
    pub resolution_date: Option<String>,
    /// Ledger-side category label (unrelated to meeting categories).
    pub category: Option<String>,
    /// Free-text detail field holding dates, shift markers and quantities.
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_row_is_all_blank() {
        let row = LedgerRow::default();
        assert!(row.email.is_none());
        assert!(row.benefit_type.is_none());
        assert!(row.detail.is_none());
    }
}
