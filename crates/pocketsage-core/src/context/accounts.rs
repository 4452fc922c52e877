use crate::store::AccountInfo;

/// Outcome of resolving a question's account reference against the derived
/// account set. Ambiguity is a first-class result; callers list the
/// candidates and ask the user rather than guessing.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountMatch {
    NotFound,
    Resolved(AccountInfo),
    Ambiguous(Vec<AccountInfo>),
}

/// Resolves a mask or name fragment to an account. Cascade: exact or suffix
/// mask match first, then case-insensitive substring match on names, then the
/// deduplicated union of both match sets.
pub fn resolve_account(reference: &str, accounts: &[AccountInfo]) -> AccountMatch {
    if accounts.is_empty() {
        return AccountMatch::NotFound;
    }

    let needle = reference.trim().to_lowercase();
    if needle.is_empty() {
        return AccountMatch::NotFound;
    }

    let mask_matches: Vec<&AccountInfo> = accounts
        .iter()
        .filter(|account| {
            !account.account_mask.is_empty()
                && (account.account_mask == needle || account.account_mask.ends_with(&needle))
        })
        .collect();
    if mask_matches.len() == 1 {
        return AccountMatch::Resolved(mask_matches[0].clone());
    }

    let name_matches: Vec<&AccountInfo> = accounts
        .iter()
        .filter(|account| account.account_name.to_lowercase().contains(&needle))
        .collect();
    if name_matches.len() == 1 {
        return AccountMatch::Resolved(name_matches[0].clone());
    }

    let mut combined: Vec<AccountInfo> = Vec::new();
    for account in mask_matches.into_iter().chain(name_matches) {
        if !combined.contains(account) {
            combined.push(account.clone());
        }
    }

    match combined.len() {
        0 => AccountMatch::NotFound,
        1 => AccountMatch::Resolved(combined.remove(0)),
        _ => AccountMatch::Ambiguous(combined),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_account, AccountMatch};
    use crate::store::AccountInfo;

    fn account(name: &str, mask: &str) -> AccountInfo {
        AccountInfo {
            account_name: name.to_string(),
            account_mask: mask.to_string(),
            transaction_count: 10,
            total_spending: 100.0,
            total_income: 50.0,
        }
    }

    fn sample_accounts() -> Vec<AccountInfo> {
        vec![
            account("Main Checking", "3903"),
            account("Main", "7255"),
            account("Business", "7561"),
        ]
    }

    #[test]
    fn unique_mask_match_resolves() {
        let result = resolve_account("3903", &sample_accounts());
        assert_eq!(result, AccountMatch::Resolved(account("Main Checking", "3903")));
    }

    #[test]
    fn unique_name_fragment_resolves() {
        let result = resolve_account("business", &sample_accounts());
        assert_eq!(result, AccountMatch::Resolved(account("Business", "7561")));
    }

    #[test]
    fn shared_name_fragment_is_ambiguous() {
        // "main" is a substring of both "Main Checking" and "Main".
        match resolve_account("main", &sample_accounts()) {
            AccountMatch::Ambiguous(candidates) => assert_eq!(candidates.len(), 2),
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn unknown_reference_is_not_found() {
        assert_eq!(resolve_account("9999", &sample_accounts()), AccountMatch::NotFound);
        assert_eq!(resolve_account("savings", &sample_accounts()), AccountMatch::NotFound);
    }

    #[test]
    fn empty_account_set_is_not_found() {
        assert_eq!(resolve_account("3903", &[]), AccountMatch::NotFound);
    }

    #[test]
    fn mask_suffix_match_counts_as_exact() {
        let accounts = vec![account("Card", "00003903")];
        assert_eq!(
            resolve_account("3903", &accounts),
            AccountMatch::Resolved(account("Card", "00003903"))
        );
    }

    #[test]
    fn duplicate_mask_matches_stay_ambiguous() {
        let accounts = vec![account("Card A", "1111"), account("Card B", "1111")];
        match resolve_account("1111", &accounts) {
            AccountMatch::Ambiguous(candidates) => assert_eq!(candidates.len(), 2),
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }
}
